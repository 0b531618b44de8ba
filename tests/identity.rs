use contest_rng::{RandomError, StreamId};

#[test]
fn empty_label_is_test_id() {
    let id = StreamId::new("", 0xDEAD_BEEF).unwrap();
    assert_eq!(id.nonce(), 0xDEAD_BEEF);
}

#[test]
fn label_bytes_are_shifted_by_bits() {
    // 'f' = 0x66, 'o' = 0x6f
    let id = StreamId::new("foo", 0).unwrap();
    let expected = (0x66u64 << 4) | (0x6fu64 << 5) | (0x6fu64 << 6);

    assert_eq!(id.nonce(), expected);
}

#[test]
fn label_overlaps_test_id() {
    let id = StreamId::new("foo", 123).unwrap();
    let expected = 123 | (0x66u64 << 4) | (0x6fu64 << 5) | (0x6fu64 << 6);

    assert_eq!(id.nonce(), expected);
    assert!(id.nonce() < 1 << 13);
}

#[test]
fn four_byte_label_reaches_bit_14() {
    let id = StreamId::new([0xff; 4], 0).unwrap();
    let expected = (0xffu64 << 4) | (0xffu64 << 5) | (0xffu64 << 6) | (0xffu64 << 7);

    assert_eq!(id.nonce(), expected);
    assert_eq!(id.nonce(), 0x7ff0);
}

#[test]
fn rejects_long_label() {
    assert_eq!(
        StreamId::new("abcde", 1),
        Err(RandomError::LabelTooLong { len: 5 })
    );
}

#[test]
fn rejects_zero_byte() {
    assert_eq!(
        StreamId::new(b"ab\0d", 1),
        Err(RandomError::ZeroByteInLabel { position: 2 })
    );
}

#[test]
fn keeps_label_and_test_id() {
    let id = StreamId::new("tree", 9).unwrap();
    assert_eq!(id.label(), b"tree");
    assert_eq!(id.test_id(), 9);
}
