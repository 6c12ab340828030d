use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"gridchain");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b'g');
    b.write_bytes(b"ridchain");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_integer_writes_are_little_endian_bytes() {
    let mut a = Fnv1a64::new_default();
    a.write_u32(0x0403_0201);
    a.write_u64(7);
    let mut b = Fnv1a64::new_default();
    b.write_bytes(&[1, 2, 3, 4]);
    b.write_bytes(&[7, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn empty_input_keeps_the_offset_basis() {
    assert_eq!(Fnv1a64::new_default().finish(), Fnv1a64::OFFSET_BASIS);
}
