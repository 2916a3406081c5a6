/// reads a big endian INT8 column value
pub fn read_i64(bytes: &[u8]) -> Option<i64> {
    let array: [u8; 8] = bytes.try_into().ok()?;

    Some(i64::from_be_bytes(array))
}
