/// Packs pixels into bytes, most significant bit first.
///
/// A trailing chunk shorter than 8 pixels is padded with zero bits on the
/// low end.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|bits| {
            bits.iter()
                .enumerate()
                .filter(|(_, b)| **b)
                .map(|(i, _)| 0x80u8 >> i)
                .sum()
        })
        .collect()
}
