pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
pub const FNV_PRIME:        u32 = 16_777_619;

/// 32-bit FNV-1a over `data`.
pub fn fnv1a_32(data: &[u8]) -> u32 {
    data.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ byte as u32).wrapping_mul(FNV_PRIME)
    })
}
