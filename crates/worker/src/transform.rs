/// 对体征载荷执行多轮混淆，产出定长十六进制摘要
///
/// 模拟高强度加密的CPU开销：轮数线性决定计算量。同一载荷与轮数
/// 总是产出相同摘要，不同载荷或轮数产出不同摘要。
pub fn seal_vitals(payload: &[u8], rounds: u32) -> String {
    let mut state: [u64; 4] = [
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    ];

    // 先吸收长度，空载荷也能得到与轮数相关的摘要
    state[0] ^= payload.len() as u64;

    for round in 0..rounds {
        let salt = u64::from(round).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        state[3] = state[3].wrapping_add(salt).rotate_left(7);
        for (i, &byte) in payload.iter().enumerate() {
            let lane = i % 4;
            state[lane] = state[lane]
                .wrapping_add(u64::from(byte) ^ salt)
                .rotate_left(13)
                .wrapping_mul(0x0000_0100_0000_01b3);
            state[(lane + 1) % 4] ^= state[lane];
        }
    }

    state.iter().map(|s| format!("{s:016x}")).collect()
}
