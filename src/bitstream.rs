//! # 比特流模块
//!
//! 嵌入与提取共用的规范比特流表示：字节按顺序展开为比特，
//! 字节内部从最高有效位开始。两个方向使用同一套展开与重组规则，
//! 写入顺序因此可以被提取方向精确回放。

/// 将字节序列展开为比特序列（每个元素为 0 或 1），字节内最高有效位在前。
pub fn iter_bits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
}

/// 将比特序列重组为字节，字节内最高有效位在前。
///
/// 末尾不足 8 位的部分会被丢弃。帧解码器只按帧头声明的长度取用数据，
/// 因此提取时多读出的尾部比特不会影响结果。
pub fn collect_bytes<I>(bits: I) -> Vec<u8>
where
    I: IntoIterator<Item = u8>,
{
    let mut bytes = Vec::new();
    let mut acc = 0u8;
    let mut filled = 0u8;

    for bit in bits {
        acc = (acc << 1) | (bit & 1);
        filled += 1;
        if filled == 8 {
            bytes.push(acc);
            acc = 0;
            filled = 0;
        }
    }

    bytes
}
