//! # 容量估算模块
//!
//! 在修改任何像素之前，根据图像尺寸与使用的最低有效位位数
//! 计算载体能容纳的载荷字节数。

use image::RgbaImage;

use crate::constants::{BITS_PER_BYTE, COLOR_CHANNELS};

/// 计算图像在给定位深下能容纳的帧字节数：`W × H × 3 × lsb_bits / 8` 向下取整。
///
/// `lsb_bits` 为 0 时返回 1，作为退化情况的保护，避免除零。
pub fn payload_capacity(width: u32, height: u32, lsb_bits: u8) -> usize {
    if lsb_bits == 0 {
        return 1;
    }

    width as usize * height as usize * COLOR_CHANNELS * lsb_bits as usize / BITS_PER_BYTE
}

/// 统计载体 R, G, B 通道中当前处于置位状态的最低有效位数量。
///
/// 仅用于诊断输出，不参与容量判断。
pub fn active_lsb_count(image: &RgbaImage, lsb_bits: u8) -> u64 {
    let mask = ((1u16 << lsb_bits.min(8)) - 1) as u8;

    image
        .pixels()
        .map(|pixel| {
            pixel.0[..COLOR_CHANNELS]
                .iter()
                .map(|channel| u64::from((channel & mask).count_ones()))
                .sum::<u64>()
        })
        .sum()
}
