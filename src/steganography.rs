//! # 隐写核心模块
//!
//! 将帧比特流写入像素颜色通道，以及逆向读出。
//! 两个方向严格回放同一条通道槽位顺序：像素逐行扫描，
//! 像素内通道按 R → G → B 循环，通道内位平面从 0 到 `lsb_bits - 1` 递增。

use std::time::{Duration, Instant};

use image::RgbaImage;

use crate::bitstream;
use crate::capacity;
use crate::constants::{COLOR_CHANNELS, LENGTH_HEADER_BYTES, RGBA_CHANNELS};
use crate::crypto;
use crate::error::StegoError;
use crate::frame;

/// 嵌入完成后返回给调用方的诊断信息。
#[derive(Debug)]
pub struct EmbedReport {
    pub width: u32,
    pub height: u32,
    /// 载体在当前位深下的总容量（字节）。
    pub capacity: usize,
    /// 实际写入的帧大小（字节，含长度头）。
    pub frame_bytes: usize,
    /// 实际写入的比特数。
    pub bits_written: usize,
    /// 被触碰的像素数，其余像素与载体逐位相同。
    pub pixels_touched: usize,
    pub elapsed: Duration,
}

/// 提取完成后返回给调用方的诊断信息。
#[derive(Debug)]
pub struct ExtractReport {
    pub width: u32,
    pub height: u32,
    /// 从图像读出的比特总数。
    pub bits_read: usize,
    /// 帧头声明的载荷本体大小（字节）。
    pub declared_bytes: usize,
    /// 最终交付的载荷大小（字节）。
    pub payload_bytes: usize,
    pub elapsed: Duration,
}

/// 将槽位序号换算为 (RGBA 样本下标, 位平面)。
///
/// 嵌入与提取共用此函数，两个方向的顺序因此完全一致。
fn slot_position(slot: usize, lsb_bits: usize) -> (usize, u8) {
    let per_pixel = COLOR_CHANNELS * lsb_bits;
    let pixel = slot / per_pixel;
    let within = slot % per_pixel;
    let channel = within / lsb_bits;
    let plane = (within % lsb_bits) as u8;

    (pixel * RGBA_CHANNELS + channel, plane)
}

fn write_bit(sample: u8, plane: u8, bit: u8) -> u8 {
    let mask = 1u8 << plane;
    if bit == 0 { sample & !mask } else { sample | mask }
}

fn read_bit(sample: u8, plane: u8) -> u8 {
    (sample >> plane) & 1
}

/// 将载荷嵌入载体图像，返回新的像素网格与诊断信息。
///
/// 提供密码时载荷先被加密，再做长度封帧。容量检查发生在任何像素被
/// 修改之前；失败时载体保持原样。帧之外的槽位不被写入，
/// 未触碰的像素与载体逐位相同，Alpha 通道永远保持原样。
///
/// # Errors
///
/// * [`StegoError::PayloadTooLarge`] - 帧大小超过载体容量。
/// * [`StegoError::EncryptionFailed`] - 加密原语内部错误。
pub fn embed(
    carrier: &RgbaImage,
    payload: &[u8],
    lsb_bits: u8,
    password: Option<&str>,
) -> Result<(RgbaImage, EmbedReport), StegoError> {
    let started = Instant::now();
    let (width, height) = carrier.dimensions();
    let available = capacity::payload_capacity(width, height, lsb_bits);

    let body = match password {
        Some(password) => crypto::encrypt(payload, password)?,
        None => payload.to_vec(),
    };

    let required = LENGTH_HEADER_BYTES + body.len();
    if required > available {
        return Err(StegoError::PayloadTooLarge {
            required,
            available,
        });
    }

    let framed = frame::encode_frame(&body)?;

    let mut stego = carrier.clone();
    let samples: &mut [u8] = &mut stego;
    let lsb_bits = lsb_bits as usize;

    let mut bits_written = 0usize;
    for (slot, bit) in bitstream::iter_bits(&framed).enumerate() {
        let (sample, plane) = slot_position(slot, lsb_bits);
        samples[sample] = write_bit(samples[sample], plane, bit);
        bits_written += 1;
    }

    let report = EmbedReport {
        width,
        height,
        capacity: available,
        frame_bytes: framed.len(),
        bits_written,
        pixels_touched: bits_written.div_ceil(COLOR_CHANNELS * lsb_bits),
        elapsed: started.elapsed(),
    };

    Ok((stego, report))
}

/// 从图像中提取载荷，返回载荷字节与诊断信息。
///
/// 按规范槽位顺序读出整幅图像的比特流，帧头定位真实的载荷边界，
/// 多读出的尾部比特被忽略。提供密码时在去帧之后解密。
///
/// # Errors
///
/// * [`StegoError::FrameCorrupt`] - 帧头缺失或声明长度超出可用数据。
/// * [`StegoError::DecryptionFailed`] - 密码错误或密文被篡改。
pub fn extract(
    image: &RgbaImage,
    lsb_bits: u8,
    password: Option<&str>,
) -> Result<(Vec<u8>, ExtractReport), StegoError> {
    let started = Instant::now();
    let (width, height) = image.dimensions();
    let samples: &[u8] = image.as_raw();
    let lsb_bits = lsb_bits as usize;

    let total_slots = width as usize * height as usize * COLOR_CHANNELS * lsb_bits;
    let bits = (0..total_slots).map(|slot| {
        let (sample, plane) = slot_position(slot, lsb_bits);
        read_bit(samples[sample], plane)
    });
    let recovered = bitstream::collect_bytes(bits);

    let (declared, body) = frame::decode_frame(&recovered)?;
    let payload = match password {
        Some(password) => crypto::decrypt(body, password)?,
        None => body.to_vec(),
    };

    let report = ExtractReport {
        width,
        height,
        bits_read: total_slots,
        declared_bytes: declared as usize,
        payload_bytes: payload.len(),
        elapsed: started.elapsed(),
    };

    Ok((payload, report))
}
