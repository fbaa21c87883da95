//! # 帧编解码模块
//!
//! 帧是载荷的自描述封装：4 字节平台原生字节序的 `u32` 长度头，
//! 后跟载荷本体。提取方向读出的比特流长度只受图像大小约束，
//! 由帧头负责定位真实的载荷边界。

use crate::constants::LENGTH_HEADER_BYTES;
use crate::error::StegoError;

/// 为载荷本体添加 4 字节长度头。
///
/// # Errors
///
/// 本体长度超出 `u32` 可表示范围时返回 [`StegoError::PayloadTooLarge`]。
pub fn encode_frame(body: &[u8]) -> Result<Vec<u8>, StegoError> {
    let length = u32::try_from(body.len()).map_err(|_| StegoError::PayloadTooLarge {
        required: LENGTH_HEADER_BYTES + body.len(),
        available: u32::MAX as usize,
    })?;

    let mut framed = Vec::with_capacity(LENGTH_HEADER_BYTES + body.len());
    framed.extend_from_slice(&length.to_ne_bytes());
    framed.extend_from_slice(body);

    Ok(framed)
}

/// 解析帧头，返回声明长度与对应的本体切片。
///
/// 输入缓冲区允许比帧本身更长，本体之后多余的字节会被忽略。
///
/// # Errors
///
/// 缓冲区不足 4 字节，或声明长度超过剩余数据时返回 [`StegoError::FrameCorrupt`]。
pub fn decode_frame(buffer: &[u8]) -> Result<(u32, &[u8]), StegoError> {
    let [a, b, c, d, rest @ ..] = buffer else {
        return Err(StegoError::FrameCorrupt {
            needed: LENGTH_HEADER_BYTES,
            available: buffer.len(),
        });
    };

    let length = u32::from_ne_bytes([*a, *b, *c, *d]);
    let body = rest
        .get(..length as usize)
        .ok_or(StegoError::FrameCorrupt {
            needed: length as usize,
            available: rest.len(),
        })?;

    Ok((length, body))
}
