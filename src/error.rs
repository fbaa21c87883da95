//! # 错误类型模块
//!
//! 定义隐写编解码流水线的统一错误类型。
//! 每个错误都携带足够的上下文（所需容量与可用容量、声明长度与实际长度），
//! 调用方无需检查内部状态即可诊断问题。

use thiserror::Error;

/// 隐写编解码流水线可能产生的全部错误。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 载体容量不足。在修改任何像素之前检查并报告，嵌入整体中止。
    #[error(
        "Not enough capacity in the carrier image to hold the payload. \nRequired: {required} bytes, Available: {available} bytes"
    )]
    PayloadTooLarge { required: usize, available: usize },

    /// 提取出的帧不完整：帧头缺失，或声明的长度超出了实际可用的数据。
    #[error("The embedded frame is corrupt. \nNeeded: {needed} bytes, Available: {available} bytes")]
    FrameCorrupt { needed: usize, available: usize },

    /// 解密失败。与 [`StegoError::FrameCorrupt`] 相区分，
    /// 便于调用方提示用户换一个密码重试，而不是误判为文件损坏。
    #[error(
        "Decryption failed. \nThe password may be wrong, or the embedded data has been tampered with."
    )]
    DecryptionFailed,

    /// 加密原语报告了内部错误。
    #[error("Failed to encrypt the payload.")]
    EncryptionFailed,

    /// 输出容器使用有损压缩，重编码会破坏最低有效位。
    #[error(
        "Unsupported container format: {0}. \nLossy re-encoding destroys the hidden bits; use a lossless format such as PNG."
    )]
    UnsupportedContainer(String),
}
