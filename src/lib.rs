//! # lsb_stash 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：容量估算、长度封帧、
//! 比特到颜色通道的映射及其逆变换，以及可选的密码加密。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod frame;
pub mod handler;
pub mod payload;
pub mod steganography;
