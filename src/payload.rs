//! # 载荷来源模块
//!
//! 载荷可以来自文件、内联文本或原始字节。三种来源在进入核心编解码器
//! 之前统一解析为单一的字节缓冲区。

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// 载荷的三种来源。
#[derive(Debug, Clone)]
pub enum PayloadSource {
    /// 从文件读取原始字节。
    File(PathBuf),
    /// 内联文本，按 UTF-8 编码。
    Text(String),
    /// 已经就绪的原始字节（库调用方使用）。
    Bytes(Vec<u8>),
}

impl PayloadSource {
    /// 将载荷来源解析为字节缓冲区。
    ///
    /// # Errors
    ///
    /// 文件来源无法读取时返回错误。
    pub fn resolve(self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => fs::read(&path).with_context(|| {
                format!(
                    "Unable to read payload file: {}",
                    path.to_string_lossy().red().bold()
                )
            }),
            Self::Text(text) => Ok(text.into_bytes()),
            Self::Bytes(bytes) => Ok(bytes),
        }
    }
}
