//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中嵌入或提取任意数据，支持可选的密码加密。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中嵌入或提取任意数据，支持可选的密码加密。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入) 和 extract (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中嵌入文件或内联文本。
    Embed(EmbedArgs),

    /// 从经过隐写的图像中提取隐藏的数据。
    Extract(ExtractArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 用于隐写的载体图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要嵌入的载荷文件路径，与 --text 二选一。
    #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
    pub file: Option<PathBuf>,

    /// 要嵌入的内联文本，按 UTF-8 编码。
    #[arg(short, long)]
    pub text: Option<String>,

    /// 隐写完成后，保存结果图像的输出路径。省略时保存在载体旁边。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 每个颜色通道使用的最低有效位位数。
    #[arg(short = 'b', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub lsb_bits: u8,

    /// 用于加密载荷的密码，省略时不加密。
    #[arg(short, long)]
    pub password: Option<String>,

    /// PNG 输出的压缩等级 (0-9)。
    #[arg(short = 'c', long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compress_level: u8,

    /// 覆盖已存在的输出文件。
    #[arg(long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已嵌入数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 提取后保存载荷的输出路径。省略时保存在图像旁边。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 嵌入时使用的最低有效位位数，必须与嵌入侧一致。
    #[arg(short = 'b', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub lsb_bits: u8,

    /// 嵌入时使用的密码。
    #[arg(short, long)]
    pub password: Option<String>,

    /// 覆盖已存在的输出文件。
    #[arg(long)]
    pub force: bool,
}
