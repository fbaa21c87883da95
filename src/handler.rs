//! # 命令处理逻辑模块
//!
//! 包含处理 `embed` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::capacity;
use crate::cli::{EmbedArgs, ExtractArgs};
use crate::constants::LOSSY_EXTENSIONS;
use crate::error::StegoError;
use crate::payload::PayloadSource;
use crate::steganography;
use anyhow::{Context, Result};
use colored::Colorize;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// 处理 'Embed' 命令的执行逻辑。
///
/// 负责读取载体图像与载荷、在修改任何像素之前完成容量检查、
/// 调用核心嵌入算法，最后将结果图像写入目标路径并报告诊断信息。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与嵌入参数的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出路径指向有损容器 (如 JPEG)。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取载体图像或载荷。
/// * 载体容量不足以容纳帧。
/// * 无法写入到目标图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_embed_dest(&args.image));

    ensure_lossless_container(&dest)?;
    ensure_writable(&dest, args.force)?;

    let dynamic = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let has_alpha = dynamic.color().has_alpha();
    let carrier = dynamic.to_rgba8();

    let source = match (args.file, args.text) {
        (Some(path), _) => PayloadSource::File(path),
        (None, Some(text)) => PayloadSource::Text(text),
        (None, None) => anyhow::bail!("Either --file or --text must be supplied."),
    };
    let payload = source.resolve()?;

    let active_bits = capacity::active_lsb_count(&carrier, args.lsb_bits);
    let (stego, report) =
        steganography::embed(&carrier, &payload, args.lsb_bits, args.password.as_deref())?;

    write_stego_image(&stego, &dest, has_alpha, args.compress_level)?;

    println!(
        "Carrier: {}x{} pixels, capacity {} bytes at {} LSB bit(s), {} LSB bit(s) currently set.",
        report.width,
        report.height,
        report.capacity.to_string().green().bold(),
        args.lsb_bits,
        active_bits
    );
    println!(
        "Embedded a {} byte frame into {} pixel(s) in {:.2?}.",
        report.frame_bytes.to_string().green().bold(),
        report.pixels_touched,
        report.elapsed
    );
    println!(
        "The payload has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用核心提取算法恢复载荷，
/// 最后将载荷字节写入目标文件并报告诊断信息。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与提取参数的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 提取出的帧不完整，或解密失败。
/// * 无法写入到目标载荷文件。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_extract_dest(&args.image));

    ensure_writable(&dest, args.force)?;

    let stego = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8();

    let (payload, report) =
        steganography::extract(&stego, args.lsb_bits, args.password.as_deref())?;

    fs::write(&dest, &payload).with_context(|| {
        format!(
            "Unable to write to target payload file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Read {} bit(s) from a {}x{} image; the frame declared {} payload byte(s).",
        report.bits_read, report.width, report.height, report.declared_bytes
    );
    println!(
        "The payload has been successfully recovered and saved: {} ({} bytes in {:.2?})",
        dest.to_string_lossy().green().bold(),
        report.payload_bytes,
        report.elapsed
    );

    Ok(())
}

/// 嵌入结果的默认输出路径：与载体同目录的 `embedded_<原文件名>.png`。
fn default_embed_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .unwrap_or(OsStr::new("carrier"))
        .to_string_lossy();
    image.with_file_name(format!("embedded_{stem}.png"))
}

/// 提取结果的默认输出路径：与图像同目录的 `extracted_<原文件名>.bin`。
fn default_extract_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .unwrap_or(OsStr::new("payload"))
        .to_string_lossy();
    image.with_file_name(format!("extracted_{stem}.bin"))
}

/// 拒绝有损输出容器，有损重编码会破坏最低有效位。
fn ensure_lossless_container(dest: &Path) -> Result<()> {
    let extension = dest
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if LOSSY_EXTENSIONS.contains(&extension.as_str()) {
        return Err(StegoError::UnsupportedContainer(extension).into());
    }

    Ok(())
}

/// 覆盖保护：目标文件已存在且未指定 `--force` 时拒绝写入。
fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );

    Ok(())
}

/// 将 0-9 的压缩等级映射到 PNG 编码器的压缩档位。
fn png_compression(level: u8) -> CompressionType {
    match level {
        0..=2 => CompressionType::Fast,
        3..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// 将结果图像写入目标路径，PNG 输出按指定压缩等级编码。
///
/// 载体没有 Alpha 通道时输出转回 RGB，保持原有的颜色模式。
fn write_stego_image(
    image: &RgbaImage,
    dest: &Path,
    has_alpha: bool,
    compress_level: u8,
) -> Result<()> {
    let (width, height) = image.dimensions();
    let is_png = dest
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    let write_result = if is_png {
        let file = File::create(dest).with_context(|| {
            format!(
                "Unable to create target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;
        let encoder = PngEncoder::new_with_quality(
            BufWriter::new(file),
            png_compression(compress_level),
            FilterType::Adaptive,
        );

        if has_alpha {
            encoder.write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        } else {
            let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
            encoder.write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        }
    } else if has_alpha {
        image.save(dest)
    } else {
        DynamicImage::ImageRgba8(image.clone()).into_rgb8().save(dest)
    };

    write_result.with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })
}
