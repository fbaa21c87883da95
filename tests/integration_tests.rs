use anyhow::Ok;
use image::{ImageBuffer, Rgba};
use lsb_stash::{
    cli::{EmbedArgs, ExtractArgs},
    handler::{handle_embed, handle_extract},
};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 一个辅助函数，用于构建带默认嵌入参数的 EmbedArgs
fn embed_args(image: &Path, file: &Path, dest: &Path) -> EmbedArgs {
    EmbedArgs {
        image: image.to_path_buf(),
        file: Some(file.to_path_buf()),
        text: None,
        dest: Some(dest.to_path_buf()),
        lsb_bits: 1,
        password: None,
        compress_level: 6,
        force: false,
    }
}

/// 验证从嵌入到提取的完整流程
#[test]
fn test_handle_embed_and_extract_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let stego_image_path = dir.path().join("stego.png");
    let payload_path = dir.path().join("payload.bin");
    let recovered_path = dir.path().join("recovered.bin");

    create_test_image(&original_image_path, 100, 100);
    let mut original_payload = vec![0u8; 2048];
    rand::rng().fill_bytes(&mut original_payload);
    fs::write(&payload_path, &original_payload)?;

    // 2. 测试 handle_embed
    let embed = embed_args(&original_image_path, &payload_path, &stego_image_path);
    handle_embed(embed)?;
    assert!(stego_image_path.exists(), "Stego image should be created.");

    // 3. 测试 handle_extract
    let extract = ExtractArgs {
        image: stego_image_path.clone(),
        dest: Some(recovered_path.clone()),
        lsb_bits: 1,
        password: None,
        force: false,
    };
    handle_extract(extract)?;
    assert!(
        recovered_path.exists(),
        "Recovered payload file should be created."
    );

    // 4. 验证结果
    let recovered_payload = fs::read(&recovered_path)?;
    assert_eq!(
        original_payload, recovered_payload,
        "Recovered payload must match the original."
    );

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_embed_and_extract_with_defaults() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let payload_path = dir.path().join("payload.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "Testing default path generation. 测试默认路径生成。";
    fs::write(&payload_path, original_text)?;

    // 2. 测试 handle_embed，不提供 dest 路径
    let embed = EmbedArgs {
        image: original_image_path.clone(),
        file: Some(payload_path.clone()),
        text: None,
        dest: None, // 关键：测试 None 的情况
        lsb_bits: 1,
        password: None,
        compress_level: 6,
        force: false,
    };
    handle_embed(embed)?;

    // 验证默认的隐写图像文件是否已创建
    let expected_stego_path = dir.path().join("embedded_original.png");
    assert!(
        expected_stego_path.exists(),
        "Default stego image should be created at: {:?}",
        expected_stego_path
    );

    // 3. 测试 handle_extract，不提供 dest 输出路径
    let extract = ExtractArgs {
        image: expected_stego_path, // 使用上一步生成的默认文件
        dest: None,                 // 关键：测试 None 的情况
        lsb_bits: 1,
        password: None,
        force: false,
    };
    handle_extract(extract)?;

    // 验证默认的载荷输出文件是否已创建
    let expected_recovered_path = dir.path().join("extracted_embedded_original.bin");
    assert!(
        expected_recovered_path.exists(),
        "Default recovered payload file should be created at: {:?}",
        expected_recovered_path
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&expected_recovered_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered payload from default file must match the original."
    );

    Ok(())
}

/// 验证内联文本载荷的嵌入与提取
#[test]
fn test_inline_text_payload() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let stego_path = dir.path().join("stego.png");
    let recovered_path = dir.path().join("recovered.bin");

    create_test_image(&image_path, 64, 64);
    let message = "An inline message. 一条内联消息。";

    // 2. 使用 --text 而非 --file
    let embed = EmbedArgs {
        image: image_path,
        file: None,
        text: Some(message.to_string()),
        dest: Some(stego_path.clone()),
        lsb_bits: 2,
        password: None,
        compress_level: 6,
        force: false,
    };
    handle_embed(embed)?;

    // 3. 提取并验证
    let extract = ExtractArgs {
        image: stego_path,
        dest: Some(recovered_path.clone()),
        lsb_bits: 2,
        password: None,
        force: false,
    };
    handle_extract(extract)?;

    let recovered = fs::read_to_string(&recovered_path)?;
    assert_eq!(message, recovered, "Recovered text must match the original.");

    Ok(())
}

/// 验证带密码的完整流程，以及错误密码会被确定性地拒绝
#[test]
fn test_password_round_trip_and_wrong_password() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let stego_path = dir.path().join("stego.png");
    let recovered_path = dir.path().join("recovered.bin");
    let failed_path = dir.path().join("failed.bin");

    create_test_image(&image_path, 64, 64);
    let secret = "Top secret. 绝密内容。";

    // 2. 带密码嵌入
    let embed = EmbedArgs {
        image: image_path,
        file: None,
        text: Some(secret.to_string()),
        dest: Some(stego_path.clone()),
        lsb_bits: 1,
        password: Some("correct horse".to_string()),
        compress_level: 6,
        force: false,
    };
    handle_embed(embed)?;

    // 3. 正确密码提取成功
    let extract = ExtractArgs {
        image: stego_path.clone(),
        dest: Some(recovered_path.clone()),
        lsb_bits: 1,
        password: Some("correct horse".to_string()),
        force: false,
    };
    handle_extract(extract)?;
    assert_eq!(secret, fs::read_to_string(&recovered_path)?);

    // 4. 错误密码提取失败，且不产生输出文件
    let wrong = ExtractArgs {
        image: stego_path,
        dest: Some(failed_path.clone()),
        lsb_bits: 1,
        password: Some("battery staple".to_string()),
        force: false,
    };
    let result = handle_extract(wrong);
    assert!(result.is_err(), "Extraction with a wrong password should fail.");
    if let Err(e) = result {
        assert!(e.to_string().contains("Decryption failed"));
    }
    assert!(
        !failed_path.exists(),
        "A failed extraction must not leave a partial payload behind."
    );

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let payload_path = dir.path().join("payload.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&payload_path, "some payload")?;

    // 2. 场景一：测试覆盖保护
    // 先创建一个同名的目标文件，模拟“文件已存在”的场景
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    // 构建参数，不使用 --force
    let embed_no_force = embed_args(&image_path, &payload_path, &dest_path);

    // 执行并断言操作会失败
    let result = handle_embed(embed_no_force);
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    // 构建参数，这次使用 --force
    let mut embed_with_force = embed_args(&image_path, &payload_path, &dest_path);
    embed_with_force.force = true;

    // 执行并断言操作会成功
    let result = handle_embed(embed_with_force);
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    // 验证文件确实被覆盖（内容不再是 "this is a dummy file..."）
    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证容量不足时的错误处理
#[test]
fn test_handle_embed_not_enough_capacity() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let payload_path = dir.path().join("large.bin");
    let dest_path = dir.path().join("dest.png");

    // 创建一个非常小的图片 (1 位深度下容量仅 37 字节)
    create_test_image(&image_path, 10, 10);
    // 创建一个非常大的载荷
    let large_payload = vec![0x61u8; 5000];
    fs::write(&payload_path, large_payload)?;

    // 2. 执行并断言错误
    let embed = embed_args(&image_path, &payload_path, &dest_path);
    let result = handle_embed(embed);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough capacity"));
    }
    assert!(!dest_path.exists(), "No output may be written on failure.");

    Ok(())
}

/// 验证有损输出容器会被拒绝
#[test]
fn test_lossy_destination_rejected() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let payload_path = dir.path().join("payload.txt");
    let dest_path = dir.path().join("dest.jpg");

    create_test_image(&image_path, 50, 50);
    fs::write(&payload_path, "some payload")?;

    // 2. JPEG 输出会破坏最低有效位，必须被整体拒绝
    let embed = embed_args(&image_path, &payload_path, &dest_path);
    let result = handle_embed(embed);

    assert!(result.is_err(), "A lossy destination must be rejected.");
    if let Err(e) = result {
        assert!(e.to_string().contains("Unsupported container format"));
    }
    assert!(!dest_path.exists());

    Ok(())
}
