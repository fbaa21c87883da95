/// 长度帧头占用的字节数。
/// 载荷长度以平台原生字节序的 `u32` 形式存放在帧的最前面，
/// 提取方向依靠它在多读出的比特流中定位真实的载荷边界。
pub const LENGTH_HEADER_BYTES: usize = 4;

/// 每个像素参与隐写的颜色通道数 (R, G, B)。
/// Alpha 通道永远不会被修改。
pub const COLOR_CHANNELS: usize = 3;

/// RGBA 像素缓冲区中每个像素占用的样本数。
pub const RGBA_CHANNELS: usize = 4;

/// 一个字节包含的位数。
pub const BITS_PER_BYTE: usize = 8;

/// 禁止作为输出容器的有损格式扩展名。
/// 有损重编码会破坏最低有效位，嵌入结果将无法恢复。
pub const LOSSY_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
