/// 载荷长度头占用的位数。
/// 长度以 `u32` 大端序存储，位流中先写最高位。
pub const HEADER_BITS: u64 = 32;

/// 每个载荷字节展开后的位数。
pub const BITS_PER_BYTE: u64 = 8;

/// 默认改写的位索引 (0 为最低有效位)。
pub const DEFAULT_BIT_INDEX: u8 = 0;

/// `hide` 未指定输出路径时，结果图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// `hide` 默认输出使用的扩展名。PNG 总是无损的。
pub const HIDDEN_IMAGE_EXTENSION: &str = "png";

/// `recover` 未指定输出路径时，恢复文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";

/// `recover` 默认输出使用的扩展名。
pub const RECOVERED_TEXT_EXTENSION: &str = "txt";
