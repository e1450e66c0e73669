//! # 错误类型模块
//!
//! 定义隐写核心 (像素访问与位编解码) 可能返回的全部错误。
//! 核心从不打印日志、不重试，所有错误都在产生任何输出之前同步返回。

use image::{ImageError, ImageFormat};
use thiserror::Error;

/// 隐写核心的统一错误类型。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 载体字节不是可解码的光栅图像。
    #[error("failed to decode the carrier image: {0}")]
    Decode(#[source] ImageError),

    /// 图像编码器在写出结果时失败。
    #[error("failed to encode the image: {0}")]
    Encode(#[source] ImageError),

    /// 目标格式不能保证逐通道无损，写入会破坏嵌入的位。
    #[error("{format:?} is not a supported lossless output format")]
    UnsupportedFormat { format: ImageFormat },

    /// 嵌入所需的位数超过了载体容量。
    #[error("not enough capacity: needed {needed} bits, capacity is {capacity} bits")]
    Capacity { needed: u64, capacity: u64 },

    /// 载荷长度无法用 32 位长度头表示。
    #[error("payload of {len} bytes does not fit in a 32-bit length header")]
    PayloadTooLarge { len: usize },

    /// 位流结构不合法，例如载体不足以容纳长度头。
    #[error("malformed bitstream: {0}")]
    Format(String),

    /// 声明的载荷长度超出了载体实际可提供的位数。
    #[error("embedded message is truncated: expected {expected} bits, found {available} bits")]
    Truncation { expected: u64, available: u64 },

    /// 像素坐标越界。
    #[error("pixel ({x}, {y}) is out of bounds for a {width}x{height} image")]
    Index {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// 位索引或通道集合不合法。
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// 隐写核心使用的 `Result` 别名。
pub type Result<T> = std::result::Result<T, StegoError>;
