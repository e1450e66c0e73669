//! # bitplane_hide 库
//!
//! 本库包含单位平面隐写工具的核心逻辑：像素访问、位编解码，
//! 以及命令行工具使用的参数定义和命令处理。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod pixels;
pub mod steganography;

pub use config::{BitIndex, Channel, ChannelTarget, StegoConfig};
pub use error::StegoError;
pub use pixels::PixelGrid;
pub use steganography::{capacity_bits, embed, extract};
