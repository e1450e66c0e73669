//! # 位编解码模块
//!
//! 在像素网格的单个位平面中嵌入和提取带长度前缀的载荷。
//!
//! 位流格式：
//!
//! ```text
//! bits[0..32)       = u32 大端序载荷字节数 L，最高位优先
//! bits[32..32+8L)   = 载荷字节，每个字节最高位优先
//! ```
//!
//! 第 `k` 位写入行优先顺序中的第 `k / n` 个像素 (n 为目标通道数)，
//! 通道为 `ChannelTarget[k % n]`，位置为配置的位索引。
//! Alpha 通道和非目标通道从不修改。

use crate::bitstream;
use crate::config::{Channel, ChannelTarget, StegoConfig};
use crate::constants::{BITS_PER_BYTE, HEADER_BITS};
use crate::error::{Result, StegoError};
use crate::pixels::PixelGrid;

/// 某一位在载体中的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: u32,
    pub y: u32,
    pub channel: Channel,
}

/// 载体在给定配置下可容纳的总位数。
pub fn capacity_bits(grid: &PixelGrid, config: &StegoConfig) -> u64 {
    grid.pixel_count() * config.channels.bits_per_pixel() as u64
}

/// 嵌入 `payload_len` 字节的载荷所需的总位数 (含长度头)。
pub fn needed_bits(payload_len: usize) -> u64 {
    HEADER_BITS + BITS_PER_BYTE * payload_len as u64
}

/// 在给定配置下能嵌入的最大载荷字节数。
pub fn max_payload_len(grid: &PixelGrid, config: &StegoConfig) -> u64 {
    let body_bits = capacity_bits(grid, config).saturating_sub(HEADER_BITS);
    (body_bits / BITS_PER_BYTE).min(u64::from(u32::MAX))
}

/// 计算第 `k` 位对应的像素坐标与通道。
pub fn locate(k: u64, width: u32, target: &ChannelTarget) -> Slot {
    let per_pixel = target.bits_per_pixel() as u64;
    let pixel = k / per_pixel;
    let width = u64::from(width.max(1));

    Slot {
        x: (pixel % width) as u32,
        y: (pixel / width) as u32,
        channel: target.channels()[(k % per_pixel) as usize],
    }
}

/// 将载荷嵌入 `grid` 的副本并返回该副本，`grid` 本身不会被修改。
///
/// # Arguments
///
/// * `grid` - 载体像素网格。
/// * `payload` - 要嵌入的任意字节，允许为空。
/// * `config` - 位索引与目标通道，提取时必须使用相同的值。
///
/// # Errors
///
/// * 载荷长度超出 32 位长度头时返回 [`StegoError::PayloadTooLarge`]。
/// * 所需位数大于容量时返回 [`StegoError::Capacity`]，此时不会写入任何位。
pub fn embed(grid: &PixelGrid, payload: &[u8], config: &StegoConfig) -> Result<PixelGrid> {
    let length = u32::try_from(payload.len()).map_err(|_| StegoError::PayloadTooLarge {
        len: payload.len(),
    })?;

    let needed = needed_bits(payload.len());
    let capacity = capacity_bits(grid, config);
    if needed > capacity {
        return Err(StegoError::Capacity { needed, capacity });
    }

    let mut envelope = Vec::with_capacity(4 + payload.len());
    envelope.extend_from_slice(&length.to_be_bytes());
    envelope.extend_from_slice(payload);

    let mut bits = bitstream::expand(&envelope);
    let mut written: u64 = 0;
    let mut output = grid.clone();

    for pixel in output.pixels_mut() {
        for &channel in config.channels.channels() {
            if written >= needed {
                continue;
            }
            let Some(bit) = bits.next() else {
                return Err(StegoError::Format(format!(
                    "envelope ended after {written} of {needed} bits"
                )));
            };
            pixel[channel.index()] = config.bit_index.write(pixel[channel.index()], bit);
            written += 1;
        }
    }

    Ok(output)
}

/// 从 `grid` 中提取载荷。
///
/// 不做任何"看起来像隐写图像"的校验：对普通图像调用时，
/// 要么返回截断错误，要么返回由原始低位拼出的无意义字节。
///
/// # Errors
///
/// * 载体不足 32 位时返回 [`StegoError::Format`]。
/// * 声明的长度超出载体位数时返回 [`StegoError::Truncation`]。
pub fn extract(grid: &PixelGrid, config: &StegoConfig) -> Result<Vec<u8>> {
    let available = capacity_bits(grid, config);
    if available < HEADER_BITS {
        return Err(StegoError::Format(format!(
            "image too small for a length header: {available} of {HEADER_BITS} bits available"
        )));
    }

    let mut bits = carrier_bits(grid, config);

    let header: Vec<u8> = bits.by_ref().take(HEADER_BITS as usize).collect();
    let header = bitstream::pack(&header)?;
    let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);

    let expected = HEADER_BITS + BITS_PER_BYTE * u64::from(length);
    if expected > available {
        return Err(StegoError::Truncation {
            expected,
            available,
        });
    }

    let body: Vec<u8> = bits.take((expected - HEADER_BITS) as usize).collect();
    bitstream::pack(&body)
}

/// 按嵌入时的顺序读出载体中每个目标位。
fn carrier_bits<'a>(
    grid: &'a PixelGrid,
    config: &'a StegoConfig,
) -> impl Iterator<Item = u8> + 'a {
    grid.pixels().flat_map(move |pixel| {
        config
            .channels
            .channels()
            .iter()
            .map(move |channel| config.bit_index.read(pixel[channel.index()]))
    })
}
