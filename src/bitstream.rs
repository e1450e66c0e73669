//! # 位流模块
//!
//! 字节与单个位之间的转换。每个字节按最高位优先展开，
//! 打包时也按相同顺序每 8 位组成一个字节。

use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, StegoError};

/// 将字节序列按最高位优先展开为 0/1 序列。
pub fn expand(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
}

/// 将 0/1 序列按最高位优先打包为字节。
///
/// # Errors
///
/// 位数不是 8 的倍数时返回 [`StegoError::Format`]。
pub fn pack(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() as u64 % BITS_PER_BYTE != 0 {
        return Err(StegoError::Format(format!(
            "{} bits do not form whole bytes",
            bits.len()
        )));
    }

    Ok(bits
        .chunks_exact(8)
        .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect())
}
