//! # 嵌入配置模块
//!
//! 位索引与目标通道集合在嵌入和提取时必须一致。
//! 它们以显式参数的形式传入核心函数，而不是进程级常量；
//! 调用方负责在两端使用相同的配置，载体中不会记录这些值。

use crate::constants::DEFAULT_BIT_INDEX;
use crate::error::{Result, StegoError};
use clap::ValueEnum;

/// 可被改写的颜色通道。Alpha 不在其中，因此永远不会被修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Channel {
    #[value(name = "r", alias = "red")]
    Red,
    #[value(name = "g", alias = "green")]
    Green,
    #[value(name = "b", alias = "blue")]
    Blue,
}

impl Channel {
    /// 该通道在 RGBA 像素中的下标。
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// 参与嵌入的通道集合，始终按 R、G、B 的顺序排列且不重复。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTarget {
    channels: Vec<Channel>,
}

impl ChannelTarget {
    /// 由任意顺序的通道列表构造，重复项会被合并。
    ///
    /// # Errors
    ///
    /// 列表为空时返回 [`StegoError::InvalidConfig`]。
    pub fn new(channels: &[Channel]) -> Result<Self> {
        let mut channels = channels.to_vec();
        channels.sort_unstable();
        channels.dedup();

        if channels.is_empty() {
            return Err(StegoError::InvalidConfig(
                "at least one target channel is required".to_string(),
            ));
        }

        Ok(Self { channels })
    }

    /// 仅红色通道，这是默认配置。
    pub fn red_only() -> Self {
        Self {
            channels: vec![Channel::Red],
        }
    }

    /// 红、绿、蓝三个通道。
    pub fn rgb() -> Self {
        Self {
            channels: vec![Channel::Red, Channel::Green, Channel::Blue],
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// 每个像素可承载的位数。
    pub fn bits_per_pixel(&self) -> usize {
        self.channels.len()
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}

impl Default for ChannelTarget {
    fn default() -> Self {
        Self::red_only()
    }
}

/// 每个目标通道字节中被改写的位 (0 为最低有效位)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitIndex(u8);

impl BitIndex {
    pub const LSB: BitIndex = BitIndex(0);

    /// # Errors
    ///
    /// `index` 大于 7 时返回 [`StegoError::InvalidConfig`]。
    pub fn new(index: u8) -> Result<Self> {
        if index > 7 {
            return Err(StegoError::InvalidConfig(format!(
                "bit index {index} is outside 0..=7"
            )));
        }
        Ok(Self(index))
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// 用 `bit` 覆盖 `value` 的目标位，其余位保持不变。
    pub const fn write(self, value: u8, bit: u8) -> u8 {
        (value & !(1 << self.0)) | ((bit & 1) << self.0)
    }

    /// 读取 `value` 的目标位。
    pub const fn read(self, value: u8) -> u8 {
        (value >> self.0) & 1
    }
}

impl Default for BitIndex {
    fn default() -> Self {
        Self(DEFAULT_BIT_INDEX)
    }
}

/// 一次嵌入/提取所使用的完整配置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StegoConfig {
    pub bit_index: BitIndex,
    pub channels: ChannelTarget,
}

impl StegoConfig {
    pub fn new(bit_index: BitIndex, channels: ChannelTarget) -> Self {
        Self {
            bit_index,
            channels,
        }
    }
}
