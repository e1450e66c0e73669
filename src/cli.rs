//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::config::{BitIndex, Channel, ChannelTarget, StegoConfig};
use crate::constants::DEFAULT_BIT_INDEX;
use crate::error::StegoError;
use clap::{ArgGroup, Args, Parser};
use std::path::PathBuf;

/// 一款单位平面隐写命令行工具，在无损格式图像 (如 PNG, BMP) 的指定颜色通道中隐藏或恢复任意字节。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款单位平面隐写命令行工具，在无损格式图像 (如 PNG, BMP) 的指定颜色通道中隐藏或恢复任意字节。"
)]
pub struct Cli {
    /// 输出调试日志 (也可通过 RUST_LOG 控制)。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏一段文本或一个文件的内容。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的内容。
    Recover(RecoverArgs),

    /// 查看图像在给定配置下能隐藏多少数据。
    Capacity(CapacityArgs),
}

/// 位平面配置，隐藏与恢复时必须一致。
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// 改写的位索引 (0 为最低有效位)。
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BIT_INDEX,
        value_parser = clap::value_parser!(u8).range(0..=7)
    )]
    pub bit_index: u8,

    /// 参与隐写的颜色通道，逗号分隔，例如 `r,g,b`。
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "r")]
    pub channels: Vec<Channel>,
}

impl Default for LayoutArgs {
    fn default() -> Self {
        Self {
            bit_index: DEFAULT_BIT_INDEX,
            channels: vec![Channel::Red],
        }
    }
}

impl LayoutArgs {
    /// 转换为核心使用的配置。
    pub fn to_config(&self) -> Result<StegoConfig, StegoError> {
        Ok(StegoConfig::new(
            BitIndex::new(self.bit_index)?,
            ChannelTarget::new(&self.channels)?,
        ))
    }
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["message", "text"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 直接隐藏的文本 (按 UTF-8 编码)。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 要隐藏的文件路径，按原始字节嵌入。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 缺省时为输入图像旁的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复内容后保存的输出路径。
    /// 缺省时为图像旁的 `recovered_<文件名>.txt`。
    #[arg(short, long, conflicts_with = "print")]
    pub text: Option<PathBuf>,

    /// 将恢复的内容打印到标准输出，而不是写入文件。
    #[arg(short, long)]
    pub print: bool,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,
}
