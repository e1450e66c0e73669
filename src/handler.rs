//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{
    HIDDEN_IMAGE_EXTENSION, HIDDEN_IMAGE_PREFIX, RECOVERED_TEXT_EXTENSION, RECOVERED_TEXT_PREFIX,
};
use crate::error::StegoError;
use crate::pixels::PixelGrid;
use crate::steganography::{capacity_bits, embed, extract, max_payload_len, needed_bits};
use anyhow::{Context, Result};
use colored::Colorize;
use image::ImageFormat;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和载荷、检查容量是否足够、调用核心函数嵌入载荷，
/// 最后以无损格式写出结果图像。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、载荷来源和位平面配置的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入图像，或无法读取载荷文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 输出路径的扩展名不是受支持的无损格式。
/// * 图像没有足够的容量来隐藏载荷。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let config = args.layout.to_config()?;
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_hidden_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let format = ImageFormat::from_path(&dest).with_context(|| {
        format!(
            "Unable to determine the output image format from: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    let grid = load_grid(&args.image)?;

    let payload = match (&args.message, &args.text) {
        (Some(message), _) => message.clone().into_bytes(),
        (None, Some(text)) => fs::read(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either a message or a text file must be provided."),
    };

    debug!(
        "embedding {} bytes into {}x{} image (bit index {}, channels {:?})",
        payload.len(),
        grid.width(),
        grid.height(),
        config.bit_index.get(),
        config.channels.channels()
    );

    let stego = embed(&grid, &payload, &config).map_err(|err| match err {
        StegoError::Capacity { needed, capacity } => anyhow::anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
            needed.to_string().red().bold(),
            capacity.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context(format!(
            "Failed to hide the payload in {}",
            args.image.to_string_lossy().red().bold()
        )),
    })?;

    let encoded = stego.save(format).with_context(|| {
        format!(
            "Unable to encode the output image: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&dest, encoded).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、调用核心函数提取载荷，
/// 最后将内容写入目标文件或打印到标准输出。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和位平面配置的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入图像。
/// * 图像中没有完整的长度头或载荷被截断。
/// * 输出文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let config = args.layout.to_config()?;
    let dest = (!args.print).then(|| {
        args.text
            .clone()
            .unwrap_or_else(|| default_recovered_path(&args.image))
    });
    if let Some(dest) = &dest {
        ensure_writable(dest, args.force)?;
    }

    let grid = load_grid(&args.image)?;

    let payload = extract(&grid, &config).with_context(|| {
        format!(
            "Failed to recover the hidden message from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    debug!(
        "recovered {} bytes ({} bits) from {}x{} image",
        payload.len(),
        needed_bits(payload.len()),
        grid.width(),
        grid.height()
    );

    let Some(dest) = dest else {
        match std::str::from_utf8(&payload) {
            Ok(text) => println!("{text}"),
            Err(_) => {
                println!("{}", "Extracted raw bytes (non-UTF8):".yellow().bold());
                println!("{payload:?}");
            }
        }
        return Ok(());
    };

    fs::write(&dest, &payload).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：报告图像在给定配置下的容量。
///
/// # Errors
///
/// 无法读取或解码输入图像时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let config = args.layout.to_config()?;
    let grid = load_grid(&args.image)?;

    let bits = capacity_bits(&grid, &config);
    let bytes = max_payload_len(&grid, &config);

    println!(
        "{}: {}x{} pixels, {} bits per pixel",
        args.image.to_string_lossy().bold(),
        grid.width(),
        grid.height(),
        config.channels.bits_per_pixel()
    );
    println!(
        "Capacity: {} bits, up to {} bytes of payload",
        bits.to_string().green().bold(),
        bytes.to_string().green().bold()
    );
    Ok(())
}

/// 读取并解码图像文件。
fn load_grid(path: &Path) -> Result<PixelGrid> {
    let bytes = fs::read(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    let grid = PixelGrid::load(&bytes).with_context(|| {
        format!(
            "Unable to decode image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    debug!(
        "decoded {} as {}x{} RGBA",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

/// 目标文件已存在且未指定 `force` 时拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// `image.png` -> 同目录下的 `doctored_image.png`。
pub fn default_hidden_path(image: &Path) -> PathBuf {
    sibling_with_prefix(image, HIDDEN_IMAGE_PREFIX, HIDDEN_IMAGE_EXTENSION)
}

/// `doctored_image.png` -> 同目录下的 `recovered_doctored_image.txt`。
pub fn default_recovered_path(image: &Path) -> PathBuf {
    sibling_with_prefix(image, RECOVERED_TEXT_PREFIX, RECOVERED_TEXT_EXTENSION)
}

fn sibling_with_prefix(path: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{prefix}{stem}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_sit_next_to_the_input() {
        let image = Path::new("some/dir/original.bmp");
        assert_eq!(
            default_hidden_path(image),
            PathBuf::from("some/dir/doctored_original.png")
        );
        assert_eq!(
            default_recovered_path(Path::new("some/dir/doctored_original.png")),
            PathBuf::from("some/dir/recovered_doctored_original.txt")
        );
    }
}
