//! # 像素访问模块
//!
//! 把解码后的图像抽象为按行优先寻址的 RGBA (每通道 8 位) 像素网格。
//! 图像文件格式的细节全部交给 `image` crate 处理；
//! 其余模块只依赖"无损、8 位、4 通道"这一约定。

use crate::error::{Result, StegoError};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// 可以逐通道精确保存像素值的输出格式。
pub const LOSSLESS_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];

/// 尺寸在加载后固定不变的 RGBA8 像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    buffer: RgbaImage,
}

impl PixelGrid {
    /// 创建一个所有通道均为 0 的网格。
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: RgbaImage::new(width, height),
        }
    }

    /// 解码任意已启用格式的图像字节，并统一转换为 RGBA8。
    ///
    /// # Errors
    ///
    /// 字节不是可识别的图像时返回 [`StegoError::Decode`]。
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).map_err(StegoError::Decode)?;
        Ok(Self {
            buffer: image.into_rgba8(),
        })
    }

    /// 以 `format` 编码网格。只接受无损格式，保证每个通道值原样写出。
    ///
    /// # Errors
    ///
    /// * 格式不在无损列表中时返回 [`StegoError::UnsupportedFormat`]。
    /// * 编码器失败时返回 [`StegoError::Encode`]。
    pub fn save(&self, format: ImageFormat) -> Result<Vec<u8>> {
        if !is_lossless(format) {
            return Err(StegoError::UnsupportedFormat { format });
        }

        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(self.buffer.clone())
            .write_to(&mut out, format)
            .map_err(StegoError::Encode)?;
        Ok(out.into_inner())
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// 像素总数。
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// 读取 `(x, y)` 处的 `[R, G, B, A]`。
    ///
    /// # Errors
    ///
    /// 坐标越界时返回 [`StegoError::Index`]。
    pub fn get(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        self.check_bounds(x, y)?;
        Ok(self.buffer.get_pixel(x, y).0)
    }

    /// 写入 `(x, y)` 处的 `[R, G, B, A]`。
    ///
    /// # Errors
    ///
    /// 坐标越界时返回 [`StegoError::Index`]。
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        self.check_bounds(x, y)?;
        self.buffer.put_pixel(x, y, Rgba(rgba));
        Ok(())
    }

    /// 按行优先顺序 (y 在外层，x 在内层) 遍历所有像素。
    pub fn pixels(&self) -> impl Iterator<Item = &[u8; 4]> + '_ {
        self.buffer.pixels().map(|pixel| &pixel.0)
    }

    /// 按行优先顺序可变地遍历所有像素。
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8; 4]> + '_ {
        self.buffer.pixels_mut().map(|pixel| &mut pixel.0)
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(StegoError::Index {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}

impl From<RgbaImage> for PixelGrid {
    fn from(buffer: RgbaImage) -> Self {
        Self { buffer }
    }
}

/// `format` 是否能无损保存 RGBA8 像素。
pub fn is_lossless(format: ImageFormat) -> bool {
    LOSSLESS_FORMATS.contains(&format)
}
