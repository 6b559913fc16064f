use std::io::{BufReader, Read, Seek, SeekFrom, Write};

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, GrayImage, ImageEncoder, Luma, Rgba, RgbaImage};

use crate::color::{ByteColorMode, ColorStrategy, ColorTransform};
use crate::error::Error;
use crate::geometry;
use crate::{Arguments, Result};

/// Canvas holding either one grey channel or four color channels per pixel.
///
/// Greyscale rasters serialize as 8-bit L8 PNGs, color rasters as RGBA8.
pub enum Raster {
    Grey(GrayImage),
    Color(RgbaImage),
}

impl Raster {
    fn new(mode: ByteColorMode, width: u32, height: u32) -> Self {
        match mode {
            ByteColorMode::Greyscale => Self::Grey(GrayImage::new(width, height)),
            ByteColorMode::Packed => Self::Color(RgbaImage::new(width, height)),
        }
    }

    /// Greyscale colors carry the same value in all three channels, so the
    /// grey raster keeps the red one.
    fn put(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        match self {
            Self::Grey(image) => image.put_pixel(x, y, Luma([color.0[0]])),
            Self::Color(image) => image.put_pixel(x, y, color),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Grey(image) => image.dimensions(),
            Self::Color(image) => image.dimensions(),
        }
    }

    fn resample(self, width: u32, height: u32) -> Self {
        match self {
            Self::Grey(image) => {
                Self::Grey(imageops::resize(&image, width, height, FilterType::Lanczos3))
            }
            Self::Color(image) => {
                Self::Color(imageops::resize(&image, width, height, FilterType::Lanczos3))
            }
        }
    }

    fn write_png<W: Write>(&self, output: W) -> image::ImageResult<()> {
        match self {
            Self::Grey(image) => PngEncoder::new(output).write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::L8,
            ),
            Self::Color(image) => PngEncoder::new(output).write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            ),
        }
    }
}

/// Encodes a byte stream into a PNG raster, one byte per pixel in
/// raster-scan order, with optional Lanczos resampling.
pub struct RasterEncoder {
    /// Height shrink ratio handed to the dimension planner, in `[0, 1)`.
    pub ratio_pct: f64,
    /// Grey intensity for canvas pixels past the end of the input.
    pub fill: u8,
    /// Target dimensions of the final raster; `(0, 0)` means no resize.
    pub resize: (u32, u32),
    pub strategy: ColorStrategy,
}

impl RasterEncoder {
    pub fn new(strategy: ColorStrategy) -> Self {
        RasterEncoder {
            ratio_pct: 0.15,
            fill: 255,
            resize: (0, 0),
            strategy,
        }
    }

    fn should_resize(&self) -> bool {
        self.resize.0 > 0 && self.resize.1 > 0
    }

    /// Encodes a source of known length into a PNG written to `output`.
    ///
    /// The length drives the canvas plan, so the source must be seekable;
    /// use [`encode_stream`](Self::encode_stream) for anything else. The
    /// output sink sees no bytes until the full raster exists.
    pub fn encode<W, R>(&self, output: &mut W, mut input: R) -> Result<()>
    where
        W: Write,
        R: Read + Seek,
    {
        if !(0.0..1.0).contains(&self.ratio_pct) {
            return Err(Error::RatioOutOfRange(self.ratio_pct));
        }
        let size = measure(&mut input)?;
        let (width, height) = geometry::plan_dimensions(size, self.ratio_pct);
        if width == 0 || height == 0 {
            return Err(Error::InvalidGeometry(width, height, size));
        }
        log::debug!("planned {}x{} canvas for {} input bytes", width, height, size);
        let raster = self.scan_into_raster(input, width, height)?;
        let raster = if self.should_resize() {
            let (target_width, target_height) = self.resize;
            log::debug!(
                "resampling {}x{} raster to {}x{}",
                width,
                height,
                target_width,
                target_height
            );
            raster.resample(target_width, target_height)
        } else {
            raster
        };
        raster.write_png(output).map_err(Error::FailedToEncodeImage)
    }

    /// Encodes a non-seekable stream by spooling it into an unnamed
    /// temporary file first.
    ///
    /// The spool file is removed by the operating system when the handle
    /// drops, on success and on every error path.
    pub fn encode_stream<W, R>(&self, output: &mut W, mut input: R) -> Result<()>
    where
        W: Write,
        R: Read,
    {
        let mut spool = tempfile::tempfile().map_err(Error::UnableToBufferInputStream)?;
        let spooled = std::io::copy(&mut input, &mut spool)
            .map_err(Error::UnableToBufferInputStream)?;
        log::debug!("spooled {} bytes of non-seekable input", spooled);
        spool
            .seek(SeekFrom::Start(0))
            .map_err(Error::UnableToBufferInputStream)?;
        self.encode(output, spool)
    }

    fn scan_into_raster<R: Read>(&self, input: R, width: u32, height: u32) -> Result<Raster> {
        let mut raster = Raster::new(self.strategy.mode, width, height);
        // Fill pixels take the configured grey tone directly, bypassing the
        // strategy, so padding stays distinguishable from real data.
        let fill = Rgba([self.fill, self.fill, self.fill, 255]);
        let mut bytes = BufReader::new(input).bytes();
        let mut exhausted = false;
        for y in 0..height {
            for x in 0..width {
                let color = if exhausted {
                    fill
                } else {
                    match bytes.next() {
                        Some(Ok(byte)) => self.strategy.shade(byte),
                        Some(Err(error)) => return Err(Error::FailedToReadInputByte(error)),
                        None => {
                            exhausted = true;
                            fill
                        }
                    }
                };
                raster.put(x, y, color);
            }
        }
        Ok(raster)
    }
}

impl From<&Arguments> for RasterEncoder {
    fn from(value: &Arguments) -> Self {
        let transform = if value.invert {
            ColorTransform::Invert
        } else {
            ColorTransform::Identity
        };
        RasterEncoder {
            ratio_pct: value.ratio_pct,
            fill: value.fill,
            resize: value.resize,
            strategy: ColorStrategy::new(value.color_mode, transform),
        }
    }
}

fn measure<R: Seek>(input: &mut R) -> Result<u64> {
    let size = input
        .seek(SeekFrom::End(0))
        .map_err(Error::FailedToMeasureInputLength)?;
    input
        .seek(SeekFrom::Start(0))
        .map_err(Error::FailedToMeasureInputLength)?;
    Ok(size)
}
