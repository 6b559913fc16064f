use clap::builder::PossibleValue;
use clap::ValueEnum;
use image::Rgba;

const OPAQUE: u8 = 255;

/// Maps one input byte to a pixel color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ByteColorMode {
    /// Byte value becomes the intensity of all three channels.
    Greyscale,
    /// Byte bits are split 2/3/3 across the red, green and blue channels.
    Packed,
}

impl ValueEnum for ByteColorMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Greyscale, Self::Packed]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Greyscale => Some(PossibleValue::new("greyscale")),
            Self::Packed => Some(PossibleValue::new("packed")),
        }
    }
}

impl ByteColorMode {
    pub fn byte_to_color(&self, byte: u8) -> Rgba<u8> {
        match self {
            Self::Greyscale => Rgba([byte, byte, byte, OPAQUE]),
            Self::Packed => {
                let red = (byte >> 6) * 64;
                let green = ((byte >> 3) & 0b111) * 32;
                let blue = (byte & 0b111) * 32;
                Rgba([red, green, blue, OPAQUE])
            }
        }
    }
}

/// Adjusts a mapped color before it is written to the raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorTransform {
    Identity,
    Invert,
}

impl ColorTransform {
    pub fn apply(&self, color: Rgba<u8>) -> Rgba<u8> {
        match self {
            Self::Identity => color,
            Self::Invert => {
                let Rgba([red, green, blue, alpha]) = color;
                Rgba([255 - red, 255 - green, 255 - blue, alpha])
            }
        }
    }
}

/// Byte-to-color mapping composed with a post-transform, selected once
/// before encoding starts.
#[derive(Clone, Copy, Debug)]
pub struct ColorStrategy {
    pub mode: ByteColorMode,
    pub transform: ColorTransform,
}

impl ColorStrategy {
    pub fn new(mode: ByteColorMode, transform: ColorTransform) -> Self {
        ColorStrategy { mode, transform }
    }

    pub fn shade(&self, byte: u8) -> Rgba<u8> {
        self.transform.apply(self.mode.byte_to_color(byte))
    }
}
