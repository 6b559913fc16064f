use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToBufferInputStream(std::io::Error),
    FailedToMeasureInputLength(std::io::Error),
    InvalidGeometry(u32, u32, u64),
    RatioOutOfRange(f64),
    FailedToReadInputByte(std::io::Error),
    FailedToEncodeImage(image::ImageError),
    FailedToFlushOutput(std::io::Error),
    DecodeNotImplemented,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToBufferInputStream(error) => {
                write!(
                    f,
                    "Unable to buffer input stream into a temporary file: {}",
                    error
                )
            }
            Self::FailedToMeasureInputLength(error) => {
                write!(f, "Failed to measure length of the input: {}", error)
            }
            Self::InvalidGeometry(width, height, size) => {
                write!(
                    f,
                    "Planned canvas of {}x{} pixels is unusable for {} input bytes",
                    width, height, size
                )
            }
            Self::RatioOutOfRange(ratio) => {
                write!(f, "Shape ratio {} must lie in the range [0, 1)", ratio)
            }
            Self::FailedToReadInputByte(error) => {
                write!(f, "Failed to read byte from input: {}", error)
            }
            Self::FailedToEncodeImage(error) => {
                write!(f, "Failed to encode raster as PNG: {}", error)
            }
            Self::FailedToFlushOutput(error) => {
                write!(f, "Failed to flush encoded image to output: {}", error)
            }
            Self::DecodeNotImplemented => {
                write!(
                    f,
                    "Decoding a rendered PNG back into bytes is not implemented"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
