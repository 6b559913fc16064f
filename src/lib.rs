use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use error::Error;

use color::ByteColorMode;
use encoder::RasterEncoder;

mod cli;
pub mod color;
pub mod encoder;
mod error;
pub mod geometry;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: Option<PathBuf>,
    output_file: PathBuf,
    decode: bool,
    color_mode: ByteColorMode,
    invert: bool,
    resize: (u32, u32),
    ratio_pct: f64,
    fill: u8,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.to_string_lossy().into_owned(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.to_string_lossy().into_owned(), e)
        })
}

/// Renders the configured input into a PNG raster at the output path.
///
/// Files are read in place; standard input is spooled into a temporary
/// file first so its length is known before the scan begins.
pub fn render_to_png(arguments: &Arguments) -> Result<()> {
    if arguments.decode {
        return Err(Error::DecodeNotImplemented);
    }
    let output_file = open_output_file(&arguments.output_file)?;
    let mut output_writer = BufWriter::new(&output_file);
    let raster_encoder = RasterEncoder::from(arguments);
    match &arguments.input_file {
        Some(path) => {
            let input_file = open_input_file(path)?;
            raster_encoder.encode(&mut output_writer, input_file)?;
        }
        None => {
            raster_encoder.encode_stream(&mut output_writer, io::stdin().lock())?;
        }
    }
    output_writer.flush().map_err(Error::FailedToFlushOutput)
}
