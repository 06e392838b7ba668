use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use image::{ImageFormat, Rgba, RgbaImage};
use log::{debug, info};

use super::bits::bits_to_bytes;
use super::error::Error;
use super::hex::write_hex;

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;
/// Pixels with an alpha above this value are lit.
pub const ALPHA_THRESHOLD: u8 = 128;
/// Rows packed into each output byte.
pub const BAND_HEIGHT: u32 = 8;

pub const DEFAULT_IMAGE_INPUT: &str = "image.png";
pub const DEFAULT_IMAGE_OUTPUT: &str = "image.hex";

/// Expected input size and the opacity cut-off for lit pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLayout {
    pub width: u32,
    pub height: u32,
    pub alpha_threshold: u8,
}

impl ImageLayout {
    pub const DISPLAY: ImageLayout = ImageLayout {
        width: DISPLAY_WIDTH,
        height: DISPLAY_HEIGHT,
        alpha_threshold: ALPHA_THRESHOLD,
    };

    pub fn bands(&self) -> u32 {
        (self.height + BAND_HEIGHT - 1) / BAND_HEIGHT
    }

    /// Size of the packed bitmap in bytes.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.bands() as usize
    }

    pub fn is_lit(&self, pixel: &Rgba<u8>) -> bool {
        pixel[3] > self.alpha_threshold
    }
}

impl Default for ImageLayout {
    fn default() -> Self {
        Self::DISPLAY
    }
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// PNG image to convert.
    pub input: PathBuf,
    /// Hex text file to write. Any existing file is overwritten.
    pub output: PathBuf,
    pub layout: ImageLayout,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_IMAGE_INPUT),
            output: PathBuf::from(DEFAULT_IMAGE_OUTPUT),
            layout: ImageLayout::default(),
        }
    }
}

/// Packs `image` into one byte per column of each 8-row band, bands top to
/// bottom and columns left to right. The top row of a band is the most
/// significant bit.
pub fn pack_image(image: &RgbaImage, layout: &ImageLayout) -> Result<Vec<u8>, Error> {
    let (width, height) = image.dimensions();
    if (width, height) != (layout.width, layout.height) {
        return Err(Error::Dimensions {
            width,
            height,
            expected_width: layout.width,
            expected_height: layout.height,
        });
    }

    let mut bytes = Vec::with_capacity(layout.byte_len());
    for y in (0..height).step_by(BAND_HEIGHT as usize) {
        let band = y..(y + BAND_HEIGHT).min(height);
        for x in 0..width {
            let bits = band
                .clone()
                .map(|row| layout.is_lit(image.get_pixel(x, row)))
                .collect::<Vec<_>>();
            bytes.extend(bits_to_bytes(&bits));
        }
    }

    Ok(bytes)
}

pub fn load_image(path: &Path) -> Result<RgbaImage, Error> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load(BufReader::new(file), ImageFormat::Png).map_err(|source| {
        Error::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;

    debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image.to_rgba8())
}

/// Reads the PNG named by `config`, packs it and writes the hex file.
/// Returns the number of bytes written.
pub fn convert_image(config: &ImageConfig) -> Result<usize, Error> {
    let image = load_image(&config.input)?;
    let bytes = pack_image(&image, &config.layout)?;
    write_hex(&config.output, &bytes)?;

    let lit = bytes.iter().map(|b| b.count_ones()).sum::<u32>();
    info!(
        "wrote {} bytes ({} lit pixels) to {}",
        bytes.len(),
        lit,
        config.output.display()
    );

    Ok(bytes.len())
}
