mod bits;
mod error;
mod font;
mod glyph;
mod hex;
mod raster;

pub use error::Error;
pub use font::{
    convert_font, encode_font, parse_font, FontConfig, FontTable, GlyphRange,
    DEFAULT_FONT_INPUT, DEFAULT_FONT_OUTPUT, FIRST_CODE_POINT, LAST_CODE_POINT,
};
pub use glyph::{Glyph, ENCODED_GLYPH_LEN, GLYPH_ROWS, GLYPH_WIDTH};
pub use hex::{encode_hex, write_hex};
pub use raster::{
    convert_image, load_image, pack_image, ImageConfig, ImageLayout, ALPHA_THRESHOLD,
    BAND_HEIGHT, DEFAULT_IMAGE_INPUT, DEFAULT_IMAGE_OUTPUT, DISPLAY_HEIGHT, DISPLAY_WIDTH,
};
