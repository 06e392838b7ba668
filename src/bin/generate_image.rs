//! Converts the 128x64 `image.png` into `image.hex`, 8 rows per byte.

use std::process;

use fpga_bitmap::{convert_image, ImageConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ImageConfig::default();
    if let Err(err) = convert_image(&config) {
        log::error!("image conversion failed: {}", err);
        process::exit(1);
    }
}
