//! Converts `monogram-bitmap.json`, a bitfontmaker2 export, into `font.hex`.

use std::process;

use fpga_bitmap::{convert_font, FontConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FontConfig::default();
    if let Err(err) = convert_font(&config) {
        log::error!("font conversion failed: {}", err);
        process::exit(1);
    }
}
