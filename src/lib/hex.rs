use std::{fs, path::Path};

use log::debug;

use super::error::Error;

/// Renders bytes as two lowercase hex digits each, separated by single spaces.
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes `bytes` to `path` as a hex text file, replacing any existing file.
///
/// The text is rendered in memory first so a failure never leaves a partial
/// file behind.
pub fn write_hex(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let text = encode_hex(bytes);
    debug!("writing {} bytes to {}", bytes.len(), path.display());

    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses hex text written by `write_hex` back into bytes.
#[cfg(test)]
pub(crate) fn decode_hex(text: &str) -> Vec<u8> {
    text.split_ascii_whitespace()
        .map(|token| {
            assert_eq!(2, token.len(), "hex token {:?}", token);
            u8::from_str_radix(token, 16).unwrap()
        })
        .collect()
}
