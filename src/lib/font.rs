use std::{
    borrow::Cow,
    fs,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use hashbrown::HashMap;
use log::{debug, info, warn};
use serde_json::{Map, Value};

use super::error::Error;
use super::glyph::{Glyph, ENCODED_GLYPH_LEN};
use super::hex::write_hex;

pub const FIRST_CODE_POINT: u32 = 32;
pub const LAST_CODE_POINT: u32 = 126;

pub const DEFAULT_FONT_INPUT: &str = "monogram-bitmap.json";
pub const DEFAULT_FONT_OUTPUT: &str = "font.hex";

/// Inclusive range of code points written to the font table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRange {
    pub first: u32,
    pub last: u32,
}

impl GlyphRange {
    pub const PRINTABLE_ASCII: GlyphRange = GlyphRange {
        first: FIRST_CODE_POINT,
        last: LAST_CODE_POINT,
    };

    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub fn code_points(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }

    /// Size of the encoded table in bytes.
    pub fn encoded_len(&self) -> usize {
        self.len() * ENCODED_GLYPH_LEN
    }
}

impl Default for GlyphRange {
    fn default() -> Self {
        Self::PRINTABLE_ASCII
    }
}

#[derive(Debug, Clone)]
pub struct FontConfig {
    /// bitfontmaker2 JSON export.
    pub input: PathBuf,
    /// Hex text file to write. Any existing file is overwritten.
    pub output: PathBuf,
    pub range: GlyphRange,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_FONT_INPUT),
            output: PathBuf::from(DEFAULT_FONT_OUTPUT),
            range: GlyphRange::default(),
        }
    }
}

/// Glyphs of a bitfontmaker2 export, keyed by code point.
#[derive(Debug, Default)]
pub struct FontTable {
    pub name: Option<String>,
    glyphs: HashMap<u32, Glyph>,
}

impl FontTable {
    pub fn new() -> Self {
        Self {
            name: None,
            glyphs: HashMap::new(),
        }
    }

    /// Builds a table from a decoded bitfontmaker2 object.
    ///
    /// Keys that are not decimal code points are editor metadata and are
    /// skipped. A glyph whose value is not an array is blank, and array
    /// elements that are not numbers read as 0.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut table = Self::new();

        for (key, value) in map {
            let code_point = match parse_code_point(&key) {
                Some(code_point) => code_point,
                None => {
                    if key == "name" {
                        table.name = value.as_str().map(str::to_owned);
                    }
                    debug!("skipping metadata key {:?}", key);
                    continue;
                }
            };

            let rows = match value {
                Value::Array(values) => parse_rows(code_point, &values),
                other => {
                    warn!(
                        "glyph {} is {}, not an array; treating it as blank",
                        code_point, other
                    );
                    Vec::new()
                }
            };

            table.glyphs.insert(code_point, Glyph::new(code_point, rows));
        }

        table
    }

    fn contains(&self, code_point: &u32) -> bool {
        self.glyphs.contains_key(code_point)
    }

    /// The glyph for `code_point`, or a blank one if the table has none.
    pub fn glyph(&self, code_point: u32) -> Cow<'_, Glyph> {
        match self.glyphs.get(&code_point) {
            Some(glyph) => Cow::Borrowed(glyph),
            None => Cow::Owned(Glyph::blank(code_point)),
        }
    }

    fn len(&self) -> usize {
        self.glyphs.len()
    }
}

// Only the canonical decimal spelling names a glyph, so "065" and "+65" are
// metadata like any other key.
fn parse_code_point(key: &str) -> Option<u32> {
    key.parse::<u32>()
        .ok()
        .filter(|code_point| code_point.to_string() == key)
}

fn parse_rows(code_point: u32, values: &[Value]) -> Vec<u32> {
    values
        .iter()
        .enumerate()
        .map(|(y, value)| {
            let row = value
                .as_i64()
                .map(|row| row as u32)
                .or_else(|| value.as_u64().map(|row| row as u32))
                .or_else(|| value.as_f64().map(float_row));

            row.unwrap_or_else(|| {
                warn!(
                    "glyph {} row {} is {}, not a number; treating it as 0",
                    code_point, y, value
                );
                0
            })
        })
        .collect()
}

// Rows are bitmasks, so a number like `24.0` or `1e1` is truncated toward
// zero and wrapped to 32 bits. Negative rows keep their two's complement low
// bits.
fn float_row(row: f64) -> u32 {
    if !row.is_finite() {
        return 0;
    }

    (row.trunc() % 4_294_967_296.0) as i64 as u32
}

/// Decodes a bitfontmaker2 JSON export read from `path`.
pub fn parse_font(path: &Path, text: &str) -> Result<FontTable, Error> {
    let value = serde_json::from_str::<Value>(text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(FontTable::from_map(map)),
        _ => Err(Error::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Encodes every glyph of `range` in ascending order, blank glyphs included.
pub fn encode_font(table: &FontTable, range: &GlyphRange) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(range.encoded_len());
    for code_point in range.code_points() {
        bytes.extend_from_slice(&table.glyph(code_point).to_vertical());
    }

    bytes
}

/// Reads the font table named by `config`, encodes it and writes the hex
/// file. Returns the number of bytes written.
pub fn convert_font(config: &FontConfig) -> Result<usize, Error> {
    let text = fs::read_to_string(&config.input).map_err(|source| Error::Read {
        path: config.input.clone(),
        source,
    })?;
    let table = parse_font(&config.input, &text)?;

    let missing = config
        .range
        .code_points()
        .filter(|code_point| !table.contains(code_point))
        .count();
    debug!(
        "{} glyphs in {}, {} of {} in range missing",
        table.len(),
        config.input.display(),
        missing,
        config.range.len()
    );

    let bytes = encode_font(&table, &config.range);
    write_hex(&config.output, &bytes)?;

    info!(
        "wrote {} glyphs of {} ({} bytes) to {}",
        config.range.len(),
        table.name.as_deref().unwrap_or("unnamed font"),
        bytes.len(),
        config.output.display()
    );

    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::hex::decode_hex;
    use serde_json::json;
    use tempdir::TempDir;

    fn table(value: Value) -> FontTable {
        match value {
            Value::Object(map) => FontTable::from_map(map),
            _ => panic!("fixture is not an object"),
        }
    }

    fn glyph_bytes(bytes: &[u8], range: &GlyphRange, code_point: u32) -> Vec<u8> {
        let start = (code_point - range.first) as usize * ENCODED_GLYPH_LEN;
        bytes[start..start + ENCODED_GLYPH_LEN].to_vec()
    }

    #[test]
    fn it_has_printable_ascii_range() {
        let range = GlyphRange::default();
        assert_eq!(95, range.len());
        assert_eq!(1520, range.encoded_len());
        assert_eq!(Some(32), range.code_points().next());
        assert_eq!(Some(126), range.code_points().last());
    }

    #[test]
    fn it_handles_empty_range() {
        let range = GlyphRange::new(10, 9);
        assert_eq!(0, range.len());
        assert!(encode_font(&FontTable::new(), &range).is_empty());
    }

    #[test]
    fn it_encodes_golden_letter_a() {
        let font = table(json!({
            "65": [0x18, 0x24, 0x42, 0x42, 0x7E, 0x42, 0x42, 0x00, 0, 0, 0, 0, 0, 0, 0, 0]
        }));
        let range = GlyphRange::default();
        let bytes = encode_font(&font, &range);

        assert_eq!(1520, bytes.len());
        assert_eq!(
            vec![
                0x00, 0x00, 0x7C, 0x00, 0x12, 0x00, 0x11, 0x00, 0x11, 0x00, 0x12, 0x00, 0x7C,
                0x00, 0x00, 0x00,
            ],
            glyph_bytes(&bytes, &range, 65)
        );
    }

    #[test]
    fn it_emits_zeros_for_missing_glyphs() {
        let font = table(json!({ "65": [0xFF] }));
        let range = GlyphRange::default();
        let bytes = encode_font(&font, &range);

        for code_point in range.code_points().filter(|c| *c != 65) {
            assert_eq!(
                vec![0u8; ENCODED_GLYPH_LEN],
                glyph_bytes(&bytes, &range, code_point),
                "code point {}",
                code_point
            );
        }
        assert_ne!(vec![0u8; ENCODED_GLYPH_LEN], glyph_bytes(&bytes, &range, 65));
    }

    #[test]
    fn it_returns_blank_glyph_for_missing_code_point() {
        let font = FontTable::new();
        let glyph = font.glyph(90);
        assert_eq!(90, glyph.code_point);
        assert!(glyph.is_blank());
        assert!(!font.contains(&90));
    }

    #[test]
    fn it_skips_metadata_keys() {
        let font = table(json!({
            "name": "monogram",
            "copy": "datagoblin",
            "letterspace": "64",
            "065": [0xFF],
            "+66": [0xFF],
            "33": [0x08, 0x08]
        }));

        assert_eq!(1, font.len());
        assert!(font.contains(&33));
        assert!(!font.contains(&65));
        assert!(!font.contains(&66));
        assert_eq!(Some("monogram"), font.name.as_deref());
    }

    #[test]
    fn it_treats_malformed_glyphs_leniently() {
        let font = table(json!({
            "65": "not rows",
            "66": [0x01, "x", null, 0x01],
            "67": [-1]
        }));

        assert!(font.glyph(65).is_blank());
        assert_eq!(vec![0x01u32, 0, 0, 0x01], font.glyph(66).rows);
        assert_eq!(0x01, font.glyph(67).column(0, 0));
        assert_eq!(0x01, font.glyph(67).column(7, 0));
    }

    #[test]
    fn it_reads_rows_written_as_floats() {
        let font = table(json!({
            "65": [24.0, 1e1, 255.9, -1.0, 4294967320.0],
            "66": [24.0]
        }));

        assert_eq!(vec![0x18u32, 10, 255, 0xFFFF_FFFF, 0x18], font.glyph(65).rows);
        assert_eq!(0x01, font.glyph(66).column(3, 0));
        assert_eq!(0x01, font.glyph(66).column(4, 0));
        assert_eq!(0x00, font.glyph(66).column(0, 0));
    }

    #[test]
    fn it_ignores_glyphs_outside_range() {
        let font = table(json!({ "200": [0xFF], "31": [0xFF] }));
        let bytes = encode_font(&font, &GlyphRange::default());
        assert!(bytes.iter().all(|b| *b == 0));
    }

    #[test]
    fn it_parses_bitfontmaker_export() {
        let path = Path::new("assets/monogram-bitmap.json");
        let text = include_str!("../../assets/monogram-bitmap.json");
        let font = parse_font(path, text).unwrap();

        assert_eq!(Some("monogram-sample"), font.name.as_deref());
        assert_eq!(4, font.len());
        assert!(font.glyph(32).is_blank());
        assert_eq!(0x7C, font.glyph(65).column(1, 0));

        // descender of 'g' lands in the lower half
        let g = font.glyph(103).to_vertical();
        assert_eq!(0x02, g[2 * 2 + 1]);
        assert_eq!(0x01, g[2 * 5 + 1]);
    }

    #[test]
    fn it_rejects_invalid_json() {
        match parse_font(Path::new("broken.json"), "{\"65\": [1, 2") {
            Err(Error::Json { path, .. }) => assert_eq!(Path::new("broken.json"), path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn it_rejects_non_object_json() {
        match parse_font(Path::new("list.json"), "[[1, 2, 3]]") {
            Err(Error::NotAnObject { path }) => assert_eq!(Path::new("list.json"), path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn it_converts_font_file() {
        let dir = TempDir::new("fpga-bitmap").unwrap();
        let config = FontConfig {
            input: dir.path().join("font.json"),
            output: dir.path().join("font.hex"),
            ..Default::default()
        };
        fs::write(
            &config.input,
            json!({ "name": "test", "65": [0x18, 0x24, 0x42, 0x42, 0x7E, 0x42, 0x42] }).to_string(),
        )
        .unwrap();

        assert_eq!(1520, convert_font(&config).unwrap());

        let text = fs::read_to_string(&config.output).unwrap();
        assert_eq!(1520, text.split(' ').count());
        assert!(!text.ends_with(' '));

        let bytes = decode_hex(&text);
        assert_eq!(
            vec![
                0x00, 0x00, 0x7C, 0x00, 0x12, 0x00, 0x11, 0x00, 0x11, 0x00, 0x12, 0x00, 0x7C,
                0x00, 0x00, 0x00,
            ],
            glyph_bytes(&bytes, &config.range, 65)
        );
    }

    #[test]
    fn it_reports_missing_input() {
        let dir = TempDir::new("fpga-bitmap").unwrap();
        let config = FontConfig {
            input: dir.path().join("missing.json"),
            output: dir.path().join("font.hex"),
            ..Default::default()
        };

        match convert_font(&config) {
            Err(Error::Read { path, .. }) => assert_eq!(config.input, path),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!config.output.exists());
    }

    #[test]
    fn it_keeps_previous_output_on_parse_failure() {
        let dir = TempDir::new("fpga-bitmap").unwrap();
        let config = FontConfig {
            input: dir.path().join("font.json"),
            output: dir.path().join("font.hex"),
            ..Default::default()
        };
        fs::write(&config.input, "not json").unwrap();
        fs::write(&config.output, "00 01").unwrap();

        assert!(convert_font(&config).is_err());
        assert_eq!("00 01", fs::read_to_string(&config.output).unwrap());
    }
}
