use std::path::Path;

use anyhow::{Context, Result};

/// Read a record from `path`, either as raw bytes or as hex text.
///
/// Hex input may contain whitespace and an optional `0x` prefix.
pub fn read_record(path: &Path, is_hex: bool) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if !is_hex {
        return Ok(bytes);
    }
    let text = std::str::from_utf8(&bytes)
        .with_context(|| format!("{} is not valid hex text", path.display()))?;
    decode_hex(text).with_context(|| format!("{} is not valid hex text", path.display()))
}

pub fn write_record(path: &Path, raw: &[u8], as_hex: bool) -> Result<()> {
    let contents = if as_hex {
        let mut text = hex::encode(raw);
        text.push('\n');
        text.into_bytes()
    } else {
        raw.to_vec()
    };
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

fn decode_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let digits: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(digits)
}
