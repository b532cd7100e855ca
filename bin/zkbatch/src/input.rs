//! Reading hex encoded batch data.

use alloy_primitives::hex;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Parses hex encoded batch data. Surrounding whitespace and the `0x` prefix are optional.
pub(crate) fn parse_batch_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s.trim()).map_err(|e| anyhow!("Invalid hex batch data: {e}"))
}

/// Reads a file holding hex encoded batch data.
pub(crate) fn read_batch_file(path: &Path) -> Result<Vec<u8>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Error reading batch file {}: {e}", path.display()))?;
    parse_batch_hex(&contents)
}
