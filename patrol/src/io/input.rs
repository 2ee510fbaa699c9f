//! Reading puzzle input from a file or stdin.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read the whole input; `-` reads stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
