//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod info;
pub mod summarize;

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read stdin to a string, stopping one byte past the limit.
pub fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    read_limited(std::io::stdin().lock(), "stdin", max_bytes)
}

fn read_limited(reader: impl Read, name: &str, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    match max_bytes {
        Some(max) => {
            reader
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .with_context(|| format!("failed to read {name}"))?;
            if content.len() > max {
                anyhow::bail!("input too large: {name} exceeds {max} bytes");
            }
        }
        None => {
            let mut reader = reader;
            reader
                .read_to_string(&mut content)
                .with_context(|| format!("failed to read {name}"))?;
        }
    }
    Ok(content)
}

/// Check in-memory input against the configured limit.
pub fn check_input_size(text: &str, max_bytes: Option<usize>) -> Result<(), String> {
    match max_bytes {
        Some(max) if text.len() > max => Err(format!(
            "input too large: {} bytes (limit: {max} bytes)",
            text.len()
        )),
        _ => Ok(()),
    }
}
