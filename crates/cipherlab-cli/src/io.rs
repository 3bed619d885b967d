//! File-or-stdio input and output.
//!
//! Every cipher command reads from a `--input` file when given one and
//! from stdin otherwise, and writes to a `--output` file or stdout the
//! same way.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Reads the full input as raw bytes.
pub fn read_bytes(path: Option<&Path>) -> std::result::Result<Vec<u8>, String> {
    match path {
        Some(p) => fs::read(p).map_err(|e| format!("failed to read {}: {e}", p.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

/// Reads the full input as text, replacing invalid UTF-8.
pub fn read_text(path: Option<&Path>) -> std::result::Result<String, String> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes raw bytes to the output.
pub fn write_bytes(path: Option<&Path>, data: &[u8]) -> std::result::Result<(), String> {
    match path {
        Some(p) => {
            fs::write(p, data).map_err(|e| format!("failed to write {}: {e}", p.display()))
        }
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(data)
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("failed to write stdout: {e}"))
        }
    }
}

/// Writes text to the output, appending a newline on stdout.
pub fn write_text(path: Option<&Path>, text: &str) -> std::result::Result<(), String> {
    match path {
        Some(_) => write_bytes(path, text.as_bytes()),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
