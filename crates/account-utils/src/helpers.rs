use std::{fs, path::Path};

use super::ZeroizeString;

/// Reads a secret file into a `ZeroizeString` struct, with new-lines removed.
pub fn read_secret_string<P: AsRef<Path>>(path: P) -> Result<ZeroizeString, String> {
    fs::read(path)
        .map_err(|e| format!("Error opening file: {:?}", e))
        .map(strip_off_newlines)
        .and_then(|bytes| {
            String::from_utf8(bytes)
                .map_err(|e| format!("Error decoding utf8: {:?}", e))
                .map(Into::into)
        })
}

/// Remove any number of newline or carriage returns from the end of a vector of bytes.
pub fn strip_off_newlines(mut bytes: Vec<u8>) -> Vec<u8> {
    let mut strip_off = 0;
    for (i, byte) in bytes.iter().rev().enumerate() {
        if *byte == b'\n' || *byte == b'\r' {
            strip_off = i + 1;
        } else {
            break;
        }
    }
    bytes.truncate(bytes.len() - strip_off);
    bytes
}
