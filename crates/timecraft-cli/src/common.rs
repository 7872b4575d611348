//! Input helpers shared by commands.

use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Read JSON from `path`, or from stdin when `path` is `None`.
pub fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> timecraft_core::Result<T> {
    let text = read_text(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Read a whole file, or stdin when `path` is `None`.
pub fn read_text(path: Option<&Path>) -> timecraft_core::Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
