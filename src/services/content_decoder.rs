use std::path::Path;
use std::str::{self, Utf8Error};

use crate::config::constants::LANGUAGE_EXTENSIONS;
use crate::enums::language::Language;

/// Classifies an artifact by its lowercased file extension.
pub fn classify(filename: &str) -> Language {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(ext) => LANGUAGE_EXTENSIONS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, language)| *language)
            .unwrap_or(Language::Unknown),
        None => Language::Unknown,
    }
}

/// Strict UTF-8 decoding. Invalid bytes are a domain outcome: the caller must
/// not run analysis stages on content that failed here.
pub fn decode_strict(bytes: &[u8]) -> Result<&str, Utf8Error> {
    str::from_utf8(bytes)
}
