//! Persistent cipher settings.

use std::{fs, path::Path};

use adfgvx_core::{AlphabetSpec, ConfigError};
use adfgvx_stream::LineEnding;
use serde::{Deserialize, Serialize};

use crate::{CipherError, TextEncoding};

/// Default input size limit: 64 MiB.
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 64 * 1024 * 1024;

/// Everything about a cipher run except the passwords.
///
/// Loaded from JSON; missing fields take their default.
///
/// # Examples
///
/// ```
/// use adfgvx_cipher::CipherSettings;
/// use adfgvx_stream::LineEnding;
///
/// let settings = CipherSettings::from_json(r#"{ "group_size": 4, "line_ending": "crlf" }"#)?;
/// assert_eq!(settings.group_size, 4);
/// assert_eq!(settings.line_ending, LineEnding::CrLf);
/// assert_eq!((settings.places, settings.symbols), (2, 6));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CipherSettings {
    /// Code length of the alphabet.
    pub places: u8,
    /// Number of code symbols of the alphabet.
    pub symbols: u8,
    /// Code symbols to use instead of the alphabet's default ones.
    pub code_symbols: Option<String>,
    /// Ciphertext symbols per group; 0 disables grouping.
    pub group_size: usize,
    /// Maximum ciphertext line length; 0 disables wrapping.
    pub max_line_length: usize,
    /// Line ending written to output.
    pub line_ending: LineEnding,
    /// Encoding assumed for input without byte-order mark.
    pub input_encoding: TextEncoding,
    /// Encoding of the output.
    pub output_encoding: TextEncoding,
    /// Whether to write a byte-order mark to the output.
    pub output_bom: bool,
    /// Largest accepted input, in bytes.
    pub max_input_size: u64,
}

impl Default for CipherSettings {
    fn default() -> Self {
        Self {
            places: 2,
            symbols: 6,
            code_symbols: None,
            group_size: 5,
            max_line_length: 60,
            line_ending: LineEnding::Lf,
            input_encoding: TextEncoding::Utf8,
            output_encoding: TextEncoding::Utf8,
            output_bom: false,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl CipherSettings {
    /// Parses settings from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the document is malformed or holds unknown
    /// fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Io`] if the file cannot be read and
    /// [`CipherError::Settings`] if it is not valid.
    pub fn load(path: &Path) -> Result<Self, CipherError> {
        let json = fs::read_to_string(path).map_err(|e| CipherError::io("read", path, e))?;
        let settings = Self::from_json(&json).map_err(|source| CipherError::Settings {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serializes the settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Looks up the alphabet selected by `places` and `symbols`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAlphabet`] if the catalog has no such
    /// alphabet, or a parameter error if either value is out of range.
    pub fn alphabet_spec(&self) -> Result<&'static AlphabetSpec, ConfigError> {
        AlphabetSpec::lookup(self.places, self.symbols)
    }

    /// Returns the configured code symbols, or the defaults of `spec`.
    #[must_use]
    pub fn code_symbols_for(&self, spec: &AlphabetSpec) -> Vec<char> {
        match &self.code_symbols {
            Some(symbols) => symbols.chars().collect(),
            None => spec.default_code_symbols(),
        }
    }
}
