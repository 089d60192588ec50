//! Byte-level text decoding and encoding.
//!
//! The cipher itself works on characters. [`TextCodec`] is the seam to the
//! byte world: it detects byte-order marks, decodes input in the detected or
//! default encoding, and encodes output with an optional byte-order mark.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::CipherError;

/// A supported text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8.
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-16, little endian.
    #[serde(rename = "utf-16le")]
    Utf16Le,
    /// UTF-16, big endian.
    #[serde(rename = "utf-16be")]
    Utf16Be,
}

impl TextEncoding {
    /// Every supported encoding.
    pub const ALL: [Self; 3] = [Self::Utf8, Self::Utf16Le, Self::Utf16Be];

    /// Returns the canonical name, as accepted by [`FromStr`] and serde.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
        }
    }

    /// Returns the byte-order mark of this encoding.
    #[must_use]
    pub const fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
        }
    }

    /// Detects a byte-order mark at the start of `bytes`.
    #[must_use]
    pub fn detect_bom(bytes: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|encoding| bytes.starts_with(encoding.bom()))
    }
}

impl Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`TextEncoding`] name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown text encoding {name:?} (expected utf-8, utf-16le or utf-16be)")]
pub struct ParseTextEncodingError {
    /// The rejected name.
    pub name: String,
}

impl FromStr for TextEncoding {
    type Err = ParseTextEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "utf8" => Ok(Self::Utf8),
            "utf16le" => Ok(Self::Utf16Le),
            "utf16be" => Ok(Self::Utf16Be),
            _ => Err(ParseTextEncodingError { name: s.to_owned() }),
        }
    }
}

/// Text decoded from bytes, with what was learned about its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// The decoded characters, without byte-order mark.
    pub text: String,
    /// The encoding the bytes were decoded with.
    pub encoding: TextEncoding,
    /// Whether the input started with a byte-order mark.
    pub had_bom: bool,
}

/// Converts between bytes and text.
pub trait TextCodec {
    /// Decodes `bytes`.
    ///
    /// A byte-order mark at the start selects its encoding and overrides
    /// `default`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Decode`] if the bytes are not valid in the
    /// selected encoding.
    fn decode(&self, bytes: &[u8], default: TextEncoding) -> Result<DecodedText, CipherError>;

    /// Encodes `text`, optionally preceded by a byte-order mark.
    fn encode(&self, text: &str, encoding: TextEncoding, with_bom: bool) -> Vec<u8>;

    /// Returns the minimum number of bytes per character of `encoding`.
    ///
    /// Only used to size buffers.
    fn bytes_per_character(&self, encoding: TextEncoding) -> usize;
}

impl<T> TextCodec for &T
where
    T: TextCodec + ?Sized,
{
    fn decode(&self, bytes: &[u8], default: TextEncoding) -> Result<DecodedText, CipherError> {
        (**self).decode(bytes, default)
    }

    fn encode(&self, text: &str, encoding: TextEncoding, with_bom: bool) -> Vec<u8> {
        (**self).encode(text, encoding, with_bom)
    }

    fn bytes_per_character(&self, encoding: TextEncoding) -> usize {
        (**self).bytes_per_character(encoding)
    }
}

/// The built-in codec for UTF-8 and UTF-16.
///
/// # Examples
///
/// ```
/// use adfgvx_cipher::{StdTextCodec, TextCodec, TextEncoding};
///
/// let bytes = StdTextCodec.encode("hi", TextEncoding::Utf16Le, true);
/// assert_eq!(bytes, [0xFF, 0xFE, b'h', 0, b'i', 0]);
///
/// let decoded = StdTextCodec.decode(&bytes, TextEncoding::Utf8)?;
/// assert_eq!(decoded.text, "hi");
/// assert_eq!(decoded.encoding, TextEncoding::Utf16Le);
/// assert!(decoded.had_bom);
/// # Ok::<(), adfgvx_cipher::CipherError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StdTextCodec;

impl TextCodec for StdTextCodec {
    fn decode(&self, bytes: &[u8], default: TextEncoding) -> Result<DecodedText, CipherError> {
        let (encoding, had_bom) = match TextEncoding::detect_bom(bytes) {
            Some(encoding) => (encoding, true),
            None => (default, false),
        };
        let body = if had_bom {
            &bytes[encoding.bom().len()..]
        } else {
            bytes
        };

        let text = match encoding {
            TextEncoding::Utf8 => std::str::from_utf8(body).map(str::to_owned).ok(),
            TextEncoding::Utf16Le => decode_utf16(body, u16::from_le_bytes),
            TextEncoding::Utf16Be => decode_utf16(body, u16::from_be_bytes),
        };
        let text = text.ok_or(CipherError::Decode { encoding })?;

        Ok(DecodedText {
            text,
            encoding,
            had_bom,
        })
    }

    fn encode(&self, text: &str, encoding: TextEncoding, with_bom: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * self.bytes_per_character(encoding) + 3);
        if with_bom {
            bytes.extend_from_slice(encoding.bom());
        }
        match encoding {
            TextEncoding::Utf8 => bytes.extend_from_slice(text.as_bytes()),
            TextEncoding::Utf16Le => bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes)),
            TextEncoding::Utf16Be => bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes)),
        }
        bytes
    }

    fn bytes_per_character(&self, encoding: TextEncoding) -> usize {
        match encoding {
            TextEncoding::Utf8 => 1,
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    let chunks = bytes.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return None;
    }
    let units = chunks.map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}
