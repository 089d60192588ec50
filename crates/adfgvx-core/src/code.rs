//! Fixed-length code symbol sequences.

use std::{
    fmt::{self, Display, Write as _},
    ops::Deref,
};

use tinyvec::ArrayVec;
use zeroize::Zeroize;

use crate::alphabet::MAX_PLACES;

/// Maximum length of a [`Code`].
pub const MAX_CODE_LEN: usize = MAX_PLACES as usize;

/// A sequence of code symbols representing one alphabet character.
///
/// Codes are stored inline and compare like `[char]` slices.
///
/// # Examples
///
/// ```
/// use adfgvx_core::Code;
///
/// let symbols = ['A', 'D', 'F', 'G', 'X'];
/// let code = Code::from_index(3, 2, &symbols);
/// assert_eq!(code.to_string(), "AG");
/// assert_eq!(&*code, &['A', 'G']);
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(ArrayVec<[char; MAX_CODE_LEN]>);

impl Code {
    /// Returns the `places`-digit, most-significant-first representation of
    /// `index` in base `symbols.len()`, spelled with `symbols`.
    ///
    /// # Panics
    ///
    /// Panics if `places` exceeds [`MAX_CODE_LEN`] or `symbols` is empty.
    #[must_use]
    pub fn from_index(index: usize, places: usize, symbols: &[char]) -> Self {
        assert!(places <= MAX_CODE_LEN, "code length {places} is too long");
        assert!(!symbols.is_empty(), "no code symbols");

        let base = symbols.len();
        let mut digits = ArrayVec::from_array_len(['\0'; MAX_CODE_LEN], places);
        let mut rest = index;
        for slot in digits.iter_mut().rev() {
            *slot = symbols[rest % base];
            rest /= base;
        }
        Self(digits)
    }

    /// Builds a code from a slice, or `None` if it is longer than
    /// [`MAX_CODE_LEN`].
    #[must_use]
    pub fn from_chars(chars: &[char]) -> Option<Self> {
        let mut code = ArrayVec::new();
        for &c in chars {
            if code.try_push(c).is_some() {
                return None;
            }
        }
        Some(Self(code))
    }

    /// Returns the symbols of this code.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        self.0.as_slice()
    }
}

impl Deref for Code {
    type Target = [char];

    fn deref(&self) -> &[char] {
        self.as_slice()
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({:?})", self.to_string())
    }
}

impl Zeroize for Code {
    fn zeroize(&mut self) {
        for c in self.0.iter_mut() {
            c.zeroize();
        }
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_digit_order() {
        let symbols = ['A', 'D', 'F', 'G', 'V'];
        assert_eq!(Code::from_index(0, 2, &symbols).to_string(), "AA");
        assert_eq!(Code::from_index(1, 2, &symbols).to_string(), "AD");
        assert_eq!(Code::from_index(5, 2, &symbols).to_string(), "DA");
        assert_eq!(Code::from_index(24, 2, &symbols).to_string(), "VV");
    }

    #[test]
    fn test_from_index_three_places() {
        let symbols = ['1', '2', '3'];
        assert_eq!(Code::from_index(0, 3, &symbols).to_string(), "111");
        assert_eq!(Code::from_index(26, 3, &symbols).to_string(), "333");
        assert_eq!(Code::from_index(5, 3, &symbols).to_string(), "123");
    }

    #[test]
    fn test_from_chars() {
        let code = Code::from_chars(&['X', 'Y']).unwrap();
        assert_eq!(code.len(), 2);
        assert!(Code::from_chars(&['Z'; MAX_CODE_LEN + 1]).is_none());
    }

    #[test]
    fn test_ordering_matches_slices() {
        let ab = Code::from_chars(&['A', 'B']).unwrap();
        let abc = Code::from_chars(&['A', 'B', 'C']).unwrap();
        let b = Code::from_chars(&['B']).unwrap();
        assert!(ab < abc);
        assert!(abc < b);
    }

    #[test]
    fn test_zeroize() {
        let mut code = Code::from_chars(&['A', 'G']).unwrap();
        code.zeroize();
        assert!(code.is_empty());
    }

    #[test]
    fn test_debug() {
        let code = Code::from_chars(&['A', 'G']).unwrap();
        assert_eq!(format!("{code:?}"), "Code(\"AG\")");
    }
}
