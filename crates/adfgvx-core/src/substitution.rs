//! Password-keyed substitution tables.

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::{AlphabetSpec, Code, ConfigError};

/// The bijective mapping between alphabet characters and fixed-length codes.
///
/// The table is laid out like a Polybius square: the distinct password
/// characters come first, followed by the remaining alphabet characters in
/// ascending order, starting after the last password character and wrapping
/// around. The `i`-th entry receives the code spelling `i` in base
/// `code_symbols.len()`.
///
/// The table is derived from a secret password, so it is scrubbed on drop
/// and its [`Debug`](fmt::Debug) output hides the mapping.
///
/// # Examples
///
/// ```
/// use adfgvx_core::{AlphabetSpec, SubstitutionAlphabet};
///
/// let spec = AlphabetSpec::lookup(2, 5)?;
/// let alphabet = SubstitutionAlphabet::new(
///     spec,
///     "OSCARFUELLTDASXYLOPHONMITQUARK",
///     &['A', 'D', 'F', 'G', 'V'],
/// )?;
///
/// let code = alphabet.encode('A').unwrap();
/// assert_eq!(code.to_string(), "AG");
/// assert_eq!(alphabet.decode(code), Some('A'));
/// # Ok::<(), adfgvx_core::ConfigError>(())
/// ```
pub struct SubstitutionAlphabet {
    places: usize,
    code_symbols: Vec<char>,
    /// Sorted by character.
    encode: Vec<(char, Code)>,
    /// Sorted by code.
    decode: Vec<(Code, char)>,
}

impl SubstitutionAlphabet {
    /// Builds the substitution table for `spec` keyed by `password`.
    ///
    /// `password` must already have the alphabet's [`case rules`] applied.
    ///
    /// When the code space is larger than the alphabet, the surplus codes are
    /// left unassigned and decoding them yields `None`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyPassword`] if `password` is empty.
    /// - [`ConfigError::PasswordCharacterNotInAlphabet`] if a password
    ///   character is not an alphabet character.
    /// - [`ConfigError::CodeSymbolCount`], [`ConfigError::DuplicateCodeSymbol`]
    ///   or [`ConfigError::WhitespaceCodeSymbol`] if `code_symbols` does not
    ///   hold exactly `spec.symbols()` distinct, non-whitespace symbols.
    ///
    /// [`case rules`]: AlphabetSpec::prepare
    pub fn new(
        spec: &AlphabetSpec,
        password: &str,
        code_symbols: &[char],
    ) -> Result<Self, ConfigError> {
        validate_code_symbols(spec, code_symbols)?;
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }

        let characters = spec.characters();
        let target = spec.combinations().min(characters.len());

        let mut table: Zeroizing<Vec<char>> = Zeroizing::new(Vec::with_capacity(target));
        for (i, c) in password.chars().enumerate() {
            if !spec.contains(c) {
                return Err(ConfigError::PasswordCharacterNotInAlphabet { position: i + 1 });
            }
            if !table.contains(&c) {
                table.push(c);
            }
        }

        if table.len() < target {
            let last = table[table.len() - 1];
            let start = characters
                .iter()
                .position(|c| *c > last && !table.contains(c))
                .unwrap_or(0);
            let (head, tail) = characters.split_at(start);
            for &c in tail.iter().chain(head) {
                if table.len() == target {
                    break;
                }
                if !table.contains(&c) {
                    table.push(c);
                }
            }
        }

        let places = usize::from(spec.places());
        let mut encode = Vec::with_capacity(table.len());
        let mut decode = Vec::with_capacity(table.len());
        for (index, &c) in table.iter().enumerate() {
            let code = Code::from_index(index, places, code_symbols);
            encode.push((c, code.clone()));
            decode.push((code, c));
        }
        encode.sort_unstable_by_key(|(c, _)| *c);
        decode.sort_unstable_by(|(a, _), (b, _)| a.as_slice().cmp(b.as_slice()));

        log::debug!(
            "built substitution alphabet {}: {} characters, {} code symbols",
            spec.key(),
            encode.len(),
            code_symbols.len()
        );

        Ok(Self {
            places,
            code_symbols: code_symbols.to_vec(),
            encode,
            decode,
        })
    }

    /// Returns the length of every code.
    #[must_use]
    pub fn places(&self) -> usize {
        self.places
    }

    /// Returns the code symbols, in digit order.
    #[must_use]
    pub fn code_symbols(&self) -> &[char] {
        &self.code_symbols
    }

    /// Returns the number of mapped characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.encode.len()
    }

    /// Returns `true` if no character is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encode.is_empty()
    }

    /// Returns the code of `c`, if `c` is mapped.
    #[must_use]
    pub fn encode(&self, c: char) -> Option<&Code> {
        self.encode
            .binary_search_by_key(&c, |(k, _)| *k)
            .ok()
            .map(|i| &self.encode[i].1)
    }

    /// Returns the character whose code is `code`, if any.
    #[must_use]
    pub fn decode(&self, code: &[char]) -> Option<char> {
        self.decode
            .binary_search_by(|(k, _)| k.as_slice().cmp(code))
            .ok()
            .map(|i| self.decode[i].1)
    }

    /// Iterates over `(character, code)` pairs in ascending character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> {
        self.encode.iter().map(|(c, code)| (*c, code))
    }
}

fn validate_code_symbols(spec: &AlphabetSpec, code_symbols: &[char]) -> Result<(), ConfigError> {
    let expected = usize::from(spec.symbols());
    if code_symbols.len() != expected {
        return Err(ConfigError::CodeSymbolCount {
            expected,
            actual: code_symbols.len(),
        });
    }
    for (i, &symbol) in code_symbols.iter().enumerate() {
        if symbol.is_whitespace() {
            return Err(ConfigError::WhitespaceCodeSymbol { symbol });
        }
        if code_symbols[..i].contains(&symbol) {
            return Err(ConfigError::DuplicateCodeSymbol { symbol });
        }
    }
    Ok(())
}

impl Zeroize for SubstitutionAlphabet {
    fn zeroize(&mut self) {
        for (c, code) in &mut self.encode {
            c.zeroize();
            code.zeroize();
        }
        for (code, c) in &mut self.decode {
            code.zeroize();
            c.zeroize();
        }
        self.encode.clear();
        self.decode.clear();
    }
}

impl Drop for SubstitutionAlphabet {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for SubstitutionAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstitutionAlphabet")
            .field("places", &self.places)
            .field("code_symbols", &self.code_symbols)
            .field("len", &self.encode.len())
            .finish_non_exhaustive()
    }
}
