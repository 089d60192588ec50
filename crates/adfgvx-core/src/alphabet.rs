//! Alphabet definitions and the built-in alphabet catalog.
//!
//! An [`AlphabetSpec`] fixes three things for one substitution scheme:
//!
//! - the number of places (code length) each plaintext character expands to,
//! - the number of distinct code symbols used in those codes,
//! - the set of plaintext characters that can be encrypted.
//!
//! The character folding rules ([`CaseRules`]) are derived from the character
//! set: an alphabet without lowercase `a` upper-cases its input, and an
//! alphabet without `J` folds `J` into `I`.
//!
//! # Examples
//!
//! ```
//! use adfgvx_core::{AlphabetSpec, CaseRules};
//!
//! let adfgx = AlphabetSpec::lookup(2, 5)?;
//! assert_eq!(adfgx.characters().len(), 25);
//! assert!(adfgx.case_rules().contains(CaseRules::J_AS_I));
//! assert_eq!(adfgx.prepare('j'), 'I');
//! # Ok::<(), adfgvx_core::ConfigError>(())
//! ```

use std::{
    fmt::{self, Display},
    sync::LazyLock,
};

use bitflags::bitflags;

use crate::ConfigError;

/// Smallest supported number of places per code.
pub const MIN_PLACES: u8 = 2;
/// Largest supported number of places per code.
pub const MAX_PLACES: u8 = 9;
/// Smallest supported number of code symbols.
pub const MIN_SYMBOLS: u8 = 2;
/// Largest supported number of code symbols.
pub const MAX_SYMBOLS: u8 = 9;

bitflags! {
    /// Character folding applied to plaintext before substitution.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CaseRules: u8 {
        /// Convert characters to uppercase.
        const TO_UPPER = 0b01;
        /// Replace `J` with `I`, after upper-casing.
        const J_AS_I = 0b10;
    }
}

impl CaseRules {
    /// Applies the folding rules to a single character.
    ///
    /// Upper-casing is only applied when it maps to exactly one character, so
    /// the result is always a single `char`.
    ///
    /// # Examples
    ///
    /// ```
    /// use adfgvx_core::CaseRules;
    ///
    /// let rules = CaseRules::TO_UPPER | CaseRules::J_AS_I;
    /// assert_eq!(rules.apply('a'), 'A');
    /// assert_eq!(rules.apply('j'), 'I');
    /// assert_eq!(CaseRules::empty().apply('j'), 'j');
    /// // without upper-casing a lowercase `j` is kept
    /// assert_eq!(CaseRules::J_AS_I.apply('j'), 'j');
    /// ```
    #[must_use]
    pub fn apply(self, c: char) -> char {
        let c = if self.contains(Self::TO_UPPER) {
            to_upper_single(c)
        } else {
            c
        };
        if self.contains(Self::J_AS_I) && c == 'J' {
            'I'
        } else {
            c
        }
    }
}

fn to_upper_single(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Catalog key of an alphabet: `(places, symbols)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlphabetKey {
    /// Number of places per code.
    pub places: u8,
    /// Number of distinct code symbols.
    pub symbols: u8,
}

impl Display for AlphabetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.places, self.symbols)
    }
}

/// The character set and code geometry of one substitution scheme.
///
/// Characters are stored in ascending order; that order is the order in which
/// the substitution table is filled after the password characters.
///
/// Invariant: `symbols ^ places >= characters().len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetSpec {
    key: AlphabetKey,
    characters: Vec<char>,
    rules: CaseRules,
}

impl AlphabetSpec {
    /// Builds an alphabet from its geometry and character set.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPlaces`] / [`ConfigError::InvalidSymbolCount`] if
    ///   either count is outside `2..=9`.
    /// - [`ConfigError::EmptyAlphabet`] if `characters` is empty.
    /// - [`ConfigError::DuplicateAlphabetCharacter`] if a character repeats.
    /// - [`ConfigError::TooFewCombinations`] if the code space cannot address
    ///   every character.
    ///
    /// # Examples
    ///
    /// ```
    /// use adfgvx_core::{AlphabetSpec, ConfigError};
    ///
    /// let spec = AlphabetSpec::new(2, 2, "DCBA".chars())?;
    /// assert_eq!(spec.characters(), &['A', 'B', 'C', 'D']);
    ///
    /// assert!(AlphabetSpec::new(2, 2, "ABCDE".chars()).is_err());
    /// # Ok::<(), ConfigError>(())
    /// ```
    pub fn new<I>(places: u8, symbols: u8, characters: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = char>,
    {
        if !(MIN_PLACES..=MAX_PLACES).contains(&places) {
            return Err(ConfigError::InvalidPlaces { places });
        }
        if !(MIN_SYMBOLS..=MAX_SYMBOLS).contains(&symbols) {
            return Err(ConfigError::InvalidSymbolCount { symbols });
        }

        let mut characters: Vec<char> = characters.into_iter().collect();
        if characters.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        characters.sort_unstable();
        if let Some(pair) = characters.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ConfigError::DuplicateAlphabetCharacter { character: pair[0] });
        }

        let combinations = combinations(places, symbols);
        if combinations < characters.len() {
            return Err(ConfigError::TooFewCombinations {
                combinations,
                alphabet_len: characters.len(),
            });
        }

        let mut rules = CaseRules::empty();
        if characters.binary_search(&'a').is_err() {
            rules |= CaseRules::TO_UPPER;
        }
        if characters.binary_search(&'J').is_err() {
            rules |= CaseRules::J_AS_I;
        }

        Ok(Self {
            key: AlphabetKey { places, symbols },
            characters,
            rules,
        })
    }

    /// Looks up a built-in alphabet by its geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAlphabet`] if the catalog has no entry for
    /// `(places, symbols)`.
    pub fn lookup(places: u8, symbols: u8) -> Result<&'static Self, ConfigError> {
        let key = AlphabetKey { places, symbols };
        catalog()
            .iter()
            .find(|spec| spec.key == key)
            .ok_or(ConfigError::UnknownAlphabet { places, symbols })
    }

    /// Returns the catalog key of this alphabet.
    #[must_use]
    pub fn key(&self) -> AlphabetKey {
        self.key
    }

    /// Returns the number of places per code.
    #[must_use]
    pub fn places(&self) -> u8 {
        self.key.places
    }

    /// Returns the number of distinct code symbols.
    #[must_use]
    pub fn symbols(&self) -> u8 {
        self.key.symbols
    }

    /// Returns the number of distinct codes, `symbols ^ places`.
    #[must_use]
    pub fn combinations(&self) -> usize {
        combinations(self.key.places, self.key.symbols)
    }

    /// Returns the alphabet characters in ascending order.
    #[must_use]
    pub fn characters(&self) -> &[char] {
        &self.characters
    }

    /// Returns `true` if `c` is an alphabet character.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.characters.binary_search(&c).is_ok()
    }

    /// Returns the folding rules derived from the character set.
    #[must_use]
    pub fn case_rules(&self) -> CaseRules {
        self.rules
    }

    /// Returns `true` if input is upper-cased before substitution.
    #[must_use]
    pub fn to_upper(&self) -> bool {
        self.rules.contains(CaseRules::TO_UPPER)
    }

    /// Returns `true` if `J` is folded into `I` before substitution.
    #[must_use]
    pub fn treat_j_as_i(&self) -> bool {
        self.rules.contains(CaseRules::J_AS_I)
    }

    /// Applies this alphabet's folding rules to one character.
    #[must_use]
    pub fn prepare(&self, c: char) -> char {
        self.rules.apply(c)
    }

    /// Returns the conventional code symbols for this alphabet.
    ///
    /// `ADFGX` for five symbols, `ADFGVX` for six, otherwise the first digits
    /// starting at `1`.
    #[must_use]
    pub fn default_code_symbols(&self) -> Vec<char> {
        match self.key.symbols {
            5 => "ADFGX".chars().collect(),
            6 => "ADFGVX".chars().collect(),
            n => "123456789".chars().take(usize::from(n)).collect(),
        }
    }
}

fn combinations(places: u8, symbols: u8) -> usize {
    usize::from(symbols).pow(u32::from(places))
}

const ADFGX: &str = "ABCDEFGHIKLMNOPQRSTUVWXYZ";
const ADFGVX: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const LETTERS_SPACE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ ";
const UPPER_PUNCTUATED: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 \n.,;:!?-'\"()";
const MIXED_CASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 \n";
const MIXED_CASE_PUNCTUATED: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 \n.,;:!?-'\"()/&%+=*";

const CATALOG_ENTRIES: [(u8, u8, &str); 9] = [
    (2, 5, ADFGX),
    (2, 6, ADFGVX),
    (3, 3, LETTERS_SPACE),
    (2, 7, UPPER_PUNCTUATED),
    (2, 8, MIXED_CASE),
    (3, 4, MIXED_CASE),
    (6, 2, MIXED_CASE),
    (2, 9, MIXED_CASE_PUNCTUATED),
    (4, 3, MIXED_CASE_PUNCTUATED),
];

static CATALOG: LazyLock<Vec<AlphabetSpec>> = LazyLock::new(|| {
    CATALOG_ENTRIES
        .iter()
        .map(|&(places, symbols, characters)| {
            AlphabetSpec::new(places, symbols, characters.chars())
                .unwrap_or_else(|e| panic!("invalid catalog alphabet {places}x{symbols}: {e}"))
        })
        .collect()
});

/// Returns every built-in alphabet, in catalog order.
///
/// The catalog is read-only and shared by the whole process.
///
/// # Examples
///
/// ```
/// let keys: Vec<_> = adfgvx_core::catalog().iter().map(|spec| spec.key()).collect();
/// assert!(keys.iter().any(|key| key.places == 2 && key.symbols == 6));
/// ```
#[must_use]
pub fn catalog() -> &'static [AlphabetSpec] {
    &CATALOG
}
