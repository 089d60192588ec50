//! Errors raised while building cipher tables.

/// Errors raised when an alphabet, password, or code symbol set is rejected.
///
/// All of these are detected eagerly while a table is being built, so a
/// value of this type always means that nothing was constructed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The number of places per code is outside `2..=9`.
    #[display("number of places must be between 2 and 9, got {places}")]
    InvalidPlaces {
        /// Rejected number of places.
        places: u8,
    },
    /// The number of code symbols is outside `2..=9`.
    #[display("number of code symbols must be between 2 and 9, got {symbols}")]
    InvalidSymbolCount {
        /// Rejected number of code symbols.
        symbols: u8,
    },
    /// The alphabet has no characters.
    #[display("alphabet is empty")]
    EmptyAlphabet,
    /// The code space is too small to give every alphabet character a code.
    #[display("{combinations} code combinations cannot address {alphabet_len} alphabet characters")]
    TooFewCombinations {
        /// Number of distinct codes (`symbols ^ places`).
        combinations: usize,
        /// Number of alphabet characters.
        alphabet_len: usize,
    },
    /// The alphabet character set lists a character twice.
    #[display("alphabet character {character:?} appears more than once")]
    DuplicateAlphabetCharacter {
        /// The repeated character.
        character: char,
    },
    /// No catalog entry exists for the requested combination.
    #[display("no alphabet with {places} places and {symbols} code symbols")]
    UnknownAlphabet {
        /// Requested number of places.
        places: u8,
        /// Requested number of code symbols.
        symbols: u8,
    },
    /// The substitution password is empty.
    #[display("password is empty")]
    EmptyPassword,
    /// A password character is not part of the alphabet.
    ///
    /// The offending character itself is not reported.
    #[display("password character {position} is not part of the alphabet")]
    PasswordCharacterNotInAlphabet {
        /// 1-based position of the character within the password.
        position: usize,
    },
    /// The number of code symbols does not match the alphabet.
    #[display("expected {expected} code symbols, got {actual}")]
    CodeSymbolCount {
        /// Number of code symbols required by the alphabet.
        expected: usize,
        /// Number of code symbols supplied.
        actual: usize,
    },
    /// A code symbol is listed twice.
    #[display("code symbol {symbol:?} appears more than once")]
    DuplicateCodeSymbol {
        /// The repeated symbol.
        symbol: char,
    },
    /// A code symbol is whitespace, which is reserved for grouping and wrapping.
    #[display("code symbol {symbol:?} is whitespace")]
    WhitespaceCodeSymbol {
        /// The rejected symbol.
        symbol: char,
    },
}

/// A [`SlidingCharWindow`](crate::SlidingCharWindow) was pushed past its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("sliding window capacity of {capacity} exceeded")]
pub struct WindowOverflow {
    /// Capacity of the overflowing window.
    pub capacity: usize,
}
