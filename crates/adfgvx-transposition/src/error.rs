//! Errors raised by the transposition engine.

/// Errors raised while building or applying a [`Transposition`](crate::Transposition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TranspositionError {
    /// No transposition password was given.
    #[display("no transposition passwords given")]
    NoPasswords,
    /// A password is shorter than two characters.
    #[display("{index}. password is too short")]
    PasswordTooShort {
        /// 1-based position of the password in the list.
        index: usize,
    },
    /// The requested length is larger than the symbol buffer.
    #[display("length {length} exceeds buffer of {capacity} symbols")]
    LengthExceedsBuffer {
        /// Requested logical length.
        length: usize,
        /// Actual buffer length.
        capacity: usize,
    },
}
