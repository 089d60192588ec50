//! Errors raised while streaming symbols through a pipeline.

use adfgvx_core::WindowOverflow;

/// Errors that abort a read or write pass.
///
/// None of these are recovered from inside the pipeline; the pass stops and
/// the error is handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum StreamError {
    /// A complete window of symbols matches no known sequence.
    #[display("unmappable symbol sequence {sequence:?}")]
    #[from(ignore)]
    UnmappableSequence {
        /// The symbols that could not be mapped.
        sequence: String,
    },
    /// The stream ended in the middle of a sequence.
    #[display("incomplete symbol sequence {sequence:?} at end of stream")]
    #[from(ignore)]
    IncompleteSequence {
        /// The trailing symbols left over.
        sequence: String,
    },
    /// The unmapper's window overflowed. Indicates a sizing bug.
    #[display("internal error: {_0}")]
    WindowOverflow(#[from] WindowOverflow),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            StreamError::UnmappableSequence {
                sequence: "XQ".to_owned()
            }
            .to_string(),
            "unmappable symbol sequence \"XQ\""
        );
        assert_eq!(
            StreamError::from(WindowOverflow { capacity: 2 }).to_string(),
            "internal error: sliding window capacity of 2 exceeded"
        );
    }

    #[test]
    fn test_from_window_overflow() {
        let err: StreamError = WindowOverflow { capacity: 3 }.into();
        assert_eq!(err, StreamError::WindowOverflow(WindowOverflow { capacity: 3 }));
    }
}
