//! Password-keyed chains of columnar transpositions.
//!
//! Column orders live as long as the [`Transposition`] and are scrubbed when
//! it drops. The scratch buffers of a single pass chain are [`Zeroizing`] and
//! are scrubbed when that call returns.

use std::{fmt, mem};

use adfgvx_core::RankOrder;
use zeroize::{Zeroize, Zeroizing};

use crate::{
    TranspositionError,
    engine::{transpose_pass, untranspose_pass},
};

/// A chain of columnar transpositions, one per password.
///
/// Each password is turned into a column order with [`RankOrder`]. Applying
/// the chain runs one full pass per password, in the order the passwords were
/// given; all columns of a pass are copied in parallel and joined before the
/// next pass starts. [`untranspose`](Self::untranspose) runs the inverse passes
/// in reverse order, so it exactly undoes [`transpose`](Self::transpose).
///
/// Column orders are secret material: they are scrubbed on drop and hidden
/// from [`Debug`](fmt::Debug) output.
///
/// # Examples
///
/// ```
/// use adfgvx_transposition::Transposition;
///
/// let transposition = Transposition::new(&["quark"])?;
///
/// let mut symbols: Vec<char> = "Bieberburzel".chars().collect();
/// let len = symbols.len();
/// transposition.transpose(&mut symbols, len)?;
/// assert_eq!(symbols.iter().collect::<String>(), "euezBrebribl");
///
/// transposition.untranspose(&mut symbols, len)?;
/// assert_eq!(symbols.iter().collect::<String>(), "Bieberburzel");
/// # Ok::<(), adfgvx_transposition::TranspositionError>(())
/// ```
pub struct Transposition {
    orders: Vec<RankOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

impl Transposition {
    /// Builds the column orders for `passwords`.
    ///
    /// Passwords are compared character by character using `char` ordering,
    /// without any case folding.
    ///
    /// # Errors
    ///
    /// - [`TranspositionError::NoPasswords`] if `passwords` is empty.
    /// - [`TranspositionError::PasswordTooShort`] if any password has fewer
    ///   than two characters; the error carries its 1-based index.
    ///
    /// All passwords are validated before any column order is built.
    pub fn new<S>(passwords: &[S]) -> Result<Self, TranspositionError>
    where
        S: AsRef<str>,
    {
        if passwords.is_empty() {
            return Err(TranspositionError::NoPasswords);
        }
        if let Some(i) = passwords
            .iter()
            .position(|password| password.as_ref().chars().nth(1).is_none())
        {
            return Err(TranspositionError::PasswordTooShort { index: i + 1 });
        }

        let orders: Vec<_> = passwords
            .iter()
            .map(|password| {
                let keys = Zeroizing::new(password.as_ref().chars().collect::<Vec<char>>());
                RankOrder::from_keys(&keys)
            })
            .collect();
        log::debug!("built transposition with {} passes", orders.len());

        Ok(Self { orders })
    }

    /// Returns the number of passes, one per password.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.orders.len()
    }

    /// Returns the column order of every pass, in password order.
    #[must_use]
    pub fn column_orders(&self) -> &[RankOrder] {
        &self.orders
    }

    /// Transposes the first `length` symbols of `symbols` in place.
    ///
    /// Symbols past `length` are left untouched. A `length` of zero is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TranspositionError::LengthExceedsBuffer`] if `length` is
    /// larger than `symbols.len()`.
    pub fn transpose<T>(&self, symbols: &mut [T], length: usize) -> Result<(), TranspositionError>
    where
        T: Copy + Default + Send + Sync + Zeroize,
    {
        self.run(symbols, length, Direction::Forward)
    }

    /// Reverses [`transpose`](Self::transpose) on the first `length` symbols.
    ///
    /// # Errors
    ///
    /// Returns [`TranspositionError::LengthExceedsBuffer`] if `length` is
    /// larger than `symbols.len()`.
    pub fn untranspose<T>(&self, symbols: &mut [T], length: usize) -> Result<(), TranspositionError>
    where
        T: Copy + Default + Send + Sync + Zeroize,
    {
        self.run(symbols, length, Direction::Reverse)
    }

    fn run<T>(
        &self,
        symbols: &mut [T],
        length: usize,
        direction: Direction,
    ) -> Result<(), TranspositionError>
    where
        T: Copy + Default + Send + Sync + Zeroize,
    {
        if length > symbols.len() {
            return Err(TranspositionError::LengthExceedsBuffer {
                length,
                capacity: symbols.len(),
            });
        }
        if length == 0 {
            return Ok(());
        }

        // Two scratch buffers owned by this call; each pass reads one and
        // writes the other, then they swap.
        let mut current = Zeroizing::new(symbols[..length].to_vec());
        let mut next = Zeroizing::new(vec![T::default(); length]);

        match direction {
            Direction::Forward => {
                for (pass, order) in self.orders.iter().enumerate() {
                    log::trace!("transpose pass {pass}: {length} symbols, width {}", order.len());
                    transpose_pass(order, &current, &mut next);
                    mem::swap(&mut current, &mut next);
                }
            }
            Direction::Reverse => {
                for (pass, order) in self.orders.iter().enumerate().rev() {
                    log::trace!("untranspose pass {pass}: {length} symbols, width {}", order.len());
                    untranspose_pass(order, &current, &mut next);
                    mem::swap(&mut current, &mut next);
                }
            }
        }

        symbols[..length].copy_from_slice(&current);
        Ok(())
    }
}

impl Zeroize for Transposition {
    fn zeroize(&mut self) {
        for order in &mut self.orders {
            order.zeroize();
        }
        self.orders.clear();
    }
}

impl Drop for Transposition {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for Transposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transposition")
            .field("passes", &self.orders.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn transposed(passwords: &[&str], text: &str) -> String {
        let transposition = Transposition::new(passwords).unwrap();
        let mut symbols: Vec<char> = text.chars().collect();
        let len = symbols.len();
        transposition.transpose(&mut symbols, len).unwrap();
        symbols.into_iter().collect()
    }

    /// Writes the text row by row into a table and reads it column by column.
    fn reference_transpose(password: &str, text: &str) -> String {
        let keys: Vec<char> = password.chars().collect();
        let width = keys.len();
        let chars: Vec<char> = text.chars().collect();
        let mut columns: Vec<(char, usize)> = keys.iter().copied().zip(0..).collect();
        columns.sort_by_key(|&(key, _)| key);
        columns
            .into_iter()
            .flat_map(|(_, column)| chars.iter().skip(column).step_by(width).copied())
            .collect()
    }

    #[test]
    fn test_known_vector() {
        assert_eq!(transposed(&["quark"], "Bieberburzel"), "euezBrebribl");
    }

    #[test]
    fn test_chained_passes_apply_in_order() {
        let once = transposed(&["quark"], "Bieberburzel");
        let twice = transposed(&["quark", "MEDDLE"], "Bieberburzel");
        assert_eq!(twice, transposed(&["MEDDLE"], &once));
    }

    #[test]
    fn test_untranspose_chained() {
        let transposition = Transposition::new(&["quark", "MEDDLE", "xy"]).unwrap();
        let original: Vec<char> = "ATTACKATDAWNXX".chars().collect();
        let mut symbols = original.clone();
        transposition.transpose(&mut symbols, original.len()).unwrap();
        assert_ne!(symbols, original);
        transposition.untranspose(&mut symbols, original.len()).unwrap();
        assert_eq!(symbols, original);
    }

    #[test]
    fn test_partial_length_leaves_tail() {
        let transposition = Transposition::new(&["ba"]).unwrap();
        let mut symbols = ['a', 'b', 'c', 'd', 'z'];
        transposition.transpose(&mut symbols, 4).unwrap();
        assert_eq!(symbols, ['b', 'd', 'a', 'c', 'z']);
    }

    #[test]
    fn test_zero_length_is_noop() {
        let transposition = Transposition::new(&["quark"]).unwrap();
        let mut symbols: [char; 0] = [];
        transposition.transpose(&mut symbols, 0).unwrap();
        transposition.untranspose(&mut symbols, 0).unwrap();
    }

    #[test]
    fn test_length_exceeds_buffer() {
        let transposition = Transposition::new(&["quark"]).unwrap();
        let mut symbols = ['a'; 3];
        assert_eq!(
            transposition.transpose(&mut symbols, 4),
            Err(TranspositionError::LengthExceedsBuffer {
                length: 4,
                capacity: 3
            })
        );
    }

    #[test]
    fn test_construction_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Transposition::new(&empty).unwrap_err(),
            TranspositionError::NoPasswords
        );
        assert_eq!(
            Transposition::new(&["quark", "x"]).unwrap_err(),
            TranspositionError::PasswordTooShort { index: 2 }
        );
        assert_eq!(
            Transposition::new(&[""]).unwrap_err(),
            TranspositionError::PasswordTooShort { index: 1 }
        );
        assert_eq!(
            TranspositionError::PasswordTooShort { index: 2 }.to_string(),
            "2. password is too short"
        );
    }

    #[test]
    fn test_column_orders() {
        let transposition = Transposition::new(&["MEDDLE", "quark"]).unwrap();
        assert_eq!(transposition.passes(), 2);
        assert_eq!(transposition.column_orders()[0].ranks(), &[5, 2, 0, 1, 4, 3]);
        assert_eq!(transposition.column_orders()[1].ranks(), &[2, 4, 0, 3, 1]);
    }

    #[test]
    fn test_large_input_matches_reference() {
        // large enough to split the untranspose pass into several tasks
        let text: String = (0..50_000u32)
            .map(|i| char::from(b'A' + u8::try_from(i % 26).unwrap()))
            .collect();
        let password = "FRACTIONATION";
        assert_eq!(
            transposed(&[password], &text),
            reference_transpose(password, &text)
        );

        let transposition = Transposition::new(&[password, "KEYWORD"]).unwrap();
        let mut symbols: Vec<char> = text.chars().collect();
        let len = symbols.len();
        transposition.transpose(&mut symbols, len).unwrap();
        transposition.untranspose(&mut symbols, len).unwrap();
        assert_eq!(symbols.into_iter().collect::<String>(), text);
    }

    #[test]
    fn test_zeroize_clears_orders() {
        let mut transposition = Transposition::new(&["secret", "other"]).unwrap();
        transposition.zeroize();
        assert_eq!(transposition.passes(), 0);
        assert!(transposition.column_orders().is_empty());

        // nothing left to apply, so the symbols stay put
        let mut symbols: Vec<char> = "abc".chars().collect();
        transposition.transpose(&mut symbols, 3).unwrap();
        assert_eq!(symbols, ['a', 'b', 'c']);
    }

    #[test]
    fn test_debug_hides_orders() {
        let transposition = Transposition::new(&["secret"]).unwrap();
        assert_eq!(
            format!("{transposition:?}"),
            "Transposition { passes: 1, .. }"
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            passwords in prop::collection::vec("[a-zA-Z0-9]{2,12}", 1..4),
            symbols in prop::collection::vec(any::<u8>(), 0..300),
        ) {
            let transposition = Transposition::new(&passwords).unwrap();
            let mut buffer = symbols.clone();
            let len = buffer.len();
            transposition.transpose(&mut buffer, len).unwrap();
            transposition.untranspose(&mut buffer, len).unwrap();
            prop_assert_eq!(buffer, symbols);
        }

        #[test]
        fn prop_single_pass_matches_reference(
            password in "[A-Z]{2,10}",
            text in "[a-z]{0,100}",
        ) {
            prop_assert_eq!(
                transposed(&[password.as_str()], &text),
                reference_transpose(&password, &text)
            );
        }
    }
}
