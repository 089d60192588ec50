//! Stable rank permutations.

use std::fmt;

use zeroize::Zeroize;

/// The stable ascending rank of every key in a sequence.
///
/// `ranks()[i]` is the 0-based position of the `i`-th key when all keys are
/// sorted ascending. Equal keys keep their input order, so the earlier one
/// gets the smaller rank.
///
/// A rank order derived from a password is secret material; it is scrubbed
/// when dropped and its [`Debug`](fmt::Debug) output only reveals its length.
///
/// # Examples
///
/// ```
/// use adfgvx_core::RankOrder;
///
/// let chars: Vec<char> = "MEDDLE".chars().collect();
/// let order = RankOrder::from_keys(&chars);
/// assert_eq!(order.ranks(), &[5, 2, 0, 1, 4, 3]);
/// ```
pub struct RankOrder {
    ranks: Vec<usize>,
}

impl RankOrder {
    /// Computes the stable rank order of `keys`.
    ///
    /// Each key is inserted into an ordered list by scanning backwards from the
    /// tail past every strictly greater key, so equal keys are never reordered.
    /// Key sequences are short (passwords), so the quadratic worst case is
    /// acceptable.
    #[must_use]
    pub fn from_keys<T>(keys: &[T]) -> Self
    where
        T: Ord,
    {
        let mut sorted: Vec<usize> = Vec::with_capacity(keys.len());
        for (index, key) in keys.iter().enumerate() {
            let mut pos = sorted.len();
            while pos > 0 && keys[sorted[pos - 1]] > *key {
                pos -= 1;
            }
            sorted.insert(pos, index);
        }

        let mut ranks = vec![0; keys.len()];
        for (rank, &index) in sorted.iter().enumerate() {
            ranks[index] = rank;
        }
        sorted.zeroize();

        Self { ranks }
    }

    /// Returns the rank of each key, in input order.
    #[must_use]
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if the order was built from no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Returns the input index holding each rank, i.e. the inverse permutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use adfgvx_core::RankOrder;
    ///
    /// let order = RankOrder::from_keys(&[30, 10, 20]);
    /// assert_eq!(order.ranks(), &[2, 0, 1]);
    /// assert_eq!(order.by_rank(), vec![1, 2, 0]);
    /// ```
    #[must_use]
    pub fn by_rank(&self) -> Vec<usize> {
        let mut inverse = vec![0; self.ranks.len()];
        for (index, &rank) in self.ranks.iter().enumerate() {
            inverse[rank] = index;
        }
        inverse
    }
}

impl Zeroize for RankOrder {
    fn zeroize(&mut self) {
        self.ranks.zeroize();
    }
}

impl Drop for RankOrder {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for RankOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankOrder")
            .field("len", &self.ranks.len())
            .finish_non_exhaustive()
    }
}
