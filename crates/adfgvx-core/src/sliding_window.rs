//! Bounded look-back buffer for longest-match decoding.

use crate::WindowOverflow;

/// A fixed-capacity character buffer that is filled at the back and drained
/// from the front.
///
/// Used by the many-to-one unmapper: characters are appended until the window
/// holds as many characters as the longest known sequence, then the longest
/// matching prefix is consumed and the rest slides to the front.
///
/// # Examples
///
/// ```
/// use adfgvx_core::SlidingCharWindow;
///
/// let mut window = SlidingCharWindow::new(3);
/// for c in "ABC".chars() {
///     window.push(c)?;
/// }
/// assert!(window.is_full());
/// window.consume(2);
/// assert_eq!(window.as_slice(), &['C']);
/// # Ok::<(), adfgvx_core::WindowOverflow>(())
/// ```
#[derive(Debug, Clone)]
pub struct SlidingCharWindow {
    buf: Box<[char]>,
    len: usize,
}

impl SlidingCharWindow {
    /// Creates an empty window holding at most `capacity` characters.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec!['\0'; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Returns the maximum number of characters the window holds.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of characters currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the window holds no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the window holds `capacity` characters.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Appends a character at the back.
    ///
    /// # Errors
    ///
    /// Returns [`WindowOverflow`] if the window is already full.
    pub fn push(&mut self, c: char) -> Result<(), WindowOverflow> {
        if self.is_full() {
            return Err(WindowOverflow {
                capacity: self.capacity(),
            });
        }
        self.buf[self.len] = c;
        self.len += 1;
        Ok(())
    }

    /// Returns the held characters, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.buf[..self.len]
    }

    /// Returns the first `n` held characters, or `None` if fewer are held.
    #[must_use]
    pub fn prefix(&self, n: usize) -> Option<&[char]> {
        self.as_slice().get(..n)
    }

    /// Drops the first `n` characters and slides the rest to the front.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`len`](Self::len).
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.len, "cannot consume {n} of {} characters", self.len);
        self.buf.copy_within(n..self.len, 0);
        self.len -= n;
    }

    /// Empties the window.
    pub fn reset(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut window = SlidingCharWindow::new(2);
        assert!(window.is_empty());
        window.push('A').unwrap();
        window.push('B').unwrap();
        assert!(window.is_full());
        assert_eq!(window.push('C'), Err(WindowOverflow { capacity: 2 }));
        assert_eq!(window.as_slice(), &['A', 'B']);
    }

    #[test]
    fn test_prefix() {
        let mut window = SlidingCharWindow::new(4);
        for c in "XYZ".chars() {
            window.push(c).unwrap();
        }
        assert_eq!(window.prefix(2), Some(&['X', 'Y'][..]));
        assert_eq!(window.prefix(3), Some(&['X', 'Y', 'Z'][..]));
        assert_eq!(window.prefix(4), None);
    }

    #[test]
    fn test_consume_slides() {
        let mut window = SlidingCharWindow::new(3);
        for c in "ABC".chars() {
            window.push(c).unwrap();
        }
        window.consume(1);
        assert_eq!(window.as_slice(), &['B', 'C']);
        window.push('D').unwrap();
        assert_eq!(window.as_slice(), &['B', 'C', 'D']);
        window.consume(3);
        assert!(window.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut window = SlidingCharWindow::new(2);
        window.push('A').unwrap();
        window.reset();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot consume 2 of 1 characters")]
    fn test_consume_too_many_panics() {
        let mut window = SlidingCharWindow::new(2);
        window.push('A').unwrap();
        window.consume(2);
    }
}
