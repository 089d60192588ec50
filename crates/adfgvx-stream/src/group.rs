//! Grouping and line wrapping on the write side.

use crate::{StreamError, SymbolSink};

/// Returns the line length actually used for `group_size` and `max_line_length`.
///
/// With grouping and wrapping both active, the maximum is rounded down to a
/// multiple of `group_size + 1` so no group is split across lines. A maximum
/// shorter than one group plus its separator yields one group per line.
///
/// # Examples
///
/// ```
/// use adfgvx_stream::effective_line_length;
///
/// assert_eq!(effective_line_length(5, 42), 42);
/// assert_eq!(effective_line_length(5, 40), 36);
/// assert_eq!(effective_line_length(0, 40), 40);
/// ```
#[must_use]
pub fn effective_line_length(group_size: usize, max_line_length: usize) -> usize {
    if group_size == 0 || max_line_length == 0 {
        return max_line_length;
    }
    let unit = group_size + 1;
    match max_line_length / unit * unit {
        0 => unit,
        rounded => rounded,
    }
}

/// Inserts a space after every `group_size` symbols and a line break once a
/// line reaches the effective line length.
///
/// Separators are emitted lazily before the next symbol, so the output never
/// ends with a space or line break. A group size or line length of 0 disables
/// the respective feature. Line breaks written through this stage restart both
/// counters.
#[derive(Debug, Clone)]
pub struct GroupWriter<K> {
    downstream: K,
    group_size: usize,
    line_length: usize,
    group_pos: usize,
    line_pos: usize,
}

impl<K> GroupWriter<K>
where
    K: SymbolSink,
{
    /// Wraps `downstream`.
    pub fn new(downstream: K, group_size: usize, max_line_length: usize) -> Self {
        Self {
            downstream,
            group_size,
            line_length: effective_line_length(group_size, max_line_length),
            group_pos: 0,
            line_pos: 0,
        }
    }

    /// Returns the line length in effect after rounding.
    #[must_use]
    pub fn line_length(&self) -> usize {
        self.line_length
    }

    /// Unwraps the downstream sink.
    pub fn into_inner(self) -> K {
        self.downstream
    }

    fn break_line(&mut self) -> Result<(), StreamError> {
        self.group_pos = 0;
        self.line_pos = 0;
        self.downstream.write_symbol('\n')
    }
}

impl<K> SymbolSink for GroupWriter<K>
where
    K: SymbolSink,
{
    fn write_symbol(&mut self, c: char) -> Result<(), StreamError> {
        if c == '\n' {
            return self.break_line();
        }

        if self.group_size > 0 && self.group_pos == self.group_size {
            if self.line_length > 0 && self.line_pos + 1 >= self.line_length {
                self.break_line()?;
            } else {
                self.downstream.write_symbol(' ')?;
                self.group_pos = 0;
                self.line_pos += 1;
            }
        } else if self.group_size == 0 && self.line_length > 0 && self.line_pos == self.line_length
        {
            self.break_line()?;
        }

        self.downstream.write_symbol(c)?;
        self.group_pos += 1;
        self.line_pos += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), StreamError> {
        self.downstream.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(input: &str, group_size: usize, max_line_length: usize) -> String {
        let mut writer = GroupWriter::new(String::new(), group_size, max_line_length);
        writer.write_all(input.chars()).unwrap();
        writer.finish().unwrap();
        writer.into_inner()
    }

    #[test]
    fn test_effective_line_length() {
        assert_eq!(effective_line_length(5, 42), 42);
        assert_eq!(effective_line_length(5, 40), 36);
        assert_eq!(effective_line_length(5, 3), 6);
        assert_eq!(effective_line_length(5, 0), 0);
        assert_eq!(effective_line_length(0, 17), 17);
    }

    #[test]
    fn test_groups_only() {
        assert_eq!(group("ADFGVXADFG", 5, 0), "ADFGV XADFG");
        assert_eq!(group("ADFGVXA", 3, 0), "ADF GVX A");
        assert_eq!(group("", 3, 0), "");
    }

    #[test]
    fn test_groups_and_lines() {
        // effective length 12: two groups per line
        assert_eq!(
            group("AAAAABBBBBCCCCCDDDDDE", 5, 14),
            "AAAAA BBBBB\nCCCCC DDDDD\nE"
        );
    }

    #[test]
    fn test_one_group_per_line_when_too_short() {
        assert_eq!(group("ABCDEFG", 3, 2), "ABC\nDEF\nG");
    }

    #[test]
    fn test_lines_only() {
        assert_eq!(group("ABCDEFG", 0, 3), "ABC\nDEF\nG");
        assert_eq!(group("ABCDEF", 0, 3), "ABC\nDEF");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(group("A B\nC", 0, 0), "A B\nC");
    }

    #[test]
    fn test_line_break_restarts_counters() {
        assert_eq!(group("AB\nCDE", 2, 0), "AB\nCD E");
    }
}
