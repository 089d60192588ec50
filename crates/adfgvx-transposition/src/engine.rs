//! Single-pass columnar transposition kernels.
//!
//! A pass deals the source round-robin into `width` columns (column `c` holds
//! positions `c, c + width, c + 2 * width, ...`) and lays the columns out one
//! after another in rank order. Both kernels are gathers: every parallel task
//! owns a disjoint range of the destination and only reads the source.

use adfgvx_core::RankOrder;
use rayon::prelude::*;
use zeroize::Zeroizing;

/// Minimum number of table rows handled by one untranspose task.
const MIN_ROWS_PER_TASK: usize = 4096;

/// Returns the number of symbols in `column` when `len` symbols are dealt
/// into `width` columns.
///
/// The first `len % width` columns, by original index, get the extra row.
#[inline]
pub(crate) fn column_len(len: usize, width: usize, column: usize) -> usize {
    len / width + usize::from(column < len % width)
}

/// Returns the start offset of every column, indexed by original column, in
/// the transposed layout.
fn column_offsets(order: &RankOrder, len: usize) -> Zeroizing<Vec<usize>> {
    let width = order.len();
    let by_rank = Zeroizing::new(order.by_rank());
    let mut offsets = Zeroizing::new(vec![0; width]);
    let mut offset = 0;
    for &column in by_rank.iter() {
        offsets[column] = offset;
        offset += column_len(len, width, column);
    }
    offsets
}

/// Reads the columns of `src` into `dst` in rank order.
///
/// Each column is copied by its own task into its own contiguous run of `dst`.
pub(crate) fn transpose_pass<T>(order: &RankOrder, src: &[T], dst: &mut [T])
where
    T: Copy + Send + Sync,
{
    debug_assert_eq!(src.len(), dst.len());
    let len = src.len();
    let width = order.len();
    let by_rank = Zeroizing::new(order.by_rank());

    let mut runs = Vec::with_capacity(width);
    let mut rest = dst;
    for &column in by_rank.iter() {
        let (run, tail) = std::mem::take(&mut rest).split_at_mut(column_len(len, width, column));
        runs.push((column, run));
        rest = tail;
    }
    debug_assert!(rest.is_empty());

    runs.into_par_iter().for_each(|(column, run)| {
        for (slot, symbol) in run.iter_mut().zip(src.iter().skip(column).step_by(width)) {
            *slot = *symbol;
        }
    });
}

/// Scatters the rank-ordered columns of `src` back into row order in `dst`.
///
/// Each task owns a range of whole rows of `dst`.
pub(crate) fn untranspose_pass<T>(order: &RankOrder, src: &[T], dst: &mut [T])
where
    T: Copy + Send + Sync,
{
    debug_assert_eq!(src.len(), dst.len());
    let width = order.len();
    let offsets = column_offsets(order, src.len());

    dst.par_chunks_mut(width)
        .enumerate()
        .with_min_len(MIN_ROWS_PER_TASK)
        .for_each(|(row, chunk)| {
            for (column, slot) in chunk.iter_mut().enumerate() {
                *slot = src[offsets[column] + row];
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(password: &str) -> RankOrder {
        let chars: Vec<char> = password.chars().collect();
        RankOrder::from_keys(&chars)
    }

    #[test]
    fn test_column_len() {
        // 12 symbols in 5 columns: 3, 3, 2, 2, 2
        let lens: Vec<_> = (0..5).map(|c| column_len(12, 5, c)).collect();
        assert_eq!(lens, vec![3, 3, 2, 2, 2]);
        // fewer symbols than columns
        let lens: Vec<_> = (0..5).map(|c| column_len(3, 5, c)).collect();
        assert_eq!(lens, vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_column_offsets() {
        // quark: q=2 u=4 a=0 r=3 k=1 with 12 symbols
        let offsets = column_offsets(&order("quark"), 12);
        assert_eq!(offsets.as_slice(), &[4, 9, 0, 7, 2]);
    }

    #[test]
    fn test_single_pass_kernels() {
        let src: Vec<char> = "Bieberburzel".chars().collect();
        let mut transposed = vec!['\0'; src.len()];
        transpose_pass(&order("quark"), &src, &mut transposed);
        assert_eq!(transposed.iter().collect::<String>(), "euezBrebribl");

        let mut restored = vec!['\0'; src.len()];
        untranspose_pass(&order("quark"), &transposed, &mut restored);
        assert_eq!(restored, src);
    }

    #[test]
    fn test_short_input() {
        let src = ['x', 'y'];
        let mut dst = ['\0'; 2];
        // columns 2 and 3 are empty
        transpose_pass(&order("DCBA"), &src, &mut dst);
        assert_eq!(dst, ['y', 'x']);
    }
}
