use super::span::Span;

/// Finds the longest substring shared by `a` and `b`, located by its span in `a`.
///
/// `suffix[i][j]` is the length of the common suffix of `a[..i]` and `b[..j]`. Only the
/// previous row is ever read, so two rows of `b.len() + 1` cells are kept. Cells are visited
/// row by row, and a cell equal to the current maximum replaces it: among equally long
/// candidates the last one visited wins.
///
/// Either text empty (or no shared symbol) yields the zero-length span `(1, 0)`.
pub fn longest_common_substring(a: &[u8], b: &[u8]) -> Span {
    if a.is_empty() || b.is_empty() {
        return Span::new(1, 0);
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best_len = 0;
    let mut best_end = 0;

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            if a[i - 1] == b[j - 1] {
                curr[j] = prev[j - 1] + 1;
                if curr[j] >= best_len {
                    best_len = curr[j];
                    best_end = i;
                }
            } else {
                curr[j] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    if best_len == 0 {
        return Span::new(1, 0);
    }
    Span::new(best_end + 1 - best_len, best_end)
}
