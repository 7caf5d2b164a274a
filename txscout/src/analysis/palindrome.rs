use super::span::Span;

/// Finds the longest palindromic substring of `text` in linear time.
///
/// The text is interleaved with a separator (`None`) so odd and even palindromes share a
/// single code path: `abc` becomes `# a # b # c #`. For each transformed position the radius
/// starts from its mirror's radius, clipped at the rightmost boundary reached so far, and is
/// then extended explicitly.
///
/// When several palindromes share the maximum length, the one whose center comes first wins.
/// An empty text yields the zero-length span `(1, 0)`.
pub fn longest_palindrome(text: &[u8]) -> Span {
    let transformed: Vec<Option<u8>> = std::iter::once(None)
        .chain(text.iter().flat_map(|&b| [Some(b), None]))
        .collect();
    let n = transformed.len();

    let mut radius = vec![0usize; n];
    let (mut center, mut right) = (0usize, 0usize);
    let (mut best_radius, mut best_center) = (0usize, 0usize);

    for i in 0..n {
        if i < right {
            let mirror = 2 * center - i;
            radius[i] = (right - i).min(radius[mirror]);
        }

        while i + radius[i] + 1 < n
            && radius[i] < i
            && transformed[i + radius[i] + 1] == transformed[i - radius[i] - 1]
        {
            radius[i] += 1;
        }

        if i + radius[i] > right {
            center = i;
            right = i + radius[i];
        }

        if radius[i] > best_radius {
            best_radius = radius[i];
            best_center = i;
        }
    }

    // In the transformed text the radius equals the palindrome length in the original.
    let start = (best_center - best_radius) / 2;
    Span::from_start_len(start, best_radius)
}
