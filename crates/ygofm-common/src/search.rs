//! Byte pattern searching.
//!
//! Thin wrappers over `memchr::memmem`, which already carries SIMD
//! implementations for every target we care about.

/// Find the first occurrence of a multi-byte pattern.
#[inline]
pub fn find_pattern(needle: &[u8], haystack: &[u8]) -> Option<usize> {
    memchr::memmem::find(haystack, needle)
}

/// Check whether a pattern occurs anywhere in the haystack.
#[inline]
pub fn contains_pattern(needle: &[u8], haystack: &[u8]) -> bool {
    find_pattern(needle, haystack).is_some()
}

/// Find every non-overlapping occurrence of a pattern, in ascending order.
///
/// After a match at `offset` the search resumes at `offset + needle.len()`,
/// so `AAAA` searched for `AA` yields `[0, 2]`. An empty needle matches
/// nothing.
pub fn find_all(needle: &[u8], haystack: &[u8]) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }

    let finder = memchr::memmem::Finder::new(needle);
    let mut matches = Vec::new();
    let mut cursor = 0;

    while cursor <= haystack.len() {
        match finder.find(&haystack[cursor..]) {
            Some(pos) => {
                let offset = cursor + pos;
                matches.push(offset);
                cursor = offset + needle.len();
            }
            None => break,
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_non_overlapping() {
        assert_eq!(find_all(b"AA", b"AAAA"), vec![0, 2]);
        assert_eq!(find_all(b"AA", b"AAA"), vec![0]);
        assert_eq!(find_all(b"ABA", b"ABABA"), vec![0]);
    }

    #[test]
    fn test_find_all_scattered() {
        let haystack = [0xAA, 0xBB, 0x00, 0xAA, 0xBB, 0xAA];
        assert_eq!(find_all(&[0xAA, 0xBB], &haystack), vec![0, 3]);
    }

    #[test]
    fn test_empty_needle_and_haystack() {
        assert!(find_all(&[], b"abc").is_empty());
        assert!(find_all(b"abc", &[]).is_empty());
        assert!(!contains_pattern(b"x", b""));
    }

    #[test]
    fn test_find_pattern() {
        assert_eq!(find_pattern(b"lo", b"hello"), Some(3));
        assert_eq!(find_pattern(b"xyz", b"hello"), None);
    }
}
