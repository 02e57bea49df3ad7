use crate::{PhyloError, Result};
use std::collections::HashSet;

/// The n-gram fingerprint of a sequence: every distinct substring of length `n`
pub type NGramSet = HashSet<String>;

/// Extract the set of all contiguous length-`ngram_size` substrings of `sequence`.
///
/// Windows are taken over characters, not bytes, so multi-byte alphabets are
/// never split mid-character. Repeated windows collapse into one set entry.
pub fn extract_ngrams(sequence: &str, ngram_size: usize) -> Result<NGramSet> {
    if ngram_size == 0 {
        return Err(PhyloError::InvalidParameter(
            "n-gram size must be at least 1".to_string(),
        ));
    }

    // Byte offset of every character boundary, including the end of the string
    let boundaries: Vec<usize> = sequence
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(sequence.len()))
        .collect();
    let char_count = boundaries.len() - 1;

    if ngram_size > char_count {
        return Err(PhyloError::InvalidParameter(format!(
            "n-gram size {} exceeds sequence length {}",
            ngram_size, char_count
        )));
    }

    let mut ngrams = HashSet::with_capacity(char_count - ngram_size + 1);
    for start in 0..=char_count - ngram_size {
        let window = &sequence[boundaries[start]..boundaries[start + ngram_size]];
        ngrams.insert(window.to_string());
    }

    Ok(ngrams)
}

/// Jaccard index of two n-gram sets, 0.0 when both are empty
pub fn jaccard(a: &NGramSet, b: &NGramSet) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|gram| large.contains(*gram)).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> NGramSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_overlapping_windows() {
        let ngrams = extract_ngrams("ACGTA", 2).unwrap();
        assert_eq!(ngrams, set(&["AC", "CG", "GT", "TA"]));
    }

    #[test]
    fn test_repeated_windows_collapse() {
        let ngrams = extract_ngrams("AAAA", 2).unwrap();
        assert_eq!(ngrams, set(&["AA"]));
    }

    #[test]
    fn test_full_length_window() {
        let ngrams = extract_ngrams("ACGT", 4).unwrap();
        assert_eq!(ngrams, set(&["ACGT"]));
    }

    #[test]
    fn test_multibyte_characters() {
        let ngrams = extract_ngrams("αβγ", 2).unwrap();
        assert_eq!(ngrams, set(&["αβ", "βγ"]));
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = extract_ngrams("ACGT", 0).unwrap_err();
        assert!(matches!(err, PhyloError::InvalidParameter(_)));
    }

    #[test]
    fn test_size_longer_than_sequence_rejected() {
        let err = extract_ngrams("ACG", 4).unwrap_err();
        assert!(matches!(err, PhyloError::InvalidParameter(_)));
        assert!(extract_ngrams("", 1).is_err());
    }

    #[test]
    fn test_jaccard_values() {
        let a = set(&["AC", "CG", "GT"]);
        let b = set(&["CG", "GT", "TT"]);
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-12);
        assert_eq!(jaccard(&a, &a), 1.0);
        assert_eq!(jaccard(&a, &set(&["XX"])), 0.0);
    }

    #[test]
    fn test_jaccard_of_empty_sets_is_zero() {
        assert_eq!(jaccard(&NGramSet::new(), &NGramSet::new()), 0.0);
    }
}
