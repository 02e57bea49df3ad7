use crate::bio::sequence::SequenceRecord;
use indexmap::IndexMap;
use tracing::{debug, info};

/// Pairwise Jaccard similarities between every two distinct organisms.
///
/// Built once from the full record set and never modified afterwards. Values
/// live in a dense symmetric table indexed by input order, so a lookup in
/// either name order costs two hash probes.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    index: IndexMap<String, usize>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute the Jaccard index for every unordered pair of records
    pub fn from_records(records: &[SequenceRecord]) -> Self {
        let k = records.len();
        let index: IndexMap<String, usize> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name().to_string(), i))
            .collect();

        let mut values = vec![0.0; k * k];
        for i in 0..k {
            for j in (i + 1)..k {
                let sim = records[i].similarity(&records[j]);
                values[i * k + j] = sim;
                values[j * k + i] = sim;
            }
        }

        info!("Computed {} pairwise similarities", k * k.saturating_sub(1) / 2);
        debug!("Similarity matrix covers organisms: {:?}", index.keys().collect::<Vec<_>>());

        Self { index, values }
    }

    /// Number of organisms covered
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Organism names in input order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Similarity of two distinct organisms; `None` for `(x, x)` or unknown names
    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        if i == j {
            return None;
        }
        Some(self.values[i * self.len() + j])
    }

    /// Every unordered pair once, in row-major input order
    pub fn pairs(&self) -> Vec<(&str, &str, f64)> {
        let k = self.len();
        let names: Vec<&str> = self.names().collect();
        let mut pairs = Vec::with_capacity(k * k.saturating_sub(1) / 2);
        for i in 0..k {
            for j in (i + 1)..k {
                pairs.push((names[i], names[j], self.values[i * k + j]));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<SequenceRecord> {
        vec![
            SequenceRecord::new("a", "AAAA", 2).unwrap(),
            SequenceRecord::new("b", "AAAC", 2).unwrap(),
            SequenceRecord::new("c", "GGGG", 2).unwrap(),
        ]
    }

    #[test]
    fn test_symmetric_lookup() {
        let matrix = SimilarityMatrix::from_records(&records());
        assert_eq!(matrix.similarity("a", "b"), Some(0.5));
        assert_eq!(matrix.similarity("b", "a"), Some(0.5));
        assert_eq!(matrix.similarity("a", "c"), Some(0.0));
    }

    #[test]
    fn test_self_and_unknown_pairs_absent() {
        let matrix = SimilarityMatrix::from_records(&records());
        assert_eq!(matrix.similarity("a", "a"), None);
        assert_eq!(matrix.similarity("a", "zebra"), None);
        assert_eq!(matrix.similarity("zebra", "a"), None);
    }

    #[test]
    fn test_names_keep_input_order() {
        let matrix = SimilarityMatrix::from_records(&records());
        assert_eq!(matrix.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn test_pairs_listed_once() {
        let matrix = SimilarityMatrix::from_records(&records());
        let pairs = matrix.pairs();
        assert_eq!(
            pairs,
            vec![("a", "b", 0.5), ("a", "c", 0.0), ("b", "c", 0.0)]
        );
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = SimilarityMatrix::from_records(&[]);
        assert!(matrix.is_empty());
        assert!(matrix.pairs().is_empty());
    }
}
