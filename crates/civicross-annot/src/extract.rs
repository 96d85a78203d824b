//! Extracts protein-position tokens and the truncating flag from the
//! per-row ANNOVAR annotation fields.

use std::collections::BTreeSet;

use regex::Regex;

/// Parses `<AminoAcid><Position>` tokens out of ANNOVAR transcript strings.
pub struct PositionExtractor {
    /// Regex: protein change at exact position, e.g. ":p.R132H" → "R132"
    re_token: Regex,
}

impl PositionExtractor {
    pub fn new() -> Self {
        Self {
            re_token: Regex::new(r":p\.([A-Z]\d+)").unwrap(),
        }
    }

    /// All distinct tokens in a transcript annotation. No matches yield an
    /// empty set.
    pub fn protein_tokens(&self, transcripts: &str) -> BTreeSet<String> {
        self.re_token
            .captures_iter(transcripts)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

impl Default for PositionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// A row describes a truncating variant when its functional class is
/// "splicing" or its exonic classification is "stopgain".
pub fn is_truncating(function: &str, exonic_classification: &str) -> bool {
    function == "splicing" || exonic_classification == "stopgain"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PositionExtractor {
        PositionExtractor::new()
    }

    #[test]
    fn test_single_token() {
        let tokens = extractor().protein_tokens("IDH1:NM_005896:exon4:c.G395A:p.R132H");
        assert_eq!(tokens, BTreeSet::from(["R132".to_string()]));
    }

    #[test]
    fn test_multiple_transcripts_deduplicate() {
        let tokens = extractor().protein_tokens(
            "BRAF:NM_004333:exon15:c.T1799A:p.V600E,BRAF:NM_001354609:exon15:c.T1799A:p.V600E",
        );
        assert_eq!(tokens, BTreeSet::from(["V600".to_string()]));
    }

    #[test]
    fn test_distinct_positions_across_transcripts() {
        let tokens = extractor()
            .protein_tokens("GENE:NM_1:exon2:c.C100T:p.R34W,GENE:NM_2:exon3:c.C250T:p.P84S");
        assert_eq!(
            tokens,
            BTreeSet::from(["P84".to_string(), "R34".to_string()])
        );
    }

    #[test]
    fn test_no_protein_annotation() {
        assert!(extractor().protein_tokens("GENE:NM_1:exon2:c.100-2A>G").is_empty());
        assert!(extractor().protein_tokens("").is_empty());
    }

    #[test]
    fn test_truncating_flag() {
        assert!(is_truncating("splicing", "."));
        assert!(is_truncating("exonic", "stopgain"));
        assert!(!is_truncating("exonic", "nonsynonymous SNV"));
        // Case matters, the classifier strings are fixed vocabulary.
        assert!(!is_truncating("Splicing", "Stopgain"));
    }
}
