//! In-memory gene records: built once from the input table, mutated in place
//! as knowledge-base and alias lookups complete, discarded after the report
//! is written.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Everything the annotation needs about one input position of a gene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionRecord {
    /// `<AminoAcid><Position>` tokens extracted from the transcript
    /// annotation, e.g. "R132".
    pub tokens: BTreeSet<String>,
    /// True when the row's functional class is "splicing" or its exonic
    /// classification is "stopgain".
    pub truncating: bool,
    /// Sorted hit labels, filled in by the match engine. `None` until the
    /// gene has been looked up.
    pub hits: Option<Vec<String>>,
}

/// Counts and alias recorded once a gene's knowledge-base lookup is done.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneSummary {
    /// Total knowledge-base variant entries for the gene. `None` renders as
    /// the "no entry in CIViC" sentinel.
    pub variant_entries: Option<usize>,
    /// Distinct substitution tokens (SNV mode) or summed indel categories.
    pub matched: usize,
    /// Canonical knowledge-base name when the gene was only found under an
    /// alternate symbol. `None` renders as `0`.
    pub alias: Option<String>,
}

/// Per-gene accumulator, positions keyed by the input POS field in row order.
/// A repeated gene+position overwrites the earlier extraction but keeps its
/// place in the order.
#[derive(Debug, Clone, Default)]
pub struct GeneRecord {
    pub positions: IndexMap<String, PositionRecord>,
    pub summary: Option<GeneSummary>,
}

impl GeneRecord {
    pub fn insert_position(&mut self, pos: &str, tokens: BTreeSet<String>, truncating: bool) {
        self.positions.insert(
            pos.to_string(),
            PositionRecord {
                tokens,
                truncating,
                hits: None,
            },
        );
    }

    /// Marks the gene as absent from the knowledge base: every position gets
    /// an empty hit list and the summary records the no-entry sentinel.
    pub fn mark_absent(&mut self) {
        for record in self.positions.values_mut() {
            record.hits = Some(Vec::new());
        }
        self.summary = Some(GeneSummary {
            variant_entries: None,
            matched: 0,
            alias: None,
        });
    }
}
