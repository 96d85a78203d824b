//! Match engine: compares a gene's knowledge-base variant records against the
//! positions extracted from the input rows.

use std::collections::BTreeSet;

use regex::Regex;

use civicross_common::records::{GeneRecord, GeneSummary};
use civicross_sources::models::GeneEntry;

/// Which table variant the run annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Snvs,
    Indels,
}

/// Label recorded for positions covered by a truncating knowledge-base entry.
pub const TRUNCATING_LABEL: &str = "truncating_variant";

/// Tallies from one pass over a gene's variant names.
#[derive(Debug, Default)]
struct VariantScan {
    truncations: usize,
    insertions: usize,
    frameshifts: usize,
    deletions: usize,
    /// Distinct single-residue substitution tokens, e.g. "V600".
    snvs: BTreeSet<String>,
    /// Half-open deletion intervals in scan order.
    deletion_ranges: Vec<(u64, u64)>,
}

pub struct VariantMatcher {
    /// Regex: single-residue substitution, e.g. "V600E" → "V600"
    re_snv: Regex,
    /// Regex: runs of digits in a variant name
    re_digits: Regex,
}

impl VariantMatcher {
    pub fn new() -> Self {
        Self {
            re_snv: Regex::new(r"([A-Z]\d+)[A-Z]").unwrap(),
            re_digits: Regex::new(r"\d+").unwrap(),
        }
    }

    /// Classifies every variant name of the entry. Category tests are
    /// independent substring checks on the free-text name; "TRUNCAT" is
    /// case-sensitive, the indel markers are checked in both cases.
    fn scan(&self, entry: &GeneEntry, mode: RunMode) -> VariantScan {
        let mut scan = VariantScan::default();

        for variant in &entry.variants {
            let name = variant.name.as_str();

            if name.contains("TRUNCAT") {
                scan.truncations += 1;
            }

            match mode {
                RunMode::Snvs => {
                    if let Some(caps) = self.re_snv.captures(name) {
                        scan.snvs.insert(caps[1].to_string());
                    }
                }
                RunMode::Indels => {
                    if name.contains("INS") || name.contains("ins") {
                        scan.insertions += 1;
                    }
                    if name.contains("FRAME") || name.contains("fs") {
                        scan.frameshifts += 1;
                    }
                    if name.contains("DEL") || name.contains("del") {
                        scan.deletions += 1;
                        let digits: Vec<u64> = self
                            .re_digits
                            .find_iter(name)
                            .filter_map(|m| m.as_str().parse().ok())
                            .collect();
                        if digits.len() > 1 {
                            scan.deletion_ranges.push((digits[0], digits[1] + 1));
                        } else if digits.len() == 1 {
                            scan.deletion_ranges.push((digits[0], digits[0] + 1));
                        }
                    }
                }
            }
        }

        scan
    }

    /// Annotates every position of `record` against `entry` and fills in the
    /// gene summary. `alias` is the canonical knowledge-base name when the
    /// entry was found under an alternate symbol.
    pub fn annotate(
        &self,
        record: &mut GeneRecord,
        entry: &GeneEntry,
        mode: RunMode,
        alias: Option<String>,
    ) {
        let scan = self.scan(entry, mode);

        // One hit list is carried across the gene's positions in row order;
        // each position stores a sorted snapshot, so labels accumulate from
        // earlier positions of the same gene.
        let mut hits: Vec<String> = Vec::new();

        for position in record.positions.values_mut() {
            if position.truncating && scan.truncations > 0 {
                hits.push(TRUNCATING_LABEL.to_string());
            }

            match mode {
                RunMode::Snvs => {
                    for token in &position.tokens {
                        if scan.snvs.contains(token) {
                            hits.push(token.clone());
                        }
                    }
                }
                RunMode::Indels => {
                    for token in &position.tokens {
                        // Strip the leading amino-acid letter: "R132" → 132.
                        let residue: u64 = match token[1..].parse() {
                            Ok(n) => n,
                            Err(_) => continue,
                        };
                        for &(lower, upper) in &scan.deletion_ranges {
                            if (lower..upper).contains(&residue) {
                                hits.push(format!("{}-{}", lower, upper));
                            }
                        }
                    }
                }
            }

            let mut snapshot = hits.clone();
            snapshot.sort();
            position.hits = Some(snapshot);
        }

        let matched = match mode {
            RunMode::Snvs => scan.snvs.len(),
            // A name matching several categories counts once per category.
            RunMode::Indels => {
                scan.deletions + scan.insertions + scan.frameshifts + scan.truncations
            }
        };

        record.summary = Some(GeneSummary {
            variant_entries: Some(entry.variants.len()),
            matched,
            alias,
        });
    }
}

impl Default for VariantMatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
