//! End-to-end annotation pipeline.
//!
//! Orchestrates the full flow for one run:
//!   1. Build per-gene records from the parsed table
//!   2. One batched knowledge-base lookup covering all row genes
//!   3. Match engine over every returned entry
//!   4. Alias fallback for genes the batch did not cover
//!   5. Optional per-row literature counts (throttled by the client)
//!   6. Write the augmented table
//!
//! All state is threaded explicitly; the sources are trait objects so the
//! whole flow runs against mocks in tests.

use std::collections::HashMap;
use std::io::Write;

use tracing::{debug, info, warn};

use civicross_common::records::GeneRecord;
use civicross_common::Result;
use civicross_sources::{LiteratureSource, VariantKnowledgeSource};

use crate::extract::{is_truncating, PositionExtractor};
use crate::matcher::{RunMode, VariantMatcher};
use crate::report::write_report;
use crate::table::VariantTable;

/// Builds the per-gene records for a parsed table, keyed by cleaned symbol.
/// Every row position is present as a key before any matching runs.
pub fn build_gene_records(table: &VariantTable) -> HashMap<String, GeneRecord> {
    let extractor = PositionExtractor::new();
    let mut records: HashMap<String, GeneRecord> = HashMap::new();

    for row in &table.rows {
        let tokens = extractor.protein_tokens(&row.transcripts);
        let truncating = is_truncating(&row.function, &row.exonic_classification);
        records
            .entry(row.gene.clone())
            .or_default()
            .insert_position(&row.pos, tokens, truncating);
    }

    records
}

/// Runs the whole annotation flow and writes the report to `out`.
pub async fn annotate_table<W: Write>(
    table: &VariantTable,
    knowledge: &dyn VariantKnowledgeSource,
    literature: Option<&dyn LiteratureSource>,
    mode: RunMode,
    out: &mut W,
) -> Result<()> {
    let mut records = build_gene_records(table);

    let symbols: Vec<String> = table.rows.iter().map(|row| row.gene.clone()).collect();
    let entries = knowledge.fetch_gene_entries(&symbols).await?;
    info!(
        genes = records.len(),
        entries = entries.len(),
        "batched knowledge-base lookup done"
    );

    let matcher = VariantMatcher::new();
    for entry in &entries {
        match records.get_mut(&entry.name) {
            Some(record) => matcher.annotate(record, entry, mode, None),
            None => warn!(
                gene = %entry.name,
                "knowledge base answered for a gene that is not in the input"
            ),
        }
    }

    // Genes the batched call did not cover: walk the alias directory.
    let mut unresolved: Vec<String> = records
        .iter()
        .filter(|(_, record)| record.summary.is_none())
        .map(|(gene, _)| gene.clone())
        .collect();
    unresolved.sort();

    for gene in unresolved {
        match knowledge.find_alias(&gene).await? {
            Some(canonical) => {
                debug!(gene = %gene, canonical = %canonical, "resolved through gene-directory alias");
                let entry = knowledge.fetch_gene_entry(&canonical).await?;
                let alias = if canonical == gene {
                    None
                } else {
                    Some(canonical)
                };
                if let Some(record) = records.get_mut(&gene) {
                    matcher.annotate(record, &entry, mode, alias);
                }
            }
            None => {
                debug!(gene = %gene, "no knowledge-base entry under any alias");
                if let Some(record) = records.get_mut(&gene) {
                    record.mark_absent();
                }
            }
        }
    }

    let literature_counts = match literature {
        Some(source) => {
            let mut counts = Vec::with_capacity(table.rows.len());
            for row in &table.rows {
                counts.push(source.citation_count(&row.gene).await?);
            }
            Some(counts)
        }
        None => None,
    };

    write_report(out, table, &records, mode, literature_counts.as_deref())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
