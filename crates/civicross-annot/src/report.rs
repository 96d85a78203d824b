//! Assembles the augmented output table: original columns plus the
//! annotation columns for the run mode.

use std::collections::HashMap;
use std::io::Write;

use civicross_common::records::GeneRecord;
use civicross_common::{CivicrossError, Result};

use crate::matcher::RunMode;
use crate::table::VariantTable;

/// Sentinel written in the variant-entries column when a gene has no
/// knowledge-base entry under any symbol.
pub const NO_ENTRY: &str = "no entry in CIViC";

fn annotation_columns(mode: RunMode, pubmed: bool) -> Vec<&'static str> {
    let matched_column = match mode {
        RunMode::Snvs => "CIViC_SNVs",
        RunMode::Indels => "CIViC_indels",
    };
    let mut columns = vec![
        "CIViC_variant_entries",
        matched_column,
        "CIViC_exact_hits",
        "CIViC_gene_alias",
    ];
    if pubmed {
        columns.push("PubMed_entries");
    }
    columns
}

/// Writes the augmented table. `literature` holds one count per row when
/// PubMed annotation is enabled.
pub fn write_report<W: Write>(
    out: &mut W,
    table: &VariantTable,
    records: &HashMap<String, GeneRecord>,
    mode: RunMode,
    literature: Option<&[u64]>,
) -> Result<()> {
    let mut header = table.header.clone();
    for column in annotation_columns(mode, literature.is_some()) {
        header.push('\t');
        header.push_str(column);
    }
    writeln!(out, "{}", header)?;

    for (row_index, row) in table.rows.iter().enumerate() {
        let record = records
            .get(&row.gene)
            .ok_or_else(|| CivicrossError::Table(format!("no gene record for {}", row.gene)))?;
        let summary = record.summary.as_ref().ok_or_else(|| {
            CivicrossError::Table(format!("gene {} was never looked up", row.gene))
        })?;

        let entries = match summary.variant_entries {
            Some(count) => count.to_string(),
            None => NO_ENTRY.to_string(),
        };

        let hits = record
            .positions
            .get(&row.pos)
            .and_then(|position| position.hits.as_ref())
            .ok_or_else(|| {
                CivicrossError::Table(format!(
                    "position {} of {} was never annotated",
                    row.pos, row.gene
                ))
            })?;
        let hits = if hits.is_empty() {
            "0".to_string()
        } else {
            hits.join(",")
        };

        let alias = summary.alias.as_deref().unwrap_or("0");

        write!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row.raw, entries, summary.matched, hits, alias
        )?;
        if let Some(counts) = literature {
            write!(out, "\t{}", counts.get(row_index).copied().unwrap_or(0))?;
        }
        writeln!(out)?;
    }

    Ok(())
}
