//! Tab-separated variant table parsing.
//!
//! The required columns are resolved from the header by name, so their order
//! in the file does not matter. Rows shorter than the header are padded with
//! one `.` field for output purposes; a row missing a required field is a
//! hard error naming the line.

use civicross_common::{CivicrossError, Result};

pub const POS_COLUMN: &str = "POS";
pub const GENE_COLUMN: &str = "GENE";
pub const TRANSCRIPTS_COLUMN: &str = "ANNOVAR_TRANSCRIPTS";
pub const FUNCTION_COLUMN: &str = "ANNOVAR_FUNCTION";
pub const EXONIC_COLUMN: &str = "EXONIC_CLASSIFICATION";

/// Indices of the required columns within the header.
#[derive(Debug, Clone, Copy)]
pub struct Columns {
    pub pos: usize,
    pub gene: usize,
    pub transcripts: usize,
    pub function: usize,
    pub exonic_classification: usize,
}

/// One input row: the (possibly padded) original text plus the fields the
/// annotation needs. The gene symbol is already sanitized.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub raw: String,
    pub pos: String,
    pub gene: String,
    pub transcripts: String,
    pub function: String,
    pub exonic_classification: String,
}

/// A parsed variant table.
#[derive(Debug, Clone)]
pub struct VariantTable {
    pub header: String,
    pub columns: Columns,
    pub rows: Vec<TableRow>,
}

/// Strips the parenthesised or comma-joined remainder some annotators attach
/// to the gene symbol: `"MUC16(NM_024690:exon3)"` → `"MUC16"`,
/// `"CDKN2A,CDKN2A-AS1"` → `"CDKN2A"`.
pub fn clean_gene_symbol(raw: &str) -> &str {
    let head = match raw.find('(') {
        Some(i) => &raw[..i],
        None => raw,
    };
    match head.find(',') {
        Some(i) => &head[..i],
        None => head,
    }
}

fn column_index(header_fields: &[&str], name: &str) -> Result<usize> {
    header_fields
        .iter()
        .position(|column| *column == name)
        .ok_or_else(|| CivicrossError::Table(format!("missing required column {}", name)))
}

fn row_field<'a>(fields: &[&'a str], index: usize, line_no: usize, name: &str) -> Result<&'a str> {
    fields.get(index).copied().ok_or_else(|| {
        CivicrossError::Table(format!("line {}: no {} field", line_no + 2, name))
    })
}

impl VariantTable {
    /// Reads a tab-separated table with a header row.
    pub fn parse(input: &str) -> Result<Self> {
        let mut lines = input.lines();
        let header = lines
            .next()
            .ok_or_else(|| CivicrossError::Table("empty input file".to_string()))?
            .trim_end()
            .to_string();
        let header_fields: Vec<&str> = header.split('\t').collect();

        let columns = Columns {
            pos: column_index(&header_fields, POS_COLUMN)?,
            gene: column_index(&header_fields, GENE_COLUMN)?,
            transcripts: column_index(&header_fields, TRANSCRIPTS_COLUMN)?,
            function: column_index(&header_fields, FUNCTION_COLUMN)?,
            exonic_classification: column_index(&header_fields, EXONIC_COLUMN)?,
        };

        let mut rows = Vec::new();
        for (line_no, line) in lines.enumerate() {
            let line = line.trim_end();
            let fields: Vec<&str> = line.split('\t').collect();

            let raw = if fields.len() < header_fields.len() {
                format!("{}\t.", line)
            } else {
                line.to_string()
            };

            rows.push(TableRow {
                pos: row_field(&fields, columns.pos, line_no, POS_COLUMN)?.to_string(),
                gene: clean_gene_symbol(row_field(&fields, columns.gene, line_no, GENE_COLUMN)?)
                    .to_string(),
                transcripts: row_field(&fields, columns.transcripts, line_no, TRANSCRIPTS_COLUMN)?
                    .to_string(),
                function: row_field(&fields, columns.function, line_no, FUNCTION_COLUMN)?
                    .to_string(),
                exonic_classification: row_field(
                    &fields,
                    columns.exonic_classification,
                    line_no,
                    EXONIC_COLUMN,
                )?
                .to_string(),
                raw,
            });
        }

        Ok(Self {
            header,
            columns,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "POS\tGENE\tANNOVAR_TRANSCRIPTS\tANNOVAR_FUNCTION\tEXONIC_CLASSIFICATION";

    #[test]
    fn test_parse_basic_table() {
        let input = format!(
            "{}\n100\tBRAF\tBRAF:NM_004333:exon15:c.T1799A:p.V600E\texonic\tnonsynonymous SNV\n",
            HEADER
        );
        let table = VariantTable::parse(&input).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].pos, "100");
        assert_eq!(table.rows[0].gene, "BRAF");
        assert_eq!(table.rows[0].exonic_classification, "nonsynonymous SNV");
    }

    #[test]
    fn test_columns_resolved_by_name_not_position() {
        let input = "GENE\tEXONIC_CLASSIFICATION\tPOS\tANNOVAR_FUNCTION\tANNOVAR_TRANSCRIPTS\n\
                     TP53\tstopgain\t17\texonic\tTP53:NM_000546:exon8:c.C916T:p.R306X\n";
        let table = VariantTable::parse(input).unwrap();
        assert_eq!(table.rows[0].gene, "TP53");
        assert_eq!(table.rows[0].pos, "17");
        assert_eq!(table.rows[0].function, "exonic");
    }

    #[test]
    fn test_short_row_is_padded_once() {
        let input = format!("{}\tEXTRA\n100\tBRAF\tx\texonic\tnonsynonymous SNV\n", HEADER);
        let table = VariantTable::parse(&input).unwrap();
        assert_eq!(
            table.rows[0].raw,
            "100\tBRAF\tx\texonic\tnonsynonymous SNV\t."
        );
    }

    #[test]
    fn test_full_width_row_is_not_padded() {
        let input = format!("{}\n100\tBRAF\tx\texonic\tnonsynonymous SNV\n", HEADER);
        let table = VariantTable::parse(&input).unwrap();
        assert_eq!(table.rows[0].raw, "100\tBRAF\tx\texonic\tnonsynonymous SNV");
    }

    #[test]
    fn test_gene_symbol_is_sanitized() {
        assert_eq!(clean_gene_symbol("MUC16(NM_024690:exon3)"), "MUC16");
        assert_eq!(clean_gene_symbol("CDKN2A,CDKN2A-AS1"), "CDKN2A");
        assert_eq!(clean_gene_symbol("BRAF"), "BRAF");

        let input = format!("{}\n100\tMUC16(abc),MUC17\tx\texonic\t.\n", HEADER);
        let table = VariantTable::parse(&input).unwrap();
        assert_eq!(table.rows[0].gene, "MUC16");
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let input = "POS\tGENE\tANNOVAR_TRANSCRIPTS\tANNOVAR_FUNCTION\n100\tBRAF\tx\texonic\n";
        let err = VariantTable::parse(input).unwrap_err();
        assert!(err.to_string().contains("EXONIC_CLASSIFICATION"));
    }

    #[test]
    fn test_row_missing_required_field_is_error() {
        let input = format!("{}\n100\tBRAF\n", HEADER);
        let err = VariantTable::parse(&input).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_crlf_input() {
        let input = format!("{}\r\n100\tBRAF\tx\texonic\tnonsynonymous SNV\r\n", HEADER);
        let table = VariantTable::parse(&input).unwrap();
        assert_eq!(table.header, HEADER);
        assert_eq!(table.rows[0].raw, "100\tBRAF\tx\texonic\tnonsynonymous SNV");
    }
}
