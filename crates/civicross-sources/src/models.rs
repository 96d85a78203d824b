//! Wire types for the CIViC REST API.
//!
//! Only the fields the annotation uses are modelled; a variant's structural
//! category and positions are inferred downstream from its free-text name,
//! the API carries no structured type field for them.

use serde::Deserialize;

/// One variant record of a gene entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KbVariant {
    pub name: String,
}

impl KbVariant {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// A gene entry with its variant list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneEntry {
    pub name: String,
    #[serde(default)]
    pub variants: Vec<KbVariant>,
}

/// Pagination metadata of the gene directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryMeta {
    pub total_pages: u32,
}

/// One record of the paginated gene directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryRecord {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// One page of the gene directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryPage {
    #[serde(rename = "_meta")]
    pub meta: DirectoryMeta,
    #[serde(default)]
    pub records: Vec<DirectoryRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_entry_decodes_variants() {
        let json = r#"{"name":"BRAF","variants":[{"name":"V600E"},{"name":"V600K"}]}"#;
        let entry: GeneEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "BRAF");
        assert_eq!(entry.variants.len(), 2);
        assert_eq!(entry.variants[0], KbVariant::named("V600E"));
    }

    #[test]
    fn test_gene_entry_without_variants_field() {
        let json = r#"{"name":"BRAF"}"#;
        let entry: GeneEntry = serde_json::from_str(json).unwrap();
        assert!(entry.variants.is_empty());
    }

    #[test]
    fn test_directory_page_decodes_meta_and_records() {
        let json = r#"{
            "_meta": {"total_pages": 12, "total_count": 300},
            "records": [
                {"name": "KRAS", "aliases": ["K-RAS", "KRAS2"]},
                {"name": "TP53", "aliases": []}
            ]
        }"#;
        let page: DirectoryPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.meta.total_pages, 12);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].aliases, vec!["K-RAS", "KRAS2"]);
    }
}
