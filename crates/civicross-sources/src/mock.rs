//! In-memory mock sources for tests and offline dry runs.

use std::collections::HashMap;

use async_trait::async_trait;

use civicross_common::{CivicrossError, Result};

use crate::models::GeneEntry;
use crate::{LiteratureSource, VariantKnowledgeSource};

#[derive(Default)]
pub struct MockKnowledgeSource {
    entries: HashMap<String, GeneEntry>,
    directory_entries: HashMap<String, GeneEntry>,
    aliases: HashMap<String, String>,
}

impl MockKnowledgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gene entry under its own name.
    pub fn with_entry(mut self, entry: GeneEntry) -> Self {
        self.entries.insert(entry.name.clone(), entry);
        self
    }

    /// Registers an entry that the batched lookup misses but the single-gene
    /// lookup finds, like a knowledge base whose batch endpoint resolves a
    /// narrower symbol set than its directory.
    pub fn with_directory_entry(mut self, entry: GeneEntry) -> Self {
        self.directory_entries.insert(entry.name.clone(), entry);
        self
    }

    /// Registers `canonical` as the directory hit for queries on `alias`.
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases.insert(alias.to_string(), canonical.to_string());
        self
    }
}

#[async_trait]
impl VariantKnowledgeSource for MockKnowledgeSource {
    async fn fetch_gene_entries(&self, symbols: &[String]) -> Result<Vec<GeneEntry>> {
        // One entry per known symbol, first-query order, like the batched
        // endpoint.
        let mut seen: Vec<&String> = Vec::new();
        let mut found = Vec::new();
        for symbol in symbols {
            if seen.contains(&symbol) {
                continue;
            }
            seen.push(symbol);
            if let Some(entry) = self.entries.get(symbol) {
                found.push(entry.clone());
            }
        }
        Ok(found)
    }

    async fn fetch_gene_entry(&self, symbol: &str) -> Result<GeneEntry> {
        self.entries
            .get(symbol)
            .or_else(|| self.directory_entries.get(symbol))
            .cloned()
            .ok_or_else(|| CivicrossError::Config(format!("mock has no entry for {}", symbol)))
    }

    async fn find_alias(&self, symbol: &str) -> Result<Option<String>> {
        Ok(self.aliases.get(symbol).cloned())
    }
}

#[derive(Default)]
pub struct MockLiteratureSource {
    counts: HashMap<String, u64>,
}

impl MockLiteratureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, gene: &str, count: u64) -> Self {
        self.counts.insert(gene.to_string(), count);
        self
    }
}

#[async_trait]
impl LiteratureSource for MockLiteratureSource {
    async fn citation_count(&self, gene: &str) -> Result<u64> {
        Ok(self.counts.get(gene).copied().unwrap_or(0))
    }
}
