//! civicross-sources — Remote clients for the CIViC knowledge base and the
//! PubMed E-utilities literature API.

pub mod civic;
pub mod mock;
pub mod models;
pub mod pubmed;

use async_trait::async_trait;

use civicross_common::Result;
use models::GeneEntry;

/// Common interface to a gene/variant knowledge base.
#[async_trait]
pub trait VariantKnowledgeSource: Send + Sync {
    /// Batched lookup: one call covering every gene symbol of the run.
    /// Returns an entry per requested gene the knowledge base knows about.
    async fn fetch_gene_entries(&self, symbols: &[String]) -> Result<Vec<GeneEntry>>;

    /// Single-gene lookup, used once an alias has been resolved.
    async fn fetch_gene_entry(&self, symbol: &str) -> Result<GeneEntry>;

    /// Walks the knowledge-base gene directory for an entry whose alias list
    /// contains `symbol`. Returns the canonical name of the first match, in
    /// page order.
    async fn find_alias(&self, symbol: &str) -> Result<Option<String>>;
}

/// Common interface to a literature-search service.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    /// Number of publications mentioning the gene in a cancer context.
    async fn citation_count(&self, gene: &str) -> Result<u64>;
}
