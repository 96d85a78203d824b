//! CIViC REST API client.
//!
//! Endpoints used:
//!   genes/{symbols}?identifier_type=entrez_symbol   batched entry lookup
//!   genes?count={n}&page={p}                        paginated gene directory

use async_trait::async_trait;
use civicross_common::http::AllowlistClient as Client;
use civicross_common::Result;
use tracing::{debug, instrument};

use crate::models::{DirectoryPage, GeneEntry};
use crate::VariantKnowledgeSource;

pub const CIVIC_API_URL: &str = "https://civicdb.org/api";

/// Default page size of the gene directory listing.
pub const DIRECTORY_PAGE_SIZE: u32 = 25;

pub struct CivicClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl CivicClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, CIVIC_API_URL, DIRECTORY_PAGE_SIZE)
    }

    pub fn with_base_url(client: Client, base_url: &str, page_size: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size,
        }
    }

    async fn fetch_directory_page(&self, page: u32) -> Result<DirectoryPage> {
        let url = format!("{}/genes", self.base_url);
        let listing = self
            .client
            .get(&url)?
            .query(&[
                ("count", self.page_size.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?
            .json::<DirectoryPage>()
            .await?;
        Ok(listing)
    }
}

#[async_trait]
impl VariantKnowledgeSource for CivicClient {
    #[instrument(skip(self, symbols), fields(n_symbols = symbols.len()))]
    async fn fetch_gene_entries(&self, symbols: &[String]) -> Result<Vec<GeneEntry>> {
        let url = format!("{}/genes/{}", self.base_url, symbols.join(","));
        let payload = self
            .client
            .get(&url)?
            .query(&[("identifier_type", "entrez_symbol")])
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        let entries = decode_gene_entries(payload)?;
        debug!(count = entries.len(), "CIViC batched lookup returned entries");
        Ok(entries)
    }

    async fn fetch_gene_entry(&self, symbol: &str) -> Result<GeneEntry> {
        let url = format!("{}/genes/{}", self.base_url, symbol);
        let entry = self
            .client
            .get(&url)?
            .query(&[("identifier_type", "entrez_symbol")])
            .send()
            .await?
            .json::<GeneEntry>()
            .await?;
        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn find_alias(&self, symbol: &str) -> Result<Option<String>> {
        let first = self.fetch_directory_page(1).await?;
        let total_pages = first.meta.total_pages;

        // The walk restarts at page 1; the probe above only reads the meta.
        for page in 1..=total_pages {
            let listing = self.fetch_directory_page(page).await?;
            for record in &listing.records {
                if record.aliases.iter().any(|alias| alias == symbol) {
                    debug!(canonical = %record.name, page, "alias found in gene directory");
                    return Ok(Some(record.name.clone()));
                }
            }
        }

        Ok(None)
    }
}

/// Decode the batched gene-entries payload. The endpoint answers with a JSON
/// array for a symbol list but a bare object for a single symbol.
fn decode_gene_entries(payload: serde_json::Value) -> Result<Vec<GeneEntry>> {
    let entries = if payload.is_array() {
        serde_json::from_value(payload)?
    } else {
        vec![serde_json::from_value(payload)?]
    };
    Ok(entries)
}
