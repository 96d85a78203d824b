//! PubMed E-utilities client.
//!
//! Endpoint used:
//!   esearch: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi
//!
//! Queries are restricted to title/abstract plus the neoplasms MeSH heading,
//! and every call is followed by a politeness pause: without an API key NCBI
//! rejects more than ~3 requests per second.

use std::time::Duration;

use async_trait::async_trait;
use civicross_common::http::AllowlistClient as Client;
use civicross_common::{CivicrossError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, instrument};

use crate::LiteratureSource;

const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

pub struct PubMedClient {
    client: Client,
    api_key: Option<String>,
    delay: Duration,
}

impl PubMedClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            delay: Duration::from_secs(1),
        }
    }

    /// Overrides the post-call pause.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl LiteratureSource for PubMedClient {
    #[instrument(skip(self))]
    async fn citation_count(&self, gene: &str) -> Result<u64> {
        let term = format!("{}[TIAB] AND neoplasms[MeSH]", gene);
        let mut params = vec![("db", "pubmed".to_string()), ("term", term)];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        let xml = self
            .client
            .get(ESEARCH_URL)?
            .query(&params)
            .send()
            .await?
            .text()
            .await?;

        let count = parse_esearch_count(&xml)?;
        debug!(count, "PubMed esearch returned count");

        tokio::time::sleep(self.delay).await;

        Ok(count)
    }
}

/// Pull the first `<Count>` element out of an eSearch XML response. Later
/// `<Count>` tags inside `<TranslationStack>` repeat per-term counts and are
/// not the answer.
fn parse_esearch_count(xml: &str) -> Result<u64> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_count = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"Count" => in_count = true,
            Ok(Event::Text(ref e)) if in_count => {
                let text = e.unescape().unwrap_or_default();
                return text.trim().parse::<u64>().map_err(|_| {
                    CivicrossError::Xml(format!("non-numeric <Count> in eSearch response: {}", text))
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CivicrossError::Xml(e.to_string())),
            _ => {}
        }
    }

    Err(CivicrossError::Xml(
        "no <Count> element in eSearch response".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_from_esearch_response() {
        let xml = r#"<?xml version="1.0"?>
<eSearchResult>
  <Count>1432</Count>
  <RetMax>20</RetMax>
  <TranslationStack>
    <TermSet><Term>BRAF[TIAB]</Term><Count>9999</Count></TermSet>
  </TranslationStack>
</eSearchResult>"#;
        assert_eq!(parse_esearch_count(xml).unwrap(), 1432);
    }

    #[test]
    fn test_parse_count_zero() {
        let xml = "<eSearchResult><Count>0</Count></eSearchResult>";
        assert_eq!(parse_esearch_count(xml).unwrap(), 0);
    }

    #[test]
    fn test_missing_count_is_error() {
        let xml = "<eSearchResult><RetMax>20</RetMax></eSearchResult>";
        let err = parse_esearch_count(xml).unwrap_err();
        assert!(matches!(err, CivicrossError::Xml(_)));
    }

    #[test]
    fn test_non_numeric_count_is_error() {
        let xml = "<eSearchResult><Count>many</Count></eSearchResult>";
        assert!(parse_esearch_count(xml).is_err());
    }
}
