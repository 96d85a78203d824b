use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::error::CivicrossError;

/// An allowlist-capped HTTP client that only talks to known annotation
/// services. A misconfigured base URL fails here instead of sending gene
/// lists to an arbitrary host.
#[derive(Debug, Clone)]
pub struct AllowlistClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl AllowlistClient {
    /// Creates a client with the default allowlist and a 30 s request timeout.
    pub fn new() -> Result<Self, CivicrossError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, CivicrossError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "civicdb.org",             // CIViC REST API
            "civic.genome.wustl.edu",  // CIViC legacy host
            "eutils.ncbi.nlm.nih.gov", // PubMed E-utilities
            "localhost",               // local API mirrors
            "127.0.0.1",               // localhost alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| CivicrossError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current allowlist policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Check exact match or if it's a subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Exposes the inner `reqwest::Client` builder pattern safely for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, CivicrossError> {
        if !self.is_allowed(url) {
            return Err(CivicrossError::Security(format!(
                "host not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
