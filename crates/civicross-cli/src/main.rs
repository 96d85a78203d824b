//! civicross — Cross-references genomic-variant tables against the CIViC
//! knowledge base and, optionally, PubMed.
//! Entry point for the annotation binary.

mod cli;
mod config;

use std::fs;
use std::io::BufWriter;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use civicross_annot::pipeline::annotate_table;
use civicross_annot::table::VariantTable;
use civicross_common::http::AllowlistClient;
use civicross_sources::civic::CivicClient;
use civicross_sources::pubmed::PubMedClient;
use civicross_sources::LiteratureSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("civicross=info")),
        )
        .init();

    let args = cli::Args::parse();
    let config = config::Config::load()?;
    let mode = args.mode();

    let mut http = AllowlistClient::with_timeout(Duration::from_secs(config.http.timeout_secs))?;
    for domain in &config.http.allow_domains {
        http.allow_domain(domain);
    }

    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let table = VariantTable::parse(&input)?;
    info!(rows = table.rows.len(), ?mode, "input table parsed");

    let civic = CivicClient::with_base_url(
        http.clone(),
        &config.civic.base_url,
        config.civic.directory_page_size,
    );

    let pubmed;
    let literature: Option<&dyn LiteratureSource> = if args.pubmed {
        pubmed = PubMedClient::new(http, config.ncbi_api_key())
            .with_delay(Duration::from_millis(config.pubmed.delay_ms));
        Some(&pubmed)
    } else {
        None
    };

    let file = fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut out = BufWriter::new(file);

    annotate_table(&table, &civic, literature, mode, &mut out).await?;

    info!(output = %args.output.display(), "annotation finished");
    Ok(())
}
