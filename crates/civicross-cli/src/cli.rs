//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use civicross_annot::RunMode;

/// Compares variants with entries of CIViC and PubMed and writes the number
/// of matches into the output file. Accepts SNV and indel tables as
/// tab-separated files.
#[derive(Debug, Parser)]
#[command(name = "civicross", version, about)]
#[command(group(ArgGroup::new("mode").required(true)))]
pub struct Args {
    /// Input file path
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Output file path
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// SNV table
    #[arg(short = 's', long = "snvs", group = "mode")]
    pub snvs: bool,

    /// Indels table
    #[arg(short = 'i', long = "indels", group = "mode")]
    pub indels: bool,

    /// Annotate the number of PubMed search results for gene + neoplasms.
    /// (Warning: one throttled query per row, can slow the run down
    /// significantly!)
    #[arg(short = 'p', long = "pubmed")]
    pub pubmed: bool,
}

impl Args {
    pub fn mode(&self) -> RunMode {
        if self.indels {
            RunMode::Indels
        } else {
            RunMode::Snvs
        }
    }
}
