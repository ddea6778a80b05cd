pub mod output;

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use taxwalk_core::{Config, OutputFormat, TaxwalkError, TaxwalkResult};
use tracing::debug;

use crate::taxdump::Phylogony;

#[derive(Parser, Debug)]
#[command(
    name = "taxwalk",
    version,
    about = "Resolve an NCBI taxid into its lineage",
    long_about = "taxwalk reads names.dmp, nodes.dmp and division.dmp from an NCBI taxonomy \
                  dump and prints the chain of ancestors of one taxid, from the taxon itself \
                  up to the root. Files ending in .gz are read compressed."
)]
pub struct Cli {
    /// names.dmp file
    pub names: PathBuf,

    /// nodes.dmp file
    pub nodes: PathBuf,

    /// division.dmp file
    pub division: PathBuf,

    /// taxid to look up the lineage for
    pub taxid: String,

    /// Output format (defaults to the config file, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the names recorded for this rank instead of the lineage
    #[arg(long, value_name = "RANK")]
    pub rank: Option<String>,

    /// Config file (defaults to $TAXWALK_HOME/config.toml)
    #[arg(short, long, value_name = "PATH", env = "TAXWALK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn load_config(&self) -> TaxwalkResult<Config> {
        match &self.config {
            Some(path) => taxwalk_core::load_config(path),
            None => taxwalk_core::load_or_default(),
        }
    }

    /// Log filter used when TAXWALK_LOG is unset
    pub fn log_directive(&self, config: &Config) -> String {
        match self.verbose {
            0 => config.logging.level.clone(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}

/// Resolve the requested taxid and write the result to `out`
pub fn run<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let phylogony = Phylogony::new(cli.names.clone(), cli.nodes.clone(), cli.division.clone());
    let phylo = phylogony.lookup(&cli.taxid)?;
    let format = cli.format.unwrap_or(config.output.format);
    debug!("Writing taxid {} as {:?}", cli.taxid, format);

    match &cli.rank {
        Some(rank) => output::write_rank(out, &phylo, rank, format)?,
        None => output::write_lineage(out, &phylo, format, &config.output.separator)?,
    }
    out.flush().map_err(TaxwalkError::from)?;
    Ok(())
}

/// Process exit code for an error returned by [`run`]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TaxwalkError>() {
        Some(TaxwalkError::Configuration(_)) => 2,
        Some(TaxwalkError::Io(_)) => 3,
        Some(err) if err.is_parse_error() => 4,
        Some(err) if err.is_not_found() => 5,
        _ => 1,
    }
}
