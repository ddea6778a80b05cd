//! taxwalk: NCBI taxonomy dump parsing and lineage resolution
//!
//! ```no_run
//! use taxwalk::Phylogony;
//!
//! let taxonomy = Phylogony::from_dir("/data/taxdump");
//! let phylo = taxonomy.lookup("9606")?;
//! println!("{}", phylo.render()?);
//! # Ok::<(), taxwalk::TaxwalkError>(())
//! ```

pub mod cli;
pub mod taxdump;

pub use taxdump::{
    index_dump, DumpSource, Lineage, Phylo, Phylogony, RecordKind, TaxonIndex, ROOT_SENTINEL,
};
pub use taxwalk_core::{Config, OutputFormat, TaxwalkError, TaxwalkResult};
