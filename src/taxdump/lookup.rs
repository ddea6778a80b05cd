//! Keyed lookup over three unparsed dump sources
//!
//! [`Phylogony`] owns the name, node and division sources and builds each
//! index the first time a lookup needs it. Built indexes are kept for the
//! life of the facade, so repeated lookups never read a source twice.

use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::path::Path;
use taxwalk_core::{TaxwalkError, TaxwalkResult};
use tracing::debug;

use super::index::{DivisionIndex, NameIndex, NodeIndex, TaxonIndex};
use super::phylo::Phylo;
use super::record::{DivisionRecord, DmpRecord, NameRecord, NodeRecord};
use super::source::DumpSource;

/// Standard file names inside an NCBI taxdump directory
pub const NAMES_FILE: &str = "names.dmp";
pub const NODES_FILE: &str = "nodes.dmp";
pub const DIVISION_FILE: &str = "division.dmp";

struct LazyIndex<R> {
    label: String,
    source: RefCell<Option<DumpSource>>,
    index: OnceCell<TaxonIndex<R>>,
}

impl<R: DmpRecord> LazyIndex<R> {
    fn new(source: DumpSource) -> Self {
        Self {
            label: source.label(),
            source: RefCell::new(Some(source)),
            index: OnceCell::new(),
        }
    }

    fn ready(index: TaxonIndex<R>) -> Self {
        Self {
            label: format!("prebuilt {} index", R::KIND),
            source: RefCell::new(None),
            index: OnceCell::with_value(index),
        }
    }

    fn get(&self) -> TaxwalkResult<&TaxonIndex<R>> {
        self.index.get_or_try_init(|| {
            // A path stays in place so a failed build can be retried
            let reopened = self.source.borrow().as_ref().and_then(DumpSource::try_clone);
            let source = match reopened {
                Some(source) => source,
                None => self
                    .source
                    .borrow_mut()
                    .take()
                    .ok_or_else(|| TaxwalkError::SourceConsumed(self.label.clone()))?,
            };

            debug!("Building {} index from {}", R::KIND, self.label);
            TaxonIndex::build(source)
        })
    }

    fn is_built(&self) -> bool {
        self.index.get().is_some()
    }
}

pub struct Phylogony {
    names: LazyIndex<NameRecord>,
    nodes: LazyIndex<NodeRecord>,
    divisions: LazyIndex<DivisionRecord>,
}

impl Phylogony {
    pub fn new(
        names: impl Into<DumpSource>,
        nodes: impl Into<DumpSource>,
        divisions: impl Into<DumpSource>,
    ) -> Self {
        Self {
            names: LazyIndex::new(names.into()),
            nodes: LazyIndex::new(nodes.into()),
            divisions: LazyIndex::new(divisions.into()),
        }
    }

    /// Use names.dmp, nodes.dmp and division.dmp from one taxdump directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(NAMES_FILE),
            dir.join(NODES_FILE),
            dir.join(DIVISION_FILE),
        )
    }

    /// Wrap indexes that are already built
    pub fn from_indexes(names: NameIndex, nodes: NodeIndex, divisions: DivisionIndex) -> Self {
        Self {
            names: LazyIndex::ready(names),
            nodes: LazyIndex::ready(nodes),
            divisions: LazyIndex::ready(divisions),
        }
    }

    /// True once all three indexes exist
    pub fn indexes_built(&self) -> bool {
        self.names.is_built() && self.nodes.is_built() && self.divisions.is_built()
    }

    /// Resolver for `taxid`, building indexes on first use
    ///
    /// An unknown taxid fails with [`TaxwalkError::KeyNotFound`]; read and
    /// parse errors from the sources pass through unchanged.
    pub fn lookup(&self, taxid: &str) -> TaxwalkResult<Phylo<'_>> {
        let names = self.names.get()?;
        let nodes = self.nodes.get()?;
        let divisions = self.divisions.get()?;

        Phylo::new(taxid, names, nodes, divisions).map_err(|e| match e {
            TaxwalkError::MissingTaxon { .. } => TaxwalkError::KeyNotFound(e.to_string()),
            other => other,
        })
    }
}
