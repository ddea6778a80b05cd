//! NCBI taxdump parsing and lineage resolution

pub mod index;
pub mod lookup;
pub mod phylo;
pub mod record;
pub mod source;

pub use index::{index_dump, AnyIndex, DivisionIndex, NameIndex, NodeIndex, TaxonIndex};
pub use lookup::Phylogony;
pub use phylo::{Lineage, LineageEntry, Phylo, LINEAGE_SEPARATOR, ROOT_SENTINEL};
pub use record::{
    split_line, DivisionRecord, DmpRecord, NameRecord, NodeRecord, RawLine, RecordKind,
    FIELD_SEPARATOR,
};
pub use source::DumpSource;
