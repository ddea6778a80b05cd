//! Identifier index over taxdump records
//!
//! Records are grouped by their id. An id may own several records (a taxon
//! usually has a scientific name plus synonyms) and they keep file order.

use indexmap::IndexMap;
use serde_json::Value;
use std::io::BufRead;
use taxwalk_core::{TaxwalkError, TaxwalkResult};
use tracing::debug;

use super::record::{DivisionRecord, DmpRecord, NameRecord, NodeRecord, RecordKind};
use super::source::DumpSource;

#[derive(Debug, Clone)]
pub struct TaxonIndex<R> {
    entries: IndexMap<String, Vec<R>>,
    record_count: usize,
}

pub type NameIndex = TaxonIndex<NameRecord>;
pub type NodeIndex = TaxonIndex<NodeRecord>;
pub type DivisionIndex = TaxonIndex<DivisionRecord>;

impl<R> Default for TaxonIndex<R> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            record_count: 0,
        }
    }
}

impl<R: DmpRecord> TaxonIndex<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record after any others sharing its id
    pub fn insert(&mut self, record: R) {
        self.entries
            .entry(record.id().to_string())
            .or_default()
            .push(record);
        self.record_count += 1;
    }

    /// Read and index every line of a source
    pub fn build(source: impl Into<DumpSource>) -> TaxwalkResult<Self> {
        let source = source.into();
        let origin = source.label();
        let reader = source.open()?;
        Self::from_reader(reader, &origin)
    }

    /// Index every line of an open reader
    ///
    /// A line that does not match the schema aborts the build; the error
    /// carries `origin` and the 1-based line number.
    pub fn from_reader<B: BufRead>(reader: B, origin: &str) -> TaxwalkResult<Self> {
        let mut index = Self::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let record = R::parse_line(&line).map_err(|e| TaxwalkError::Malformed {
                origin: origin.to_string(),
                line: line_idx + 1,
                source: Box::new(e),
            })?;
            index.insert(record);
        }

        debug!(
            "Indexed {} {} records under {} ids from {}",
            index.record_count,
            R::KIND,
            index.len(),
            origin
        );
        Ok(index)
    }

    /// All records for an id, in insertion order
    pub fn get(&self, id: &str) -> Option<&[R]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// The first record for an id
    pub fn first(&self, id: &str) -> Option<&R> {
        self.entries.get(id).and_then(|records| records.first())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Ids in first-seen order with their records
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[R])> {
        self.entries
            .iter()
            .map(|(id, records)| (id.as_str(), records.as_slice()))
    }
}

impl<R: DmpRecord> FromIterator<R> for TaxonIndex<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}

/// An index whose record kind was chosen at runtime
#[derive(Debug, Clone)]
pub enum AnyIndex {
    Node(NodeIndex),
    Name(NameIndex),
    Division(DivisionIndex),
}

impl AnyIndex {
    pub fn kind(&self) -> RecordKind {
        match self {
            AnyIndex::Node(_) => RecordKind::Node,
            AnyIndex::Name(_) => RecordKind::Name,
            AnyIndex::Division(_) => RecordKind::Division,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnyIndex::Node(index) => index.len(),
            AnyIndex::Name(index) => index.len(),
            AnyIndex::Division(index) => index.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        match self {
            AnyIndex::Node(index) => index.contains(id),
            AnyIndex::Name(index) => index.contains(id),
            AnyIndex::Division(index) => index.contains(id),
        }
    }

    /// Records for an id as a JSON array, `None` when the id is absent
    pub fn records_json(&self, id: &str) -> TaxwalkResult<Option<Value>> {
        let value = match self {
            AnyIndex::Node(index) => index.get(id).map(serde_json::to_value),
            AnyIndex::Name(index) => index.get(id).map(serde_json::to_value),
            AnyIndex::Division(index) => index.get(id).map(serde_json::to_value),
        };
        Ok(value.transpose()?)
    }
}

/// Build an index for a record kind given by name ("Node", "Name", "Division")
///
/// An unknown kind is rejected before the source is opened.
pub fn index_dump(source: impl Into<DumpSource>, kind: &str) -> TaxwalkResult<AnyIndex> {
    let kind: RecordKind = kind.parse()?;
    let source = source.into();

    Ok(match kind {
        RecordKind::Node => AnyIndex::Node(TaxonIndex::build(source)?),
        RecordKind::Name => AnyIndex::Name(TaxonIndex::build(source)?),
        RecordKind::Division => AnyIndex::Division(TaxonIndex::build(source)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use taxwalk_test::fixtures::{DIVISION_DMP, NAMES_DMP, NODES_DMP};
    use taxwalk_test::TestEnvironment;

    fn names() -> NameIndex {
        TaxonIndex::from_reader(Cursor::new(NAMES_DMP), "names.dmp").unwrap()
    }

    #[test]
    fn test_indexes_by_id() {
        let index = names();
        let all = index.get("1").unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "1");
        assert_eq!(all[0].name, "all");
        assert_eq!(all[1].id, "1");
        assert_eq!(all[1].name, "root");
    }

    #[test]
    fn test_duplicates_keep_insertion_order() {
        let index = names();
        let bacteria: Vec<&str> = index
            .get("2")
            .unwrap()
            .iter()
            .map(|n| n.name.as_str())
            .collect();

        assert_eq!(bacteria.len(), 8);
        assert_eq!(bacteria[0], "Bacteria");
        assert_eq!(bacteria[7], "not Bacteria Haeckel 1894");
        assert_eq!(index.record_count(), 16);
        assert_eq!(index.len(), 6);
    }

    #[test]
    fn test_ids_keep_first_seen_order() {
        let index = names();
        let ids: Vec<&str> = index.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_first_returns_earliest_record() {
        let mut nodes: NodeIndex =
            TaxonIndex::from_reader(Cursor::new(NODES_DMP), "nodes").unwrap();
        let mut shadow = nodes.first("2").unwrap().clone();
        shadow.parent_id = "6".to_string();
        nodes.insert(shadow);

        assert_eq!(nodes.get("2").unwrap().len(), 2);
        assert_eq!(nodes.first("2").unwrap().parent_id, "3");
        assert!(nodes.first("99").is_none());
    }

    #[test]
    fn test_accepts_open_reader() {
        let source = DumpSource::from_text("names", NAMES_DMP);
        let index = NameIndex::build(source).unwrap();

        assert_eq!(index.first("1").unwrap().name, "all");
        assert_eq!(index.get("1").unwrap()[1].name, "root");
    }

    #[test]
    fn test_accepts_path() {
        let env = TestEnvironment::new().unwrap();
        let index = DivisionIndex::build(env.division_path()).unwrap();

        assert_eq!(index.len(), 12);
        assert_eq!(index.first("11").unwrap().code, "ENV");
    }

    #[test]
    fn test_accepts_gzip_path() {
        let env = TestEnvironment::new().unwrap();
        let path = env.write_gzip("nodes.dmp.gz", NODES_DMP).unwrap();
        let index = NodeIndex::build(path).unwrap();

        assert_eq!(index.len(), 6);
        assert_eq!(index.first("5").unwrap().rank, "family");
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let text = format!("{}bogus line\n", DIVISION_DMP);
        let err = DivisionIndex::build(DumpSource::from_text("division.dmp", text)).unwrap_err();

        match err {
            TaxwalkError::Malformed { origin, line, source } => {
                assert_eq!(origin, "division.dmp");
                assert_eq!(line, 13);
                assert!(matches!(*source, TaxwalkError::Schema { found: 1, .. }));
            }
            other => panic!("Expected Malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_is_malformed() {
        let err = NameIndex::from_reader(Cursor::new("1\t|\tall\t|\t\t|\tsynonym\t|\n\n"), "names")
            .unwrap_err();
        assert!(matches!(err, TaxwalkError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_no_cross_index_validation() {
        // node 2 points at division 0, which this index lacks
        let divisions =
            DivisionIndex::from_reader(Cursor::new("8\t|\tUNA\t|\tUnassigned\t|\t\t|\n"), "div")
                .unwrap();
        let nodes = NodeIndex::from_reader(Cursor::new(NODES_DMP), "nodes").unwrap();

        assert!(nodes.contains("2"));
        assert!(!divisions.contains(&nodes.first("2").unwrap().division));
    }

    #[test]
    fn test_index_dump_selects_kind() {
        let index = index_dump(DumpSource::from_text("names", NAMES_DMP), "Name").unwrap();

        assert_eq!(index.kind(), RecordKind::Name);
        assert_eq!(index.len(), 6);
        let json = index.records_json("6").unwrap().unwrap();
        assert_eq!(json[0]["name"], "Azorhizobium");
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert!(index.records_json("99").unwrap().is_none());
    }

    #[test]
    fn test_invalid_dmptype() {
        let err = index_dump(DumpSource::path("/path/to/nodes.dmp"), "invalid").unwrap_err();
        match err {
            TaxwalkError::UnknownRecordKind(kind) => assert_eq!(kind, "invalid"),
            other => panic!("Expected UnknownRecordKind, got {:?}", other),
        }
    }
}
