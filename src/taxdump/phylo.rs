//! Lineage resolution for a single taxon
//!
//! A [`Phylo`] holds a target taxid and borrows the name, node and division
//! indexes. Nothing is walked until a lineage, a rank or the rendered string
//! is asked for; the walk then runs once and its outcome (success or
//! failure) is kept for the life of the resolver.
//!
//! The walk starts at the target and follows `parent_id` until it reaches a
//! taxon whose first name is [`ROOT_SENTINEL`]. That root is not part of the
//! lineage. Each visited taxon contributes one entry and files its names
//! under its rank; when two visited taxa share a rank, the one closer to the
//! root wins. An ancestor with no name or node record ends the walk early,
//! leaving the entries collected so far.

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use taxwalk_core::{TaxwalkError, TaxwalkResult};
use tracing::{debug, trace, warn};

use super::index::{DivisionIndex, NameIndex, NodeIndex};
use super::record::{DivisionRecord, NameRecord, NodeRecord};

/// First name of the taxon that ends every walk
pub const ROOT_SENTINEL: &str = "all";

/// Default separator between rendered lineage segments
pub const LINEAGE_SEPARATOR: &str = " -> ";

/// One taxon on the way to the root
#[derive(Debug, Clone, Copy)]
pub struct LineageEntry<'a> {
    pub names: &'a [NameRecord],
    /// First node record for the taxid
    pub node: &'a NodeRecord,
    /// First division record for the node's division id
    pub division: &'a DivisionRecord,
}

impl<'a> LineageEntry<'a> {
    pub fn taxid(&self) -> &'a str {
        &self.node.id
    }

    pub fn rank(&self) -> &'a str {
        &self.node.rank
    }

    /// The name used for rendering
    pub fn primary_name(&self) -> &'a str {
        self.names.first().map(|n| n.name.as_str()).unwrap_or_default()
    }

    /// Every name of the taxon, in file order
    pub fn name_texts(&self) -> Vec<String> {
        self.names.iter().map(|n| n.name.clone()).collect()
    }
}

impl fmt::Display for LineageEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.primary_name(), self.rank())
    }
}

#[derive(Serialize)]
struct EntryView<'a> {
    taxid: &'a str,
    name: &'a str,
    rank: &'a str,
    division: &'a str,
    names: Vec<&'a str>,
}

/// Ordered entries from the target (first) to the child of the root (last)
#[derive(Debug, Clone, Default)]
pub struct Lineage<'a> {
    entries: Vec<LineageEntry<'a>>,
    ranks: IndexMap<String, Vec<String>>,
}

impl<'a> Lineage<'a> {
    pub fn entries(&self) -> &[LineageEntry<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names filed under a rank during the walk
    pub fn rank(&self, rank: &str) -> Option<&[String]> {
        self.ranks.get(rank).map(Vec::as_slice)
    }

    /// Ranks in the order they were first seen
    pub fn ranks(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.ranks
            .iter()
            .map(|(rank, names)| (rank.as_str(), names.as_slice()))
    }

    pub fn render_with(&self, separator: &str) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    pub fn to_json(&self) -> TaxwalkResult<Value> {
        let entries: Vec<EntryView<'_>> = self
            .entries
            .iter()
            .map(|entry| EntryView {
                taxid: entry.taxid(),
                name: entry.primary_name(),
                rank: entry.rank(),
                division: &entry.division.code,
                names: entry.names.iter().map(|n| n.name.as_str()).collect(),
            })
            .collect();

        Ok(serde_json::json!({
            "lineage": serde_json::to_value(entries)?,
            "ranks": serde_json::to_value(&self.ranks)?,
        }))
    }
}

impl fmt::Display for Lineage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(LINEAGE_SEPARATOR))
    }
}

/// Why a walk stopped short of the root
#[derive(Debug, Clone)]
enum WalkFailure {
    Broken { taxid: String, index: &'static str },
    Cycle(String),
}

impl From<&WalkFailure> for TaxwalkError {
    fn from(failure: &WalkFailure) -> Self {
        match failure {
            WalkFailure::Broken { taxid, index } => TaxwalkError::BrokenLineage {
                taxid: taxid.clone(),
                index,
            },
            WalkFailure::Cycle(taxid) => TaxwalkError::CyclicLineage(taxid.clone()),
        }
    }
}

pub struct Phylo<'a> {
    taxid: String,
    names: &'a NameIndex,
    nodes: &'a NodeIndex,
    divisions: &'a DivisionIndex,
    lineage: OnceCell<Result<Lineage<'a>, WalkFailure>>,
}

impl<'a> Phylo<'a> {
    /// Create a resolver for `taxid`
    ///
    /// Fails with [`TaxwalkError::MissingTaxon`] when the taxid has no name
    /// or no node record. Nothing else is checked until the walk.
    pub fn new(
        taxid: impl Into<String>,
        names: &'a NameIndex,
        nodes: &'a NodeIndex,
        divisions: &'a DivisionIndex,
    ) -> TaxwalkResult<Self> {
        let taxid = taxid.into();

        if !names.contains(&taxid) {
            return Err(TaxwalkError::MissingTaxon { taxid, index: "name" });
        }
        if !nodes.contains(&taxid) {
            return Err(TaxwalkError::MissingTaxon { taxid, index: "node" });
        }

        Ok(Self {
            taxid,
            names,
            nodes,
            divisions,
            lineage: OnceCell::new(),
        })
    }

    pub fn taxid(&self) -> &str {
        &self.taxid
    }

    /// Whether the walk has run (successfully or not)
    pub fn is_walked(&self) -> bool {
        self.lineage.get().is_some()
    }

    /// The lineage, walking on first use
    pub fn lineage(&self) -> TaxwalkResult<&Lineage<'a>> {
        self.lineage
            .get_or_init(|| self.walk())
            .as_ref()
            .map_err(TaxwalkError::from)
    }

    /// Names of the visited taxon with this rank
    pub fn rank(&self, rank: &str) -> TaxwalkResult<&[String]> {
        self.lineage()?
            .rank(rank)
            .ok_or_else(|| TaxwalkError::AttributeNotFound(rank.to_string()))
    }

    /// `name(rank)` segments joined by `" -> "`, target first
    pub fn render(&self) -> TaxwalkResult<String> {
        self.render_with(LINEAGE_SEPARATOR)
    }

    pub fn render_with(&self, separator: &str) -> TaxwalkResult<String> {
        Ok(self.lineage()?.render_with(separator))
    }

    fn walk(&self) -> Result<Lineage<'a>, WalkFailure> {
        let mut lineage = Lineage::default();
        let mut visited = HashSet::new();
        let mut current = self.taxid.clone();

        loop {
            let (names, node) = match (self.names.get(&current), self.nodes.first(&current)) {
                (Some(names), Some(node)) => (names, node),
                _ => {
                    warn!(
                        "Lineage of taxid {} stops at unknown ancestor {}",
                        self.taxid, current
                    );
                    break;
                }
            };
            if names.first().map(|n| n.name.as_str()) == Some(ROOT_SENTINEL) {
                break;
            }
            if !visited.insert(current.clone()) {
                return Err(WalkFailure::Cycle(current));
            }

            let division = self
                .divisions
                .first(&node.division)
                .ok_or_else(|| WalkFailure::Broken {
                    taxid: node.division.clone(),
                    index: "division",
                })?;
            let entry = LineageEntry {
                names,
                node,
                division,
            };

            trace!("taxid {} -> {}", current, entry);
            lineage
                .ranks
                .insert(entry.rank().to_string(), entry.name_texts());
            lineage.entries.push(entry);
            current = node.parent_id.clone();
        }

        debug!(
            "Resolved taxid {} through {} ancestors",
            self.taxid,
            lineage.len()
        );
        Ok(lineage)
    }
}

impl fmt::Debug for Phylo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Phylo")
            .field("taxid", &self.taxid)
            .field("walked", &self.is_walked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxdump::index::TaxonIndex;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;
    use taxwalk_test::fixtures::{
        name_line, node_line, BACTERIA_LINEAGE, BACTERIA_NAMES, DIVISION_DMP, NAMES_DMP,
        NODES_DMP,
    };

    struct Indexes {
        names: NameIndex,
        nodes: NodeIndex,
        divisions: DivisionIndex,
    }

    impl Indexes {
        fn fixtures() -> Self {
            Self::from_text(NAMES_DMP, NODES_DMP, DIVISION_DMP)
        }

        fn from_text(names: &str, nodes: &str, divisions: &str) -> Self {
            Self {
                names: TaxonIndex::from_reader(Cursor::new(names), "names").unwrap(),
                nodes: TaxonIndex::from_reader(Cursor::new(nodes), "nodes").unwrap(),
                divisions: TaxonIndex::from_reader(Cursor::new(divisions), "division").unwrap(),
            }
        }

        fn phylo(&self, taxid: &str) -> TaxwalkResult<Phylo<'_>> {
            Phylo::new(taxid, &self.names, &self.nodes, &self.divisions)
        }
    }

    #[test]
    fn test_contains_correct_phylogeny() {
        let indexes = Indexes::fixtures();
        let phylo = indexes.phylo("2").unwrap();

        assert_eq!(phylo.rank("species").unwrap().to_vec(), BACTERIA_NAMES.to_vec());
        assert_eq!(phylo.rank("genus").unwrap().to_vec(), vec!["genusname"]);
        assert_eq!(phylo.rank("order").unwrap().to_vec(), vec!["ordername"]);
        assert_eq!(phylo.rank("family").unwrap().to_vec(), vec!["familyname"]);
    }

    #[rstest]
    #[case("2", BACTERIA_LINEAGE)]
    #[case("3", "genusname(genus) -> ordername(order) -> familyname(family)")]
    #[case("5", "familyname(family)")]
    #[case("6", "Azorhizobium(species)")]
    fn test_render_lineage(#[case] taxid: &str, #[case] expected: &str) {
        let indexes = Indexes::fixtures();
        let phylo = indexes.phylo(taxid).unwrap();

        assert_eq!(phylo.render().unwrap(), expected);
        assert_eq!(phylo.lineage().unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("99", "name")]
    #[case("", "name")]
    fn test_no_phylo_for_taxid(#[case] taxid: &str, #[case] index: &str) {
        let indexes = Indexes::fixtures();
        match indexes.phylo(taxid).unwrap_err() {
            TaxwalkError::MissingTaxon { taxid: missing, index: which } => {
                assert_eq!(missing, taxid);
                assert_eq!(which, index);
            }
            other => panic!("Expected MissingTaxon, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_from_node_index_only() {
        let names = format!("{}{}\n", NAMES_DMP, name_line("7", "orphan"));
        let indexes = Indexes::from_text(&names, NODES_DMP, DIVISION_DMP);

        assert!(indexes.names.contains("7"));
        assert!(matches!(
            indexes.phylo("7"),
            Err(TaxwalkError::MissingTaxon { index: "node", .. })
        ));
    }

    #[test]
    fn test_missing_from_name_index_only() {
        let nodes = format!("{}{}\n", NODES_DMP, node_line("7", "1", "genus"));
        let indexes = Indexes::from_text(NAMES_DMP, &nodes, DIVISION_DMP);

        assert!(matches!(
            indexes.phylo("7"),
            Err(TaxwalkError::MissingTaxon { index: "name", .. })
        ));
    }

    #[test]
    fn test_root_target_has_empty_lineage() {
        let indexes = Indexes::fixtures();
        let phylo = indexes.phylo("1").unwrap();

        assert!(phylo.lineage().unwrap().is_empty());
        assert_eq!(phylo.render().unwrap(), "");
        assert!(matches!(
            phylo.rank("no rank"),
            Err(TaxwalkError::AttributeNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_rank_is_attribute_error() {
        let indexes = Indexes::fixtures();
        let phylo = indexes.phylo("6").unwrap();

        match phylo.rank("genus").unwrap_err() {
            TaxwalkError::AttributeNotFound(rank) => assert_eq!(rank, "genus"),
            other => panic!("Expected AttributeNotFound, got {:?}", other),
        }
        assert!(phylo.is_walked());
    }

    #[test]
    fn test_walk_is_lazy_and_runs_once() {
        let indexes = Indexes::fixtures();
        let phylo = indexes.phylo("2").unwrap();
        assert!(!phylo.is_walked());

        let first = phylo.render().unwrap();
        let entries = phylo.lineage().unwrap().len();
        let second = phylo.render().unwrap();

        assert!(phylo.is_walked());
        assert_eq!(first, second);
        assert_eq!(entries, 4);
        assert_eq!(phylo.lineage().unwrap().len(), 4);
        assert!(std::ptr::eq(phylo.lineage().unwrap(), phylo.lineage().unwrap()));
    }

    #[test]
    fn test_entries_carry_node_and_division() {
        let indexes = Indexes::fixtures();
        let phylo = indexes.phylo("2").unwrap();
        let entries = phylo.lineage().unwrap().entries();

        let taxids: Vec<&str> = entries.iter().map(|e| e.taxid()).collect();
        assert_eq!(taxids, vec!["2", "3", "4", "5"]);
        assert_eq!(entries[0].division.code, "BCT");
        assert_eq!(entries[0].names.len(), 8);
        assert_eq!(entries[3].node.parent_id, "1");
    }

    #[test]
    fn test_first_node_record_wins() {
        let nodes = format!("{}{}\n", NODES_DMP, node_line("6", "5", "strain"));
        let indexes = Indexes::from_text(NAMES_DMP, &nodes, DIVISION_DMP);

        assert_eq!(indexes.nodes.get("6").unwrap().len(), 2);
        assert_eq!(indexes.phylo("6").unwrap().render().unwrap(), "Azorhizobium(species)");
    }

    #[test]
    fn test_shared_rank_keeps_rootmost_names() {
        let names = format!(
            "{}\n{}\n{}\n",
            name_line("1", "all"),
            name_line("10", "leaf"),
            name_line("11", "upper")
        );
        let nodes = format!(
            "{}\n{}\n{}\n",
            node_line("1", "1", "no rank"),
            node_line("10", "11", "no rank"),
            node_line("11", "1", "no rank")
        );
        let indexes = Indexes::from_text(&names, &nodes, DIVISION_DMP);
        let phylo = indexes.phylo("10").unwrap();

        assert_eq!(phylo.render().unwrap(), "leaf(no rank) -> upper(no rank)");
        assert_eq!(phylo.rank("no rank").unwrap().to_vec(), vec!["upper"]);
    }

    #[rstest]
    #[case::no_parent_records("")]
    #[case::name_without_node("42\t|\tghost\t|\t\t|\tscientific name\t|\n")]
    fn test_missing_parent_truncates_lineage(#[case] extra_names: &str) {
        let nodes = format!("{}{}\n", NODES_DMP, node_line("7", "42", "genus"));
        let names = format!("{}{}\n{}", NAMES_DMP, name_line("7", "dangling"), extra_names);
        let indexes = Indexes::from_text(&names, &nodes, DIVISION_DMP);
        let phylo = indexes.phylo("7").unwrap();

        assert_eq!(phylo.render().unwrap(), "dangling(genus)");
        assert_eq!(phylo.rank("genus").unwrap().to_vec(), vec!["dangling"]);
        assert_eq!(phylo.lineage().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_grandparent_keeps_partial_chain() {
        let names = format!("{}\n{}\n", name_line("30", "leaf"), name_line("31", "middle"));
        let nodes = format!(
            "{}\n{}\n",
            node_line("30", "31", "species"),
            node_line("31", "99", "genus")
        );
        let indexes = Indexes::from_text(&names, &nodes, DIVISION_DMP);
        let phylo = indexes.phylo("30").unwrap();

        assert_eq!(phylo.render().unwrap(), "leaf(species) -> middle(genus)");
        assert_eq!(phylo.rank("genus").unwrap().to_vec(), vec!["middle"]);
    }

    #[test]
    fn test_root_division_is_not_needed() {
        let nodes = NODES_DMP.replacen(
            "1\t|\t1\t|\tno rank\t|\t\t|\t8\t|",
            "1\t|\t1\t|\tno rank\t|\t\t|\t77\t|",
            1,
        );
        let indexes = Indexes::from_text(NAMES_DMP, &nodes, DIVISION_DMP);

        assert_eq!(indexes.nodes.first("1").unwrap().division, "77");
        assert_eq!(indexes.phylo("6").unwrap().render().unwrap(), "Azorhizobium(species)");
        assert_eq!(indexes.phylo("2").unwrap().render().unwrap(), BACTERIA_LINEAGE);
    }

    #[test]
    fn test_missing_division_breaks_lineage() {
        let divisions = "8\t|\tUNA\t|\tUnassigned\t|\t\t|\n";
        let indexes = Indexes::from_text(NAMES_DMP, NODES_DMP, divisions);
        let phylo = indexes.phylo("6").unwrap();

        assert!(matches!(
            phylo.rank("species"),
            Err(TaxwalkError::BrokenLineage { index: "division", .. })
        ));
    }

    #[test]
    fn test_cycle_is_detected() {
        let names = format!("{}\n{}\n", name_line("20", "ping"), name_line("21", "pong"));
        let nodes = format!(
            "{}\n{}\n",
            node_line("20", "21", "genus"),
            node_line("21", "20", "family")
        );
        let indexes = Indexes::from_text(&names, &nodes, DIVISION_DMP);

        match indexes.phylo("20").unwrap().lineage().unwrap_err() {
            TaxwalkError::CyclicLineage(taxid) => assert_eq!(taxid, "20"),
            other => panic!("Expected CyclicLineage, got {:?}", other),
        }
    }

    #[test]
    fn test_json_view() {
        let indexes = Indexes::fixtures();
        let phylo = indexes.phylo("6").unwrap();
        let json = phylo.lineage().unwrap().to_json().unwrap();

        assert_eq!(json["lineage"][0]["taxid"], "6");
        assert_eq!(json["lineage"][0]["name"], "Azorhizobium");
        assert_eq!(json["lineage"][0]["division"], "BCT");
        assert_eq!(json["lineage"][0]["names"].as_array().unwrap().len(), 3);
        assert_eq!(json["ranks"]["species"][1], "Azorhizobium Dreyfus et al. 1988");
    }

    #[test]
    fn test_custom_separator() {
        let indexes = Indexes::fixtures();
        let phylo = indexes.phylo("3").unwrap();

        assert_eq!(
            phylo.render_with(";").unwrap(),
            "genusname(genus);ordername(order);familyname(family)"
        );
    }
}
