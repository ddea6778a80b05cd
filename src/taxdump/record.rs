//! Typed records for NCBI taxdump lines
//!
//! Every `.dmp` file stores one record per line, fields separated by `\t|\t`
//! and usually terminated by `\t|`. A record kind has a fixed schema and a
//! line must produce exactly that many values. Values stay text.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use taxwalk_core::{TaxwalkError, TaxwalkResult};

/// Separator between two fields of a dump line
pub const FIELD_SEPARATOR: &str = "\t|\t";

/// Optional terminator after the last field
pub const LINE_TERMINATOR: &str = "\t|";

/// Split a dump line into raw field values
///
/// The line ending and a trailing `\t|` are dropped first, so
/// `"1\t|\tall\t|"` gives `["1", "all"]`. An empty line gives one empty value.
pub fn split_line(line: &str) -> Vec<&str> {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    let line = line.strip_suffix(LINE_TERMINATOR).unwrap_or(line);
    line.split(FIELD_SEPARATOR).collect()
}

/// The record kinds a taxdump index can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Node,
    Name,
    Division,
}

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Name => "Name",
            Self::Division => "Division",
        }
    }

    /// Ordered field names for this kind
    pub fn schema(&self) -> &'static [&'static str] {
        match self {
            Self::Node => NodeRecord::SCHEMA,
            Self::Name => NameRecord::SCHEMA,
            Self::Division => DivisionRecord::SCHEMA,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = TaxwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Node, Self::Name, Self::Division]
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TaxwalkError::UnknownRecordKind(s.to_string()))
    }
}

/// Input accepted by [`DmpRecord::parse`]: a raw line or already split values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine<'a> {
    Text(&'a str),
    Fields(Vec<String>),
}

impl<'a> From<&'a str> for RawLine<'a> {
    fn from(line: &'a str) -> Self {
        RawLine::Text(line)
    }
}

impl<'a> From<&'a String> for RawLine<'a> {
    fn from(line: &'a String) -> Self {
        RawLine::Text(line.as_str())
    }
}

impl From<Vec<String>> for RawLine<'_> {
    fn from(fields: Vec<String>) -> Self {
        RawLine::Fields(fields)
    }
}

impl From<Vec<&str>> for RawLine<'_> {
    fn from(fields: Vec<&str>) -> Self {
        RawLine::Fields(fields.into_iter().map(str::to_string).collect())
    }
}

/// A record with a fixed schema of text fields
pub trait DmpRecord: Sized {
    const KIND: RecordKind;
    const SCHEMA: &'static [&'static str];

    /// Bind values to fields in schema order
    fn from_values(values: Vec<String>) -> TaxwalkResult<Self>;

    /// Identifier used to group records in an index
    fn id(&self) -> &str;

    /// Look a field up by its schema name
    fn field(&self, name: &str) -> Option<&str>;

    /// Bind a pre-split sequence of values
    fn from_fields<I, S>(values: I) -> TaxwalkResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_values(values.into_iter().map(Into::into).collect())
    }

    /// Split and bind one dump line
    fn parse_line(line: &str) -> TaxwalkResult<Self> {
        Self::from_fields(split_line(line))
    }

    fn parse<'a>(raw: impl Into<RawLine<'a>>) -> TaxwalkResult<Self> {
        match raw.into() {
            RawLine::Text(line) => Self::parse_line(line),
            RawLine::Fields(values) => Self::from_values(values),
        }
    }

    /// All field values in schema order
    fn values(&self) -> Vec<&str> {
        Self::SCHEMA
            .iter()
            .filter_map(|name| self.field(name))
            .collect()
    }
}

fn fixed<const N: usize>(kind: RecordKind, values: Vec<String>) -> TaxwalkResult<[String; N]> {
    let found = values.len();
    <[String; N]>::try_from(values).map_err(|_| TaxwalkError::Schema {
        kind: kind.name(),
        expected: N,
        found,
    })
}

/// One line of nodes.dmp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub id: String,
    pub parent_id: String,
    /// Free text: "species", "genus", "no rank", ...
    pub rank: String,
    /// Locus-name prefix; not unique
    pub embl_code: String,
    /// Key into division.dmp
    pub division: String,
    pub inherited_div_flag: String,
    pub genetic_code_id: String,
    pub inherited_gc_flag: String,
    pub mitochondrial_genetic_code_id: String,
    pub inherited_mgc_flag: String,
    pub genbank_hidden_flag: String,
    pub hidden_subtree_root_flag: String,
    pub comments: String,
}

impl NodeRecord {
    /// A node whose parent is itself
    pub fn is_self_parented(&self) -> bool {
        self.id == self.parent_id
    }
}

impl DmpRecord for NodeRecord {
    const KIND: RecordKind = RecordKind::Node;
    const SCHEMA: &'static [&'static str] = &[
        "id",
        "parent_id",
        "rank",
        "embl_code",
        "division",
        "inherited_div_flag",
        "genetic_code_id",
        "inherited_GC_flag",
        "mitochondrial_genetic_code_id",
        "inherited_MGC_flag",
        "GenBank_hidden_flag",
        "hidden_subtree_root_flag",
        "comments",
    ];

    fn from_values(values: Vec<String>) -> TaxwalkResult<Self> {
        let [
            id,
            parent_id,
            rank,
            embl_code,
            division,
            inherited_div_flag,
            genetic_code_id,
            inherited_gc_flag,
            mitochondrial_genetic_code_id,
            inherited_mgc_flag,
            genbank_hidden_flag,
            hidden_subtree_root_flag,
            comments,
        ] = fixed::<13>(Self::KIND, values)?;

        Ok(Self {
            id,
            parent_id,
            rank,
            embl_code,
            division,
            inherited_div_flag,
            genetic_code_id,
            inherited_gc_flag,
            mitochondrial_genetic_code_id,
            inherited_mgc_flag,
            genbank_hidden_flag,
            hidden_subtree_root_flag,
            comments,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "id" => &self.id,
            "parent_id" => &self.parent_id,
            "rank" => &self.rank,
            "embl_code" => &self.embl_code,
            "division" => &self.division,
            "inherited_div_flag" => &self.inherited_div_flag,
            "genetic_code_id" => &self.genetic_code_id,
            "inherited_GC_flag" => &self.inherited_gc_flag,
            "mitochondrial_genetic_code_id" => &self.mitochondrial_genetic_code_id,
            "inherited_MGC_flag" => &self.inherited_mgc_flag,
            "GenBank_hidden_flag" => &self.genbank_hidden_flag,
            "hidden_subtree_root_flag" => &self.hidden_subtree_root_flag,
            "comments" => &self.comments,
            _ => return None,
        };
        Some(value)
    }
}

/// One line of names.dmp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRecord {
    pub id: String,
    pub name: String,
    /// Disambiguated variant when `name` is not unique
    pub unique_name: String,
    /// "scientific name", "synonym", "common name", ...
    pub name_class: String,
}

impl DmpRecord for NameRecord {
    const KIND: RecordKind = RecordKind::Name;
    const SCHEMA: &'static [&'static str] = &["id", "name", "unique_name", "name_class"];

    fn from_values(values: Vec<String>) -> TaxwalkResult<Self> {
        let [id, name, unique_name, name_class] = fixed::<4>(Self::KIND, values)?;
        Ok(Self {
            id,
            name,
            unique_name,
            name_class,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "unique_name" => Some(&self.unique_name),
            "name_class" => Some(&self.name_class),
            _ => None,
        }
    }
}

/// One line of division.dmp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivisionRecord {
    pub id: String,
    /// Three letter GenBank code: BCT, PLN, VRT, ...
    pub code: String,
    pub name: String,
    pub comments: String,
}

impl DmpRecord for DivisionRecord {
    const KIND: RecordKind = RecordKind::Division;
    const SCHEMA: &'static [&'static str] = &["id", "code", "name", "comments"];

    fn from_values(values: Vec<String>) -> TaxwalkResult<Self> {
        let [id, code, name, comments] = fixed::<4>(Self::KIND, values)?;
        Ok(Self {
            id,
            code,
            name,
            comments,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "code" => Some(&self.code),
            "name" => Some(&self.name),
            "comments" => Some(&self.comments),
            _ => None,
        }
    }
}
