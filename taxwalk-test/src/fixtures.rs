//! Taxdump fixtures
//!
//! A tiny taxonomy: 2 (species) -> 3 (genus) -> 4 (order) -> 5 (family) -> 1,
//! and 6 (species) directly under 1. Taxon 1 is the self-parented root whose
//! first name is "all". Taxon 2 carries eight name variants.

pub const NAMES_DMP: &str = "\
1\t|\tall\t|\t\t|\tsynonym\t|
1\t|\troot\t|\t\t|\tscientific name\t|
2\t|\tBacteria\t|\tBacteria <prokaryote>\t|\tscientific name\t|
2\t|\tMonera\t|\tMonera <Bacteria>\t|\tin-part\t|
2\t|\tProcaryotae\t|\tProcaryotae <Bacteria>\t|\tin-part\t|
2\t|\tProkaryota\t|\tProkaryota <Bacteria>\t|\tin-part\t|
2\t|\tProkaryotae\t|\tProkaryotae <Bacteria>\t|\tin-part\t|
2\t|\tbacteria\t|\tbacteria <blast2>\t|\tblast name\t|
2\t|\teubacteria\t|\t\t|\tgenbank common name\t|
2\t|\tnot Bacteria Haeckel 1894\t|\t\t|\tsynonym\t|
3\t|\tgenusname\t|\ttest\t|\t\t|
4\t|\tordername\t|\ttest\t|\t\t|
5\t|\tfamilyname\t|\ttest\t|\t\t|
6\t|\tAzorhizobium\t|\t\t|\tscientific name\t|
6\t|\tAzorhizobium Dreyfus et al. 1988\t|\t\t|\tsynonym\t|
6\t|\tAzotirhizobium\t|\t\t|\tequivalent name\t|
";

pub const NODES_DMP: &str = "\
1\t|\t1\t|\tno rank\t|\t\t|\t8\t|\t0\t|\t1\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t\t|
2\t|\t3\t|\tspecies\t|\t\t|\t0\t|\t0\t|\t11\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t\t|
3\t|\t4\t|\tgenus\t|\t\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t\t|
4\t|\t5\t|\torder\t|\t\t|\t0\t|\t1\t|\t11\t|\t1\t|\t0\t|\t1\t|\t0\t|\t0\t|\t\t|
5\t|\t1\t|\tfamily\t|\tAC\t|\t0\t|\t1\t|\t11\t|\t1\t|\t0\t|\t1\t|\t1\t|\t0\t|\t\t|
6\t|\t1\t|\tspecies\t|\tAC\t|\t0\t|\t1\t|\t11\t|\t1\t|\t0\t|\t1\t|\t1\t|\t0\t|\t\t|
";

pub const DIVISION_DMP: &str = "\
0\t|\tBCT\t|\tBacteria\t|\t\t|
1\t|\tINV\t|\tInvertebrates\t|\t\t|
2\t|\tMAM\t|\tMammals\t|\t\t|
3\t|\tPHG\t|\tPhages\t|\t\t|
4\t|\tPLN\t|\tPlants\t|\t\t|
5\t|\tPRI\t|\tPrimates\t|\t\t|
6\t|\tROD\t|\tRodents\t|\t\t|
7\t|\tSYN\t|\tSynthetic\t|\t\t|
8\t|\tUNA\t|\tUnassigned\t|\tNo species nodes should inherit this division assignment\t|
9\t|\tVRL\t|\tViruses\t|\t\t|
10\t|\tVRT\t|\tVertebrates\t|\t\t|
11\t|\tENV\t|\tEnvironmental samples\t|\tAnonymous sequences cloned directly from the environment\t|
";

/// Names of taxon 2 in file order
pub const BACTERIA_NAMES: [&str; 8] = [
    "Bacteria",
    "Monera",
    "Procaryotae",
    "Prokaryota",
    "Prokaryotae",
    "bacteria",
    "eubacteria",
    "not Bacteria Haeckel 1894",
];

/// Lineage of taxon 2 as rendered with the default separator
pub const BACTERIA_LINEAGE: &str =
    "Bacteria(species) -> genusname(genus) -> ordername(order) -> familyname(family)";

/// Join raw field values into one dump line with the trailing terminator
pub fn dmp_line<S: AsRef<str>>(fields: &[S]) -> String {
    let joined: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
    format!("{}\t|", joined.join("\t|\t"))
}

/// A dump line with `count` numbered fields and no terminator
pub fn numbered_line(count: usize) -> String {
    (0..count)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\t|\t")
}

/// Node line for `id` under `parent` with the given rank and division 0
pub fn node_line(id: &str, parent: &str, rank: &str) -> String {
    dmp_line(&[
        id, parent, rank, "", "0", "0", "1", "0", "0", "0", "0", "0", "",
    ])
}

/// Name line for `id` carrying a scientific name
pub fn name_line(id: &str, name: &str) -> String {
    dmp_line(&[id, name, "", "scientific name"])
}
