//! Writers for resolved lineages

use serde_json::json;
use std::io::Write;
use taxwalk_core::{OutputFormat, TaxwalkResult};

use crate::taxdump::Phylo;

/// Write the lineage as one line of text or as a JSON document
pub fn write_lineage<W: Write>(
    out: &mut W,
    phylo: &Phylo<'_>,
    format: OutputFormat,
    separator: &str,
) -> TaxwalkResult<()> {
    let lineage = phylo.lineage()?;

    match format {
        OutputFormat::Text => writeln!(out, "{}", lineage.render_with(separator))?,
        OutputFormat::Json => {
            let mut value = lineage.to_json()?;
            value["taxid"] = json!(phylo.taxid());
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
    }
    Ok(())
}

/// Write the names filed under one rank, one per line in text mode
pub fn write_rank<W: Write>(
    out: &mut W,
    phylo: &Phylo<'_>,
    rank: &str,
    format: OutputFormat,
) -> TaxwalkResult<()> {
    let names = phylo.rank(rank)?;

    match format {
        OutputFormat::Text => {
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
        OutputFormat::Json => {
            let value = json!({
                "taxid": phylo.taxid(),
                "rank": rank,
                "names": names,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
    }
    Ok(())
}
