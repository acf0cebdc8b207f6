use anyhow::{Context, Result};
use mmdb::Reader;
use std::path::PathBuf;

use crate::cli_utils::parse_path;

pub fn cmd_dump(database: PathBuf, address: String, path: String) -> Result<()> {
    let reader = Reader::open(&database)
        .with_context(|| format!("failed to open database: {}", database.display()))?;

    let result = reader
        .lookup_string(&address)
        .with_context(|| format!("lookup failed for {:?}", address))?;

    if !result.found {
        println!("(no match)");
        std::process::exit(1);
    }

    let segments = parse_path(&path);
    let entry = if segments.is_empty() {
        result.entry
    } else {
        anyhow::bail!("dump does not support a sub-path yet; pass an empty --path to dump the whole record");
    };

    let list = entry
        .get_entry_data_list()
        .context("failed to materialize the matched record")?;
    println!("{}", mmdb::dump::pretty_print(&list));
    Ok(())
}
