use anyhow::{Context, Result};
use mmdb::Reader;
use serde_json::json;
use std::path::PathBuf;

use crate::cli_utils::{parse_path, value_to_json};

pub fn cmd_lookup(database: PathBuf, address: String, path: String, quiet: bool) -> Result<()> {
    let reader = Reader::open(&database)
        .with_context(|| format!("failed to open database: {}", database.display()))?;

    let result = reader
        .lookup_string(&address)
        .with_context(|| format!("lookup failed for {:?}", address))?;

    if quiet {
        std::process::exit(if result.found { 0 } else { 1 });
    }

    if !result.found {
        println!("{}", json!({ "found": false }));
        std::process::exit(1);
    }

    let segments = parse_path(&path);
    let outcome = result
        .entry
        .get_value(&segments)
        .with_context(|| format!("path {:?} does not apply to the matched record", path))?;

    match outcome.into_value() {
        Some(value) => {
            let output = json!({
                "found": true,
                "netmask": result.netmask,
                "value": value_to_json(&value),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        None => {
            println!("{}", json!({ "found": true, "netmask": result.netmask, "value": null }));
            std::process::exit(1);
        }
    }
}
