use anyhow::{Context, Result};
use mmdb::Reader;
use serde_json::json;
use std::path::PathBuf;

pub fn cmd_metadata(database: PathBuf) -> Result<()> {
    let reader = Reader::open(&database)
        .with_context(|| format!("failed to open database: {}", database.display()))?;
    let metadata = reader.metadata();

    let output = json!({
        "database_type": metadata.database_type,
        "ip_version": match metadata.ip_version {
            mmdb::IpVersion::V4 => 4,
            mmdb::IpVersion::V6 => 6,
        },
        "node_count": metadata.node_count,
        "record_size": metadata.record_size.bits(),
        "binary_format_major_version": metadata.binary_format_major_version,
        "binary_format_minor_version": metadata.binary_format_minor_version,
        "build_epoch": metadata.build_epoch,
        "languages": metadata.languages,
        "description": metadata.description,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
