use anyhow::{Context, Result};
use mmdb::Reader;
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;

/// Open the database and exercise every public operation once against
/// a handful of boundary addresses. There is no separate validation
/// module: a database that opens, decodes its metadata, and answers a
/// lookup at every probe address without an `InvalidData`/`CorruptSearchTree`
/// error is considered structurally sound.
pub fn cmd_validate(database: PathBuf, json_output: bool) -> Result<()> {
    let start = Instant::now();
    let reader = Reader::open(&database)
        .with_context(|| format!("failed to open database: {}", database.display()))?;
    let metadata = reader.metadata();

    let probes: &[&str] = match metadata.ip_version {
        mmdb::IpVersion::V4 => &["0.0.0.0", "255.255.255.255", "127.0.0.1"],
        mmdb::IpVersion::V6 => &["::", "::1", "::ffff:127.0.0.1", "2001:db8::1"],
    };

    let mut errors = Vec::new();
    let mut probes_ok = 0usize;
    for probe in probes {
        match reader.lookup_string(probe) {
            Ok(result) => {
                probes_ok += 1;
                if result.found {
                    if let Err(err) = result.entry.get_entry_data_list() {
                        errors.push(format!("{}: record at matched prefix failed to decode: {}", probe, err));
                    }
                }
            }
            Err(err) => errors.push(format!("{}: lookup failed: {}", probe, err)),
        }
    }

    let duration = start.elapsed();
    let is_valid = errors.is_empty();

    if json_output {
        let output = json!({
            "database": database.display().to_string(),
            "is_valid": is_valid,
            "duration_ms": duration.as_millis(),
            "errors": errors,
            "database_type": metadata.database_type,
            "node_count": metadata.node_count,
            "record_size": metadata.record_size.bits(),
            "probes_checked": probes_ok,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Validating: {}", database.display());
        println!("database_type: {}", metadata.database_type);
        println!("node_count:    {}", metadata.node_count);
        println!("record_size:   {} bits", metadata.record_size.bits());
        println!("probes:        {}/{} ok", probes_ok, probes.len());
        println!("time:          {:.2}ms", duration.as_secs_f64() * 1000.0);
        if is_valid {
            println!("VALID");
        } else {
            println!("INVALID:");
            for err in &errors {
                println!("  - {}", err);
            }
        }
    }

    if is_valid {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
