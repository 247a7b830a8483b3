//! Parse command: dispensing files in, JSON out

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use pharmrec::{DrugMaster, ParseResult};

use crate::config::Config;

/// Parse output plus the optional master-table annotation
#[derive(Serialize)]
struct ParseOutput<'a> {
    #[serde(flatten)]
    result: &'a ParseResult,
    /// Registered names for the codes found, when a master table is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    registered_names: Option<BTreeMap<&'a str, &'a str>>,
}

pub fn handle(
    inputs: &[PathBuf],
    output: Option<&Path>,
    pretty: bool,
    master: Option<&Path>,
) -> Result<()> {
    if inputs.is_empty() {
        bail!("No input files given");
    }

    let master = load_master(master)?;

    if let Some(dir) = output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    for input in inputs {
        let result = pharmrec::parse_file(input);
        if !result.success {
            eprintln!(
                "{}: {}",
                input.display(),
                result.error.as_deref().unwrap_or("parse failed")
            );
        }

        let annotated = ParseOutput {
            registered_names: master.as_ref().map(|m| registered_names(&result, m)),
            result: &result,
        };

        let json = if pretty {
            serde_json::to_string_pretty(&annotated)?
        } else {
            serde_json::to_string(&annotated)?
        };

        match output {
            Some(dir) => {
                let out_path = output_path(dir, input);
                std::fs::write(&out_path, json)
                    .with_context(|| format!("Failed to write {}", out_path.display()))?;
                println!(
                    "{} -> {} ({} records)",
                    input.display(),
                    out_path.display(),
                    result.records.len()
                );
            }
            None => println!("{json}"),
        }
    }

    Ok(())
}

/// Explicit --master wins; otherwise the configured default, if any.
fn load_master(arg: Option<&Path>) -> Result<Option<DrugMaster>> {
    let path = match arg {
        Some(path) => Some(path.to_path_buf()),
        None => Config::load()?.master_db,
    };
    let Some(path) = path else {
        return Ok(None);
    };
    let master = DrugMaster::load(&path)
        .with_context(|| format!("Failed to load master table {}", path.display()))?;
    Ok(Some(master))
}

/// Names for every distinct code the parse found in the master table.
fn registered_names<'a>(
    result: &'a ParseResult,
    master: &'a DrugMaster,
) -> BTreeMap<&'a str, &'a str> {
    result
        .records
        .iter()
        .flat_map(|r| r.drugs.iter())
        .filter_map(|d| master.name_for(&d.code).map(|name| (d.code.as_str(), name)))
        .collect()
}

fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    dir.join(format!("{stem}.json"))
}
