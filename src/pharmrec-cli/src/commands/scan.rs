//! Scan command: walk a directory of dispensing files and summarize

use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

#[derive(Debug, Default)]
struct Totals {
    files: usize,
    failed: usize,
    records: usize,
    drugs: usize,
    legacy_records: usize,
}

pub fn handle(path: &Path, extension: &str) -> Result<()> {
    let mut totals = Totals::default();

    println!(
        "{:<40} {:>8} {:>8} {:>8}",
        "File", "Records", "Drugs", "Legacy"
    );
    println!("{}", "-".repeat(68));

    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if !file_path
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case(extension))
        {
            continue;
        }

        totals.files += 1;
        let result = pharmrec::parse_file(file_path);

        if !result.success {
            totals.failed += 1;
            println!(
                "{:<40} {}",
                result.file_name,
                result.error.as_deref().unwrap_or("parse failed")
            );
            continue;
        }

        let drugs: usize = result.records.iter().map(|r| r.drugs.len()).sum();
        let legacy = result.records.iter().filter(|r| r.legacy_layout).count();

        totals.records += result.records.len();
        totals.drugs += drugs;
        totals.legacy_records += legacy;

        println!(
            "{:<40} {:>8} {:>8} {:>8}",
            result.file_name,
            result.records.len(),
            drugs,
            legacy
        );
    }

    println!("{}", "-".repeat(68));
    println!(
        "{:<40} {:>8} {:>8} {:>8}",
        format!("TOTAL ({} files, {} failed)", totals.files, totals.failed),
        totals.records,
        totals.drugs,
        totals.legacy_records
    );

    Ok(())
}
