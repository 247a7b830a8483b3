//! Inspect command: per-record summary of one file

use std::path::Path;

use anyhow::{bail, Result};

pub fn handle(input: &Path, full: bool) -> Result<()> {
    let result = pharmrec::parse_file(input);

    if !result.success {
        bail!(
            "{}: {}",
            input.display(),
            result.error.as_deref().unwrap_or("parse failed")
        );
    }

    println!("File:      {}", result.file_name);
    println!("Preserial: {}", result.preserial);
    println!("Records:   {}", result.records.len());
    println!();

    println!(
        "{:<4} {:<12} {:<16} {:>4} {:<4} {:<12} {:>6} {:>7}",
        "#", "Code", "Name", "Age", "Sex", "Date", "Drugs", "Layout"
    );
    println!("{}", "-".repeat(72));

    for (i, record) in result.records.iter().enumerate() {
        let p = &record.patient;
        println!(
            "{:<4} {:<12} {:<16} {:>4} {:<4} {:<12} {:>6} {:>7}",
            i + 1,
            p.code,
            p.name,
            p.age,
            p.sex_label,
            p.prescribed_date_formatted,
            record.drugs.len(),
            if record.legacy_layout { "legacy" } else { "tagged" }
        );

        if full {
            for drug in &record.drugs {
                println!(
                    "     {} {} ({} days, {}x/day, dose {})",
                    drug.code, drug.name, drug.days, drug.per_day, drug.amount
                );
            }
        }
    }

    let legacy_count = result.records.iter().filter(|r| r.legacy_layout).count();
    if legacy_count > 0 {
        println!();
        println!(
            "{legacy_count} record(s) used the legacy layout; dosage fields there are lower confidence"
        );
    }

    Ok(())
}
