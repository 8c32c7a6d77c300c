//! Batch mark input from CSV.
//!
//! Expected columns are `id,credits,mark`. The mark cell is kept as raw text
//! and read with [`parse_mark`], so an empty or garbled mark makes that
//! subject invalid instead of failing the whole file.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use tracing::debug;

use crate::calculator::Subject;
use crate::parser::parse_mark;

#[derive(Debug, Deserialize)]
struct MarkRow {
    id: String,
    credits: u32,
    #[serde(default)]
    mark: String,
}

/// Reads subjects from CSV data with an `id,credits,mark` header.
/// Each subject id may appear only once.
pub fn read_marks<R: Read>(reader: R) -> Result<Vec<Subject>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut subjects = Vec::new();
    let mut seen = HashSet::new();

    for (line, result) in rdr.deserialize().enumerate() {
        let row: MarkRow = result.with_context(|| format!("bad marks row {}", line + 1))?;
        if !seen.insert(row.id.clone()) {
            bail!("duplicate subject id {:?} in marks row {}", row.id, line + 1);
        }
        subjects.push(Subject::new(row.id, row.credits, parse_mark(&row.mark)));
    }

    debug!(rows = subjects.len(), "Marks read");
    Ok(subjects)
}

/// Opens `path` and reads it with [`read_marks`].
pub fn load_marks_csv(path: &str) -> Result<Vec<Subject>> {
    let file = File::open(path).with_context(|| format!("failed to open marks file {path}"))?;
    read_marks(file)
}
