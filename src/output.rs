use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tabled::{settings::Style, Table as TextTable, Tabled};
use tracing::info;

use crate::error::ReconResult;
use crate::types::Table;

pub fn write_table_csv(path: impl AsRef<Path>, table: &Table) -> ReconResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_table(file, table)?;
    info!(path = %path.display(), rows = table.rows.len(), "wrote reconciled table");
    Ok(())
}

/// Header first, then every row. Cells render through `Cell`'s `Display`.
pub fn write_table<W: Write>(writer: W, table: &Table) -> ReconResult<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&table.header)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| c.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> ReconResult<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = TextTable::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
