use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{ReconError, ReconResult};
use crate::types::{Cell, Row, Table};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub padded_rows: usize,
    pub truncated_rows: usize,
}

pub fn load_table(path: impl AsRef<Path>) -> ReconResult<(Table, LoadReport)> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let (table, report) = read_table(file)?;
    info!(
        path = %path.display(),
        rows = report.total_rows,
        columns = table.header.len(),
        "loaded delivery table"
    );
    Ok((table, report))
}

/// Read a CSV export with a header row. Ragged rows are squared up to the
/// header width so downstream code can index every column.
pub fn read_table<R: Read>(reader: R) -> ReconResult<(Table, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let header: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let width = header.len();

    let mut report = LoadReport::default();
    let mut rows: Vec<Row> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        report.total_rows += 1;

        let mut row: Row = record.iter().take(width).map(Cell::text).collect();
        if record.len() > width {
            report.truncated_rows += 1;
        } else if record.len() < width {
            report.padded_rows += 1;
            row.resize(width, Cell::Empty);
        }
        rows.push(row);
    }

    if report.padded_rows > 0 || report.truncated_rows > 0 {
        debug!(
            padded = report.padded_rows,
            truncated = report.truncated_rows,
            "squared up ragged rows"
        );
    }
    Ok((Table::new(header, rows), report))
}

/// A table with a header but no data rows has nothing to reconcile.
pub fn require_rows(table: &Table) -> ReconResult<()> {
    if table.is_empty() {
        return Err(ReconError::NoData);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_cells() {
        let csv = "id,kpi,note\nL1,300,\nL2,N/A,x\n";
        let (table, report) = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.header, vec!["id", "kpi", "note"]);
        assert_eq!(report.total_rows, 2);
        assert_eq!(table.rows[0], vec![Cell::text("L1"), Cell::text("300"), Cell::Empty]);
        assert_eq!(table.rows[1][1], Cell::Text("N/A".to_string()));
    }

    #[test]
    fn ragged_rows_are_squared() {
        let csv = "a,b,c\n1\n1,2,3,4\n";
        let (table, report) = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0], vec![Cell::text("1"), Cell::Empty, Cell::Empty]);
        assert_eq!(table.rows[1].len(), 3);
        assert_eq!(report.padded_rows, 1);
        assert_eq!(report.truncated_rows, 1);
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let (table, report) = read_table("a,b\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(report.total_rows, 0);
        assert!(matches!(require_rows(&table), Err(ReconError::NoData)));
    }

    #[test]
    fn quoted_header_with_pipe_survives() {
        let csv = "\"Ad Set Name | Line Item Name (GAM)\",\"Amount Spent / Media Cost\"\nx,\"1,200\"\n";
        let (table, _) = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.header[0], "Ad Set Name | Line Item Name (GAM)");
        assert_eq!(table.rows[0][1].coerce_number(), 1200.0);
    }
}
