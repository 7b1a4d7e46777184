//! CSV serialization of a result table.

use super::Table;
use ohno::IntoAppError;
use std::io::Write;

/// Write a table as RFC-compliant CSV: one header row, then one line per row.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> crate::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(table.columns()).into_app_err("writing CSV header")?;
    for row in table.rows() {
        csv_writer.write_record(row).into_app_err("writing CSV row")?;
    }

    csv_writer.flush().into_app_err("flushing CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_rows(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec!["X1".to_string(), "plain".to_string()],
                vec!["X2".to_string(), "has, comma and \"quotes\"".to_string()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let mut buffer = Vec::new();
        write_csv(&table(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,name");
        assert_eq!(lines[1], "X1,plain");
    }

    #[test]
    fn test_write_csv_escapes_special_characters() {
        let mut buffer = Vec::new();
        write_csv(&table(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"has, comma and \"\"quotes\"\"\""));
    }

    #[test]
    fn test_write_csv_empty_table() {
        let empty = Table::from_rows(vec!["id".to_string()], Vec::new()).unwrap();
        let mut buffer = Vec::new();
        write_csv(&empty, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "id\n");
    }
}
