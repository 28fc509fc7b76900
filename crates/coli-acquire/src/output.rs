use crate::config::{AVG_PRICES_CSV, INDEX_CSV};
use crate::error::AcquireError;
use coli_model::{AvgPriceRow, IndexRow};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of the files written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub index_csv: PathBuf,
    pub avg_prices_csv: PathBuf,
}

/// Write both CSV files to the given directory.
///
/// Creates the directory if it doesn't exist, then writes:
/// - `cost_of_living_index.csv` — one record per [`IndexRow`]
/// - `avg_prices.csv` — one record per [`AvgPriceRow`], missing prices empty
///
/// Existing files are overwritten.
pub fn write_outputs(
    output_dir: &Path,
    index_rows: &[IndexRow],
    avg_rows: &[AvgPriceRow],
) -> Result<OutputPaths, AcquireError> {
    create_dir(output_dir)?;

    let index_csv = output_dir.join(INDEX_CSV);
    write_csv(&index_csv, index_rows)?;
    tracing::info!(path = %index_csv.display(), rows = index_rows.len(), "Wrote index CSV");

    let avg_prices_csv = output_dir.join(AVG_PRICES_CSV);
    write_csv(&avg_prices_csv, avg_rows)?;
    tracing::info!(path = %avg_prices_csv.display(), rows = avg_rows.len(), "Wrote average prices CSV");

    Ok(OutputPaths {
        index_csv,
        avg_prices_csv,
    })
}

/// Write rows as CSV records: no header, every field quoted, `None` as an
/// empty field.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), AcquireError> {
    let csv_err = |source: csv::Error| AcquireError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)
        .map_err(csv_err)?;

    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }

    writer.flush().map_err(|source| AcquireError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Cache raw HTML for debugging a changed page layout.
pub fn cache_html(dir: &Path, filename: &str, html: &str) -> Result<(), AcquireError> {
    create_dir(dir)?;
    let path = dir.join(filename);
    fs::write(&path, html).map_err(|source| AcquireError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "Cached raw HTML");
    Ok(())
}

fn create_dir(dir: &Path) -> Result<(), AcquireError> {
    fs::create_dir_all(dir).map_err(|source| AcquireError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_row(metro: &str, category: &str, value: &str) -> IndexRow {
        IndexRow {
            metro_name: metro.into(),
            index_category: category.into(),
            index_value: value.into(),
            note: "Data for \"City\", 2015".into(),
        }
    }

    fn read_records(path: &Path) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_index_rows_read_back_one_record_each() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(INDEX_CSV);
        let rows = vec![
            index_row("City A", "Grocery", "104.2"),
            index_row("City A", "Housing", "98.7"),
            index_row("City B", "Grocery", "91.0"),
        ];

        write_csv(&path, &rows).unwrap();

        let read: Vec<IndexRow> = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap()
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read, rows);
    }

    #[test]
    fn test_every_field_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(INDEX_CSV);
        write_csv(&path, &[index_row("City A", "Grocery", "104.2")]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "\"City A\",\"Grocery\",\"104.2\",\"Data for \"\"City\"\", 2015\"\n"
        );
    }

    #[test]
    fn test_missing_price_written_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![
            AvgPriceRow {
                metro_name: "City A".into(),
                avg_category: "Home Price".into(),
                avg_value: None,
                note: "n".into(),
            },
            AvgPriceRow {
                metro_name: "City A".into(),
                avg_category: "Apartment Rent".into(),
                avg_value: Some("$850".into()),
                note: "n".into(),
            },
        ];

        let paths = write_outputs(dir.path(), &[], &rows).unwrap();

        let records = read_records(&paths.avg_prices_csv);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["City A", "Home Price", "", "n"]);
        assert_eq!(records[1], vec!["City A", "Apartment Rent", "$850", "n"]);
        assert!(!fs::read_to_string(&paths.avg_prices_csv).unwrap().contains("None"));
        assert_eq!(fs::read_to_string(&paths.index_csv).unwrap(), "");
    }

    #[test]
    fn test_write_outputs_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("2015");
        let paths = write_outputs(&nested, &[index_row("City A", "Grocery", "1")], &[]).unwrap();
        assert_eq!(paths.index_csv, nested.join("cost_of_living_index.csv"));
        assert!(paths.avg_prices_csv.exists());
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        // A regular file where the output directory should be
        let err = write_outputs(&blocker, &[], &[]).unwrap_err();
        assert!(matches!(err, AcquireError::Io { .. }));
    }

    #[test]
    fn test_cache_html() {
        let dir = tempfile::tempdir().unwrap();
        cache_html(dir.path(), "options.html", "<select></select>").unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("options.html")).unwrap(),
            "<select></select>"
        );
    }
}
