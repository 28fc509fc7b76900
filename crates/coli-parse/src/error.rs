use std::fmt;
use thiserror::Error;

/// The part of a results page being extracted when a lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Note,
    IndexTable,
    AvgTable,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Note => "note",
            Section::IndexTable => "index table",
            Section::AvgTable => "average price table",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// An element the page layout is expected to contain is absent.
    #[error("{section}: missing `{selector}`{}", row_suffix(.row))]
    MissingElement {
        section: Section,
        selector: &'static str,
        row: Option<usize>,
    },
}

impl ExtractError {
    pub fn section(&self) -> Section {
        match self {
            ExtractError::MissingElement { section, .. } => *section,
        }
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" in row {r}"),
        None => String::new(),
    }
}
