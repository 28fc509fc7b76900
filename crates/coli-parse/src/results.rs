use crate::error::{ExtractError, Section};
use crate::normalize;
use coli_model::{AvgPriceRow, Comparison, IndexRow};
use scraper::{ElementRef, Html, Selector};

const NOTE: &str = "span.comment";
const INDEX_TABLE: &str = "table.indexTable";
const INDEX_CATEGORY: &str = "td.indexCategory";
const INDEX_DATA: &str = "td.indexData";
const AVG_TABLE: &str = "table.avgTable";
const AVG_CATEGORY: &str = "td.avgCategory";
const AVG_DATA: &str = "td.avgData";

/// Parse a compute results page into index and average price rows.
///
/// `metro_name` is the display name of the metro being compared; it is
/// copied into every row together with the page's note.
///
/// The note, both tables, and each row's category cell are required. The
/// index value cell is required too. The average price cell is optional:
/// when a row has no `td.avgData` element at all the row is kept with
/// `avg_value: None`. A cell that exists but is empty yields `Some("")`.
pub fn parse_comparison(html: &str, metro_name: &str) -> Result<Comparison, ExtractError> {
    let document = Html::parse_document(html);

    let note = required(document.root_element(), NOTE, Section::Note, None)?;
    let note = normalize::element_text(note);

    let index_rows = parse_index_table(&document, metro_name, &note)?;
    let avg_rows = parse_avg_table(&document, metro_name, &note)?;

    tracing::debug!(
        metro = %metro_name,
        index_rows = index_rows.len(),
        avg_rows = avg_rows.len(),
        "Parsed comparison page"
    );

    Ok(Comparison {
        note,
        index_rows,
        avg_rows,
    })
}

fn parse_index_table(
    document: &Html,
    metro_name: &str,
    note: &str,
) -> Result<Vec<IndexRow>, ExtractError> {
    let section = Section::IndexTable;
    let table = required(document.root_element(), INDEX_TABLE, section, None)?;
    let tr_sel = Selector::parse("tr").expect("valid selector");

    let mut rows = Vec::new();
    for (index, tr) in table.select(&tr_sel).enumerate() {
        let category = required(tr, INDEX_CATEGORY, section, Some(index))?;
        let value = required(tr, INDEX_DATA, section, Some(index))?;
        rows.push(IndexRow {
            metro_name: metro_name.to_string(),
            index_category: normalize::element_text(category),
            index_value: normalize::element_text(value),
            note: note.to_string(),
        });
    }

    if rows.is_empty() {
        tracing::warn!(metro = %metro_name, "Index table has no rows");
    }
    Ok(rows)
}

fn parse_avg_table(
    document: &Html,
    metro_name: &str,
    note: &str,
) -> Result<Vec<AvgPriceRow>, ExtractError> {
    let section = Section::AvgTable;
    let table = required(document.root_element(), AVG_TABLE, section, None)?;
    let tr_sel = Selector::parse("tr").expect("valid selector");
    let data_sel = Selector::parse(AVG_DATA).expect("valid selector");

    let mut rows = Vec::new();
    for (index, tr) in table.select(&tr_sel).enumerate() {
        let category = required(tr, AVG_CATEGORY, section, Some(index))?;
        let avg_value = tr.select(&data_sel).next().map(normalize::element_text);
        if avg_value.is_none() {
            tracing::trace!(metro = %metro_name, row = index, "No average price cell");
        }
        rows.push(AvgPriceRow {
            metro_name: metro_name.to_string(),
            avg_category: normalize::element_text(category),
            avg_value,
            note: note.to_string(),
        });
    }

    if rows.is_empty() {
        tracing::warn!(metro = %metro_name, "Average price table has no rows");
    }
    Ok(rows)
}

/// First descendant of `scope` matching `selector`, or a `MissingElement` error.
fn required<'a>(
    scope: ElementRef<'a>,
    selector: &'static str,
    section: Section,
    row: Option<usize>,
) -> Result<ElementRef<'a>, ExtractError> {
    let sel = Selector::parse(selector).expect("valid selector");
    scope
        .select(&sel)
        .next()
        .ok_or(ExtractError::MissingElement {
            section,
            selector,
            row,
        })
}
