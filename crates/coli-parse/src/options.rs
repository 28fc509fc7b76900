use crate::normalize;
use coli_model::MetroCatalog;
use scraper::{Html, Selector};

/// Parse every `<option>` on the calculator page into a metro catalog.
///
/// The page carries the same list twice (moving-from and moving-to), so ids
/// repeat; the catalog keeps one entry per id with the last-seen name.
/// Options without a `value`, with an empty one, or with a non-numeric one
/// are placeholders or prompts and are skipped.
pub fn parse_metro_options(html: &str) -> MetroCatalog {
    let document = Html::parse_document(html);
    let option_sel = Selector::parse("option").expect("valid selector");

    let mut catalog = MetroCatalog::new();
    let mut seen = 0usize;

    for option in document.select(&option_sel) {
        seen += 1;
        // Collapsed text is also what the compute form posts as `hidMovingFrom`
        let name = normalize::element_text(option);

        let value = match option.value().attr("value").map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => {
                tracing::debug!(text = %name, "Skipping option without a value");
                continue;
            }
        };

        let id = match value.parse::<u32>() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(value = %value, text = %name, "Skipping option with non-numeric value");
                continue;
            }
        };

        if let Some(previous) = catalog.insert(id, name) {
            tracing::trace!(id, previous = %previous, "Duplicate metro option");
        }
    }

    tracing::debug!(options = seen, metros = catalog.len(), "Parsed metro options");
    catalog
}
