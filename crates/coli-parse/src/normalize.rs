use scraper::ElementRef;
use unicode_normalization::UnicodeNormalization;

/// Normalize text pulled out of an HTML cell.
///
/// Converts to NFC and collapses every whitespace run (including the
/// newlines and indentation left by the markup) into a single space.
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenated, normalized text content of an element.
pub fn element_text(element: ElementRef) -> String {
    normalize_text(&element.text().collect::<String>())
}
