//! Generated identifier naming.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+").expect("Invalid word regex"));

/// Build a camelCase identifier from name parts.
///
/// Each part is split into words on non-alphanumeric characters. The first
/// word is lower-cased; every later word gets an upper-case first letter and
/// keeps the rest of its case.
///
/// - `("button", "basic")` -> `buttonBasic`
/// - `("zh", "date-picker")` -> `zhDatePicker`
/// - `("2d-chart", "basic")` -> `_2dChartBasic`
///
/// A leading digit is prefixed with `_`. Parts without any ASCII letter or
/// digit contribute nothing, so the result can be empty.
pub fn camel_identifier(parts: &[&str]) -> String {
    let mut ident = String::new();

    for word in parts.iter().flat_map(|p| WORD.find_iter(p)) {
        let word = word.as_str();
        if ident.is_empty() {
            ident.push_str(&word.to_lowercase());
        } else {
            ident.push_str(&capitalize(word));
        }
    }

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    ident
}

/// Upper-case the first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
