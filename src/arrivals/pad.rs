/// Pad every row with `""` up to the length of the longest row.
///
/// Only appends; existing cells and their order are untouched. A no-op when
/// all rows already have equal length.
#[must_use]
pub fn pad_rows(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}
