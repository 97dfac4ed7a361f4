//! Flat tabular export.
//!
//! One header row, then one row per record. Fields that contain the
//! delimiter, a quote or a line break are quoted with inner quotes doubled.
//! Rows are separated by `\r\n` with no trailing terminator.

use std::borrow::Cow;

use crate::export::row_cells;
use crate::rating::RatingKey;
use crate::survey::SurveyResponse;

const DELIMITER: &str = ",";
const QUOTE: char = '"';
const ROW_SEPARATOR: &str = "\r\n";

/// Header columns, in export order.
pub fn header() -> Vec<&'static str> {
    let mut columns = vec!["name", "email", "domain", "created_at"];
    columns.extend(RatingKey::ALL.iter().map(|k| k.as_str()));
    columns.push("suggestions");
    columns
}

/// Encode `records` as delimited text.
pub fn encode(records: &[&SurveyResponse]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(join_row(header().into_iter()));
    for record in records {
        let cells = row_cells(record, record.created_at.to_rfc3339());
        rows.push(join_row(cells.iter().map(String::as_str)));
    }
    rows.join(ROW_SEPARATOR)
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let escaped: Vec<Cow<'a, str>> = cells.map(escape_field).collect();
    escaped.join(DELIMITER)
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if !field.contains([',', QUOTE, '\n', '\r']) {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len() + 2);
    out.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
    Cow::Owned(out)
}
