//! Paged document export.
//!
//! Writes a PDF 1.4 file on A4 landscape using the standard Helvetica faces,
//! so no font data is embedded. The first page carries the title; when there
//! are rows a striped table follows, wrapping cells and repeating the header
//! row on every page it spills onto.

use std::fmt::Write as _;

use chrono::FixedOffset;

use crate::export::{human_datetime, row_cells};
use crate::rating::RatingKey;
use crate::survey::SurveyResponse;

pub const TITLE: &str = "Survey Responses";
pub const EMPTY_NOTICE: &str = "No responses found";

// Geometry, in points.
const MM: f32 = 72.0 / 25.4;
const PAGE_WIDTH: f32 = 841.89;
const PAGE_HEIGHT: f32 = 595.28;
const MARGIN: f32 = 14.0 * MM;
const TITLE_BASELINE: f32 = 20.0 * MM;
const TABLE_TOP: f32 = 30.0 * MM;

const TITLE_SIZE: f32 = 14.0;
const CELL_SIZE: f32 = 8.0;
const LINE_HEIGHT: f32 = CELL_SIZE * 1.15;
const CELL_PADDING: f32 = 3.0;
/// Average Helvetica glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;

const HEADER_FILL: (u8, u8, u8) = (40, 40, 40);
const STRIPE_FILL: (u8, u8, u8) = (245, 245, 245);

/// Fixed columns before and after the rating columns.
const LEADING_HEADERS: [&str; 4] = ["Name", "Email", "Domain", "Submitted At"];
const TRAILING_HEADER: &str = "Suggestions";

/// Header row: fixed columns, one split-camel-case label per rating key,
/// then suggestions.
pub fn headers() -> Vec<String> {
    let mut out: Vec<String> = LEADING_HEADERS.iter().map(|s| s.to_string()).collect();
    out.extend(RatingKey::ALL.iter().map(|k| k.header_label()));
    out.push(TRAILING_HEADER.to_string());
    out
}

/// Encode `records` as a PDF document.
pub fn encode(records: &[&SurveyResponse], offset: FixedOffset) -> Vec<u8> {
    let mut pages = PageSet::new();
    pages.text(MARGIN, TITLE_BASELINE, Font::Regular, TITLE_SIZE, TITLE);

    if records.is_empty() {
        pages.text(MARGIN, TABLE_TOP, Font::Regular, TITLE_SIZE, EMPTY_NOTICE);
        return pages.finish();
    }

    let header = headers();
    let body: Vec<Vec<String>> = records
        .iter()
        .map(|r| row_cells(r, human_datetime(r.created_at, offset)))
        .collect();
    let widths = column_widths(&header, &body, PAGE_WIDTH - 2.0 * MARGIN);

    let mut y = TABLE_TOP;
    y = draw_row(&mut pages, y, &widths, &header, RowStyle::Header);
    for (index, row) in body.iter().enumerate() {
        let height = row_height(&widths, row);
        if y + height > PAGE_HEIGHT - MARGIN {
            pages.new_page();
            y = draw_row(&mut pages, MARGIN, &widths, &header, RowStyle::Header);
        }
        let style = if index % 2 == 1 {
            RowStyle::Striped
        } else {
            RowStyle::Plain
        };
        y = draw_row(&mut pages, y, &widths, row, style);
    }

    pages.finish()
}

// ---------------------------------------------------------------------------
// Table layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowStyle {
    Header,
    Plain,
    Striped,
}

/// Split `width` between columns.
///
/// Every column first gets room for the longest word of its header, so
/// header words never break. What is left is shared in proportion to each
/// column's longest content, bounded so no column starves or dominates.
fn column_widths(header: &[String], body: &[Vec<String>], width: f32) -> Vec<f32> {
    let glyph = CELL_SIZE * GLYPH_WIDTH;
    let minimums: Vec<f32> = header
        .iter()
        .map(|h| {
            let longest_word = h.split_whitespace().map(|w| w.chars().count()).max();
            longest_word.unwrap_or(1) as f32 * glyph + 2.0 * CELL_PADDING + 1.0
        })
        .collect();
    let reserved: f32 = minimums.iter().sum();
    if reserved >= width {
        return minimums.iter().map(|m| m * width / reserved).collect();
    }

    let weights: Vec<f32> = (0..header.len())
        .map(|col| {
            let longest = std::iter::once(&header[col])
                .chain(body.iter().filter_map(|row| row.get(col)))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(1);
            longest.clamp(4, 40) as f32
        })
        .collect();
    let total: f32 = weights.iter().sum();
    let spare = width - reserved;
    minimums
        .iter()
        .zip(&weights)
        .map(|(min, w)| min + spare * w / total)
        .collect()
}

fn chars_per_line(column_width: f32) -> usize {
    let usable = (column_width - 2.0 * CELL_PADDING).max(0.0);
    ((usable / (CELL_SIZE * GLYPH_WIDTH)) as usize).max(1)
}

/// Greedy word wrap. Words longer than a line are hard-split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if line.is_empty() {
                word.len()
            } else {
                line.chars().count() + 1 + word.len()
            };
            if needed > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}

fn row_height(widths: &[f32], cells: &[String]) -> f32 {
    let lines = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| wrap(cell, chars_per_line(*w)).len())
        .max()
        .unwrap_or(1);
    lines as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING
}

/// Draw one row with its top edge at `top`; returns the next row's top.
fn draw_row(
    pages: &mut PageSet,
    top: f32,
    widths: &[f32],
    cells: &[String],
    style: RowStyle,
) -> f32 {
    let height = row_height(widths, cells);
    let total_width: f32 = widths.iter().sum();

    match style {
        RowStyle::Header => pages.fill_rect(MARGIN, top, total_width, height, HEADER_FILL),
        RowStyle::Striped => pages.fill_rect(MARGIN, top, total_width, height, STRIPE_FILL),
        RowStyle::Plain => {}
    }

    let (font, color) = match style {
        RowStyle::Header => (Font::Bold, (255, 255, 255)),
        RowStyle::Plain | RowStyle::Striped => (Font::Regular, (0, 0, 0)),
    };
    pages.set_text_color(color);

    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(widths) {
        let baseline = top + CELL_PADDING + CELL_SIZE;
        for (i, line) in wrap(cell, chars_per_line(*width)).iter().enumerate() {
            if !line.is_empty() {
                let y = baseline + i as f32 * LINE_HEIGHT;
                pages.text(x + CELL_PADDING, y, font, CELL_SIZE, line);
            }
        }
        x += width;
    }
    pages.set_text_color((0, 0, 0));

    top + height
}

// ---------------------------------------------------------------------------
// Page content and file assembly
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Content streams, one per page. Coordinates passed in are measured from
/// the top-left corner and flipped on output.
struct PageSet {
    pages: Vec<Vec<u8>>,
}

impl PageSet {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn current(&mut self) -> &mut Vec<u8> {
        // `pages` starts with one entry and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text(&mut self, x: f32, y_top: f32, font: Font, size: f32, text: &str) {
        let out = self.current();
        out.extend_from_slice(
            format!(
                "BT /{} {size:.1} Tf {x:.2} {:.2} Td ",
                font.resource(),
                PAGE_HEIGHT - y_top
            )
            .as_bytes(),
        );
        push_literal(out, text);
        out.extend_from_slice(b" Tj ET\n");
    }

    fn fill_rect(&mut self, x: f32, y_top: f32, w: f32, h: f32, rgb: (u8, u8, u8)) {
        let cmd = format!(
            "q {} rg {x:.2} {:.2} {w:.2} {h:.2} re f Q\n",
            rgb_operands(rgb),
            PAGE_HEIGHT - y_top - h
        );
        self.current().extend_from_slice(cmd.as_bytes());
    }

    fn set_text_color(&mut self, rgb: (u8, u8, u8)) {
        let cmd = format!("{} rg\n", rgb_operands(rgb));
        self.current().extend_from_slice(cmd.as_bytes());
    }

    /// Assemble the complete file: catalog, page tree, fonts, info, then a
    /// page object and content stream per page, an xref table and trailer.
    fn finish(self) -> Vec<u8> {
        const CATALOG: usize = 1;
        const PAGES: usize = 2;
        const FONT_REGULAR: usize = 3;
        const FONT_BOLD: usize = 4;
        const INFO: usize = 5;
        const FIRST_PAGE: usize = 6;

        let page_ids: Vec<usize> = (0..self.pages.len()).map(|i| FIRST_PAGE + 2 * i).collect();
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");

        let mut objects: Vec<Vec<u8>> = vec![
            format!("<< /Type /Catalog /Pages {PAGES} 0 R >>").into_bytes(),
            format!(
                "<< /Type /Pages /Kids [{kids}] /Count {} >>",
                self.pages.len()
            )
            .into_bytes(),
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_vec(),
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        ];
        let mut info = b"<< /Title ".to_vec();
        push_literal(&mut info, TITLE);
        info.extend_from_slice(b" /Producer (surveydesk) >>");
        objects.push(info);

        for (page_id, content) in page_ids.iter().zip(self.pages) {
            objects.push(
                format!(
                    "<< /Type /Page /Parent {PAGES} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                     /Resources << /Font << /F1 {FONT_REGULAR} 0 R /F2 {FONT_BOLD} 0 R >> >> \
                     /Contents {} 0 R >>",
                    page_id + 1
                )
                .into_bytes(),
            );
            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend_from_slice(&content);
            stream.extend_from_slice(b"\nendstream");
            objects.push(stream);
        }

        let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_at = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in &offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root {CATALOG} 0 R /Info {INFO} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}

fn rgb_operands((r, g, b): (u8, u8, u8)) -> String {
    format!(
        "{:.3} {:.3} {:.3}",
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0
    )
}

/// Append `text` as a PDF literal string in WinAnsi (Latin-1 subset).
/// Characters outside Latin-1 become `?`; control characters become spaces.
fn push_literal(out: &mut Vec<u8>, text: &str) {
    out.push(b'(');
    for ch in text.chars() {
        let byte = match u32::from(ch) {
            0x20..=0x7E | 0xA0..=0xFF => ch as u32 as u8,
            0x00..=0x1F | 0x7F => b' ',
            _ => b'?',
        };
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::export::{export_offset, DEFAULT_UTC_OFFSET_MINUTES};

    fn ist() -> FixedOffset {
        export_offset(DEFAULT_UTC_OFFSET_MINUTES).unwrap()
    }

    fn record(id: i64, name: &str) -> SurveyResponse {
        SurveyResponse {
            id,
            name: name.to_string(),
            email: format!("c{id}@acme.io"),
            responses: RatingKey::ALL
                .iter()
                .map(|k| (k.as_str().to_string(), "4".to_string()))
                .collect::<BTreeMap<_, _>>(),
            suggestions: Some("Keep going".to_string()),
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn headers_split_rating_keys() {
        let h = headers();
        assert_eq!(h[0], "Name");
        assert_eq!(h[3], "Submitted At");
        assert!(h.contains(&"brand Alignment".to_string()));
        assert_eq!(h.last().map(String::as_str), Some("Suggestions"));
        assert_eq!(h.len(), 4 + RatingKey::ALL.len() + 1);
    }

    #[test]
    fn empty_export_only_shows_notice() {
        let text = as_text(&encode(&[], ist()));
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("(Survey Responses) Tj"));
        assert!(text.contains("(No responses found) Tj"));
        assert!(!text.contains("(Name) Tj"));
        assert!(text.contains("/Count 1"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn table_has_header_and_human_dates() {
        let r = record(1, "Alice");
        let text = as_text(&encode(&[&r], ist()));
        assert!(text.contains("(Name) Tj"));
        assert!(text.contains("(Suggestions) Tj"));
        assert!(!text.contains("(No responses found) Tj"));
        assert!(text.contains("(Alice) Tj"));
        assert!(text.contains("(acme.io) Tj"));
        // Submitted At may wrap; the date part lands on the first line.
        assert!(text.contains("(2 Jan"));
        assert!(!text.contains("2025-01-02T03:04:05"));
    }

    #[test]
    fn long_tables_spill_onto_new_pages_with_header() {
        let records: Vec<_> = (0..120).map(|i| record(i, &format!("C{i}"))).collect();
        let refs: Vec<_> = records.iter().collect();
        let text = as_text(&encode(&refs, ist()));
        let pages = text.matches("/Type /Page ").count();
        assert!(pages >= 2, "expected multiple pages, got {pages}");
        assert_eq!(text.matches("(Name) Tj").count(), pages);
        assert!(text.contains("(C119) Tj"));
    }

    #[test]
    fn xref_points_at_table() {
        let bytes = encode(&[], ist());
        let text = as_text(&bytes);
        let marker = text.rfind("startxref\n").unwrap() + "startxref\n".len();
        let offset: usize = text[marker..].lines().next().unwrap().parse().unwrap();
        assert!(bytes[offset..].starts_with(b"xref"));
    }

    #[test]
    fn literals_escape_and_replace() {
        let mut out = Vec::new();
        push_literal(&mut out, "a(b)\\c ✓ é");
        assert_eq!(out, b"(a\\(b\\)\\\\c ? \xE9)".to_vec());
    }

    #[test]
    fn wrap_respects_width_and_splits_long_words() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 5), vec![""]);
        assert_eq!(wrap("a\nb", 5), vec!["a", "b"]);
    }
}
