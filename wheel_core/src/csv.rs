//! Lenient delimited-text loader for wheel datasets.
//!
//! Rows are `title, description, author, video_ref, tag`, preceded by a
//! header row that is discarded. Fields are separated by `,` or TAB and may
//! be wrapped in double quotes to carry separators. Embedded quotes cannot
//! be escaped; this is not an RFC 4180 reader.

use tracing::debug;

use crate::item::Item;

/// Rows yielding fewer fields than this are dropped.
pub const MIN_FIELDS: usize = 2;

const BOM: char = '\u{feff}';

/// A single scanned field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub text: &'a str,
    pub quoted: bool,
}

impl<'a> Field<'a> {
    /// Field content with surrounding whitespace trimmed, quoted or not.
    pub fn value(&self) -> &'a str {
        self.text.trim()
    }
}

fn is_separator(b: u8) -> bool {
    b == b',' || b == b'\t'
}

/// Scans one line into fields.
///
/// A field starting with `"` that has a later closing `"` is quoted and runs
/// to that quote. Otherwise it runs up to the next `"`, `,` or TAB. Whatever
/// sits between the end of a field and the next separator is skipped.
pub fn split_fields(line: &str) -> Vec<Field<'_>> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut pos = 0usize;
    let mut first = true;

    loop {
        let start = if first {
            0
        } else {
            match bytes[pos..].iter().position(|&b| is_separator(b)) {
                Some(offset) => pos + offset + 1,
                None => break,
            }
        };
        first = false;

        let rest = &line[start..];
        let closing = rest
            .strip_prefix('"')
            .and_then(|inner| inner.find('"').map(|end| (inner, end)));

        match closing {
            Some((inner, end)) => {
                fields.push(Field {
                    text: &inner[..end],
                    quoted: true,
                });
                // opening quote + content + closing quote
                pos = start + end + 2;
            }
            None => {
                let end = rest
                    .bytes()
                    .position(|b| b == b'"' || is_separator(b))
                    .map_or(line.len(), |offset| start + offset);
                fields.push(Field {
                    text: &line[start..end],
                    quoted: false,
                });
                pos = end;
            }
        }
    }

    fields
}

/// Parses a single data row, returning `None` when it is too short.
pub fn parse_row(line: &str) -> Option<Item> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return None;
    }
    Some(Item::from_fields(fields.iter().map(Field::value)))
}

/// Parses a whole document into items, skipping the header row.
pub fn parse_items(text: &str) -> Vec<Item> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == BOM);
    if text.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    for (line_no, line) in text.lines().enumerate().skip(1) {
        match parse_row(line) {
            Some(item) => items.push(item),
            None => debug!(line = line_no + 1, "dropping row with fewer than {MIN_FIELDS} fields"),
        }
    }
    debug!(count = items.len(), "parsed wheel items");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(line: &str) -> Vec<&str> {
        split_fields(line).iter().map(Field::value).collect()
    }

    #[test]
    fn splits_on_commas_and_tabs() {
        assert_eq!(values("a,b\tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_field_keeps_commas() {
        assert_eq!(values(r#""Hello, world",desc"#), vec!["Hello, world", "desc"]);
    }

    #[test]
    fn quoted_field_is_trimmed_too() {
        assert_eq!(values(r#"" padded ",x"#), vec!["padded", "x"]);
    }

    #[test]
    fn padded_quoted_cells_load_clean() {
        let items = parse_items("h,d\n\"  Padded  \",\" desc \"\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Padded");
        assert_eq!(items[0].description, "desc");
    }

    #[test]
    fn bare_fields_are_trimmed() {
        assert_eq!(values("  a  ,  b "), vec!["a", "b"]);
    }

    #[test]
    fn trailing_separator_yields_empty_field() {
        assert_eq!(values("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn leading_separator_yields_empty_first_field() {
        assert_eq!(values(",b"), vec!["", "b"]);
    }

    #[test]
    fn unterminated_quote_gives_empty_field() {
        assert_eq!(values(r#""open,b"#), vec!["", "b"]);
    }

    #[test]
    fn text_after_closing_quote_is_skipped() {
        assert_eq!(values(r#""x,y"junk,w"#), vec!["x,y", "w"]);
    }

    #[test]
    fn single_field_row_is_dropped() {
        assert_eq!(parse_row("lonely"), None);
        assert_eq!(parse_row(""), None);
    }

    #[test]
    fn header_only_document_is_empty() {
        assert!(parse_items("title,description\n").is_empty());
        assert!(parse_items("").is_empty());
        assert!(parse_items("   \n  ").is_empty());
    }

    #[test]
    fn crlf_and_bom_are_tolerated() {
        let items = parse_items("\u{feff}title,desc\r\nA,First\r\nB,Second\r\n");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].description, "Second");
    }
}
