use crate::data::HeaderField;
use crate::pdf_reader::content_extractor::cursor::TokenCursor;
use crate::pdf_reader::content_extractor::token::TextToken;

/// Metadata labels printed above the tally. Matching is by prefix and the
/// first label in this order wins.
pub const HEADER_FIELDS: [&str; 5] = ["Sequence", "Session Day", "Calendar Page", "Date", "Time"];

struct HeaderMatch {
    field: HeaderField,
    consumed: usize,
}

fn match_header(cursor: &TokenCursor, field_names: &[&str]) -> Option<HeaderMatch> {
    let text = cursor.peek(0)?;
    let name = field_names.iter().find(|name| text.starts_with(*name))?;
    let remaining = text[name.len()..].trim();

    // ["Date:", "03/08/2022"] or ["Date", "03/08/2022"]
    if text.ends_with(':') || text == *name {
        let value = cursor.peek(1).unwrap_or_default();
        return Some(HeaderMatch {
            field: HeaderField::text(name, value),
            consumed: 2,
        });
    }

    // ["Date: 03/08/2022"]
    let value = match remaining.strip_prefix(':') {
        Some(value) => value.trim(),
        // ["Sequence612"]
        None => remaining,
    };
    Some(HeaderMatch {
        field: HeaderField::text(name, value),
        consumed: 1,
    })
}

/// Recovers the known metadata fields from tokens `[0, limit)`.
pub fn parse_headers(tokens: &[TextToken], limit: usize, field_names: &[&str]) -> Vec<HeaderField> {
    let limit = limit.min(tokens.len());
    let mut cursor = TokenCursor::new(&tokens[..limit]);
    let mut headers = vec![];

    while !cursor.at_end() {
        match match_header(&cursor, field_names) {
            Some(header) => {
                headers.push(header.field);
                cursor.advance(header.consumed);
            }
            None => cursor.advance(1),
        }
    }

    headers
}
