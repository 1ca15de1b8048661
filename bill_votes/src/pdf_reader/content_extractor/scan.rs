use crate::pdf_reader::content_extractor::cursor::TokenCursor;
use crate::pdf_reader::content_extractor::token::{is_dash, is_digit_leading, leading_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashNumber {
    pub number: u32,
    /// Tokens from the scan start up to and including the number.
    pub increment: usize,
}

fn ends_with_digit(text: &str) -> bool {
    text.chars().last().map_or(false, |c| c.is_ascii_digit())
}

fn number_after_last_dash(text: &str) -> Option<u32> {
    text.rsplit('-').next().and_then(|segment| leading_number(segment.trim()))
}

/// The count printed after a summary label such as "Yeas". The tokenizer
/// may emit `["Yeas - 38"]`, `["Yeas", "- 38"]` or `["Yeas", "-", "38"]`.
pub fn dash_number(cursor: &TokenCursor) -> Option<u32> {
    let label = cursor.peek(0)?;
    if label.contains('-') && ends_with_digit(label) {
        return number_after_last_dash(label);
    }

    let next = cursor.peek(1).unwrap_or_default();
    if next.contains('-') && ends_with_digit(next) {
        return number_after_last_dash(next);
    }

    let after_next = cursor.peek(2).unwrap_or_default();
    if next.contains('-') && is_digit_leading(after_next) {
        return leading_number(after_next);
    }

    None
}

/// Scans forward from the cursor until a digit-leading token directly
/// follows a dash token, as in `["Mary", "Ann", "Smith", "-", "12"]`.
pub fn until_dash_number(cursor: &TokenCursor) -> Option<DashNumber> {
    let mut previous = cursor.peek(0)?;
    let mut offset = 1;
    while let Some(current) = cursor.peek(offset) {
        if is_digit_leading(current) && is_dash(previous) {
            // An id too large for u32 is not an area id; keep scanning.
            if let Some(number) = leading_number(current) {
                return Some(DashNumber {
                    number,
                    increment: offset + 1,
                });
            }
        }
        previous = current;
        offset += 1;
    }
    None
}
