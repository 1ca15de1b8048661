use crate::data::{VoteRecord, VoteValue};
use crate::pdf_reader::content_extractor::cursor::{find_starting_with, TokenCursor};
use crate::pdf_reader::content_extractor::diagnostics::Diagnostics;
use crate::pdf_reader::content_extractor::scan::until_dash_number;
use crate::pdf_reader::content_extractor::token::{is_vote_value, TextToken};

const PRESIDING_MARKER: &str = "Presiding";
const PRESIDENT_TITLE: &str = "President";
const FOOTER_MARKER: &str = "Votes after";
pub(crate) const TABLE_NOT_FOUND: &str = "vote table not found";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct VoteTable {
    pub votes: Vec<VoteRecord>,
    pub errors: Vec<String>,
}

enum State {
    SeekStart,
    ScanningRow { ordinal: usize },
    Done,
}

enum Row {
    Record { record: VoteRecord, consumed: usize },
    Footer,
    Unmatched { found: String },
}

/// First row of the table: three tokens past the presiding marker, four when
/// the presiding officer is printed with the "President" title.
pub fn find_table_start(tokens: &[TextToken]) -> Option<usize> {
    let presiding = find_starting_with(tokens, PRESIDING_MARKER)?;
    let offset = match tokens.get(presiding + 2) {
        Some(token) if token.as_str() == PRESIDENT_TITLE => 4,
        _ => 3,
    };
    Some(presiding + offset)
}

fn voter_name(tokens: &[TextToken]) -> String {
    let tokens = match tokens {
        [title, rest @ ..] if title.as_str() == PRESIDENT_TITLE && !rest.is_empty() => rest,
        _ => tokens,
    };
    let name: String = tokens.iter().map(TextToken::as_str).collect();
    match name.strip_prefix("President ") {
        Some(stripped) => stripped.to_owned(),
        None => name,
    }
}

// [Y|N|EX|AV] Name [Name..] - ##
fn scan_row(cursor: &TokenCursor) -> Row {
    let first = cursor.peek(0).unwrap_or_default();
    let offset = usize::from(is_vote_value(first));

    let mut name_cursor = *cursor;
    name_cursor.advance(offset);

    match until_dash_number(&name_cursor) {
        Some(area) => {
            let name_tokens = name_cursor.window(0, area.increment - 2);
            Row::Record {
                record: VoteRecord {
                    area_id: area.number,
                    voter_name: voter_name(name_tokens),
                    vote: VoteValue::from_abbreviation(first).unwrap_or(VoteValue::Unrecognized),
                },
                consumed: area.increment + offset,
            }
        }
        None if first.starts_with(FOOTER_MARKER) => Row::Footer,
        None => Row::Unmatched {
            found: first.to_owned(),
        },
    }
}

/// Reads voter rows from the presiding marker until the stream ends or the
/// "Votes after roll call" footer. Bad rows are reported and skipped.
pub fn parse_vote_table(tokens: &[TextToken], diagnostics: &dyn Diagnostics) -> VoteTable {
    let mut table = VoteTable::default();
    let mut cursor = TokenCursor::new(tokens);
    let mut state = State::SeekStart;

    loop {
        state = match state {
            State::SeekStart => {
                let start = find_table_start(tokens);
                diagnostics.table_start(start);
                match start {
                    Some(start) => {
                        cursor = TokenCursor::at(tokens, start);
                        State::ScanningRow { ordinal: 1 }
                    }
                    None => {
                        table.errors.push(TABLE_NOT_FOUND.to_owned());
                        State::Done
                    }
                }
            }
            State::ScanningRow { .. } if cursor.at_end() => State::Done,
            State::ScanningRow { ordinal } => match scan_row(&cursor) {
                Row::Record { record, consumed } => {
                    diagnostics.row_parsed(ordinal, &record);
                    table.votes.push(record);
                    cursor.advance(consumed);
                    State::ScanningRow {
                        ordinal: ordinal + 1,
                    }
                }
                Row::Footer => {
                    diagnostics.footer_reached(cursor.position());
                    State::Done
                }
                Row::Unmatched { found } => {
                    diagnostics.row_rejected(ordinal, &found);
                    table.errors.push(format!(
                        "at vote {ordinal}: expected a vote value (Y, N, EX, AV) but found '{found}'"
                    ));
                    cursor.advance(1);
                    State::ScanningRow {
                        ordinal: ordinal + 1,
                    }
                }
            },
            State::Done => break,
        };
    }

    table
}
