use crate::data::{BillId, HeaderField, VoteDocumentLink, VoteDocumentResult};
use crate::pdf_reader::content_extractor::cursor::{find_starting_with, TokenCursor};
use crate::pdf_reader::content_extractor::headers::{parse_headers, HEADER_FIELDS};
use crate::pdf_reader::content_extractor::scan::dash_number;
use crate::pdf_reader::content_extractor::vote_table::{parse_vote_table, VoteTable};

mod cursor;
mod diagnostics;
mod headers;
mod scan;
mod token;
mod vote_table;

pub use diagnostics::{Diagnostics, NoDiagnostics, TracingDiagnostics};
pub use token::{
    is_dash, is_digit_leading, is_vote_value, leading_number, tokens_from_texts, TextToken,
};

const YEAS: &str = "Yeas";
const NAYS: &str = "Nays";
const NOT_VOTING: &str = "Not Voting";

fn count_after(tokens: &[TextToken], label_index: Option<usize>) -> Option<u32> {
    label_index.and_then(|index| dash_number(&TokenCursor::at(tokens, index)))
}

fn describe(count: Option<u32>) -> String {
    count.map_or_else(|| "missing".to_owned(), |count| count.to_string())
}

/// Parses the token stream of a single-page vote document. Bill id, link,
/// chamber and date always come from `source`, never from the document.
pub fn extract(
    bill_id: &BillId,
    source: &VoteDocumentLink,
    tokens: &[TextToken],
    diagnostics: &dyn Diagnostics,
) -> VoteDocumentResult {
    let yeas_index = find_starting_with(tokens, YEAS);
    let yeas = count_after(tokens, yeas_index);
    let nays = count_after(tokens, find_starting_with(tokens, NAYS));
    let not_voting = count_after(tokens, find_starting_with(tokens, NOT_VOTING));

    let headers = parse_headers(tokens, yeas_index.unwrap_or(0), &HEADER_FIELDS);
    let VoteTable { votes, mut errors } = parse_vote_table(tokens, diagnostics);

    let published_total = [yeas, nays, not_voting]
        .iter()
        .map(|count| count.unwrap_or(0) as usize)
        .sum::<usize>();
    if votes.len() != published_total {
        errors.push(format!(
            "parsed votes ({}) doesn't match expected Yeas={} + Nays={} + Not Voting={}",
            votes.len(),
            describe(yeas),
            describe(nays),
            describe(not_voting)
        ));
    }

    for (label, listed, published) in [
        (YEAS, source.expected_yeas, yeas),
        (NAYS, source.expected_nays, nays),
    ] {
        match listed {
            Some(listed) if published != Some(listed) => errors.push(format!(
                "{label} listed on the bill page ({listed}) doesn't match the vote document ({})",
                describe(published)
            )),
            _ => {}
        }
    }

    let headers = [
        HeaderField::count(YEAS, yeas),
        HeaderField::count(NAYS, nays),
        HeaderField::count(NOT_VOTING, not_voting),
    ]
    .into_iter()
    .chain(headers)
    .collect();

    VoteDocumentResult {
        bill_id: bill_id.clone(),
        link: source.link.clone(),
        chamber: source.chamber,
        date: source.date.clone(),
        headers,
        votes,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Chamber, HeaderValue, VoteRecord, VoteValue};
    use url::Url;

    fn source(expected_yeas: Option<u32>, expected_nays: Option<u32>) -> VoteDocumentLink {
        VoteDocumentLink {
            link: Url::parse(
                "https://www.flsenate.gov/Session/Bill/2022/100/Vote/SenateVote_s00100__001.PDF",
            )
            .unwrap(),
            chamber: Chamber::Senate,
            date: Some("03/08/2022".to_owned()),
            expected_yeas,
            expected_nays,
        }
    }

    fn document(yeas: &str, nays: &str, rows: &[&str]) -> Vec<TextToken> {
        let head = [
            "THE FLORIDA SENATE",
            "Session Day:",
            "14",
            "Sequence: 612",
            "Date: 03/08/2022",
            "Time",
            "10:55 AM",
            yeas,
            nays,
            "Not Voting - 0",
            "Presiding",
            "Officer",
            "Name",
        ];
        tokens_from_texts(head.iter().chain(rows.iter()).copied())
    }

    const ROWS: [&str; 9] = ["Y", "President", "Smith", "-", "1", "N", "Jones", "-", "2"];

    #[test]
    fn test_synthetic_document() {
        let tokens = document("Yeas - 1", "Nays - 1", &ROWS);

        let result = extract(&"100".into(), &source(Some(1), Some(1)), &tokens, &NoDiagnostics);

        assert_eq!(
            result.votes,
            vec![
                VoteRecord {
                    area_id: 1,
                    voter_name: "Smith".to_owned(),
                    vote: VoteValue::Yea,
                },
                VoteRecord {
                    area_id: 2,
                    voter_name: "Jones".to_owned(),
                    vote: VoteValue::Nay,
                },
            ]
        );
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(
            result.headers,
            vec![
                HeaderField::count("Yeas", Some(1)),
                HeaderField::count("Nays", Some(1)),
                HeaderField::count("Not Voting", Some(0)),
                HeaderField::text("Session Day", "14"),
                HeaderField::text("Sequence", "612"),
                HeaderField::text("Date", "03/08/2022"),
                HeaderField::text("Time", "10:55 AM"),
            ]
        );
        assert_eq!(result.bill_id, "100".into());
        assert_eq!(result.chamber, Chamber::Senate);
        assert_eq!(result.date.as_deref(), Some("03/08/2022"));
    }

    #[test]
    fn test_count_mismatch_keeps_parsed_votes() {
        let tokens = document("Yeas - 2", "Nays - 1", &ROWS);

        let result = extract(&"100".into(), &source(None, None), &tokens, &NoDiagnostics);

        assert_eq!(result.votes.len(), 2);
        assert_eq!(
            result.errors,
            vec!["parsed votes (2) doesn't match expected Yeas=2 + Nays=1 + Not Voting=0".to_owned()]
        );
    }

    #[test]
    fn test_bill_page_counts_are_cross_checked() {
        let tokens = document("Yeas - 3", "Nays - 1", &ROWS);

        let result = extract(&"100".into(), &source(Some(1), Some(1)), &tokens, &NoDiagnostics);

        assert_eq!(result.headers[0].value, HeaderValue::Count(Some(3)));
        assert_eq!(
            result.errors,
            vec![
                "parsed votes (2) doesn't match expected Yeas=3 + Nays=1 + Not Voting=0".to_owned(),
                "Yeas listed on the bill page (1) doesn't match the vote document (3)".to_owned(),
            ]
        );
    }

    #[test]
    fn test_missing_summary_counts() {
        let tokens = tokens_from_texts(["Presiding", "Officer", "Name", "Y", "Smith", "-", "1"]);

        let result = extract(&"100".into(), &source(None, None), &tokens, &NoDiagnostics);

        assert_eq!(result.votes.len(), 1);
        assert_eq!(
            result.headers,
            vec![
                HeaderField::count("Yeas", None),
                HeaderField::count("Nays", None),
                HeaderField::count("Not Voting", None),
            ]
        );
        assert_eq!(
            result.errors,
            vec![
                "parsed votes (1) doesn't match expected Yeas=missing + Nays=missing + Not Voting=missing"
                    .to_owned()
            ]
        );
    }

    #[test]
    fn test_document_without_a_table() {
        let tokens = tokens_from_texts(["Yeas - 0", "Nays - 0", "Not Voting - 0"]);

        let result = extract(&"100".into(), &source(None, None), &tokens, &NoDiagnostics);

        assert!(result.votes.is_empty());
        assert_eq!(result.errors, vec!["vote table not found".to_owned()]);
        assert_eq!(result.link, source(None, None).link);
    }
}
