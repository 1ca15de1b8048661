use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(String);

impl Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for BillId {
    fn from(id: &str) -> Self {
        BillId(id.trim().to_owned())
    }
}

impl From<String> for BillId {
    fn from(id: String) -> Self {
        id.as_str().into()
    }
}

impl AsRef<str> for BillId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Chamber {
    Senate,
    House,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Chamber {
    /// Chamber names as printed on the bill page; anything else is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Senate" => Chamber::Senate,
            "House" => Chamber::House,
            _ => Chamber::Unknown,
        }
    }
}

/// A single cast vote. The abbreviations are the ones printed in the vote
/// table and are also the wire format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum VoteValue {
    #[serde(rename = "Y")]
    Yea,
    #[serde(rename = "N")]
    Nay,
    #[serde(rename = "EX")]
    Excused,
    #[serde(rename = "AV")]
    Abstain,
    #[serde(rename = "-NV-")]
    NotVoting,
    #[serde(rename = "-NA-")]
    Unrecognized,
}

impl VoteValue {
    /// Only the four abbreviations that appear as tokens in a vote table.
    pub fn from_abbreviation(text: &str) -> Option<Self> {
        match text {
            "Y" => Some(VoteValue::Yea),
            "N" => Some(VoteValue::Nay),
            "EX" => Some(VoteValue::Excused),
            "AV" => Some(VoteValue::Abstain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::Yea => "Y",
            VoteValue::Nay => "N",
            VoteValue::Excused => "EX",
            VoteValue::Abstain => "AV",
            VoteValue::NotVoting => "-NV-",
            VoteValue::Unrecognized => "-NA-",
        }
    }
}

impl Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteValue {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "-NV-" => Ok(VoteValue::NotVoting),
            "-NA-" => Ok(VoteValue::Unrecognized),
            other => VoteValue::from_abbreviation(other)
                .ok_or_else(|| format!("'{other}' is not a vote value")),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub area_id: u32,
    pub voter_name: String,
    pub vote: VoteValue,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Count(Option<u32>),
    Text(String),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeaderField {
    pub name: String,
    pub value: HeaderValue,
}

impl HeaderField {
    pub fn count(name: &str, value: Option<u32>) -> Self {
        Self {
            name: name.to_owned(),
            value: HeaderValue::Count(value),
        }
    }

    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            value: HeaderValue::Text(value.into()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            HeaderValue::Text(text) => Some(text),
            HeaderValue::Count(_) => None,
        }
    }
}

/// One entry of a bill's vote history, as listed on the bill page.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteDocumentLink {
    pub link: Url,
    pub chamber: Chamber,
    pub date: Option<String>,
    pub expected_yeas: Option<u32>,
    pub expected_nays: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillInfo {
    pub bill_id: BillId,
    pub year: String,
    pub page_url: Url,
    pub title: Option<String>,
    pub vote_links: Vec<VoteDocumentLink>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteDocumentResult {
    pub bill_id: BillId,
    pub link: Url,
    pub chamber: Chamber,
    pub date: Option<String>,
    pub headers: Vec<HeaderField>,
    pub votes: Vec<VoteRecord>,
    pub errors: Vec<String>,
}

const LINK_DATE_FORMAT: &str = "%m/%d/%Y";
const HEADER_TIME_FORMAT: &str = "%I:%M %p";

impl VoteDocumentResult {
    pub fn header(&self, name: &str) -> Option<&HeaderField> {
        self.headers.iter().find(|header| header.name == name)
    }

    /// When the vote was taken: the bill page date if it parses, otherwise
    /// the document's own `Date` (and `Time`, if present) headers.
    pub fn voted_at(&self) -> Option<NaiveDateTime> {
        let from_link = self
            .date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date.trim(), LINK_DATE_FORMAT).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0));
        from_link.or_else(|| {
            let date = self.header("Date")?.as_text()?;
            let date = NaiveDate::parse_from_str(date.trim(), LINK_DATE_FORMAT).ok()?;
            let time = self
                .header("Time")
                .and_then(HeaderField::as_text)
                .and_then(|time| NaiveTime::parse_from_str(time.trim(), HEADER_TIME_FORMAT).ok());
            match time {
                Some(time) => Some(date.and_time(time)),
                None => date.and_hms_opt(0, 0, 0),
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFailure {
    pub link: Url,
    pub reason: String,
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillVoteSet {
    #[serde(flatten)]
    pub bill: BillInfo,
    pub votes: Vec<VoteDocumentResult>,
    pub failures: Vec<DocumentFailure>,
}

impl BillVoteSet {
    pub fn latest_vote(&self, chamber: Chamber) -> Option<&VoteDocumentResult> {
        self.votes
            .iter()
            .filter(|vote| vote.chamber == chamber)
            .filter_map(|vote| vote.voted_at().map(|voted_at| (voted_at, vote)))
            .max_by_key(|(voted_at, _)| *voted_at)
            .map(|(_, vote)| vote)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillFailure {
    pub bill_id: BillId,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub bills: Vec<BillVoteSet>,
    pub failures: Vec<BillFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(chamber: Chamber, date: Option<&str>, headers: Vec<HeaderField>) -> VoteDocumentResult {
        VoteDocumentResult {
            bill_id: "100".into(),
            link: Url::parse(&format!(
                "https://www.flsenate.gov/Session/Bill/2022/100/Vote/{chamber:?}Vote_{}.PDF",
                date.unwrap_or("none").replace('/', "")
            ))
            .unwrap(),
            chamber,
            date: date.map(str::to_owned),
            headers,
            votes: vec![],
            errors: vec![],
        }
    }

    fn bill_vote_set(votes: Vec<VoteDocumentResult>) -> BillVoteSet {
        BillVoteSet {
            bill: BillInfo {
                bill_id: "100".into(),
                year: "2022".to_owned(),
                page_url: Url::parse("https://www.flsenate.gov/Session/Bill/2022/100").unwrap(),
                title: None,
                vote_links: vec![],
            },
            votes,
            failures: vec![],
        }
    }

    #[test]
    fn test_latest_vote_uses_link_dates_per_chamber() {
        let set = bill_vote_set(vec![
            result(Chamber::Senate, Some("02/01/2022"), vec![]),
            result(Chamber::Senate, Some("03/08/2022"), vec![]),
            result(Chamber::House, Some("03/10/2022"), vec![]),
        ]);

        let latest = set.latest_vote(Chamber::Senate).unwrap();

        assert_eq!(latest.date.as_deref(), Some("03/08/2022"));
    }

    #[test]
    fn test_latest_vote_falls_back_to_date_and_time_headers() {
        let set = bill_vote_set(vec![
            result(
                Chamber::House,
                None,
                vec![
                    HeaderField::text("Date", "03/08/2022"),
                    HeaderField::text("Time", "10:55 AM"),
                ],
            ),
            result(
                Chamber::House,
                Some("not a date"),
                vec![
                    HeaderField::text("Date", "03/08/2022"),
                    HeaderField::text("Time", "3:10 PM"),
                ],
            ),
        ]);

        let latest = set.latest_vote(Chamber::House).unwrap();

        assert_eq!(latest.date.as_deref(), Some("not a date"));
    }

    #[test]
    fn test_latest_vote_without_dates() {
        let set = bill_vote_set(vec![result(Chamber::Senate, None, vec![])]);

        assert!(set.latest_vote(Chamber::Senate).is_none());
        assert!(set.latest_vote(Chamber::House).is_none());
    }

    #[test]
    fn test_vote_values_serialize_as_abbreviations() {
        let record = VoteRecord {
            area_id: 12,
            voter_name: "Smith".to_owned(),
            vote: VoteValue::Excused,
        };

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"areaId": 12, "voterName": "Smith", "vote": "EX"})
        );
        assert_eq!("-NV-".parse::<VoteValue>(), Ok(VoteValue::NotVoting));
        assert!("Yes".parse::<VoteValue>().is_err());
    }

    #[test]
    fn test_header_values_are_untagged() {
        let headers = vec![
            HeaderField::count("Yeas", Some(38)),
            HeaderField::count("Nays", None),
            HeaderField::text("Sequence", "612"),
        ];

        let json = serde_json::to_value(&headers).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"name": "Yeas", "value": 38},
                {"name": "Nays", "value": null},
                {"name": "Sequence", "value": "612"},
            ])
        );
    }
}
