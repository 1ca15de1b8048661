mod vote_history;

use anyhow::Context;
use async_trait::async_trait;
use itertools::Itertools;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use shared_kernel::http_client::HttpClient;
use url::Url;

use crate::data::{BillId, BillInfo};

lazy_static! {
    static ref TITLE: Selector = Selector::parse(".main h2").expect("TITLE selector to parse");
}

#[async_trait]
pub trait BillMetadataSource: Send + Sync {
    async fn fetch_bill(&self, year: &str, bill_id: &BillId) -> anyhow::Result<BillInfo>;
}

pub struct WebPageReader {
    origin: Url,
}

impl WebPageReader {
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }
}

fn bill_path(year: &str, bill_id: &BillId) -> String {
    format!("/Session/Bill/{year}/{bill_id}")
}

#[async_trait]
impl BillMetadataSource for WebPageReader {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn fetch_bill(&self, year: &str, bill_id: &BillId) -> anyhow::Result<BillInfo> {
        let path = bill_path(year, bill_id);
        let page_url = self
            .origin
            .join(&format!("{path}/ByCategory"))
            .context("Invalid URL")?;
        let page_content = HttpClient::get_text(page_url.clone()).await?;
        parse_bill_page(&self.origin, year, bill_id, page_url, &page_content)
    }
}

/// Text of an element and its descendants with whitespace runs collapsed.
fn text_content(element: ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).join(" ")
}

fn parse_title(page: &Html) -> Option<String> {
    page.select(&TITLE)
        .next()
        .map(text_content)
        .filter(|title| !title.is_empty())
}

pub fn parse_bill_page(
    origin: &Url,
    year: &str,
    bill_id: &BillId,
    page_url: Url,
    page_content: &str,
) -> anyhow::Result<BillInfo> {
    let page = Html::parse_document(page_content);
    let vote_links = vote_history::parse_vote_links(origin, &bill_path(year, bill_id), &page)
        .with_context(|| format!("Failed to read the vote history of bill {bill_id}"))?;
    Ok(BillInfo {
        bill_id: bill_id.clone(),
        year: year.to_owned(),
        page_url,
        title: parse_title(&page),
        vote_links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Chamber;

    const BILL_PAGE: &str = r#"
    <div class="main">
      <h2>CS/HB 5 &amp; Reducing Fetal and Infant Mortality</h2>
      <p>General Bill by Health &amp; Human Services Committee</p>
      <div id="tabBodyVoteHistory" class="tabBody">
        <table class="tbl">
          <thead><tr><th>Date</th><th>Chamber</th><th>Result</th></tr></thead>
          <tbody>
            <tr>
              <td>03/03/2022</td>
              <td>Senate</td>
              <td><a href="/Session/Bill/2022/5/Vote/SenateVote_h00005c1.PDF">24 Yeas - 15 Nays</a></td>
            </tr>
            <tr>
              <td>02/17/2022</td>
              <td> House </td>
              <td><a href="/Session/Bill/2022/5/Vote/HouseVote_h00005c1__Vote.PDF">78 Yeas - 39 Nays</a></td>
            </tr>
            <tr>
              <td>02/17/2022</td>
              <td> House </td>
              <td><a href="/Session/Bill/2022/5/Vote/HouseVote_h00005c1__Vote.PDF">78 Yeas - 39 Nays</a></td>
            </tr>
          </tbody>
        </table>
      </div>
      <div id="tabBodyCitations"><a href="/Session/Bill/2022/5/Vote/Senate-not-a-row.PDF">x</a></div>
    </div>"#;

    #[test]
    fn test_parse_bill_page() {
        let origin = Url::parse("https://www.flsenate.gov").unwrap();
        let page_url = origin.join("/Session/Bill/2022/5/ByCategory").unwrap();

        let bill = parse_bill_page(&origin, "2022", &"5".into(), page_url.clone(), BILL_PAGE).unwrap();

        assert_eq!(bill.bill_id, "5".into());
        assert_eq!(bill.page_url, page_url);
        assert_eq!(
            bill.title.as_deref(),
            Some("CS/HB 5 & Reducing Fetal and Infant Mortality")
        );
        assert_eq!(bill.vote_links.len(), 2);

        let senate = &bill.vote_links[0];
        assert_eq!(
            senate.link.as_str(),
            "https://www.flsenate.gov/Session/Bill/2022/5/Vote/SenateVote_h00005c1.PDF"
        );
        assert_eq!(senate.chamber, Chamber::Senate);
        assert_eq!(senate.date.as_deref(), Some("03/03/2022"));
        assert_eq!((senate.expected_yeas, senate.expected_nays), (Some(24), Some(15)));

        let house = &bill.vote_links[1];
        assert_eq!(house.chamber, Chamber::House);
        assert_eq!((house.expected_yeas, house.expected_nays), (Some(78), Some(39)));
    }

    #[test]
    fn test_bill_page_without_votes() {
        let origin = Url::parse("https://www.flsenate.gov").unwrap();
        let page_url = origin.join("/Session/Bill/2022/7/ByCategory").unwrap();

        let page = r#"<div class="main"><h2> </h2></div>"#;

        let bill = parse_bill_page(&origin, "2022", &"7".into(), page_url, page).unwrap();

        assert!(bill.title.is_none());
        assert!(bill.vote_links.is_empty());
    }

    #[test]
    fn test_entities_are_decoded() {
        let page = Html::parse_document(
            "<div class=\"main\"><h2>Smith&rsquo;s &lt;Act&gt;\n  &#x27;A&#x27;</h2></div>",
        );

        assert_eq!(parse_title(&page).as_deref(), Some("Smith\u{2019}s <Act> 'A'"));
    }
}
