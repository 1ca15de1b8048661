use anyhow::{anyhow, Context};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::data::{Chamber, VoteDocumentLink};
use crate::pdf_reader::content_extractor::leading_number;
use crate::web_page_reader::text_content;

const CHAMBERS: [&str; 2] = ["Senate", "House"];

fn vote_link_selector(bill_path: &str) -> anyhow::Result<Selector> {
    let selectors = CHAMBERS
        .iter()
        .map(|chamber| format!("#tabBodyVoteHistory a[href*='{bill_path}/Vote/{chamber}']"))
        .join(", ");
    Selector::parse(&selectors)
        .map_err(|error| anyhow!("Invalid vote link selector {selectors}: {error:?}"))
}

fn previous_element(element: ElementRef) -> Option<ElementRef> {
    element.prev_siblings().find_map(ElementRef::wrap)
}

// "78 Yeas - 39 Nays"
fn count(link_text: &str, label: &str) -> Option<u32> {
    link_text
        .split(" - ")
        .find(|part| part.contains(label))
        .and_then(leading_number)
}

// <tr><td>date</td><td>chamber</td><td><a href="..">78 Yeas - 39 Nays</a></td></tr>
fn vote_link(origin: &Url, anchor: ElementRef) -> anyhow::Result<VoteDocumentLink> {
    let href = anchor.value().attr("href").unwrap_or_default();
    let link = origin
        .join(href)
        .with_context(|| format!("Invalid vote document link {href}"))?;

    let chamber_cell = anchor
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(previous_element);
    let chamber = chamber_cell.map_or(Chamber::Unknown, |cell| {
        Chamber::from_label(&text_content(cell))
    });
    let date = chamber_cell
        .and_then(previous_element)
        .map(text_content)
        .filter(|date| !date.is_empty());

    let link_text = text_content(anchor);
    Ok(VoteDocumentLink {
        link,
        chamber,
        date,
        expected_yeas: count(&link_text, "Yeas"),
        expected_nays: count(&link_text, "Nays"),
    })
}

/// Vote documents listed in the bill page's vote history tab, in page order
/// and without duplicates.
pub(super) fn parse_vote_links(
    origin: &Url,
    bill_path: &str,
    page: &Html,
) -> anyhow::Result<Vec<VoteDocumentLink>> {
    let selector = vote_link_selector(bill_path)?;
    let links = page
        .select(&selector)
        .map(|anchor| vote_link(origin, anchor))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(links.into_iter().unique().collect())
}
