pub mod content_extractor;
mod text_runs;

use anyhow::Context;
use async_trait::async_trait;
use shared_kernel::http_client::HttpClient;
use thiserror::Error;
use url::Url;

use crate::pdf_reader::content_extractor::TextToken;
use crate::pdf_reader::text_runs::{page_runs, tokens_from_runs};

/// A loaded vote document: one token stream per page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteDocument {
    pub pages: Vec<Vec<TextToken>>,
}

impl VoteDocument {
    /// Vote documents are published as exactly one page.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        if self.pages.len() != 1 {
            errors.push(format!(
                "expected votes PDF to have 1 page, found {}",
                self.pages.len()
            ));
        }
        errors
    }

    pub fn into_single_page(self) -> Result<Vec<TextToken>, Vec<String>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.pages.into_iter().next().unwrap_or_default())
    }
}

#[derive(Error, Debug)]
pub enum VoteDocumentError {
    #[error("Failed to load vote document {link}")]
    Load {
        link: Url,
        #[source]
        source: anyhow::Error,
    },
    #[error("Found errors in vote document {link}: {}", .errors.join(", "))]
    Validation { link: Url, errors: Vec<String> },
}

#[async_trait]
pub trait VoteDocumentLoader: Send + Sync {
    async fn load(&self, link: &Url) -> anyhow::Result<VoteDocument>;
}

pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }

    fn decode(bytes: &[u8]) -> anyhow::Result<VoteDocument> {
        let document =
            lopdf::Document::load_mem(bytes).context("Failed to decode the PDF document")?;
        let pages = document
            .get_pages()
            .into_iter()
            .map(|(page_number, page_id)| {
                page_runs(&document, page_id)
                    .with_context(|| format!("Failed to extract text from page {page_number}"))
                    .map(tokens_from_runs)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(VoteDocument { pages })
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoteDocumentLoader for PdfReader {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn load(&self, link: &Url) -> anyhow::Result<VoteDocument> {
        let file_bytes = HttpClient::get_bytes(link.clone()).await?;
        Self::decode(&file_bytes).with_context(|| format!("The file URL is {link}"))
    }
}
