use std::sync::Arc;

use anyhow::ensure;
use futures::future::join_all;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use itertools::{Either, Itertools};
use tracing::{info, warn};

use crate::data::{
    BillFailure, BillId, BillVoteSet, DocumentFailure, ImportReport, VoteDocumentLink,
    VoteDocumentResult,
};
use crate::pdf_reader::content_extractor::{extract, Diagnostics};
use crate::pdf_reader::{VoteDocumentError, VoteDocumentLoader};
use crate::web_page_reader::BillMetadataSource;

pub struct BillVotesImporter {
    bills: Arc<dyn BillMetadataSource>,
    documents: Arc<dyn VoteDocumentLoader>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl BillVotesImporter {
    pub fn new(
        bills: Arc<dyn BillMetadataSource>,
        documents: Arc<dyn VoteDocumentLoader>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            bills,
            documents,
            diagnostics,
        }
    }

    async fn fetch_and_parse(
        &self,
        bill_id: &BillId,
        source: &VoteDocumentLink,
    ) -> Result<VoteDocumentResult, VoteDocumentError> {
        let document =
            self.documents
                .load(&source.link)
                .await
                .map_err(|error| VoteDocumentError::Load {
                    link: source.link.clone(),
                    source: error,
                })?;
        let tokens = document
            .into_single_page()
            .map_err(|errors| VoteDocumentError::Validation {
                link: source.link.clone(),
                errors,
            })?;

        Ok(extract(bill_id, source, &tokens, self.diagnostics.as_ref()))
    }

    /// Loads every vote document of a bill concurrently. Only a failure to
    /// read the bill page fails the bill; document failures are kept.
    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn parse_bill(&self, year: &str, bill_id: &BillId) -> anyhow::Result<BillVoteSet> {
        let bill = self.bills.fetch_bill(year, bill_id).await?;

        let mut votes = Vec::with_capacity(bill.vote_links.len());
        let mut failures = vec![];
        {
            let mut futures: FuturesUnordered<_> = bill
                .vote_links
                .iter()
                .map(|source| self.fetch_and_parse(&bill.bill_id, source))
                .collect();

            while let Some(result) = futures.next().await {
                match result {
                    Ok(result) => votes.push(result),
                    Err(error) => {
                        let failure = document_failure(error);
                        warn!(link = %failure.link, "{}", failure.reason);
                        failures.push(failure);
                    }
                }
            }
        }

        info!(
            "loaded {} vote results for bill #{}",
            votes.len(),
            bill.bill_id
        );

        Ok(BillVoteSet {
            bill,
            votes,
            failures,
        })
    }

    /// Imports bills in batches of `batch_size`. Batches run one after the
    /// other and the bills of a batch run concurrently.
    #[tracing::instrument(err, skip(self, bills), fields(bills = bills.len()), level = "info")]
    pub async fn import(
        &self,
        year: &str,
        bills: Vec<BillId>,
        batch_size: usize,
    ) -> anyhow::Result<ImportReport> {
        ensure!(batch_size > 0, "Batch size must be greater than 0");

        let mut report = ImportReport::default();
        for batch in bills.chunks(batch_size) {
            let outcomes = join_all(batch.iter().map(|bill_id| async move {
                (bill_id, self.parse_bill(year, bill_id).await)
            }))
            .await;

            let (bill_votes, failures): (Vec<_>, Vec<_>) =
                outcomes
                    .into_iter()
                    .partition_map(|(bill_id, outcome)| match outcome {
                        Ok(bill_votes) => Either::Left(bill_votes),
                        Err(error) => Either::Right(BillFailure {
                            bill_id: bill_id.clone(),
                            reason: format!("{error:#}"),
                        }),
                    });

            report.bills.extend(bill_votes);
            report.failures.extend(failures);
        }

        info!(
            "imported {} bills, {} failed",
            report.bills.len(),
            report.failures.len()
        );
        Ok(report)
    }
}

fn document_failure(error: VoteDocumentError) -> DocumentFailure {
    let reason = error.to_string();
    match error {
        VoteDocumentError::Load { link, source } => DocumentFailure {
            link,
            reason: format!("{reason}: {source:#}"),
            errors: vec![],
        },
        VoteDocumentError::Validation { link, errors } => DocumentFailure {
            link,
            reason,
            errors,
        },
    }
}
