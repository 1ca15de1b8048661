use std::path::PathBuf;

use serde::Deserialize;
use shared_kernel::configuration::config;
use url::Url;

const DEFAULT_BATCH_SIZE: usize = 40;

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[derive(Debug, Deserialize, Clone)]
pub struct BillPageSettings {
    pub origin: Url,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportSettings {
    pub year: String,
    #[serde(default)]
    pub bills: Vec<String>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    pub output_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub bill_page: BillPageSettings,
    pub import: ImportSettings,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        config::<Settings>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_defaults_to_forty() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "bill_page": { "origin": "https://www.flsenate.gov" },
            "import": { "year": "2022", "output_file": "votes.json" }
        }))
        .unwrap();

        assert_eq!(settings.import.batch_size, 40);
        assert!(settings.import.bills.is_empty());
        assert_eq!(settings.bill_page.origin.as_str(), "https://www.flsenate.gov/");
    }
}
