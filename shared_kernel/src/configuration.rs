use std::path::PathBuf;

use anyhow::Context;
use serde::de::DeserializeOwned;

const CONFIGURATION_DIRECTORY_VAR: &str = "APP_CONFIGURATION_DIRECTORY";

fn configuration_directory() -> anyhow::Result<PathBuf> {
    if let Ok(directory) = std::env::var(CONFIGURATION_DIRECTORY_VAR) {
        return Ok(PathBuf::from(directory));
    }
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    Ok(base_path.join("configuration"))
}

/// Loads `Settings` from `configuration/base.yaml` (or `test.yaml` under test),
/// then applies `APP_`-prefixed environment overrides, e.g.
/// `APP_IMPORT__BATCH_SIZE=10` or `APP_IMPORT__BILLS=100,102`.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let configuration_directory = configuration_directory()?;
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join(file)))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("import.bills"),
        )
        .build()
        .with_context(|| {
            format!(
                "Failed to build configuration from {}",
                configuration_directory.display()
            )
        })?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
