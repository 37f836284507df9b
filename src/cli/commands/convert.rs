//! Convert command implementation
//!
//! Reads one PGx record, converts it into a collection Bundle and writes the
//! Bundle to a file or stdout. Status messages go to stderr so that stdout
//! can be piped.

use crate::cli::{exit_code_for, exit_codes};
use crate::config::PgxFhirConfig;
use crate::core::adapter::PgxBundleConverter;
use crate::core::context::BuildContext;
use crate::core::verification::verify_bundle;
use crate::domain::{PgxFhirError, PgxRecord};
use clap::Args;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// PGx input JSON file
    pub input: PathBuf,

    /// Write the Bundle here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fixed Bundle id (generated when omitted)
    #[arg(long)]
    pub bundle_id: Option<String>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Skip output verification even if enabled in configuration
    #[arg(long)]
    pub no_verify: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(&self, config: &PgxFhirConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Converting PGx record");

        let text = match tokio::fs::read_to_string(&self.input).await {
            Ok(text) => text,
            Err(e) => {
                eprintln!("❌ Failed to read {}", self.input.display());
                eprintln!("   Error: {e}");
                return Ok(exit_codes::INVALID_INPUT);
            }
        };

        let bundle = match self.convert_text(&text, config, &BuildContext::system()) {
            Ok(bundle) => bundle,
            Err(e) => {
                eprintln!("❌ Conversion failed");
                eprintln!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if config.bundle.verify_output && !self.no_verify {
            let report = verify_bundle(&bundle);
            if !report.is_success() {
                eprintln!("❌ Bundle failed verification");
                eprint!("{}", report.format_summary());
                return Ok(exit_codes::VERIFICATION_FAILED);
            }
        }

        let mut rendered = if self.compact {
            serde_json::to_string(&bundle)?
        } else {
            serde_json::to_string_pretty(&bundle)?
        };
        rendered.push('\n');

        match &self.output {
            Some(path) => {
                write_output(path, &rendered).await?;
                eprintln!("✅ Bundle written to {}", path.display());
            }
            None => print!("{rendered}"),
        }

        Ok(exit_codes::SUCCESS)
    }

    /// Parses and converts one record with the configured converter
    fn convert_text(
        &self,
        text: &str,
        config: &PgxFhirConfig,
        ctx: &BuildContext<'_>,
    ) -> Result<Value, PgxFhirError> {
        let record = PgxRecord::from_json(text)?;

        let mut converter = PgxBundleConverter::from_config(config)?;
        if let Some(bundle_id) = &self.bundle_id {
            let options = converter.options().clone().with_bundle_id(bundle_id.clone());
            converter = converter.with_options(options);
        }

        converter.convert(&record, ctx)
    }
}

async fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::ids::SequentialIdGenerator;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    const RECORD: &str = r#"{
        "patient": {"id": "P1", "sexo": "female"},
        "specimen": {"id": "S1", "tipo": "blood"},
        "results": [{"gen": "CYP2C19", "diplotipo": "*1/*2"}]
    }"#;

    fn args(input: PathBuf, output: Option<PathBuf>) -> ConvertArgs {
        ConvertArgs {
            input,
            output,
            bundle_id: None,
            compact: false,
            no_verify: false,
        }
    }

    #[test]
    fn test_convert_text_uses_bundle_id() {
        let mut convert = args(PathBuf::from("unused.json"), None);
        convert.bundle_id = Some("B1".to_string());

        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let ids = SequentialIdGenerator::new();
        let bundle = convert
            .convert_text(RECORD, &PgxFhirConfig::default(), &BuildContext::new(&clock, &ids))
            .unwrap();

        assert_eq!(bundle["id"], "B1");
        assert_eq!(bundle["entry"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_convert_text_rejects_bad_json() {
        let convert = args(PathBuf::from("unused.json"), None);
        let err = convert
            .convert_text("{not json", &PgxFhirConfig::default(), &BuildContext::system())
            .unwrap_err();
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_execute_writes_bundle() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.json");
        let output = dir.path().join("out").join("bundle.json");
        std::fs::write(&input, RECORD).unwrap();

        let code = args(input, Some(output.clone()))
            .execute(&PgxFhirConfig::default())
            .await
            .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let bundle: Value = serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(bundle["type"], "collection");
    }

    #[tokio::test]
    async fn test_execute_missing_gene_is_input_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.json");
        std::fs::write(
            &input,
            r#"{"patient": {}, "specimen": {}, "results": [{"diplotype": "*1/*1"}]}"#,
        )
        .unwrap();

        let code = args(input, Some(dir.path().join("bundle.json")))
            .execute(&PgxFhirConfig::default())
            .await
            .unwrap();
        assert_eq!(code, exit_codes::INVALID_INPUT);
        assert!(!dir.path().join("bundle.json").exists());
    }

    #[tokio::test]
    async fn test_execute_missing_input_file() {
        let code = args(PathBuf::from("/nonexistent/pgx/input.json"), None)
            .execute(&PgxFhirConfig::default())
            .await
            .unwrap();
        assert_eq!(code, exit_codes::INVALID_INPUT);
    }
}
