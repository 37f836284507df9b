//! Demo command implementation

use crate::cli::exit_codes;
use crate::synth::{write_input_json, DEFAULT_SEED};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the demo command
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Output path, e.g. demos/input.example.json
    pub out: PathBuf,

    /// Seed for the synthetic patient and specimen
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl DemoArgs {
    /// Execute the demo command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(out = %self.out.display(), seed = self.seed, "Generating synthetic input");

        let out = self.out.clone();
        let seed = self.seed;
        match tokio::task::spawn_blocking(move || write_input_json(out, seed)).await? {
            Ok(path) => {
                println!("{}", path.display());
                Ok(exit_codes::SUCCESS)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to write synthetic input");
                eprintln!("❌ Failed to write {}", self.out.display());
                eprintln!("   Error: {e}");
                Ok(exit_codes::FATAL)
            }
        }
    }
}
