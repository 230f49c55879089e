use std::path::PathBuf;

use clap::Parser;
use glob::Pattern;

use crate::application::services::ConfigurationError;

use super::config::{Environment, Settings};

/// Translate English lecture transcripts into structured bilingual notes.
///
/// A single file is written to `<stem>_optimized.md` unless `--output` is
/// given. A folder is processed file by file into `<folder>/../processed`.
#[derive(Debug, Parser)]
#[command(name = "subweave", version, about)]
pub struct Cli {
    /// Transcript file or folder of transcripts
    #[arg(short, long, default_value = "./raw")]
    pub input_path: PathBuf,

    /// Output file (single input) or folder (folder input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// API key for the completion service (falls back to DEEPSEEK_API_KEY)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Words per chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Glob matched against file names in a folder input, e.g. `Lecture*.txt`
    #[arg(long, default_value = "*.txt")]
    pub pattern: String,

    /// Skip the second pass over chunks that failed
    #[arg(long)]
    pub no_retry: bool,

    /// Skip the boundary repair pass
    #[arg(long)]
    pub no_boundary_optimization: bool,

    /// Language the transcript is translated into
    #[arg(long)]
    pub target_language: Option<String>,

    /// Settings environment (local, test, prod)
    #[arg(long, default_value = "local")]
    pub environment: Environment,

    /// Prepend YAML frontmatter to each output
    #[arg(long)]
    pub frontmatter: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Compiles `--pattern`, so a malformed glob fails before any file is read.
    pub fn file_pattern(&self) -> Result<Pattern, ConfigurationError> {
        Pattern::new(&self.pattern).map_err(|e| ConfigurationError::InvalidPattern {
            pattern: self.pattern.clone(),
            reason: e.to_string(),
        })
    }

    /// Command-line values win over settings files and environment variables.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(api_key) = &self.api_key {
            settings.llm.api_key = api_key.clone();
        }
        if let Some(chunk_size) = self.chunk_size {
            settings.pipeline.chunk_size = chunk_size;
        }
        if let Some(temperature) = self.temperature {
            settings.llm.temperature = temperature;
        }
        if let Some(language) = &self.target_language {
            settings.pipeline.target_language = language.clone();
        }
        if self.no_retry {
            settings.pipeline.enable_retry = false;
        }
        if self.no_boundary_optimization {
            settings.pipeline.enable_boundary_optimization = false;
        }
        if self.verbose {
            settings.logging.level = "debug".to_string();
        }
    }
}
