mod detect;
mod peel;

pub use detect::run_detect;
pub use peel::{run_peel, PeelReport};

use crate::io::{write_output, OutputConfig};
use mdecode::error::Result;
use mdecode::types::{Context, DecodeConfig, InputSource, OutputDest};

const PREVIEW_CHARS: usize = 60;

pub trait CommandHandler {
    fn execute(&self, ctx: &Context) -> Result<()>;
}

/// Lossy text rendering of a buffer, cut at [`PREVIEW_CHARS`].
pub(crate) fn preview(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    let trimmed = text.trim();
    if trimmed.chars().count() > PREVIEW_CHARS {
        format!("{}...", trimmed.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        trimmed.to_string()
    }
}

pub struct PeelCommand {
    pub config: DecodeConfig,
    pub input: InputSource,
    pub output: OutputDest,
    pub max_rounds: usize,
    pub force: bool,
    pub json: bool,
    pub verbose: bool,
}

impl CommandHandler for PeelCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let trace = run_peel(ctx, self.config, &self.input, self.max_rounds)?;

        if self.json {
            let report = PeelReport::from_trace(&trace);
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
            return Ok(());
        }

        if self.verbose {
            for layer in &trace.layers {
                println!(
                    "applied decoding '{}':\n{}\n",
                    layer.encoding,
                    String::from_utf8_lossy(&layer.output)
                );
            }
            if matches!(self.output, OutputDest::Stdout) {
                println!("result:");
            }
        }

        let config = OutputConfig {
            dest: self.output.clone(),
            force: self.force,
        };
        write_output(trace.output().unwrap_or_default(), &config)
    }
}

pub struct DetectCommand {
    pub config: DecodeConfig,
    pub input: InputSource,
    pub json: bool,
}

impl CommandHandler for DetectCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let result = run_detect(ctx, self.config, &self.input)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        } else {
            println!("Input: {}", result.input_preview);
            println!();
            println!("{:<8} {:<8} {:<8} OUTPUT", "CODEC", "ENABLED", "MATCH");
            println!("{}", "-".repeat(60));
            for c in &result.candidates {
                println!(
                    "{:<8} {:<8} {:<8} {}",
                    c.encoding,
                    if c.enabled { "yes" } else { "no" },
                    if c.accepted { "yes" } else { "no" },
                    c.output_preview.as_deref().unwrap_or("-")
                );
            }
            println!();
            println!("Selected: {}", result.selected);
        }
        Ok(())
    }
}
