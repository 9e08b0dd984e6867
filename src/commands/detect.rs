use serde::Serialize;

use crate::io::read_input;
use mdecode::error::Result;
use mdecode::types::{Context, DecodeConfig, Encoding, InputSource};

use super::preview;

#[derive(Debug, Serialize)]
pub struct DetectResult {
    pub schema_version: u32,
    pub input_preview: String,
    pub candidates: Vec<DetectCandidate>,
    /// What a single decode round would pick.
    pub selected: Encoding,
}

#[derive(Debug, Serialize)]
pub struct DetectCandidate {
    pub encoding: Encoding,
    pub enabled: bool,
    pub accepted: bool,
    pub output_preview: Option<String>,
}

/// Runs every detector on its own, in priority order, so overlapping
/// matches are visible.
pub fn run_detect(ctx: &Context, config: DecodeConfig, input: &InputSource) -> Result<DetectResult> {
    let data = read_input(input)?;

    let candidates: Vec<DetectCandidate> = ctx
        .registry
        .iter()
        .map(|detector| {
            let decoded = detector.detect(&data);
            DetectCandidate {
                encoding: detector.encoding(),
                enabled: config.is_enabled(detector.encoding()),
                accepted: decoded.is_some(),
                output_preview: decoded.as_deref().map(preview),
            }
        })
        .collect();

    let selected = candidates
        .iter()
        .find(|c| c.enabled && c.accepted)
        .map_or(Encoding::None, |c| c.encoding);

    Ok(DetectResult {
        schema_version: 1,
        input_preview: preview(&data),
        candidates,
        selected,
    })
}
