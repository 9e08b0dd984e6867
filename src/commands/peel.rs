use serde::Serialize;

use crate::io::read_input;
use mdecode::error::Result;
use mdecode::types::{Context, DecodeConfig, Encoding, InputSource, Trace};
use mdecode::Decoder;

#[derive(Debug, Serialize)]
pub struct PeelReport {
    pub schema_version: u32,
    pub layers: Vec<Encoding>,
    pub output: String,
}

impl PeelReport {
    pub fn from_trace(trace: &Trace) -> Self {
        Self {
            schema_version: 1,
            layers: trace.encodings(),
            output: String::from_utf8_lossy(trace.output().unwrap_or_default()).into_owned(),
        }
    }
}

pub fn run_peel(ctx: &Context, config: DecodeConfig, input: &InputSource, max_rounds: usize) -> Result<Trace> {
    let data = read_input(input)?;
    let decoder = Decoder::with_registry(config, ctx.registry);
    decoder.peel(&data, max_rounds)
}
