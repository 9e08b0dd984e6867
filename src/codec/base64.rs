use base64::engine::general_purpose::{self, GeneralPurpose};
use base64::{alphabet, Engine};
use tracing::debug;

use super::{util, Detector};
use crate::types::Encoding;

// Padded like `BASE64_STANDARD`, but bits past the last full byte are ignored.
const STANDARD_TRAILING_BITS: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD.with_decode_allow_trailing_bits(true),
);

fn is_standard_symbol(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
}

/// Checks that `=` appears only as one or two trailing characters.
fn validate_padding(input: &[u8]) -> bool {
    let pad_count = input.iter().rev().take_while(|&&b| b == b'=').count();
    if pad_count > 2 {
        return false;
    }
    !input[..input.len() - pad_count].contains(&b'=')
}

/// RFC4648 base64, standard alphabet, padded.
pub struct Base64;

impl Detector for Base64 {
    fn encoding(&self) -> Encoding {
        Encoding::Base64
    }

    fn detect(&self, input: &[u8]) -> Option<Vec<u8>> {
        let trimmed = util::trim_line(input);

        if trimmed.is_empty() {
            debug!("base64: empty input");
            return None;
        }

        if !trimmed.len().is_multiple_of(4) {
            debug!(len = trimmed.len(), "base64: length not a multiple of 4");
            return None;
        }

        if let Some(pos) = util::first_invalid(trimmed, |b| is_standard_symbol(b) || b == b'=') {
            debug!(position = pos, "base64: byte outside alphabet");
            return None;
        }

        if !validate_padding(trimmed) {
            debug!("base64: misplaced padding");
            return None;
        }

        match STANDARD_TRAILING_BITS.decode(trimmed) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!(error = %e, "base64: rejected");
                None
            }
        }
    }
}
