use data_encoding::HEXLOWER_PERMISSIVE;
use tracing::debug;

use super::{util, Detector};
use crate::types::Encoding;

/// Hex text in either case, two digits per byte.
pub struct Hex;

impl Detector for Hex {
    fn encoding(&self) -> Encoding {
        Encoding::Hex
    }

    fn detect(&self, input: &[u8]) -> Option<Vec<u8>> {
        let trimmed = util::trim_line(input);

        if trimmed.is_empty() {
            debug!("hex: empty input");
            return None;
        }

        if let Some(pos) = util::first_invalid(trimmed, |b| b.is_ascii_hexdigit()) {
            debug!(position = pos, "hex: non-hex byte");
            return None;
        }

        if !trimmed.len().is_multiple_of(2) {
            debug!(len = trimmed.len(), "hex: odd length");
            return None;
        }

        HEXLOWER_PERMISSIVE.decode(trimmed).ok()
    }
}
