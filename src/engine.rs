//! Single-round decoding and the loop that drives it.

use tracing::{debug, info};

use crate::codec::Registry;
use crate::error::{MdecodeError, Result};
use crate::types::{DecodeConfig, Decoded, Encoding, Layer, Trace};

pub const DEFAULT_MAX_ROUNDS: usize = 64;

pub struct Decoder {
    config: DecodeConfig,
    registry: &'static Registry,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        Self::with_registry(config, Registry::global())
    }

    pub fn with_registry(config: DecodeConfig, registry: &'static Registry) -> Self {
        Self { config, registry }
    }

    /// Removes at most one layer of encoding.
    ///
    /// Enabled detectors are tried hex, base64, proto and the first match
    /// wins. Several may accept the same buffer (`deadbeef` is valid hex and
    /// valid base64); the order is a fixed tie-break, not a claim about which
    /// encoding was really used. When nothing matches the input comes back
    /// unchanged, labelled [`Encoding::None`].
    pub fn decode(&self, input: &[u8]) -> Decoded {
        for detector in self.registry.iter() {
            let encoding = detector.encoding();
            if !self.config.is_enabled(encoding) {
                continue;
            }

            debug!(encoding = %encoding, len = input.len(), "trying detector");
            if let Some(data) = detector.detect(input) {
                return Decoded { data, encoding };
            }
        }

        Decoded {
            data: input.to_vec(),
            encoding: Encoding::None,
        }
    }

    /// Decodes repeatedly until no detector matches.
    ///
    /// Fails with [`MdecodeError::NothingDecoded`] if the very first round
    /// matches nothing, and with [`MdecodeError::RoundLimit`] if the buffer
    /// is still decodable after `max_rounds` layers.
    pub fn peel(&self, input: &[u8], max_rounds: usize) -> Result<Trace> {
        let mut trace = Trace::default();
        let mut current = input.to_vec();

        loop {
            let (data, encoding) = self.decode(&current).into_parts();
            if encoding.is_none() {
                break;
            }
            if trace.layers.len() == max_rounds {
                return Err(MdecodeError::round_limit(max_rounds));
            }

            info!(round = trace.layers.len() + 1, encoding = %encoding, len = data.len(), "applied decoding");
            trace.layers.push(Layer {
                encoding,
                output: data.clone(),
            });
            current = data;
        }

        if trace.layers.is_empty() {
            return Err(MdecodeError::NothingDecoded);
        }

        Ok(trace)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecodeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::prelude::*;
    use data_encoding::{HEXLOWER, HEXUPPER};

    #[test]
    fn test_decode_hex_scenario() {
        let decoder = Decoder::default();
        let first = decoder.decode(b"68656c6c6f");
        assert_eq!(first.data, b"hello");
        assert_eq!(first.encoding, Encoding::Hex);

        let second = decoder.decode(&first.data);
        assert_eq!(second.data, b"hello");
        assert_eq!(second.encoding, Encoding::None);
    }

    #[test]
    fn test_decode_base64_scenario() {
        let decoded = Decoder::default().decode(b"aGVsbG8=");
        assert_eq!(decoded.into_parts(), (b"hello".to_vec(), Encoding::Base64));
    }

    #[test]
    fn test_decode_base64_trailing_bits() {
        let decoded = Decoder::default().decode(b"aGVsbG9=");
        assert_eq!(decoded.into_parts(), (b"hello".to_vec(), Encoding::Base64));

        let decoded = Decoder::default().decode(b"SB==");
        assert_eq!(decoded.into_parts(), (vec![b'H'], Encoding::Base64));
    }

    #[test]
    fn test_decode_hex_full_byte_range() {
        let all: Vec<u8> = (0u8..=255).collect();
        let decoder = Decoder::default();
        for encoded in [HEXLOWER.encode(&all), HEXUPPER.encode(&all)] {
            let decoded = decoder.decode(encoded.as_bytes());
            assert_eq!(decoded.into_parts(), (all.clone(), Encoding::Hex));
        }
    }

    #[test]
    fn test_decode_base64_full_byte_range() {
        let all: Vec<u8> = (0u8..=255).collect();
        let encoded = BASE64_STANDARD.encode(&all);
        assert!(encoded.contains('+') && encoded.contains('/'));

        let decoded = Decoder::default().decode(encoded.as_bytes());
        assert_eq!(decoded.into_parts(), (all, Encoding::Base64));
    }

    #[test]
    fn test_decode_unrecognized_returns_input() {
        let input = b"not an encoding!!";
        let decoded = Decoder::default().decode(input);
        assert_eq!(decoded.data, input);
        assert_eq!(decoded.encoding, Encoding::None);
    }

    #[test]
    fn test_decode_empty_input() {
        let decoded = Decoder::default().decode(b"");
        assert!(decoded.data.is_empty());
        assert_eq!(decoded.encoding, Encoding::None);
    }

    #[test]
    fn test_decode_proto() {
        let decoded = Decoder::default().decode(&[0x08, 0x96, 0x01]);
        assert_eq!(decoded.encoding, Encoding::Proto);
        assert_eq!(decoded.data, b"1: 150");
    }

    // Tie-break: "deadbeef" is both valid hex and valid base64; hex is tried first.
    #[test]
    fn test_tie_break_hex_before_base64() {
        let decoded = Decoder::default().decode(b"deadbeef");
        assert_eq!(decoded.encoding, Encoding::Hex);
        assert_eq!(decoded.data, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_disabled_hex_falls_through_to_base64() {
        let decoder = Decoder::new(DecodeConfig::none().with_base64().with_proto());
        let decoded = decoder.decode(b"deadbeef");
        assert_eq!(decoded.encoding, Encoding::Base64);
        assert_eq!(decoded.data, BASE64_STANDARD.decode("deadbeef").unwrap());
    }

    #[test]
    fn test_disabled_hex_falls_through_to_none() {
        let decoder = Decoder::new(DecodeConfig::none().with_proto());
        let decoded = decoder.decode(b"68656c6c6f");
        assert_eq!(decoded.encoding, Encoding::None);
        assert_eq!(decoded.data, b"68656c6c6f");
    }

    #[test]
    fn test_disable_all_never_decodes() {
        let decoder = Decoder::new(DecodeConfig::none());
        for input in [&b"68656c6c6f"[..], &b"aGVsbG8="[..], &[0x08u8, 0x01][..]] {
            assert_eq!(decoder.decode(input).encoding, Encoding::None);
        }
    }

    #[test]
    fn test_decode_does_not_touch_input() {
        let input = b"68656c6c6f".to_vec();
        let _ = Decoder::default().decode(&input);
        assert_eq!(input, b"68656c6c6f");
    }

    #[test]
    fn test_peel_layered_fixture() {
        let outer = BASE64_STANDARD.encode("48656c6c6f");
        let trace = Decoder::default().peel(outer.as_bytes(), DEFAULT_MAX_ROUNDS).unwrap();
        assert_eq!(trace.encodings(), vec![Encoding::Base64, Encoding::Hex]);
        assert_eq!(trace.output().unwrap(), b"Hello");
    }

    #[test]
    fn test_peel_hex_then_proto() {
        let trace = Decoder::default().peel(b"0801", DEFAULT_MAX_ROUNDS).unwrap();
        assert_eq!(trace.encodings(), vec![Encoding::Hex, Encoding::Proto]);
        assert_eq!(trace.layers[0].output, vec![0x08, 0x01]);
        assert_eq!(trace.output().unwrap(), b"1: 1");
    }

    #[test]
    fn test_peel_nothing_decoded() {
        let err = Decoder::default().peel(b"not an encoding!!", DEFAULT_MAX_ROUNDS).unwrap_err();
        assert!(matches!(err, MdecodeError::NothingDecoded));
    }

    #[test]
    fn test_peel_round_limit() {
        let mut input = b"hi there".to_vec();
        for _ in 0..5 {
            input = BASE64_STANDARD.encode(&input).into_bytes();
        }
        let err = Decoder::default().peel(&input, 3).unwrap_err();
        assert!(matches!(err, MdecodeError::RoundLimit { rounds: 3 }));

        let trace = Decoder::default().peel(&input, 5).unwrap();
        assert_eq!(trace.layers.len(), 5);
        assert_eq!(trace.output().unwrap(), b"hi there");
    }

    #[test]
    fn test_peel_zero_round_limit() {
        let err = Decoder::default().peel(b"68656c6c6f", 0).unwrap_err();
        assert!(matches!(err, MdecodeError::RoundLimit { rounds: 0 }));
    }
}
