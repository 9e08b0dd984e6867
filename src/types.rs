use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::codec::Registry;

pub struct Context {
    pub registry: &'static Registry,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            registry: Registry::global(),
        }
    }
}

/// Label for the layer removed by a single decode round.
///
/// `None` means no detector matched; it is never produced by a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    None,
    Hex,
    Base64,
    Proto,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::None => "none",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Proto => "proto",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Encoding::None)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Which detectors take part in a decode round.
///
/// The default enables everything. To pick a subset, start from
/// [`DecodeConfig::none`] and switch encodings back on:
///
/// ```
/// use mdecode::DecodeConfig;
///
/// let config = DecodeConfig::none().with_hex().with_proto();
/// assert!(config.hex && config.proto && !config.base64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    pub hex: bool,
    pub base64: bool,
    pub proto: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            hex: true,
            base64: true,
            proto: true,
        }
    }
}

impl DecodeConfig {
    pub fn none() -> Self {
        Self::default().disable_all()
    }

    pub fn disable_all(mut self) -> Self {
        self.hex = false;
        self.base64 = false;
        self.proto = false;
        self
    }

    pub fn with_hex(mut self) -> Self {
        self.hex = true;
        self
    }

    pub fn with_base64(mut self) -> Self {
        self.base64 = true;
        self
    }

    pub fn with_proto(mut self) -> Self {
        self.proto = true;
        self
    }

    pub fn is_enabled(&self, encoding: Encoding) -> bool {
        match encoding {
            Encoding::None => false,
            Encoding::Hex => self.hex,
            Encoding::Base64 => self.base64,
            Encoding::Proto => self.proto,
        }
    }
}

/// Outcome of one decode round. `data` is always a fresh buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub data: Vec<u8>,
    pub encoding: Encoding,
}

impl Decoded {
    pub fn into_parts(self) -> (Vec<u8>, Encoding) {
        (self.data, self.encoding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub encoding: Encoding,
    pub output: Vec<u8>,
}

/// Every layer peeled off by a full run, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trace {
    pub layers: Vec<Layer>,
}

impl Trace {
    pub fn encodings(&self) -> Vec<Encoding> {
        self.layers.iter().map(|l| l.encoding).collect()
    }

    /// Bytes left after the innermost layer, if any layer was removed.
    pub fn output(&self) -> Option<&[u8]> {
        self.layers.last().map(|l| l.output.as_slice())
    }
}

#[derive(Debug, Clone)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
    Literal(Vec<u8>),
}

impl InputSource {
    pub fn parse(s: &str) -> Self {
        match s {
            "-" => InputSource::Stdin,
            s if s.starts_with('@') => InputSource::File(PathBuf::from(&s[1..])),
            s => InputSource::Literal(s.as_bytes().to_vec()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum OutputDest {
    Stdout,
    File(PathBuf),
}

impl OutputDest {
    pub fn parse(s: &str) -> Self {
        match s {
            "-" => OutputDest::Stdout,
            s if s.starts_with('@') => OutputDest::File(PathBuf::from(&s[1..])),
            s => OutputDest::File(PathBuf::from(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_enables_all() {
        let config = DecodeConfig::default();
        assert!(config.hex && config.base64 && config.proto);
    }

    #[test]
    fn test_disable_then_enable() {
        let config = DecodeConfig::default().disable_all().with_base64();
        assert!(!config.is_enabled(Encoding::Hex));
        assert!(config.is_enabled(Encoding::Base64));
        assert!(!config.is_enabled(Encoding::Proto));
    }

    #[test]
    fn test_none_label_never_enabled() {
        assert!(!DecodeConfig::default().is_enabled(Encoding::None));
    }

    #[test]
    fn test_encoding_display() {
        assert_eq!(Encoding::Base64.to_string(), "base64");
        assert_eq!(serde_json::to_string(&Encoding::Proto).unwrap(), "\"proto\"");
        assert_ne!(Encoding::None, Encoding::Hex);
    }

    #[test]
    fn test_input_source_parse() {
        assert!(matches!(InputSource::parse("-"), InputSource::Stdin));
        assert!(matches!(InputSource::parse("@in.txt"), InputSource::File(_)));
        match InputSource::parse("68656c6c6f") {
            InputSource::Literal(data) => assert_eq!(data, b"68656c6c6f"),
            other => panic!("expected literal, got {:?}", other),
        }
    }
}
