pub mod codec;
pub mod engine;
pub mod error;
pub mod types;

pub use engine::{Decoder, DEFAULT_MAX_ROUNDS};
pub use error::{MdecodeError, Result};
pub use types::{Context, DecodeConfig, Decoded, Encoding, InputSource, Layer, OutputDest, Trace};
