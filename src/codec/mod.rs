//! One detector per supported encoding.
//!
//! A detector answers a single question: does this buffer look like the
//! output of encoding X, and if so what was the input? Declining is the
//! normal outcome and never an error.

mod base64;
mod hex;
mod proto;
pub mod registry;
pub(crate) mod util;

pub use self::base64::Base64;
pub use self::hex::Hex;
pub use self::proto::Proto;
pub use registry::Registry;

use crate::types::Encoding;

pub trait Detector: Send + Sync {
    fn encoding(&self) -> Encoding;

    /// Returns the decoded bytes when `input` is entirely valid for this
    /// encoding, `None` otherwise. Never decodes a prefix.
    fn detect(&self, input: &[u8]) -> Option<Vec<u8>>;

    fn name(&self) -> &'static str {
        self.encoding().as_str()
    }
}
