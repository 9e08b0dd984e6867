use std::fs::File;
use std::io::{self, BufRead, Read};

use mdecode::error::{MdecodeError, Result};
use mdecode::types::InputSource;

/// Reads the buffer to decode. Stdin is line-based: only the first line is
/// taken, newline included.
pub fn read_input(source: &InputSource) -> Result<Vec<u8>> {
    let buf = match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            io::stdin().lock().read_until(b'\n', &mut buf)?;
            buf
        }
        InputSource::File(path) => {
            let mut file = File::open(path)?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            buf
        }
        InputSource::Literal(data) => data.clone(),
    };

    if buf.is_empty() {
        return Err(MdecodeError::invalid_input("failed to read input"));
    }
    Ok(buf)
}
