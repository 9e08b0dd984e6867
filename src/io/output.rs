use std::fs::File;
use std::io::{self, Write};

use data_encoding::HEXLOWER;
use is_terminal::IsTerminal;

use mdecode::error::Result;
use mdecode::types::OutputDest;

const BYTES_PER_LINE: usize = 16;
const MAX_LINES: usize = 32;

pub struct OutputConfig {
    pub dest: OutputDest,
    pub force: bool,
}

/// Writes the final buffer followed by a newline. Binary data headed for a
/// terminal is shown as a hex dump unless forced.
pub fn write_output(data: &[u8], config: &OutputConfig) -> Result<()> {
    match &config.dest {
        OutputDest::File(path) => {
            let mut file = File::create(path)?;
            file.write_all(data)?;
        }
        OutputDest::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            if stdout.is_terminal() && !config.force && std::str::from_utf8(data).is_err() {
                eprintln!(
                    "Binary output ({} bytes). Showing hex preview (use --force to output raw or --out @file):\n",
                    data.len()
                );
                for line in hex_preview(data) {
                    writeln!(handle, "{}", line)?;
                }
            } else {
                handle.write_all(data)?;
                writeln!(handle)?;
            }
        }
    }
    Ok(())
}

fn hex_preview(data: &[u8]) -> Vec<String> {
    let mut lines: Vec<String> = data
        .chunks(BYTES_PER_LINE)
        .take(MAX_LINES)
        .enumerate()
        .map(|(idx, chunk)| {
            let printable: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            format!(
                "{:08x}  {:<32}  |{}|",
                idx * BYTES_PER_LINE,
                HEXLOWER.encode(chunk),
                printable
            )
        })
        .collect();

    let shown = MAX_LINES * BYTES_PER_LINE;
    if data.len() > shown {
        lines.push(format!("... ({} more bytes)", data.len() - shown));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_preview_line() {
        let lines = hex_preview(&[0xde, 0xad, b'A']);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("00000000  dead41"));
        assert!(lines[0].ends_with("|..A|"));
    }

    #[test]
    fn test_hex_preview_truncates() {
        let data = vec![0u8; MAX_LINES * BYTES_PER_LINE + 5];
        let lines = hex_preview(&data);
        assert_eq!(lines.len(), MAX_LINES + 1);
        assert_eq!(lines.last().unwrap(), "... (5 more bytes)");
    }
}
