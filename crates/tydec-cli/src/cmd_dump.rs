/// Implementation of `tydec dump`.
///
/// Slices the requested range out of the file and prints it 16 bytes per
/// line, offsets relative to the start of the file:
///
/// ```text
/// 00000010  54 59 44 43 00 02 00 00  67 61 75 67 65 2d 37 00  |TYDC....gauge-7.|
/// ```
use std::fs;

use anyhow::{Context, Result};
use tydec_decoder::{ByteStream, MemoryStream, TypedDecoder};

use crate::DumpArgs;

const BYTES_PER_LINE: usize = 16;

/// Run the `tydec dump` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the range extends past
/// the end of the file.
pub fn run(args: &DumpArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    for line in dump_lines(bytes, args.at, args.len)? {
        println!("{line}");
    }

    Ok(())
}

/// Render `len` bytes starting at `at` (everything after `at` when `len`
/// is `None`) as hex dump lines.
fn dump_lines(bytes: Vec<u8>, at: u64, len: Option<usize>) -> Result<Vec<String>> {
    let mut stream = MemoryStream::from(bytes);
    let len = match len {
        Some(len) => len,
        None => {
            stream.seek(at)?;
            stream.remaining()
        }
    };

    let mut decoder = TypedDecoder::new(&mut stream);
    decoder.seek(at)?;
    let range = decoder
        .slice(len)
        .with_context(|| format!("cannot dump {len} bytes at offset {at}"))?
        .into_inner()
        .into_bytes();

    Ok((at..)
        .step_by(BYTES_PER_LINE)
        .zip(range.chunks(BYTES_PER_LINE))
        .map(|(line_start, chunk)| format_line(line_start, chunk))
        .collect())
}

fn format_line(offset: u64, chunk: &[u8]) -> String {
    let mut hex = String::new();
    for i in 0..BYTES_PER_LINE {
        if i == BYTES_PER_LINE / 2 {
            hex.push(' ');
        }
        match chunk.get(i) {
            Some(b) => hex.push_str(&format!("{b:02x} ")),
            None => hex.push_str("   "),
        }
    }

    let ascii: String = chunk
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { char::from(b) } else { '.' })
        .collect();

    format!("{offset:08x}  {hex} |{ascii}|")
}
