/// Implementation of `tydec read`.
///
/// Loads the file into memory, seeks to `--at`, and decodes each field
/// spec in turn. Text output is one line per field:
///
/// ```text
///        0  u32@be        305419896
///        4  str:8         "header"
///       12  time          2021-01-01T00:00:00+00:00
///       16  bits:1        10110000
/// ```
use std::fs;

use anyhow::{Context, Result, bail};
use tydec_decoder::{DecoderConfig, EndianPolicy, MemoryStream, SignedByteOrder, TypedDecoder};

use crate::ReadArgs;
use crate::field::{FieldSpec, decode_fields};

/// Run the `tydec read` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, an option or field spec
/// is malformed, or any field fails to decode.
pub fn run(args: &ReadArgs) -> Result<()> {
    let config = DecoderConfig {
        endianness: args.endian.parse::<EndianPolicy>()?,
        signed_order: parse_signed(&args.signed)?,
        max_string_len: args.max_string,
    };

    let specs = args
        .fields
        .iter()
        .map(|raw| raw.parse::<FieldSpec>())
        .collect::<Result<Vec<_>>>()?;

    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    tracing::debug!(file = %args.file.display(), len = bytes.len(), "loaded input");

    let mut stream = MemoryStream::from(bytes);
    let mut decoder = TypedDecoder::from_config(&mut stream, config);
    decoder.seek(args.at)?;

    let records = decode_fields(&mut decoder, &specs)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{:>8}  {:<12}  {}", record.offset, record.field, record.value);
        }
    }

    Ok(())
}

fn parse_signed(raw: &str) -> Result<SignedByteOrder> {
    match raw {
        "legacy" => Ok(SignedByteOrder::Legacy),
        "resolved" => Ok(SignedByteOrder::Resolved),
        other => bail!("unknown --signed rule {other:?} (expected legacy or resolved)"),
    }
}
