//! Artifact to byte sequence.
//!
//! Decoding rebuilds the encoder's tree from the serialized frequency table
//! (tree construction is deterministic, see [`crate::tree`]) and walks the
//! packed bits from the root: `0` descends left, `1` descends right, and
//! reaching a leaf emits its symbol.
//!
//! Every check that does not need the bit walk happens first, so a corrupt
//! artifact is rejected before any output is produced.

use crate::artifact::{self, ParsedArtifact};
use crate::bitio::BitReader;
use crate::error::{BitIoError, Error, FormatError, Result};
use crate::frequency::FrequencyTable;
use crate::metrics::CodecStats;
use crate::tree::{HuffmanTree, TreeNode};
use std::time::Instant;

/// Decode an artifact back to the original bytes.
///
/// # Errors
/// `Error::Format` for any malformed, truncated or inconsistent artifact.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    let parsed = artifact::parse(bytes)?;
    decode_parsed(&parsed)
}

/// Like [`decode`], also reporting sizes and timing.
pub fn decode_with_stats(bytes: &[u8]) -> Result<(Vec<u8>, CodecStats)> {
    let start = Instant::now();
    let parsed = artifact::parse(bytes)?;
    let output = decode_parsed(&parsed)?;

    let stats = CodecStats {
        input_bytes: output.len() as u64,
        artifact_bytes: bytes.len() as u64,
        payload_bits: parsed.header.bit_count,
        distinct_symbols: parsed.header.table.len(),
        entropy_bits: parsed.header.table.entropy(),
        decode_time: Some(start.elapsed()),
        ..CodecStats::default()
    };

    Ok((output, stats))
}

fn decode_parsed(parsed: &ParsedArtifact<'_>) -> Result<Vec<u8>> {
    let header = &parsed.header;

    if header.symbol_count == 0 {
        if header.bit_count != 0 {
            return Err(FormatError::BitCountMismatch {
                declared: header.bit_count,
                expected: 0,
            }
            .into());
        }
        return Ok(Vec::new());
    }

    let tree = HuffmanTree::build(&header.table)?;
    let expected = encoded_bit_len(&tree);
    if expected != Some(header.bit_count) {
        return Err(FormatError::BitCountMismatch {
            declared: header.bit_count,
            expected: expected.unwrap_or(u64::MAX),
        }
        .into());
    }

    // parse() checked the payload holds ceil(bit_count / 8) bytes
    let mut reader = BitReader::with_bit_len(parsed.payload, header.bit_count as usize)?;
    let output = decode_symbols(&tree, &mut reader, header.symbol_count)?;

    if !reader.is_empty() {
        return Err(FormatError::TrailingBits {
            remaining: reader.bits_remaining(),
        }
        .into());
    }

    check_frequencies(&header.table, &output)?;
    Ok(output)
}

/// The output must reproduce the table it was decoded with.
fn check_frequencies(table: &FrequencyTable, output: &[u8]) -> Result<()> {
    let decoded = FrequencyTable::from_bytes(output);
    if decoded == *table {
        return Ok(());
    }

    let symbol = (0..=u8::MAX)
        .find(|&s| decoded.get(s) != table.get(s))
        .unwrap_or_default();
    Err(FormatError::FrequencyMismatch {
        symbol,
        declared: table.get(symbol).unwrap_or(0),
        actual: decoded.get(symbol).unwrap_or(0),
    }
    .into())
}

/// Decode exactly `count` symbols from `reader`.
///
/// A single-leaf tree consumes one `0` bit per symbol.
///
/// # Errors
/// - `FormatError::Truncated` if the bits run out before `count` symbols
/// - `FormatError::InvalidCode` for a `1` bit in a single-symbol stream
pub fn decode_symbols(tree: &HuffmanTree, reader: &mut BitReader<'_>, count: u64) -> Result<Vec<u8>> {
    let capacity = usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(reader.bits_remaining());
    let mut output = Vec::with_capacity(capacity);

    let mut decoded = 0u64;
    while decoded < count {
        let mut node = tree.root();
        if let TreeNode::Leaf { symbol, .. } = node {
            let position = reader.position();
            if next_bit(reader, decoded, count)? {
                return Err(FormatError::InvalidCode { position }.into());
            }
            output.push(*symbol);
            decoded += 1;
            continue;
        }

        loop {
            match node {
                TreeNode::Leaf { symbol, .. } => {
                    output.push(*symbol);
                    break;
                }
                TreeNode::Internal { left, right, .. } => {
                    node = if next_bit(reader, decoded, count)? { right } else { left };
                }
            }
        }
        decoded += 1;
    }

    Ok(output)
}

/// Read one bit; running out of bits means the stream was truncated.
fn next_bit(reader: &mut BitReader<'_>, decoded: u64, expected: u64) -> Result<bool> {
    reader.read_bit().map_err(|e| match e {
        Error::BitIo(BitIoError::UnexpectedEof) => FormatError::Truncated { decoded, expected }.into(),
        other => other,
    })
}

/// Sum of weight x code length over all leaves, `None` on overflow.
fn encoded_bit_len(tree: &HuffmanTree) -> Option<u64> {
    fn walk(node: &TreeNode, depth: u64) -> Option<u64> {
        match node {
            TreeNode::Leaf { weight, .. } => weight.checked_mul(depth),
            TreeNode::Internal { left, right, .. } => {
                walk(left, depth + 1)?.checked_add(walk(right, depth + 1)?)
            }
        }
    }

    match tree.root() {
        TreeNode::Leaf { weight, .. } => Some(*weight),
        root => walk(root, 0),
    }
}
