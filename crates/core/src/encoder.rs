//! Byte sequence to artifact.

use crate::artifact::CompressedArtifact;
use crate::bitio::{BitWriter, PackedBits};
use crate::codebook::Codebook;
use crate::error::{InternalError, Result};
use crate::frequency::FrequencyTable;
use crate::metrics::CodecStats;
use std::time::Instant;

/// Compress `data` into a self-describing artifact.
///
/// Pure function of its input: the same bytes always produce the same
/// artifact. Empty input produces a header-only artifact.
///
/// # Errors
/// Only `Error::Internal`, which signals a bug rather than bad input.
pub fn encode(data: &[u8]) -> Result<CompressedArtifact> {
    encode_with_stats(data).map(|(artifact, _)| artifact)
}

/// Like [`encode`], also reporting sizes and timing.
pub fn encode_with_stats(data: &[u8]) -> Result<(CompressedArtifact, CodecStats)> {
    let start = Instant::now();
    let table = FrequencyTable::from_bytes(data);
    let codebook = if table.is_empty() {
        None
    } else {
        Some(Codebook::from_frequencies(&table)?)
    };
    let packed = match &codebook {
        Some(codebook) => pack(data, &table, codebook)?,
        None => PackedBits::default(),
    };
    let artifact = CompressedArtifact::assemble(&table, data.len() as u64, &packed);

    let stats = CodecStats {
        input_bytes: data.len() as u64,
        artifact_bytes: artifact.len() as u64,
        payload_bits: packed.bit_len as u64,
        distinct_symbols: table.len(),
        max_code_len: codebook.as_ref().map_or(0, Codebook::max_code_len),
        entropy_bits: table.entropy(),
        encode_time: Some(start.elapsed()),
        ..CodecStats::default()
    };

    Ok((artifact, stats))
}

/// Write the code of every symbol of `data`.
fn pack(data: &[u8], table: &FrequencyTable, codebook: &Codebook) -> Result<PackedBits> {
    let bit_len = codebook
        .encoded_bit_len(table)
        .ok_or(InternalError::Overflow("payload bit length"))?;
    let capacity = usize::try_from(bit_len.div_ceil(8))
        .map_err(|_| InternalError::Overflow("payload byte length"))?;

    let mut writer = BitWriter::with_capacity(capacity);
    for &symbol in data {
        let code = codebook.get(symbol).ok_or(InternalError::MissingCode(symbol))?;
        writer.write_code(code)?;
    }
    Ok(writer.finish())
}
