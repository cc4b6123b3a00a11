//! Compressed artifact serialization and parsing.
//!
//! An artifact is self-describing: it carries the frequency table the
//! decoder needs to rebuild the encoder's tree, the number of encoded
//! symbols, the exact number of packed bits and a checksum.
//!
//! # Artifact Format
//!
//! ```text
//! +----------------------+
//! | Magic (4 bytes)      |  0x48 0x46 0x50 0x4B ("HFPK")
//! +----------------------+
//! | version (1)          |  u8, currently 1
//! +----------------------+
//! | symbol_count (8)     |  u64 little-endian, original input length
//! +----------------------+
//! | distinct_count (2)   |  u16 little-endian, 0..=256
//! +----------------------+
//! | table                |  distinct_count x (symbol u8, frequency u64 LE),
//! | (9 bytes per entry)  |  strictly ascending by symbol
//! +----------------------+
//! | bit_count (8)        |  u64 little-endian, exact packed bit count
//! +----------------------+
//! | payload              |  ceil(bit_count / 8) bytes, MSB-first,
//! | (variable)           |  final byte zero-padded
//! +----------------------+
//! | crc32 (4)            |  u32 little-endian over every preceding byte
//! +----------------------+
//! ```
//!
//! An empty input encodes to a 27-byte artifact with no table entries and
//! no payload.

use crate::bitio::PackedBits;
use crate::error::{FormatError, Result};
use crate::frequency::FrequencyTable;

/// Magic number for artifacts: "HFPK"
pub const MAGIC: [u8; 4] = [0x48, 0x46, 0x50, 0x4B];

/// Current format version
pub const VERSION: u8 = 1;

/// Bytes before the table: magic, version, symbol_count, distinct_count
const PREAMBLE_SIZE: usize = 15;

/// Bytes per table entry: symbol + u64 frequency
const ENTRY_SIZE: usize = 9;

/// Size of the bit_count field
const BIT_COUNT_SIZE: usize = 8;

/// Size of the trailing checksum
const CRC_SIZE: usize = 4;

/// Smallest possible artifact (empty input)
pub const MIN_SIZE: usize = PREAMBLE_SIZE + BIT_COUNT_SIZE + CRC_SIZE;

/// Decoded header fields of an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub version: u8,
    /// Number of symbols in the original input
    pub symbol_count: u64,
    /// Symbol frequencies of the original input
    pub table: FrequencyTable,
    /// Exact number of meaningful payload bits
    pub bit_count: u64,
    /// Stored CRC-32
    pub checksum: u32,
}

impl ArtifactHeader {
    /// Size of everything before the payload.
    pub fn header_len(&self) -> usize {
        PREAMBLE_SIZE + self.table.len() * ENTRY_SIZE + BIT_COUNT_SIZE
    }

    /// Size of the packed payload in bytes.
    pub fn payload_len(&self) -> usize {
        self.bit_count.div_ceil(8) as usize
    }
}

/// A parsed artifact borrowing its payload from the input buffer.
#[derive(Debug, Clone)]
pub struct ParsedArtifact<'a> {
    pub header: ArtifactHeader,
    pub payload: &'a [u8],
}

/// An encoded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedArtifact {
    bytes: Vec<u8>,
}

impl CompressedArtifact {
    /// Serialize a table, symbol count and packed payload.
    pub(crate) fn assemble(table: &FrequencyTable, symbol_count: u64, packed: &PackedBits) -> Self {
        let total_size =
            PREAMBLE_SIZE + table.len() * ENTRY_SIZE + BIT_COUNT_SIZE + packed.bytes.len() + CRC_SIZE;
        let mut bytes = Vec::with_capacity(total_size);

        bytes.extend_from_slice(&MAGIC);
        bytes.push(VERSION);
        bytes.extend_from_slice(&symbol_count.to_le_bytes());
        bytes.extend_from_slice(&(table.len() as u16).to_le_bytes());

        for (symbol, frequency) in table.iter() {
            bytes.push(symbol);
            bytes.extend_from_slice(&frequency.to_le_bytes());
        }

        bytes.extend_from_slice(&(packed.bit_len as u64).to_le_bytes());
        bytes.extend_from_slice(&packed.bytes);

        let crc = compute_crc(&bytes);
        bytes.extend_from_slice(&crc.to_le_bytes());

        Self { bytes }
    }

    /// Wrap bytes received from elsewhere after validating their structure.
    ///
    /// Only the checks of [`parse`] run; the payload is not decoded.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        parse(&bytes)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Parse and return the header.
    pub fn header(&self) -> Result<ArtifactHeader> {
        Ok(parse(&self.bytes)?.header)
    }

    /// Decode back to the original bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        crate::decoder::decode(&self.bytes)
    }
}

impl AsRef<[u8]> for CompressedArtifact {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Parse and validate an artifact without decoding its payload.
///
/// # Errors
/// - `FormatError::TooShort` / `LengthMismatch` if the buffer size is wrong
/// - `FormatError::InvalidMagic` / `UnsupportedVersion` for foreign data
/// - `FormatError::ChecksumMismatch` if the CRC does not match
/// - table errors from [`FrequencyTable::from_entries`]
/// - `FormatError::EmptyTable` / `SymbolCountMismatch` if the table and
///   symbol count disagree
pub fn parse(bytes: &[u8]) -> Result<ParsedArtifact<'_>> {
    if bytes.len() < MIN_SIZE {
        return Err(FormatError::TooShort {
            required: MIN_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let magic = read_array::<4>(bytes, 0);
    if magic != MAGIC {
        return Err(FormatError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let version = bytes[4];
    if version != VERSION {
        return Err(FormatError::UnsupportedVersion(version).into());
    }

    let symbol_count = u64::from_le_bytes(read_array(bytes, 5));
    let distinct = u16::from_le_bytes(read_array(bytes, 13));
    if distinct > 256 {
        return Err(FormatError::InvalidDistinctCount(distinct).into());
    }

    let table_end = PREAMBLE_SIZE + distinct as usize * ENTRY_SIZE;
    let header_len = table_end + BIT_COUNT_SIZE;
    if bytes.len() < header_len + CRC_SIZE {
        return Err(FormatError::TooShort {
            required: header_len + CRC_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let bit_count = u64::from_le_bytes(read_array(bytes, table_end));
    let expected_len = usize::try_from(bit_count.div_ceil(8))
        .ok()
        .and_then(|payload| payload.checked_add(header_len + CRC_SIZE));
    if expected_len != Some(bytes.len()) {
        return Err(FormatError::LengthMismatch {
            expected: expected_len.unwrap_or(usize::MAX),
            actual: bytes.len(),
        }
        .into());
    }

    let crc_offset = bytes.len() - CRC_SIZE;
    let checksum = u32::from_le_bytes(read_array(bytes, crc_offset));
    let computed = compute_crc(&bytes[..crc_offset]);
    if computed != checksum {
        return Err(FormatError::ChecksumMismatch {
            expected: checksum,
            actual: computed,
        }
        .into());
    }

    let table = FrequencyTable::from_entries(
        bytes[PREAMBLE_SIZE..table_end]
            .chunks_exact(ENTRY_SIZE)
            .map(|entry| (entry[0], u64::from_le_bytes(read_array(entry, 1)))),
    )?;

    if table.is_empty() && symbol_count > 0 {
        return Err(FormatError::EmptyTable { symbol_count }.into());
    }
    match table.total() {
        Some(total) if total == symbol_count => {}
        total => {
            return Err(FormatError::SymbolCountMismatch {
                declared: symbol_count,
                table_total: total.unwrap_or(u64::MAX),
            }
            .into())
        }
    }

    Ok(ParsedArtifact {
        header: ArtifactHeader {
            version,
            symbol_count,
            table,
            bit_count,
            checksum,
        },
        payload: &bytes[header_len..crc_offset],
    })
}

/// Copy `N` bytes starting at `offset`; callers check bounds first.
fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

/// CRC-32 over the artifact body.
pub(crate) fn compute_crc(body: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(body);
    hasher.finalize()
}
