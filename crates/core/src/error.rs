//! Error types for the huffpack codec.
//!
//! All operations return structured errors rather than panicking. Bad input
//! to the decoder always surfaces as [`Error::Format`]; [`Error::Internal`]
//! is reserved for tree-shape violations that indicate a bug.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Format: malformed, truncated or unrecognized artifact
/// - Internal: violated tree/codebook invariants
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - I/O: file system operations used by callers
#[derive(Debug, Error)]
pub enum Error {
    /// The artifact could not be parsed or is inconsistent
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Unreachable invariant violation inside the codec
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True if this error was caused by a malformed artifact.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// True if this error signals a bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the declared end of the bit stream
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// The buffer holds fewer bits than the caller declared
    #[error("insufficient bits: requested {requested}, available {available}")]
    InsufficientBits { requested: usize, available: usize },

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Artifact format errors.
///
/// Raised by the parser and the decoder. Validation that does not need the
/// rebuilt tree runs before any bit is decoded.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Buffer is too short to contain the fixed header fields
    #[error("artifact too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Format version this build does not understand
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    /// More distinct symbols than a byte alphabet allows
    #[error("distinct symbol count {0} exceeds 256")]
    InvalidDistinctCount(u16),

    /// A table entry declares a zero frequency
    #[error("symbol {symbol} has zero frequency")]
    ZeroFrequency { symbol: u8 },

    /// Table symbols are not strictly ascending
    #[error("table symbol {symbol} out of order (previous {previous})")]
    UnsortedTable { previous: u8, symbol: u8 },

    /// Table is empty but the header declares symbols
    #[error("empty frequency table with {symbol_count} declared symbols")]
    EmptyTable { symbol_count: u64 },

    /// Table frequencies do not add up to the declared symbol count
    #[error("symbol count mismatch: header says {declared}, table sums to {table_total}")]
    SymbolCountMismatch { declared: u64, table_total: u64 },

    /// Declared bit count disagrees with the table's code lengths
    #[error("bit count mismatch: header says {declared}, table implies {expected}")]
    BitCountMismatch { declared: u64, expected: u64 },

    /// Total artifact length disagrees with the header
    #[error("length mismatch: header implies {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// CRC-32 over the artifact does not match the trailer
    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Bits ran out before a leaf was reached
    #[error("bit stream truncated after {decoded} of {expected} symbols")]
    Truncated { decoded: u64, expected: u64 },

    /// Bits remain after the last declared symbol
    #[error("{remaining} trailing bits after the last symbol")]
    TrailingBits { remaining: usize },

    /// A single-symbol stream contains a non-zero code bit
    #[error("invalid code bit at bit position {position}")]
    InvalidCode { position: usize },

    /// Decoded output does not have the symbol counts the table declares
    #[error("symbol {symbol} decoded {actual} times, table says {declared}")]
    FrequencyMismatch { symbol: u8, declared: u64, actual: u64 },
}

/// Codec invariant violations.
///
/// These are unreachable for any tree built by this crate.
#[derive(Debug, Error)]
pub enum InternalError {
    /// No symbols with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build tree")]
    EmptyFrequencyTable,

    /// Code length exceeds what a `Code` can hold
    #[error("code length {length} exceeds maximum {max}")]
    CodeTooLong { length: usize, max: usize },

    /// The same symbol appears at two leaves
    #[error("symbol {0} reached at more than one leaf")]
    DuplicateSymbol(u8),

    /// Encoder met a symbol that has no code
    #[error("symbol {0} missing from codebook")]
    MissingCode(u8),

    /// Decoded bytes differ from the bytes that were encoded
    #[error("round trip mismatch at byte {position}")]
    RoundTripMismatch { position: usize },

    /// Arithmetic overflow while sizing the output
    #[error("size overflow while computing {0}")]
    Overflow(&'static str),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err: Error = FormatError::UnsupportedVersion(9).into();
        assert!(err.is_format());
        assert!(!err.is_internal());

        let err: Error = InternalError::EmptyFrequencyTable.into();
        assert!(err.is_internal());
        assert!(!err.is_format());
    }

    #[test]
    fn test_messages() {
        let err: Error = FormatError::ChecksumMismatch {
            expected: 0xdeadbeef,
            actual: 1,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "format error: checksum mismatch: expected 0xdeadbeef, got 0x00000001"
        );

        let err: Error = InternalError::RoundTripMismatch { position: 3 }.into();
        assert_eq!(err.to_string(), "internal error: round trip mismatch at byte 3");

        let err: Error = BitIoError::UnexpectedEof.into();
        assert_eq!(err.to_string(), "bit I/O error: unexpected end of bit stream");
    }
}
