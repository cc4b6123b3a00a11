//! huffpack-core: lossless Huffman coding for byte streams
//!
//! This library turns an arbitrary sequence of bytes (typically grayscale
//! pixel samples) into a compact, self-describing artifact and back.
//!
//! # Architecture
//!
//! Components, leaves first:
//! - `frequency`: per-symbol occurrence counts
//! - `tree`: deterministic Huffman tree construction
//! - `codebook`: symbol-to-code mapping derived from the tree
//! - `bitio`: MSB-first bit packing and unpacking
//! - `artifact`: artifact serialization and validation
//! - `encoder` / `decoder`: the two directions of the codec
//! - `metrics`: size and timing statistics
//!
//! # Example
//! ```
//! let data = [1u8, 1, 1, 2, 2, 3];
//! let artifact = huffpack_core::encode(&data).unwrap();
//! let restored = huffpack_core::decode(artifact.as_bytes()).unwrap();
//! assert_eq!(restored, data);
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **Deterministic**: identical input gives a byte-identical artifact
//! - **Stateless**: every call owns its buffers, so calls may run
//!   concurrently on independent inputs

pub mod artifact;
pub mod bitio;
pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use artifact::{ArtifactHeader, CompressedArtifact};
pub use codebook::{Code, Codebook};
pub use decoder::{decode, decode_with_stats};
pub use encoder::{encode, encode_with_stats};
pub use error::{Error, FormatError, InternalError, Result};
pub use frequency::FrequencyTable;
pub use metrics::CodecStats;
pub use tree::{HuffmanTree, TreeNode};
