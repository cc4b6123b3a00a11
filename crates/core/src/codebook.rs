//! Symbol-to-code mapping derived from a Huffman tree.

use crate::error::{InternalError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, TreeNode};
use std::fmt;

/// Longest code a [`Code`] can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A Huffman code: `len` bits stored right-aligned in `bits`.
///
/// The first bit to emit is bit `len - 1` of `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Create a code from its right-aligned bits.
    ///
    /// `len` is clamped to 64; bits above `len` are discarded.
    pub fn new(bits: u64, len: usize) -> Self {
        let len = len.min(MAX_CODE_LEN);
        let mask = if len == MAX_CODE_LEN { u64::MAX } else { (1u64 << len) - 1 };
        Self {
            bits: bits & mask,
            len: len as u8,
        }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && other.bits.checked_shr((other.len - self.len) as u32).unwrap_or(0) == self.bits
    }
}

/// Renders the code as a string of `0` and `1` characters.
impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len()).rev() {
            f.write_str(if (self.bits >> i) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to its prefix-free code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    codes: [Option<Code>; 256],
    len: usize,
}

impl Codebook {
    /// Assign codes by walking the tree: `0` going left, `1` going right.
    ///
    /// A single-leaf tree gets the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codebook = Self {
            codes: [None; 256],
            len: 0,
        };

        match tree.root() {
            TreeNode::Leaf { symbol, .. } => codebook.bind(*symbol, Code::new(0, 1))?,
            root => codebook.assign(root, 0, 0)?,
        }

        Ok(codebook)
    }

    /// Build the tree for `table` and derive its codebook.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        Self::from_tree(&HuffmanTree::build(table)?)
    }

    fn assign(&mut self, node: &TreeNode, prefix: u64, depth: usize) -> Result<()> {
        match node {
            TreeNode::Leaf { symbol, .. } => self.bind(*symbol, Code::new(prefix, depth)),
            TreeNode::Internal { left, right, .. } => {
                if depth == MAX_CODE_LEN {
                    return Err(InternalError::CodeTooLong {
                        length: depth + 1,
                        max: MAX_CODE_LEN,
                    }
                    .into());
                }
                self.assign(left, prefix << 1, depth + 1)?;
                self.assign(right, (prefix << 1) | 1, depth + 1)
            }
        }
    }

    fn bind(&mut self, symbol: u8, code: Code) -> Result<()> {
        let slot = &mut self.codes[symbol as usize];
        if slot.is_some() {
            return Err(InternalError::DuplicateSymbol(symbol).into());
        }
        *slot = Some(code);
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|code| (symbol as u8, code)))
    }

    /// Length of the longest code, 0 for an empty codebook.
    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Number of bits needed to encode data with the given frequencies.
    ///
    /// Returns `None` on overflow or if a symbol of the table has no code.
    pub fn encoded_bit_len(&self, table: &FrequencyTable) -> Option<u64> {
        table.iter().try_fold(0u64, |acc, (symbol, count)| {
            let code = self.get(symbol)?;
            acc.checked_add(count.checked_mul(code.len() as u64)?)
        })
    }

    /// Concatenate the codes of `data` as a `0`/`1` string.
    ///
    /// Debugging aid only; symbols without a code are skipped.
    pub fn to_bit_string(&self, data: &[u8]) -> String {
        data.iter()
            .filter_map(|&symbol| self.get(symbol))
            .map(|code| code.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codebook_for(data: &[u8]) -> Codebook {
        Codebook::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap()
    }

    #[test]
    fn test_scenario_codes() {
        let codebook = codebook_for(&[1, 1, 1, 2, 2, 3]);

        assert_eq!(codebook.len(), 3);
        assert_eq!(codebook.get(1).unwrap().to_string(), "0");
        assert_eq!(codebook.get(3).unwrap().to_string(), "10");
        assert_eq!(codebook.get(2).unwrap().to_string(), "11");
        assert_eq!(codebook.max_code_len(), 2);
        assert_eq!(codebook.to_bit_string(&[1, 1, 1, 2, 2, 3]), "000111110");
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let codebook = codebook_for(&[7, 7, 7, 7]);
        assert_eq!(codebook.len(), 1);
        assert_eq!(codebook.get(7), Some(Code::new(0, 1)));

        let table = FrequencyTable::from_bytes(&[7, 7, 7, 7]);
        assert_eq!(codebook.encoded_bit_len(&table), Some(4));
    }

    #[test]
    fn test_prefix_free() {
        let data: Vec<u8> = (0..200u32).map(|i| (i * i % 97) as u8).collect();
        let codebook = codebook_for(&data);
        let codes: Vec<Code> = codebook.iter().map(|(_, c)| c).collect();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let mut data = vec![0u8; 100];
        data.extend_from_slice(&[1; 10]);
        data.extend_from_slice(&[2; 5]);
        data.extend_from_slice(&[3; 1]);
        let codebook = codebook_for(&data);

        let len = |s| codebook.get(s).unwrap().len();
        assert!(len(0) <= len(1));
        assert!(len(1) <= len(2));
        assert!(len(2) <= len(3));
    }

    #[test]
    fn test_code_display_and_prefix() {
        let a = Code::new(0b10, 2);
        let b = Code::new(0b101, 3);
        let c = Code::new(0b11, 2);

        assert_eq!(a.to_string(), "10");
        assert_eq!(Code::new(0b0011, 4).to_string(), "0011");
        assert!(a.is_prefix_of(&b));
        assert!(!c.is_prefix_of(&b));
        assert!(!b.is_prefix_of(&a));
    }

    #[test]
    fn test_code_masks_high_bits() {
        let code = Code::new(0xFF, 3);
        assert_eq!(code.bits(), 0b111);
        assert_eq!(Code::new(u64::MAX, 64).bits(), u64::MAX);
    }

    #[test]
    fn test_encoded_bit_len() {
        let table = FrequencyTable::from_bytes(&[1, 1, 1, 2, 2, 3]);
        let codebook = Codebook::from_frequencies(&table).unwrap();
        assert_eq!(codebook.encoded_bit_len(&table), Some(3 + 2 * 2 + 2));

        let other = FrequencyTable::from_bytes(&[9]);
        assert_eq!(codebook.encoded_bit_len(&other), None);
    }
}
