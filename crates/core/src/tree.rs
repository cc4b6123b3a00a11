//! Huffman tree construction.
//!
//! The tree is built by greedy minimum-weight merging over a min-heap. The
//! order in which equal weights are popped is fixed so that a frequency
//! table always yields the same tree; the decoder relies on this to rebuild
//! the encoder's tree from the serialized table alone.
//!
//! # Tie-break Rule
//!
//! Heap entries are ordered by `(weight, sequence)` ascending. Leaves get
//! sequence numbers in ascending symbol order; each merged node gets the
//! next number after every node created before it. The first node popped
//! becomes the left child.

use crate::error::{InternalError, Result};
use crate::frequency::FrequencyTable;
use std::collections::BinaryHeap;

/// A node of a Huffman tree.
///
/// Internal nodes always own exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn weight(&self) -> u64 {
        match self {
            TreeNode::Leaf { weight, .. } | TreeNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    fn merge(left: TreeNode, right: TreeNode) -> Result<TreeNode> {
        let weight = left
            .weight()
            .checked_add(right.weight())
            .ok_or(InternalError::Overflow("tree weight"))?;
        Ok(TreeNode::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// Heap entry carrying the tie-break key.
#[derive(Debug)]
struct Pending {
    weight: u64,
    sequence: usize,
    node: TreeNode,
}

// Reverse ordering turns the max-heap into a min-heap on (weight, sequence)
impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A complete Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
}

impl HuffmanTree {
    /// Build the tree for a non-empty frequency table.
    ///
    /// # Errors
    /// `InternalError::EmptyFrequencyTable` if the table has no entries.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut heap: BinaryHeap<Pending> = table
            .iter()
            .enumerate()
            .map(|(sequence, (symbol, weight))| Pending {
                weight,
                sequence,
                node: TreeNode::Leaf { symbol, weight },
            })
            .collect();

        let mut next_sequence = heap.len();

        loop {
            let first = heap.pop().ok_or(InternalError::EmptyFrequencyTable)?;
            let Some(second) = heap.pop() else {
                return Ok(Self { root: first.node });
            };

            let node = TreeNode::merge(first.node, second.node)?;
            heap.push(Pending {
                weight: node.weight(),
                sequence: next_sequence,
                node,
            });
            next_sequence += 1;
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Total weight, equal to the number of encoded symbols.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path.
    ///
    /// A single-leaf tree has depth 0 even though its code is one bit long.
    pub fn depth(&self) -> usize {
        fn depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_symbol(node: &TreeNode) -> Option<u8> {
        match node {
            TreeNode::Leaf { symbol, .. } => Some(*symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    fn children(node: &TreeNode) -> (&TreeNode, &TreeNode) {
        match node {
            TreeNode::Internal { left, right, .. } => (left, right),
            TreeNode::Leaf { .. } => panic!("expected internal node"),
        }
    }

    #[test]
    fn test_scenario_merge_order() {
        let table = FrequencyTable::from_bytes(&[1, 1, 1, 2, 2, 3]);
        let tree = HuffmanTree::build(&table).unwrap();

        assert_eq!(tree.weight(), 6);
        let (left, right) = children(tree.root());

        // Leaf 1 (weight 3) ties with the {3, 2} pair (weight 3) and wins
        // because it was created first.
        assert_eq!(leaf_symbol(left), Some(1));
        assert_eq!(right.weight(), 3);

        let (rl, rr) = children(right);
        assert_eq!(leaf_symbol(rl), Some(3));
        assert_eq!(leaf_symbol(rr), Some(2));
    }

    #[test]
    fn test_single_symbol_is_leaf() {
        let table = FrequencyTable::from_bytes(&[7, 7, 7, 7]);
        let tree = HuffmanTree::build(&table).unwrap();

        assert!(tree.root().is_leaf());
        assert_eq!(tree.weight(), 4);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_empty_table_fails() {
        let table = FrequencyTable::from_bytes(&[]);
        let result = HuffmanTree::build(&table);
        assert!(matches!(
            result,
            Err(crate::Error::Internal(InternalError::EmptyFrequencyTable))
        ));
    }

    #[test]
    fn test_equal_weights_prefer_lower_symbols() {
        let table = FrequencyTable::from_bytes(&[40, 30, 20, 10]);
        let tree = HuffmanTree::build(&table).unwrap();

        // {10, 20} merge first, then {30, 40}, then the two pairs in
        // creation order.
        let (left, right) = children(tree.root());
        let (ll, lr) = children(left);
        let (rl, rr) = children(right);
        assert_eq!(leaf_symbol(ll), Some(10));
        assert_eq!(leaf_symbol(lr), Some(20));
        assert_eq!(leaf_symbol(rl), Some(30));
        assert_eq!(leaf_symbol(rr), Some(40));
    }

    #[test]
    fn test_deterministic() {
        let data = b"the tie-break rule makes this reproducible";
        let table = FrequencyTable::from_bytes(data);
        let a = HuffmanTree::build(&table).unwrap();
        let b = HuffmanTree::build(&table).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_internal_weights_sum_children() {
        fn check(node: &TreeNode) {
            if let TreeNode::Internal { weight, left, right } = node {
                assert_eq!(*weight, left.weight() + right.weight());
                check(left);
                check(right);
            }
        }

        let data: Vec<u8> = (0..=255u8).flat_map(|b| std::iter::repeat(b).take(b as usize % 7 + 1)).collect();
        let table = FrequencyTable::from_bytes(&data);
        let tree = HuffmanTree::build(&table).unwrap();

        check(tree.root());
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.weight(), data.len() as u64);
    }

    #[test]
    fn test_fibonacci_weights_give_deep_tree() {
        let mut fib = vec![1u64, 1];
        while fib.len() < 20 {
            let next = fib[fib.len() - 1] + fib[fib.len() - 2];
            fib.push(next);
        }
        let table = FrequencyTable::from_entries(fib.iter().enumerate().map(|(i, &f)| (i as u8, f))).unwrap();
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.depth(), 19);
    }
}
