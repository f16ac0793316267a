//! Huffman tree construction.
//!
//! Nodes live in a flat arena and refer to their children by index. The
//! priority queue orders nodes by `(frequency, arena index)`; leaves enter the
//! arena in ascending symbol order and internal nodes in creation order, so
//! the shape of the tree depends on nothing but the frequency table.

use crate::codeword::{Codeword, CodewordMap};
use crate::frequency::FrequencyTable;
use crate::MAX_CODE_LENGTH;
use oxicomp_core::error::{OxiCompError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// What a tree node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A symbol.
    Leaf(u8),
    /// Two subtrees; `left` is reached with a 0 bit, `right` with a 1 bit.
    Internal {
        /// Arena index of the 0-branch.
        left: usize,
        /// Arena index of the 1-branch.
        right: usize,
    },
}

/// A tree node with its subtree frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Sum of the leaf frequencies below this node.
    pub freq: u64,
    /// Leaf or internal.
    pub kind: NodeKind,
}

/// Arena-allocated Huffman tree.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// An empty table gives an empty tree; a single symbol gives a tree
    /// whose root is that leaf.
    pub fn build(freqs: &FrequencyTable) -> Self {
        let mut nodes: Vec<Node> = freqs
            .iter()
            .map(|(symbol, freq)| Node {
                freq,
                kind: NodeKind::Leaf(symbol),
            })
            .collect();

        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| Reverse((node.freq, index)))
            .collect();

        let root = loop {
            let Some(Reverse((left_freq, left))) = heap.pop() else {
                break None;
            };
            let Some(Reverse((right_freq, right))) = heap.pop() else {
                break Some(left);
            };

            let freq = left_freq + right_freq;
            let index = nodes.len();
            nodes.push(Node {
                freq,
                kind: NodeKind::Internal { left, right },
            });
            heap.push(Reverse((freq, index)));
        };

        Self { nodes, root }
    }

    /// Arena index of the root, if any.
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// Node at arena `index`.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Derive each symbol's codeword from its root-to-leaf path.
    ///
    /// A tree that is a single leaf assigns the one-bit codeword `0`.
    pub fn codewords(&self) -> Result<CodewordMap> {
        let mut map = CodewordMap::new();
        let Some(root) = self.root else {
            return Ok(map);
        };

        if let NodeKind::Leaf(symbol) = self.nodes[root].kind {
            map.insert(symbol, Codeword::new(0, 1));
            return Ok(map);
        }

        let mut stack = vec![(root, 0u64, 0u8)];
        while let Some((index, bits, depth)) = stack.pop() {
            match self.nodes[index].kind {
                NodeKind::Leaf(symbol) => {
                    map.insert(symbol, Codeword::new(bits, depth));
                }
                NodeKind::Internal { left, right } => {
                    if depth >= MAX_CODE_LENGTH {
                        return Err(OxiCompError::code_length_overflow(
                            depth as usize + 1,
                            MAX_CODE_LENGTH as usize,
                        ));
                    }
                    let bits = bits << 1;
                    stack.push((right, bits | 1, depth + 1));
                    stack.push((left, bits, depth + 1));
                }
            }
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        let tree = HuffmanTree::build(&FrequencyTable::new());
        assert!(tree.is_empty());
        assert!(tree.codewords().unwrap().is_empty());
    }

    #[test]
    fn test_single_leaf() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"AAAA"));
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).unwrap().kind, NodeKind::Leaf(b'A'));

        let map = tree.codewords().unwrap();
        assert_eq!(map.get(b'A'), Some(Codeword::new(0, 1)));
    }

    #[test]
    fn test_root_frequency_is_total() {
        let freqs = FrequencyTable::from_bytes(b"abracadabra");
        let tree = HuffmanTree::build(&freqs);
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.freq, freqs.total());
        // n leaves and n - 1 internal nodes
        assert_eq!(tree.nodes().len(), 2 * freqs.distinct() - 1);
    }

    #[test]
    fn test_tie_breaking_is_by_arena_index() {
        // All equal: a+b merge first, then c+d, then the two pairs.
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"abcd"));
        assert_eq!(
            tree.node(4).unwrap().kind,
            NodeKind::Internal { left: 0, right: 1 }
        );
        assert_eq!(
            tree.node(5).unwrap().kind,
            NodeKind::Internal { left: 2, right: 3 }
        );
        assert_eq!(
            tree.node(6).unwrap().kind,
            NodeKind::Internal { left: 4, right: 5 }
        );

        let map = tree.codewords().unwrap();
        assert_eq!(map.get(b'a').unwrap().to_string(), "00");
        assert_eq!(map.get(b'd').unwrap().to_string(), "11");
    }

    #[test]
    fn test_skewed_lengths() {
        // Frequencies 1, 1, 2, 4: lengths 3, 3, 2, 1.
        let freqs = FrequencyTable::from_bytes(b"abccdddd");
        let map = HuffmanTree::build(&freqs).codewords().unwrap();
        assert_eq!(map.get(b'a').unwrap().length(), 3);
        assert_eq!(map.get(b'b').unwrap().length(), 3);
        assert_eq!(map.get(b'c').unwrap().length(), 2);
        assert_eq!(map.get(b'd').unwrap().length(), 1);
        assert!(map.is_prefix_free());
    }

    #[test]
    fn test_build_is_deterministic() {
        let freqs = FrequencyTable::from_bytes(b"mississippi river banks");
        let a = HuffmanTree::build(&freqs).codewords().unwrap();
        let b = HuffmanTree::build(&freqs).codewords().unwrap();
        assert_eq!(a, b);
    }
}
