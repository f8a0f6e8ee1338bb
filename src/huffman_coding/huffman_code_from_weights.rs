//! Builds Huffman code lengths from symbol weights.
//!
//! Nodes live in an arena and the merge order comes from a min-heap keyed on
//! (weight, tie-break key, node id). The tie-break key of a leaf is its symbol and the key of
//! a merged node is the smallest symbol underneath it. Live nodes never share a key, so the
//! merge order (and therefore every code length) is fully determined by the weights.
//!
//! Depths are read off the finished tree in a single walk. Nothing is recorded while merging.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use log::{debug, trace};

use crate::error::HuffError;
use crate::tools::freq_count::FreqTable;

/// Symbol -> code length in bits.
pub type CodeLengths = BTreeMap<u8, u8>;

#[derive(Debug, Clone, Copy)]
enum NodeData {
    Kids(usize, usize),
    Leaf(u8),
}

#[derive(Debug)]
struct Node {
    weight: u64,
    node_data: NodeData,
}

/// Build a Huffman tree over `freqs` and return how deep each symbol sits in it.
/// A lone symbol still gets a one bit code.
pub fn code_len_from_weights(freqs: &FreqTable) -> Result<CodeLengths, HuffError> {
    if freqs.is_empty() {
        return Err(HuffError::EmptyInput);
    }

    let mut tree: Vec<Node> = Vec::with_capacity(freqs.len() * 2 - 1);
    let mut heap = BinaryHeap::with_capacity(freqs.len());
    for (&sym, &weight) in freqs {
        heap.push(Reverse((weight as u64, sym, tree.len())));
        tree.push(Node {
            weight: weight as u64,
            node_data: NodeData::Leaf(sym),
        });
    }

    // Pare it down to one root. The first node popped becomes the 0 branch.
    let root = loop {
        let Reverse((w0, key0, first)) = match heap.pop() {
            Some(node) => node,
            None => return Err(HuffError::EmptyInput),
        };
        let Some(Reverse((w1, key1, second))) = heap.pop() else {
            break first;
        };
        let weight = w0 + w1;
        let key = key0.min(key1);
        trace!(
            "merge #{} (w {}) + #{} (w {}) -> #{} (w {}, key {})",
            first,
            w0,
            second,
            w1,
            tree.len(),
            weight,
            key
        );
        heap.push(Reverse((weight, key, tree.len())));
        tree.push(Node {
            weight,
            node_data: NodeData::Kids(first, second),
        });
    };

    let mut lengths = CodeLengths::new();
    if let NodeData::Leaf(sym) = tree[root].node_data {
        lengths.insert(sym, 1);
    } else {
        return_leaves(&tree, root, &mut lengths);
    }
    debug!(
        "Built tree of {} nodes (total weight {}) for {} symbols.",
        tree.len(),
        tree[root].weight,
        lengths.len()
    );
    Ok(lengths)
}

/// Walk the tree and record how far (deep) from the root each leaf is.
/// Depth is the same as the code length.
fn return_leaves(tree: &[Node], root: usize, leaves: &mut CodeLengths) {
    let mut stack = vec![(root, 0_u8)];
    while let Some((idx, depth)) = stack.pop() {
        match tree[idx].node_data {
            NodeData::Kids(left, right) => {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
            NodeData::Leaf(sym) => {
                leaves.insert(sym, depth);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{code_len_from_weights, CodeLengths};
    use crate::error::HuffError;
    use crate::tools::freq_count::{freqs, FreqTable};

    fn table(weights: &[(u8, u32)]) -> FreqTable {
        weights.iter().copied().collect()
    }

    #[test]
    fn empty_test() {
        assert!(matches!(
            code_len_from_weights(&FreqTable::default()),
            Err(HuffError::EmptyInput)
        ));
    }

    #[test]
    fn single_symbol_gets_one_bit_test() {
        let lengths = code_len_from_weights(&freqs(b"aaaa")).unwrap();
        assert_eq!(lengths, CodeLengths::from([(b'a', 1)]));
    }

    #[test]
    fn two_symbols_test() {
        let lengths = code_len_from_weights(&freqs(b"aab")).unwrap();
        assert_eq!(lengths, CodeLengths::from([(b'a', 1), (b'b', 1)]));
    }

    #[test]
    fn hello_world_test() {
        let lengths = code_len_from_weights(&freqs(b"hello world.")).unwrap();
        assert_eq!(lengths[&b'l'], 2);
        assert_eq!(lengths[&b'o'], 2);
        assert_eq!(lengths[&b'w'], 3);
        for sym in b" .dehr" {
            assert_eq!(lengths[sym], 4, "symbol {:?}", *sym as char);
        }
    }

    #[test]
    fn fibonacci_weights_test() {
        let lengths = code_len_from_weights(&table(&[
            (b'a', 1),
            (b'b', 1),
            (b'c', 2),
            (b'd', 3),
            (b'e', 5),
            (b'f', 8),
        ]))
        .unwrap();
        assert_eq!(
            lengths,
            CodeLengths::from([
                (b'a', 5),
                (b'b', 5),
                (b'c', 4),
                (b'd', 3),
                (b'e', 2),
                (b'f', 1)
            ])
        );
    }

    #[test]
    fn kraft_sum_is_one_test() {
        let lengths = code_len_from_weights(&freqs(
            b"Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
        ))
        .unwrap();
        let max = *lengths.values().max().unwrap() as u32;
        let kraft: u64 = lengths.values().map(|&l| 1_u64 << (max - l as u32)).sum();
        assert_eq!(kraft, 1_u64 << max);
    }

    #[test]
    fn ties_are_deterministic_test() {
        let weights = table(&[(b'x', 4), (b'b', 4), (b'q', 4), (b'a', 4), (b'm', 4)]);
        let first = code_len_from_weights(&weights).unwrap();
        // Rebuild the map from a reversed list so iteration order has no say in the result.
        let mut pairs: Vec<(u8, u32)> = weights.iter().map(|(&s, &w)| (s, w)).collect();
        pairs.reverse();
        let rebuilt: FreqTable = pairs.into_iter().collect();
        assert_eq!(code_len_from_weights(&rebuilt).unwrap(), first);
        // a+b merge first, then m+q, then x joins a+b.
        assert_eq!(
            first,
            CodeLengths::from([(b'a', 3), (b'b', 3), (b'x', 2), (b'm', 2), (b'q', 2)])
        );
    }
}
