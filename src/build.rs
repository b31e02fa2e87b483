use crate::error::{HuffmanError, Result};
use crate::node::{FrequencyTable, Node, Tree};
use derivative::Derivative;
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A subtree waiting in the merge queue.
///
/// Ordered by weight, then by the order it entered the queue, so equal weights
/// come out first-in first-out and the resulting tree is reproducible.
/// Weights are summed as `u128` so any number of `u64` counts fits.
#[derive(Debug, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Pending<S> {
    weight: u128,
    seq: u64,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node<S>,
}

impl<S> Tree<S> {
    /// Build an optimal prefix code tree from `(symbol, count)` pairs.
    ///
    /// Zero counts are skipped. Among equal weights, the entry seen first is
    /// merged first and becomes the left child.
    pub fn build<I>(frequencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut seq = 0;
        let mut pq: BinaryHeap<Reverse<Pending<S>>> = BinaryHeap::new();
        for (symbol, count) in frequencies {
            if count == 0 {
                continue;
            }
            pq.push(Reverse(Pending {
                weight: u128::from(count),
                seq,
                node: Node::Leaf(symbol),
            }));
            seq += 1;
        }
        let symbols = pq.len();

        loop {
            let Reverse(left) = pq.pop().ok_or(HuffmanError::EmptyAlphabet)?;
            let Reverse(right) = match pq.pop() {
                Some(right) => right,
                None => {
                    debug!(
                        "built huffman tree over {} symbols, total weight {}",
                        symbols, left.weight
                    );
                    return Ok(Tree::new(left.node));
                }
            };

            pq.push(Reverse(Pending {
                weight: left.weight + right.weight,
                seq,
                node: Node::from_children(left.node, right.node),
            }));
            seq += 1;
        }
    }

    /// Build from a [`FrequencyTable`], taking symbols in ascending order.
    pub fn from_frequencies(frequencies: &FrequencyTable<S>) -> Result<Self>
    where
        S: Clone,
    {
        Self::build(frequencies.iter().map(|(s, &count)| (s.clone(), count)))
    }
}
