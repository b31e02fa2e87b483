use std::collections::BTreeMap;

/// Occurrence count per symbol. Ordered so that building from it is reproducible.
pub type FrequencyTable<S> = BTreeMap<S, u64>;

/// Tally every symbol of a stream into a [`FrequencyTable`].
pub fn count_symbols<S, I>(symbols: I) -> FrequencyTable<S>
where
    S: Ord,
    I: IntoIterator<Item = S>,
{
    let mut freq = FrequencyTable::new();
    for s in symbols {
        *freq.entry(s).or_default() += 1;
    }

    freq
}

/// A node of a complete prefix-code tree.
///
/// Internal nodes always own exactly two children, so every path from the
/// root ends at a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf(S),
    Internal {
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S> Node<S> {
    pub fn from_children(left: Node<S>, right: Node<S>) -> Self {
        Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Follow one branch: `false` is left (`0`), `true` is right (`1`).
    /// Leaves have no children.
    pub fn child(&self, bit: bool) -> Option<&Node<S>> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal { left, right } => Some(if bit { right } else { left }),
        }
    }
}

/// A finished Huffman tree. Read-only once built, so it can be shared between
/// any number of decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<S> {
    root: Node<S>,
}

impl<S> Tree<S> {
    pub fn new(root: Node<S>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    pub fn into_root(self) -> Node<S> {
        self.root
    }

    /// Number of leaves, i.e. distinct symbols the tree can code.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf(_) => count += 1,
                Node::Internal { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_symbols_tallies_bytes() {
        let freq = count_symbols("abracadabra".bytes());
        assert_eq!(freq.get(&b'a'), Some(&5));
        assert_eq!(freq.get(&b'b'), Some(&2));
        assert_eq!(freq.get(&b'r'), Some(&2));
        assert_eq!(freq.get(&b'c'), Some(&1));
        assert_eq!(freq.get(&b'd'), Some(&1));
        assert_eq!(freq.len(), 5);
    }

    #[test]
    fn node_from_children() {
        let n = Node::from_children(Node::Leaf('a'), Node::Leaf('b'));

        assert!(!n.is_leaf());
        assert_eq!(n.child(false), Some(&Node::Leaf('a')));
        assert_eq!(n.child(true), Some(&Node::Leaf('b')));
    }

    #[test]
    fn leaf_has_no_children() {
        let n = Node::Leaf(7u8);
        assert!(n.is_leaf());
        assert_eq!(n.child(false), None);
        assert_eq!(n.child(true), None);
    }

    #[test]
    fn tree_leaf_count() {
        let tree = Tree::new(Node::from_children(
            Node::Leaf(1),
            Node::from_children(Node::Leaf(2), Node::Leaf(3)),
        ));
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(Tree::new(Node::Leaf(0)).leaf_count(), 1);
    }
}
