use crate::error::{HuffmanError, MalformedCode, Result};
use crate::node::{FrequencyTable, Node, Tree};
use bitvec::prelude::*;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path from the root to a leaf: `false`/`0` is left, `true`/`1` is right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PackedCode", into = "PackedCode")]
pub struct Code(BitVec);

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bits(bits: &BitSlice) -> Self {
        Self(bits.to_bitvec())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub fn as_bitslice(&self) -> &BitSlice {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().by_vals()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(self.0.as_bitslice())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = MalformedCode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut code = Code::new();
        for c in s.chars() {
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                other => return Err(MalformedCode::InvalidBit(other)),
            }
        }
        Ok(code)
    }
}

// serialize a BitVec as a pair of bit length and backing words
#[derive(Serialize, Deserialize)]
struct PackedCode {
    len: usize,
    words: Box<[usize]>,
}

impl From<Code> for PackedCode {
    fn from(code: Code) -> Self {
        let len = code.0.len();
        Self {
            len,
            words: code.0.into_boxed_bitslice().into_boxed_slice(),
        }
    }
}

impl From<PackedCode> for Code {
    fn from(packed: PackedCode) -> Self {
        let mut bv = BitBox::from_boxed_slice(packed.words).into_bitvec();
        bv.resize(packed.len, false);
        Code(bv)
    }
}

/// The persisted description of a tree: one `(symbol, code)` pair per leaf,
/// in depth-first, left-before-right order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable<S> {
    entries: Vec<(S, Code)>,
}

impl<S> CodeTable<S> {
    pub fn entries(&self) -> &[(S, Code)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &Code)> + '_ {
        self.entries.iter().map(|(s, c)| (s, c))
    }

    /// Rebuild the tree these codes describe.
    pub fn into_tree(self) -> Result<Tree<S>> {
        let mut partial = PartialTree::new();
        for (entry, (symbol, code)) in self.entries.into_iter().enumerate() {
            partial
                .insert(symbol, &code)
                .map_err(|reason| HuffmanError::MalformedCode { entry, reason })?;
        }
        partial.finish()
    }

    /// Total encoded size in bits of a message with these symbol counts.
    /// Symbols absent from the table contribute nothing.
    pub fn encoded_len(&self, frequencies: &FrequencyTable<S>) -> u64
    where
        S: Ord,
    {
        self.iter()
            .map(|(s, code)| frequencies.get(s).copied().unwrap_or(0) * code.len() as u64)
            .sum()
    }
}

impl<S> IntoIterator for CodeTable<S> {
    type Item = (S, Code);
    type IntoIter = std::vec::IntoIter<(S, Code)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<S> FromIterator<(S, Code)> for CodeTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, Code)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Text form: a symbol line then a code line, per leaf, until end of input.
impl<S: fmt::Display> fmt::Display for CodeTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in &self.entries {
            writeln!(f, "{}", symbol)?;
            writeln!(f, "{}", code)?;
        }
        Ok(())
    }
}

impl<S: FromStr> FromStr for CodeTable<S> {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines();
        let mut entries = Vec::new();
        while let Some(symbol_line) = lines.next() {
            let entry = entries.len();
            let malformed = |reason| HuffmanError::MalformedCode { entry, reason };

            let symbol = symbol_line
                .trim()
                .parse::<S>()
                .map_err(|_| malformed(MalformedCode::InvalidSymbol(symbol_line.to_string())))?;
            let code = lines
                .next()
                .ok_or_else(|| malformed(MalformedCode::MissingCode))?
                .parse::<Code>()
                .map_err(malformed)?;

            entries.push((symbol, code));
        }

        Ok(Self { entries })
    }
}

impl<S: Clone> Tree<S> {
    /// Walk the tree and list every leaf with its code.
    pub fn code_table(&self) -> CodeTable<S> {
        let mut entries = Vec::new();
        let mut stack = vec![(self.root(), Code::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf(symbol) => entries.push((symbol.clone(), path)),
                Node::Internal { left, right } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);

                    stack.push((right, right_path));
                    stack.push((left, left_path));
                }
            }
        }

        CodeTable { entries }
    }
}

impl<S> Tree<S> {
    pub fn from_code_table(table: CodeTable<S>) -> Result<Self> {
        table.into_tree()
    }
}

/// Longest code accepted when rebuilding a tree from a table.
///
/// A finished [`Tree`] is as deep as its longest code. Huffman codes built
/// from `u64` counts stay far below this.
pub const MAX_CODE_LEN: usize = 4096;

/// A position in a tree that is still being filled in from codes. Branches
/// hold indices into the owning [`PartialTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<S> {
    Vacant,
    Leaf(S),
    Branch([usize; 2]),
}

/// A tree under construction from `(symbol, code)` pairs.
///
/// Codes are checked as they arrive: a code that runs through an existing
/// leaf, ends on an existing branch, repeats an earlier code, or is longer
/// than [`MAX_CODE_LEN`] is rejected and leaves the tree unchanged.
#[derive(Debug, Clone)]
pub struct PartialTree<S> {
    // slots[0] is the root
    slots: Vec<Slot<S>>,
}

impl<S> Default for PartialTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PartialTree<S> {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::Vacant],
        }
    }

    pub fn insert(&mut self, symbol: S, code: &Code) -> std::result::Result<(), MalformedCode> {
        trace!("inserting code {}", code);
        self.check(code)?;

        let mut at = 0;
        for bit in code.iter() {
            if let Slot::Vacant = self.slots[at] {
                let next = self.slots.len();
                self.slots.push(Slot::Vacant);
                self.slots.push(Slot::Vacant);
                self.slots[at] = Slot::Branch([next, next + 1]);
            }
            at = match &self.slots[at] {
                Slot::Branch(children) => children[usize::from(bit)],
                _ => return Err(MalformedCode::PrefixConflict(code.to_string())),
            };
        }
        self.slots[at] = Slot::Leaf(symbol);
        Ok(())
    }

    // the code's path must avoid leaves and end on a vacant slot
    fn check(&self, code: &Code) -> std::result::Result<(), MalformedCode> {
        if code.len() > MAX_CODE_LEN {
            return Err(MalformedCode::CodeTooLong(code.len()));
        }

        let mut at = 0;
        for bit in code.iter() {
            at = match &self.slots[at] {
                Slot::Vacant => return Ok(()),
                Slot::Leaf(_) => return Err(MalformedCode::PrefixConflict(code.to_string())),
                Slot::Branch(children) => children[usize::from(bit)],
            };
        }
        match &self.slots[at] {
            Slot::Vacant => Ok(()),
            Slot::Leaf(_) => Err(MalformedCode::DuplicateCode(code.to_string())),
            Slot::Branch(_) => Err(MalformedCode::PrefixConflict(code.to_string())),
        }
    }

    /// Convert into a finished tree. Fails if nothing was inserted or any
    /// branch is missing a child.
    pub fn finish(self) -> Result<Tree<S>> {
        enum Frame {
            Visit(usize, Code),
            Join,
        }

        let mut slots = self.slots;
        let mut built: Vec<Node<S>> = Vec::new();
        let mut stack = vec![Frame::Visit(0, Code::new())];
        while let Some(frame) = stack.pop() {
            match frame {
                // every index is visited once, so the slot can be taken
                Frame::Visit(at, path) => match std::mem::replace(&mut slots[at], Slot::Vacant) {
                    Slot::Vacant if path.is_empty() => {
                        return Err(HuffmanError::InvalidTree(
                            "code table has no entries".to_string(),
                        ));
                    }
                    Slot::Vacant => {
                        return Err(HuffmanError::InvalidTree(format!(
                            "no symbol assigned at path {:?}",
                            path.to_string()
                        )));
                    }
                    Slot::Leaf(symbol) => built.push(Node::Leaf(symbol)),
                    Slot::Branch([left, right]) => {
                        let mut right_path = path.clone();
                        right_path.push(true);
                        let mut left_path = path;
                        left_path.push(false);

                        stack.push(Frame::Join);
                        stack.push(Frame::Visit(right, right_path));
                        stack.push(Frame::Visit(left, left_path));
                    }
                },
                Frame::Join => {
                    let (right, left) = match (built.pop(), built.pop()) {
                        (Some(right), Some(left)) => (right, left),
                        _ => return Err(HuffmanError::InvalidTree("unbalanced join".to_string())),
                    };
                    built.push(Node::from_children(left, right));
                }
            }
        }

        let root = built
            .pop()
            .ok_or_else(|| HuffmanError::InvalidTree("code table has no entries".to_string()))?;
        debug!("rebuilt huffman tree from code table");
        Ok(Tree::new(root))
    }
}
