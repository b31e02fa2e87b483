use crate::error::{HuffmanError, Result};
use crate::node::{Node, Tree};
use log::trace;

/// Something that hands out one bit at a time until it runs dry.
pub trait BitSource {
    /// The next bit, or `None` once the source is exhausted.
    fn next_bit(&mut self) -> Option<bool>;
}

impl<I> BitSource for I
where
    I: Iterator<Item = bool>,
{
    fn next_bit(&mut self) -> Option<bool> {
        self.next()
    }
}

/// Lazily decodes symbols from a [`BitSource`] by walking a tree.
///
/// Ends cleanly when the source is exhausted on a symbol boundary. If it runs
/// out partway down a path, yields one [`HuffmanError::TruncatedStream`] and
/// then ends.
#[derive(Debug)]
pub struct Decoder<'t, S, B> {
    tree: &'t Tree<S>,
    bits: B,
    consumed: usize,
    done: bool,
}

impl<'t, S, B> Decoder<'t, S, B>
where
    B: BitSource,
{
    pub fn new(tree: &'t Tree<S>, bits: B) -> Self {
        Self {
            tree,
            bits,
            consumed: 0,
            done: false,
        }
    }

    /// Bits read so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn into_inner(self) -> B {
        self.bits
    }

    fn walk(&mut self) -> Option<Result<&'t S>> {
        let tree: &'t Tree<S> = self.tree;
        let mut node = tree.root();
        let mut depth = 0;
        loop {
            match node {
                Node::Leaf(symbol) => return Some(Ok(symbol)),
                Node::Internal { left, right } => {
                    let bit = match self.bits.next_bit() {
                        Some(bit) => bit,
                        None if depth == 0 => return None,
                        None => {
                            return Some(Err(HuffmanError::TruncatedStream {
                                consumed: self.consumed,
                            }))
                        }
                    };
                    self.consumed += 1;
                    depth += 1;
                    node = if bit { right } else { left };
                }
            }
        }
    }
}

impl<'t, S, B> Iterator for Decoder<'t, S, B>
where
    S: Clone,
    B: BitSource,
{
    type Item = Result<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // a lone leaf spends no bits, so it is emitted exactly once
        if self.tree.root().is_leaf() {
            self.done = true;
        }

        match self.walk() {
            Some(Ok(symbol)) => Some(Ok(symbol.clone())),
            Some(Err(e)) => {
                trace!("decoder stopped: {}", e);
                self.done = true;
                Some(Err(e))
            }
            None => {
                trace!("decoder reached end of input after {} bits", self.consumed);
                self.done = true;
                None
            }
        }
    }
}

impl<S: Clone> Tree<S> {
    /// Decode symbols until the bit source is exhausted.
    pub fn decode<B: BitSource>(&self, bits: B) -> Decoder<'_, S, B> {
        Decoder::new(self, bits)
    }

    /// Decode exactly `count` symbols, for streams framed by a symbol count.
    ///
    /// A single-leaf tree yields its symbol `count` times without reading any
    /// bits. Running out of bits before `count` symbols is a truncation error.
    pub fn decode_counted<B: BitSource>(&self, bits: B, count: usize) -> Result<Vec<S>> {
        if let Node::Leaf(symbol) = self.root() {
            return Ok(vec![symbol.clone(); count]);
        }

        let mut decoder = self.decode(bits);
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            match decoder.next() {
                Some(symbol) => out.push(symbol?),
                None => {
                    return Err(HuffmanError::TruncatedStream {
                        consumed: decoder.consumed(),
                    })
                }
            }
        }

        Ok(out)
    }
}
