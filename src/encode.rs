use crate::code::{Code, CodeTable};
use crate::error::{HuffmanError, Result};
use bitvec::prelude::*;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Maps symbols to their codes for producing a bit stream a [`Tree`] can
/// decode.
///
/// [`Tree`]: crate::Tree
#[derive(Debug, Clone)]
pub struct Encoder<S> {
    encode_table: HashMap<S, BitBox>,
}

impl<S> Encoder<S>
where
    S: Eq + Hash,
{
    pub fn code(&self, symbol: &S) -> Option<&BitSlice> {
        self.encode_table.get(symbol).map(|bits| bits.as_bitslice())
    }

    pub fn encode(&self, stream: impl IntoIterator<Item = S>) -> Result<BitVec>
    where
        S: Debug,
    {
        let mut out = BitVec::new();
        for s in stream {
            let bits = self
                .code(&s)
                .ok_or_else(|| HuffmanError::UnknownSymbol(format!("{:?}", s)))?;
            out.extend_from_bitslice(bits);
        }

        Ok(out)
    }
}

impl<'a, S> From<&'a CodeTable<S>> for Encoder<S>
where
    S: Clone + Eq + Hash,
{
    fn from(table: &'a CodeTable<S>) -> Self {
        Self {
            encode_table: table
                .iter()
                .map(|(s, code)| (s.clone(), BitBox::from_bitslice(code.as_bitslice())))
                .collect(),
        }
    }
}

impl<S> From<CodeTable<S>> for Encoder<S>
where
    S: Eq + Hash,
{
    fn from(table: CodeTable<S>) -> Self {
        Self {
            encode_table: table
                .into_iter()
                .map(|(s, code): (S, Code)| (s, BitBox::from_bitslice(code.as_bitslice())))
                .collect(),
        }
    }
}

impl<S> CodeTable<S>
where
    S: Clone + Eq + Hash,
{
    pub fn encoder(&self) -> Encoder<S> {
        self.into()
    }
}
