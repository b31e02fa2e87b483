//! Static Huffman coding over a closed symbol alphabet.
//!
//! Build a [`Tree`] from symbol counts, persist it as a [`CodeTable`] of
//! `(symbol, code)` pairs, rebuild the tree from such a table, and decode a
//! bit stream back into symbols.
//!
//! ```
//! use bitvec::prelude::*;
//! use huffcode::{count_symbols, CodeTable, Tree};
//!
//! let text = "abracadabra";
//! let tree = Tree::from_frequencies(&count_symbols(text.bytes()))?;
//!
//! let saved = tree.code_table().to_string();
//! let table: CodeTable<u8> = saved.parse()?;
//! let bits = table.encoder().encode(text.bytes())?;
//! let rebuilt = table.into_tree()?;
//!
//! let decoded = rebuilt
//!     .decode(bits.iter().by_vals())
//!     .collect::<Result<Vec<u8>, _>>()?;
//! assert_eq!(decoded, text.as_bytes());
//! # Ok::<(), huffcode::HuffmanError>(())
//! ```

mod build;
mod code;
mod decode;
mod encode;
mod error;
mod node;

pub use code::{Code, CodeTable, PartialTree, MAX_CODE_LEN};
pub use decode::{BitSource, Decoder};
pub use encode::Encoder;
pub use error::{HuffmanError, MalformedCode, Result};
pub use node::{count_symbols, FrequencyTable, Node, Tree};
