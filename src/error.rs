use thiserror::Error;

/// Why a persisted code table (or a single inserted code) was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedCode {
    #[error("code contains {0:?}, expected only '0' or '1'")]
    InvalidBit(char),

    #[error("symbol {0:?} could not be parsed")]
    InvalidSymbol(String),

    #[error("symbol line has no matching code line")]
    MissingCode,

    #[error("code {0} is a prefix of, or is prefixed by, an earlier code")]
    PrefixConflict(String),

    #[error("code {0} is assigned to more than one symbol")]
    DuplicateCode(String),

    #[error("code is {0} bits long, over the {} bit limit", crate::MAX_CODE_LEN)]
    CodeTooLong(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    #[error("cannot build a code: no symbol has a positive frequency")]
    EmptyAlphabet,

    #[error("invalid tree: {0}")]
    InvalidTree(String),

    #[error("malformed code table entry {entry}: {reason}")]
    MalformedCode {
        entry: usize,
        #[source]
        reason: MalformedCode,
    },

    #[error("bit stream ended mid-code after {consumed} bits")]
    TruncatedStream { consumed: usize },

    #[error("symbol {0} has no code in this table")]
    UnknownSymbol(String),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
