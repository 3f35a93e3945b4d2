use thiserror::Error;

/// Reasons a phrase is rejected as a mnemonic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    #[error("expected {expected} words, got {actual}")]
    WrongWordCount { expected: usize, actual: usize },

    #[error("word not in list: {0}")]
    UnknownWord(String),

    #[error("words do not decode to a key")]
    Undecodable,

    #[error("checksum word does not match")]
    ChecksumMismatch,
}
