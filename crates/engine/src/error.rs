use thiserror::Error;

/// Encoder misuse. These indicate a bug in the caller, never bad host data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A section produced a different number of items than its header declared.
    #[error("section `{section}` declared {declared} items but {written} were written")]
    SizeMismatch {
        section: String,
        declared: usize,
        written: usize,
    },
}
