use thiserror::Error;

/// Errors produced while decoding, mutating, or re-encoding a saved game.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The caller passed a negative total size.
    #[error("invalid save size: {0}")]
    InvalidSize(i64),

    /// The declared total size cannot hold the fixed header.
    #[error("save size {0} is too small to hold the 767-byte header")]
    TooSmall(i64),

    /// The byte source or sink failed, including short reads.
    #[error("save i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Character name outside the 2-15 character bounds.
    #[error("character name must be 2 to 15 characters long, got {0}")]
    NameLength(usize),

    /// Character name with characters outside the allowed alphabet,
    /// or a misplaced separator.
    #[error("invalid character name: {0:?}")]
    NameFormat(String),

    /// Class byte outside the seven known codes.
    #[error("invalid character class byte: {0:#04x}")]
    InvalidClass(u8),

    /// Output buffer smaller than the serialized save.
    #[error("output buffer holds {got} bytes but the save needs {needed}")]
    BufferTooSmall { needed: usize, got: usize },

    /// Serialization failed while recomputing the checksum; the stored
    /// checksum field was restored to its prior value.
    #[error("checksum recompute failed: {0}")]
    Checksum(#[source] Box<SaveError>),
}
