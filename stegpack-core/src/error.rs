//! Error types for Stegpack operations

/// Errors that can occur while building, embedding or recovering payloads
#[derive(Debug, thiserror::Error)]
pub enum StegError {
    /// Buffer does not start with the frame magic
    #[error("Frame magic not recognized")]
    NotRecognized,

    /// A length field points past the end of the buffer
    #[error("Truncated frame: expected {expected} bytes, got {actual}")]
    Truncated {
        /// The number of bytes the length fields require.
        expected: usize,
        /// The number of bytes actually available.
        actual: usize,
    },

    /// Stored file name is not valid UTF-8
    #[error("Stored file name is not valid UTF-8")]
    InvalidName,

    /// A field is too long for its 4-byte length prefix
    #[error("Field length {0} does not fit in a 32-bit length prefix")]
    FieldOverflow(usize),

    /// Frame does not fit the pixel grid
    #[error("Payload needs {needed} bytes but the grid holds {capacity}")]
    CapacityExceeded {
        /// Serialized frame length.
        needed: usize,
        /// Grid capacity in bytes.
        capacity: usize,
    },

    /// Grid dimensions or buffer are inconsistent
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Chunk list violates the container layout
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// Chunk type tag is not four ASCII letters
    #[error("Invalid chunk type: {0:?}")]
    InvalidChunkType(String),

    /// Raster backend failed to encode or decode pixels
    #[error("Raster codec error: {0}")]
    Raster(String),

    /// IO error during read/write
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Cipher refused to seal the plaintext
    #[error("Encryption failed")]
    EncryptionFailed,

    /// Wrong password or tampered ciphertext
    #[error("Decryption failed (wrong password or corrupted data)")]
    DecryptionFailed,

    /// Ciphertext is too short to hold salt, nonce and tag
    #[error("Malformed ciphertext: {0} bytes is too short")]
    MalformedCiphertext(usize),

    /// Password key derivation failed
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}
