//! Preference store errors.

/// Error returned by a [`PreferenceStore`](super::PreferenceStore).
///
/// The resolver never surfaces these; they exist so store implementations
/// can report what went wrong to the log.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store cannot be reached at all
    #[error("preference store is unavailable")]
    Unavailable,
    /// Reading or writing the backing file failed
    #[error("preference store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The backing data is not a JSON object of strings
    #[error("preference store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
