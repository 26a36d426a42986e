/// Atomic add-and-fetch on a numeric attribute of a keyed record.
///
/// Implementations create the record on first touch and return the value
/// after the update.
pub trait CounterStore {
    fn increment(&self, table: &str, key: &str, field: &str, amount: i64)
        -> Result<i64, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store answered with an error code.
    #[error("store error {code}: {message}")]
    Service { code: String, message: String },

    /// The store answered, but not with something we understand.
    #[error("unexpected store response: {0}")]
    Unexpected(String),
}
