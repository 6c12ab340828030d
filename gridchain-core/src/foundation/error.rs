/// Convenience result type used across gridchain.
pub type GridResult<T> = Result<T, GridError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Out-of-range color lookups are not errors: they resolve to the out-of-range sentinel and are
/// counted in [`LevelStats`](crate::LevelStats).
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    /// A requested resolution is zero, negative, or not an integer.
    #[error("invalid resolution at position {position}: {value}")]
    InvalidResolution {
        /// Zero-based position of the offending entry in the resolution list.
        position: usize,
        /// Offending value as it was supplied.
        value: String,
    },

    /// The caller supplied no resolutions at all.
    #[error("resolution list is empty")]
    EmptyResolutionList,

    /// Decimal precision must lie in `1..=Precision::MAX_DIGITS` significant digits.
    #[error("invalid decimal precision: {0}")]
    InvalidPrecision(u64),

    /// Invalid user-provided seed or chain data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Exact arithmetic could not be carried out (division by zero, non-positive cell size).
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridError {
    /// Build a [`GridError::InvalidResolution`] value.
    pub fn invalid_resolution(position: usize, value: impl ToString) -> Self {
        Self::InvalidResolution {
            position,
            value: value.to_string(),
        }
    }

    /// Build a [`GridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridError::Arithmetic`] value.
    pub fn arithmetic(msg: impl Into<String>) -> Self {
        Self::Arithmetic(msg.into())
    }

    /// Build a [`GridError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
