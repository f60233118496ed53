use crate::errors::internal::ValidationError;

/// Offset pagination used by every listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 100;

    /// Largest offset or limit the database driver can bind (signed 64-bit)
    pub const MAX_VALUE: u64 = i64::MAX as u64;

    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Result<Self, ValidationError> {
        Ok(Self {
            skip: Self::bounded("skip", skip.unwrap_or(0))?,
            limit: Self::bounded("limit", limit.unwrap_or(Self::DEFAULT_LIMIT))?,
        })
    }

    fn bounded(field: &'static str, value: u64) -> Result<u64, ValidationError> {
        if value > Self::MAX_VALUE {
            return Err(ValidationError::OutOfRange {
                field,
                max: Self::MAX_VALUE,
            });
        }
        Ok(value)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
