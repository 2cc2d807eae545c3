use crate::error::Result;

/// Consistency check for derived data (buffers, configuration) before it is
/// handed on. Implementations report the first problem found.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
