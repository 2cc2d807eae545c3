pub mod error;
pub mod id;
pub mod tolerance;
pub mod traits;

pub use error::{PrimError, Result};
pub use id::ModelId;
pub use tolerance::Tolerance;
