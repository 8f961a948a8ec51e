//! Campo Validation Core
//!
//! Pure formatting and syntax-validation functions plus the error message
//! catalog used by the `campo` form session. Kept free of form state so the
//! same checks can be reused server-side or in tooling.

pub mod format;
pub mod messages;
pub mod validators;

// Re-export the whole surface at the crate root
pub use format::*;
pub use messages::*;
pub use validators::*;
