//! Turning generator replies and failures into valid assessment JSON.

pub mod fallback;
pub mod normalize;

pub use fallback::{FailureKind, FallbackGenerator};
pub use normalize::{normalize_response, normalize_traced, Normalized, Strategy};
