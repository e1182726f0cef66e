#![deny(missing_docs)]
#![doc = "Exact arithmetic foundations for the Clebsch-Gordan table engine: half-integer quantum numbers, signed-square values, and structured errors."]

pub mod errors;
pub mod half;
pub mod value;

pub use errors::{CgError, ErrorInfo};
pub use half::HalfInt;
pub use value::SignedSquare;
