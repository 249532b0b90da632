//! Domain models with validation before persistence
//!
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod value;

pub use validation::ValidationError;
pub use value::{parse_id, Value, MAX_NAME_LEN, MAX_VALUE_LEN};
