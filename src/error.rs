//! Construction-time error types.
//!
//! Everything on the hot reserve/commit path is infallible — invalid wiring
//! (missing dependency, zero-capacity ring) is a programmer error caught by
//! `expect`/`assert` at construction or wiring time, not a `Result` a caller
//! is expected to handle per message. See `try_new` on each node type for the
//! fallible constructor this crate's panicking `new` is built on.

use thiserror::Error;

/// Why a ring capacity was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    #[error("capacity {0} is not a power of two")]
    NotPowerOfTwo(usize),
    #[error("capacity {0} is below the minimum of 2")]
    TooSmall(usize),
}

pub(crate) fn validate_capacity(capacity: usize) -> Result<(), CapacityError> {
    if capacity < 2 {
        return Err(CapacityError::TooSmall(capacity));
    }
    if !capacity.is_power_of_two() {
        return Err(CapacityError::NotPowerOfTwo(capacity));
    }
    Ok(())
}
