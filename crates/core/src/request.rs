//! Pre-dispatch request validation
//!
//! Constructors reject records that can never be valid. Requests add a second,
//! softer check that the host runs before dispatching: a request may be well
//! formed yet still not actionable (no target channels, for instance). That
//! check returns its findings instead of failing.

use crate::error::RequestValidationErrors;

/// A request the host validates before dispatch
pub trait ActionRequest {
    /// `None` if the request can be dispatched, otherwise every problem found
    fn validate(&self) -> Option<RequestValidationErrors>;
}
