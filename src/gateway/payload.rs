//! Wire payloads for the verification endpoint.
//!
//! The response body is the engine's [`VerificationDecision`] serialized
//! as-is: `title`, `status`, `reason`, `similarity_score`,
//! `verification_probability` and the ordered `details` list.

use serde::{Deserialize, Serialize};

pub use crate::verify::VerificationDecision as VerifyResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub title: String,
}
