//! Utility functions

pub mod crypto;
pub mod validation;

pub use crypto::{hash_bytes, secrets_match, verify_hash};
pub use validation::{normalize_email, normalize_seat_number, validate_exam_name};
