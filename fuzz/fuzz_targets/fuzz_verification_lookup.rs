//! Fuzz target: mocked verification lookup.
//!
//! Any UTF-8 input must classify without panicking, echo back unchanged,
//! and serialize to JSON.

#![no_main]

use idv_core::{VerificationResult, VerificationStatus};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(email) = std::str::from_utf8(data) else {
        return;
    };

    let result = VerificationResult::lookup(email);
    assert_eq!(result.email, email, "email must be echoed verbatim");

    let lowered = email.to_lowercase();
    if lowered.contains("verified") {
        assert_eq!(result.status, VerificationStatus::Verified);
    } else if lowered.contains("pending") {
        assert_eq!(result.status, VerificationStatus::Pending);
    } else {
        assert_eq!(result.status, VerificationStatus::NotFound);
    }

    let _ = serde_json::to_string(&result).expect("VerificationResult serialization must not fail");
});
