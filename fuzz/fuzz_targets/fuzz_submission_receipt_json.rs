//! Fuzz target: JSON decoding of `SubmissionReceipt`.
//!
//! Arbitrary bytes fed to the decoder must never panic. Anything that
//! decodes must re-encode to an equal value.

#![no_main]

use idv_core::SubmissionReceipt;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(receipt) = serde_json::from_slice::<SubmissionReceipt>(data) else {
        return;
    };
    let json = serde_json::to_vec(&receipt).expect("SubmissionReceipt serialization must not fail");
    let again: SubmissionReceipt =
        serde_json::from_slice(&json).expect("re-encoded receipt must decode");
    assert_eq!(receipt, again);
});
