//! HTTP gateway for the identity-verification demo.
//!
//! Serves the advertised validation rules, a mocked verification lookup
//! and a form submission echo. Handlers hold no shared mutable state.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
