//! Core types, authorization policy, and the assignment lifecycle service for
//! Caseload.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! performs no I/O of its own; persistence goes through the
//! [`store::AssignmentStore`] trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod actor;
pub mod assignment;
pub mod error;
pub mod policy;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use service::{Assigned, AssignmentRequest, AssignmentService};
