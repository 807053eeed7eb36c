//! Structured logging facility for calltrace
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Canonical record macros (`log_call_enter!`, `log_call_leave!`,
//!   `log_call_debug!`, `log_call_error!`, `log_call_finished!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use calltrace_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! The wrappers only emit through the `tracing` facade; an application that
//! installs its own subscriber does not need to call `init` at all.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
