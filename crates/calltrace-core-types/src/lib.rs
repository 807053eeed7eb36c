//! Core types shared by the calltrace wrappers and logging facility
//!
//! - **Schema constants**: canonical field keys and event names stamped on
//!   every record the wrappers emit

pub mod schema;
