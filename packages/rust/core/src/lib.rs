//! Message building and end-to-end notification for buildnotify.
//!
//! This crate ties the environment snapshot, log excerpts, and the Webex
//! client together into one `notify` run.

pub mod context;
pub mod message;
pub mod pipeline;
pub mod template;
