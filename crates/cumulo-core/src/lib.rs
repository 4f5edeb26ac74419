#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod error;
/// Message context, response envelope, and status payload types.
pub mod pipeline;
/// Per-invocation local download sinks.
pub mod spool;
