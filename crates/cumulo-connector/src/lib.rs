#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Response assembly under the family envelope.
pub mod assembler;
pub mod config;
/// Connection-string resolution and store construction seams.
pub mod connection;
pub mod consts;
/// The download operation itself.
pub mod download;
/// Content-type driven payload construction.
pub mod resolver;

#[doc(hidden)]
pub mod prelude;
