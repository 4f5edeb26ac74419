#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod client;
/// Connection-string credential parsing.
pub mod credentials;
/// In-memory store for tests and local development.
pub mod memory;
/// Storage provider implementations.
pub mod providers;
/// The blob store capability consumed by connector operations.
pub mod store;

#[doc(hidden)]
pub mod prelude;
