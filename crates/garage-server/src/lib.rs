//! HTTP front end for the garage allocation engine.
//!
//! The request adapter is split in two. [`handler`] turns a method, path
//! and form body into a status code and JSON payload, synchronously and
//! without any I/O, so every validation branch is unit-testable.
//! [`http`] runs the hyper accept loop that feeds it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod args;
pub mod handler;
pub mod http;

pub use args::{Args, ArgsError, Command};
pub use handler::{dispatch, Reply};
pub use http::serve;
