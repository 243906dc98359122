//! Minimal client for the Uploadcare REST and upload APIs.
//!
//! ## Overview
//!
//! - **REST API**: requests are signed with HMAC-SHA1 over
//!   `VERB\nCONTENT_MD5\nCONTENT_TYPE\nDATE\nPATH`, see [`RequestSigner`].
//! - **Upload API**: unsigned form or multipart requests carrying the public
//!   key.
//! - **Context**: holds the [`HttpSend`] transport and [`Env`]. This crate
//!   ships no transport, use `uploadcare-http-send-reqwest` or bring your
//!   own.
//!
//! Status codes are mapped to [`ErrorKind`]s; nothing is retried.
//!
//! ## Example
//!
//! ```no_run
//! use http::Method;
//! use uploadcare_core::{Client, Config, Context, OsEnv};
//!
//! # fn main() -> uploadcare_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::default().from_env(&ctx)?;
//! let client = Client::new(ctx, config);
//!
//! let group = client.rest_request(Method::GET, "groups/?limit=1", None)?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod rest;
pub mod time;
pub mod upload;
pub mod utils;

mod constants;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{Context, NoopEnv, NoopHttpSend};
mod http_send;
pub use http_send::{Body, FilePart, HttpSend, TlsVerify};
mod env;
pub use env::{Env, OsEnv, StaticEnv};

mod config;
pub use config::Config;
mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{string_to_sign, RequestSigner, SignedRequest};

mod client;
pub use client::Client;
