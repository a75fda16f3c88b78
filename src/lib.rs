//! IP whitelist middleware for Actix Web.
//!
//! [`IpWhitelist`] checks the peer address of every request against a set of IP addresses and
//! CIDR blocks, forwarding matching requests to the wrapped service and answering all others with
//! `403 Forbidden`.
//!
//! # Examples
//! ```
//! use actix_web::{App, HttpResponse, web};
//! use actix_web_ip_whitelist::IpWhitelist;
//!
//! let mw = IpWhitelist::new(["127.0.0.1", "::1", "10.0.0.0/8"], "private").unwrap();
//!
//! App::new()
//!     .wrap(mw)
//!     .route("/", web::get().to(|| async { HttpResponse::Ok().body("hello") }))
//! # ;
//! ```
//!
//! Entries are validated up front; a misconfigured whitelist is never constructed:
//! ```
//! use actix_web_ip_whitelist::{IpWhitelist, IpWhitelistError};
//!
//! let err = IpWhitelist::new(["10.0.0.1", "10.0.0.0/33"], "private").unwrap_err();
//! assert_eq!(err, IpWhitelistError::InvalidRangeSpec { spec: "10.0.0.0/33".to_owned() });
//! ```
//!
//! # Logging
//! Uses [`tracing`] with its `log` compatibility enabled. Rejections are emitted at `DEBUG` level
//! and accepted requests at `TRACE` level, both with the whitelist's name as a field.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, nonstandard_style)]
#![warn(future_incompatible, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
mod ip_ranges;
mod ip_whitelist;
#[cfg(test)]
mod test_services;

pub use self::{
    config::IpWhitelistConfig,
    error::{IpWhitelistError, NotAuthorized},
    ip_ranges::IpRanges,
    ip_whitelist::{IpWhitelist, IpWhitelistMiddleware},
};
