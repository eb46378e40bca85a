#![no_std]
#![warn(rust_2018_idioms, unreachable_pub, missing_docs)]
//! A URI parser, composer and normalizer that strictly adheres to IETF
//! [RFC 3986], together with a Punycode codec as per [RFC 3492] for
//! internationalized domain names and a per-component percent-encoding
//! layer.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//! [RFC 3492]: https://datatracker.ietf.org/doc/html/rfc3492/
//!
//! # Overview
//!
//! [`split`] and [`split_reference`] run the full RFC 3986 grammar over
//! an input string and decompose it into a [`Parts`] value whose fields
//! are zero-copy views into the input. [`compose`] reassembles the text;
//! [`join`] resolves a reference against a base. [`encode`] and
//! [`decode`] transform the fields of a `Parts` through percent-encoding
//! (or, for the host, Punycode) into a caller-owned store.
//!
//! ```
//! use uri_parts::{compose, split};
//!
//! let p = split("https://user:pw@example.com:8080/a/b?x=1#f").unwrap();
//! assert_eq!(p.scheme, Some("https"));
//! let auth = p.authority.as_ref().unwrap();
//! assert_eq!(auth.userinfo, Some("user:pw"));
//! assert_eq!(auth.host, "example.com");
//! assert_eq!(auth.port, Some("8080"));
//! assert_eq!(p.path.segments, ["/a", "/b"]);
//! assert_eq!(p.query, Some("x=1"));
//! assert_eq!(p.fragment, Some("f"));
//! assert_eq!(compose(&p), "https://user:pw@example.com:8080/a/b?x=1#f");
//! ```
//!
//! The library is a pure, synchronous computation over caller-provided
//! memory: no I/O, no global mutable state, `no_std` by default.
//!
//! # Crate features
//!
//! - `std` (default): `std::error::Error` impls,
//!   [`Path::to_path_buf`] and the `urisplit` binary.
//! - `serde`: serializes a [`Parts`] as its composed text and
//!   deserializes one borrowed from the input.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod encoding;
pub mod punycode;

mod codec;
mod grammar;
mod parser;
mod parts;
mod resolve;

pub use codec::{decode, encode, DecodeError, Field};
pub use parser::{split, split_reference};
pub use parts::{compose, Authority, Parts, Path};
pub use resolve::{join, join_str};
