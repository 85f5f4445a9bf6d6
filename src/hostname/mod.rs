//! Hostname preparation for registry lookups.
//!
//! A raw hostname is first turned into a [`NormalizedHost`]: an owned copy of
//! the same length, lowercased, with every `.` replaced by a NUL sentinel.
//! [`HostnameParts`] then walks that buffer right to left, one label at a
//! time, without allocating.
//!
//! ## Example
//!
//! ```
//! use domain_registry_r::hostname::{HostnameParts, NormalizedHost, SEPARATOR};
//!
//! let host = NormalizedHost::new("WWW.Example.COM").unwrap();
//! let labels: Vec<&[u8]> = HostnameParts::new(host.as_bytes(), 0, host.len(), SEPARATOR)
//!     .map(|part| part.label)
//!     .collect();
//!
//! assert_eq!(labels, vec![&b"com"[..], &b"example"[..], &b"www"[..]]);
//! ```

mod normalize;
mod parts;

pub use normalize::{is_valid_hostname, NormalizedHost, SEPARATOR};
pub use parts::{HostnamePart, HostnameParts};
