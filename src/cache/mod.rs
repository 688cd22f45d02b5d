//! On-disk response cache with time-based expiry
//!
//! Each registry collection is stored as one pretty-printed JSON file
//! under the cache directory, wrapped with the time it was written.
//!
//! # File Format
//!
//! ```json
//! { "data": [ ... ], "timestamp": "2026-01-01T12:00:00Z" }
//! ```
//!
//! # Entry States
//!
//! | State | `get` result | Side effect |
//! |-------|--------------|-------------|
//! | Miss | `CacheMiss` | none |
//! | Expired | `CacheExpired` | file removed |
//! | Fresh | payload | none |

mod store;

pub use store::{CacheEntry, CacheStore, DEFAULT_TTL};
