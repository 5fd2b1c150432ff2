//! attack-search: name lookup over the MITRE ATT&CK dataset
//!
//! Downloads the enterprise ATT&CK STIX bundle once, caches it in a local
//! JSON file, and searches object names with a case-insensitive regular
//! expression. Each match is reported with its canonical
//! `attack.mitre.org` URL, sorted by name.
//!
//! # Architecture
//!
//! - **Source**: fetches the raw bundle over HTTP
//! - **Cache**: keeps the bundle on disk and only fetches when it is missing
//! - **Search**: pure matching and extraction over the decoded objects
//!
//! # Example Usage
//!
//! ```
//! use attack::{search, Bundle};
//!
//! let json = br#"{"type": "bundle", "objects": [
//!     {"type": "attack-pattern", "name": "Phishing",
//!      "external_references": [{"source_name": "mitre-attack",
//!                               "url": "https://attack.mitre.org/techniques/T1566"}]}
//! ]}"#;
//!
//! let bundle = Bundle::from_slice(json).unwrap();
//! let results = search("phish", &bundle.objects).unwrap();
//!
//! assert_eq!(results[0].url, "https://attack.mitre.org/techniques/T1566");
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod output;
pub mod search;
pub mod source;

// Re-export commonly used types
pub use cache::DatasetCache;
pub use config::Config;
pub use error::Error;
pub use models::{AttackObject, Bundle, ExternalReference, MatchRecord, CANONICAL_SOURCE};
pub use search::{search, search_with_filter, Matcher, SearchFilter};
pub use source::{DatasetSource, HttpSource};
