//! URN module - hierarchical resource names for warden entities.
//!
//! Every IAM object is addressed by a URN of the form:
//!
//! ```text
//! urn:iws:iam:{org}:{kind}{path}{name}
//! Examples:
//! - urn:iws:iam:tecsisa:group/teams/platform/operators
//! - urn:iws:iam:tecsisa:policy/path/admin-policy
//! - urn:iws:iam::user/path/98fs8e92     (user URNs carry an empty org)
//! ```
//!
//! The URN is externally visible and stable: it is the value policies name in
//! their resource lists, and the value the authorization gate evaluates.
//!
//! # Usage
//!
//! ```
//! use warden::urn::{ResourceKind, Urn};
//!
//! let urn = Urn::new("tecsisa", ResourceKind::Group, "/teams/", "operators");
//! assert_eq!(urn.to_string(), "urn:iws:iam:tecsisa:group/teams/operators");
//!
//! let parsed: Urn = "urn:iws:iam:tecsisa:group/teams/operators".parse().unwrap();
//! assert_eq!(parsed, urn);
//! ```
//!
//! Resource strings in policy statements are matched with [`matches_pattern`]:
//! a pattern without `*` requires exact equality, and `*` matches any run of
//! characters.

pub mod matcher;
pub mod parser;
pub mod types;

pub use matcher::matches_pattern;
pub use parser::UrnParseError;
pub use types::{urn_prefix, ResourceKind, Urn};
