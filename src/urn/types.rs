//! Core URN types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The kind of IAM object a URN addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    User,
    Group,
    Policy,
    Proxy,
}

impl ResourceKind {
    /// Returns the kind segment as it appears inside a URN.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Group => "group",
            ResourceKind::Policy => "policy",
            ResourceKind::Proxy => "proxy",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ResourceKind {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "user" => Ok(ResourceKind::User),
            "group" => Ok(ResourceKind::Group),
            "policy" => Ok(ResourceKind::Policy),
            "proxy" => Ok(ResourceKind::Proxy),
            other => Err(format!("unknown resource kind '{other}'")),
        }
    }
}

/// A parsed warden URN.
///
/// # Format
///
/// ```text
/// urn:iws:iam:{org}:{kind}{path}{name}
/// Example: urn:iws:iam:tecsisa:policy/path/admin-policy
/// ```
///
/// `org` is empty only for user URNs. `path` always starts and ends with `/`.
///
/// # Serialization
///
/// `Urn` serializes as its canonical string in JSON:
/// ```json
/// "urn:iws:iam:tecsisa:policy/path/admin-policy"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Urn {
    /// Organization that owns the resource; empty for users
    pub org: String,

    /// The kind of object addressed
    pub kind: ResourceKind,

    /// Hierarchical path, `/`-delimited on both ends
    pub path: String,

    /// Leaf name (the external id for users)
    pub name: String,
}

impl Urn {
    pub fn new(
        org: impl Into<String>,
        kind: ResourceKind,
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            org: org.into(),
            kind,
            path: path.into(),
            name: name.into(),
        }
    }

    /// Returns the URN prefix (everything before the name).
    ///
    /// ```text
    /// urn:iws:iam:tecsisa:policy/path/
    /// ```
    pub fn prefix(&self) -> String {
        urn_prefix(&self.org, self.kind, &self.path)
    }

    /// Returns true if this URN starts with the given prefix string.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.to_string().starts_with(prefix)
    }
}

/// Builds the URN prefix for an org, kind and path, without a trailing name.
///
/// Used as a building block when composing resource patterns.
pub fn urn_prefix(org: &str, kind: ResourceKind, path: &str) -> String {
    format!("urn:iws:iam:{}:{}{}", org, kind.as_str(), path)
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "urn:iws:iam:{}:{}{}{}",
            self.org,
            self.kind.as_str(),
            self.path,
            self.name
        )
    }
}

// Custom serialization: a URN is a string on the wire
impl Serialize for Urn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Urn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Urn::from_str(&s).map_err(serde::de::Error::custom)
    }
}
