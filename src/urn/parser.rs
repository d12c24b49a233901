//! URN parsing.

use super::types::{ResourceKind, Urn};
use crate::error::IamError;
use std::str::FromStr;

/// Error type for URN parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrnParseError {
    /// The string does not follow the `urn:iws:iam:...` layout
    InvalidFormat(String),
    /// A component is present but carries an invalid value
    InvalidComponent(String),
}

impl std::fmt::Display for UrnParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrnParseError::InvalidFormat(msg) => write!(f, "Invalid URN format: {}", msg),
            UrnParseError::InvalidComponent(msg) => write!(f, "Invalid URN component: {}", msg),
        }
    }
}

impl std::error::Error for UrnParseError {}

impl From<UrnParseError> for IamError {
    fn from(err: UrnParseError) -> Self {
        IamError::InvalidParameter {
            message: err.to_string(),
        }
    }
}

impl FromStr for Urn {
    type Err = UrnParseError;

    /// Parses a warden URN from its canonical string.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden::urn::Urn;
    /// use std::str::FromStr;
    ///
    /// let urn = Urn::from_str("urn:iws:iam:tecsisa:group/teams/operators").unwrap();
    /// assert_eq!(urn.org, "tecsisa");
    /// assert_eq!(urn.path, "/teams/");
    /// assert_eq!(urn.name, "operators");
    ///
    /// let urn = Urn::from_str("urn:iws:iam::user/path/1234").unwrap();
    /// assert_eq!(urn.org, "");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();

        // urn:iws:iam:{org}:{kind}{path}{name} - exactly five blocks
        if parts.len() != 5 {
            return Err(UrnParseError::InvalidFormat(format!(
                "Expected 5 ':'-separated blocks, got {}",
                parts.len()
            )));
        }

        if parts[0] != "urn" {
            return Err(UrnParseError::InvalidFormat(format!(
                "Expected 'urn' prefix, got '{}'",
                parts[0]
            )));
        }

        if parts[1] != "iws" {
            return Err(UrnParseError::InvalidFormat(format!(
                "Expected 'iws' namespace, got '{}'",
                parts[1]
            )));
        }

        if parts[2] != "iam" {
            return Err(UrnParseError::InvalidFormat(format!(
                "Expected 'iam' service, got '{}'",
                parts[2]
            )));
        }

        let org = parts[3].to_string();

        // The resource block is {kind}{path}{name}; the kind runs up to the
        // first '/', the name follows the last '/'.
        let resource = parts[4];
        let first_slash = resource.find('/').ok_or_else(|| {
            UrnParseError::InvalidFormat(format!(
                "Resource block must contain a path, got '{}'",
                resource
            ))
        })?;

        let kind_str = &resource[..first_slash];
        let kind = ResourceKind::try_from(kind_str)
            .map_err(UrnParseError::InvalidComponent)?;

        let rest = &resource[first_slash..];
        let last_slash = rest.rfind('/').unwrap_or(0);
        let path = &rest[..=last_slash];
        let name = &rest[last_slash + 1..];

        if name.is_empty() {
            return Err(UrnParseError::InvalidComponent(
                "URN name cannot be empty".to_string(),
            ));
        }

        if kind == ResourceKind::User && !org.is_empty() {
            return Err(UrnParseError::InvalidComponent(format!(
                "User URNs carry an empty org, got '{}'",
                org
            )));
        }

        Ok(Urn {
            org,
            kind,
            path: path.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        let urn = Urn::from_str("urn:iws:iam:123:policy/path/test").unwrap();
        assert_eq!(urn.org, "123");
        assert_eq!(urn.kind, ResourceKind::Policy);
        assert_eq!(urn.path, "/path/");
        assert_eq!(urn.name, "test");
    }

    #[test]
    fn test_parse_user_empty_org() {
        let urn = Urn::from_str("urn:iws:iam::user/path/1234").unwrap();
        assert_eq!(urn.org, "");
        assert_eq!(urn.kind, ResourceKind::User);
        assert_eq!(urn.name, "1234");
    }

    #[test]
    fn test_parse_nested_path() {
        let urn = Urn::from_str("urn:iws:iam:example:group/teams/platform/operators").unwrap();
        assert_eq!(urn.path, "/teams/platform/");
        assert_eq!(urn.name, "operators");
    }

    #[test]
    fn test_parse_root_path() {
        let urn = Urn::from_str("urn:iws:iam:example:policy/admin").unwrap();
        assert_eq!(urn.path, "/");
        assert_eq!(urn.name, "admin");
    }

    #[test]
    fn test_roundtrip() {
        for s in [
            "urn:iws:iam:123:policy/path/test",
            "urn:iws:iam::user/path/1234",
            "urn:iws:iam:example:group/teams/platform/operators",
            "urn:iws:iam:org-1:proxy/routes/users-by-id",
        ] {
            let urn = Urn::from_str(s).unwrap();
            assert_eq!(urn.to_string(), s);
        }
    }

    #[test]
    fn test_parse_invalid_prefix() {
        let result = Urn::from_str("arn:iws:iam:123:policy/path/test");
        assert!(result.unwrap_err().to_string().contains("Expected 'urn' prefix"));
    }

    #[test]
    fn test_parse_invalid_namespace() {
        let result = Urn::from_str("urn:aws:iam:123:policy/path/test");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Expected 'iws' namespace"));
    }

    #[test]
    fn test_parse_invalid_service() {
        let result = Urn::from_str("urn:iws:s3:123:policy/path/test");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Expected 'iam' service"));
    }

    #[test]
    fn test_parse_unknown_kind() {
        let result = Urn::from_str("urn:iws:iam:123:role/path/test");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown resource kind"));
    }

    #[test]
    fn test_parse_missing_path() {
        let result = Urn::from_str("urn:iws:iam:123:policy");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_name() {
        let result = Urn::from_str("urn:iws:iam:123:policy/path/");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("name cannot be empty"));
    }

    #[test]
    fn test_parse_user_with_org_rejected() {
        let result = Urn::from_str("urn:iws:iam:123:user/path/1234");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_wrong_block_count() {
        let result = Urn::from_str("urn:iws:iam:123");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Expected 5 ':'-separated blocks"));
    }
}
