use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors produced by the warden core.
///
/// Every variant maps to a stable wire code returned to clients verbatim via
/// [`IamError::code`]. Serializing an error yields the boundary payload
/// `{"code": "<CODE>", "message": "<free text>"}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IamError {
    #[error("{message}")]
    InvalidParameter { message: String },

    #[error("{message}")]
    UserAlreadyExist { message: String },

    #[error("{message}")]
    GroupAlreadyExist { message: String },

    #[error("{message}")]
    PolicyAlreadyExist { message: String },

    #[error("{message}")]
    ProxyResourceAlreadyExist { message: String },

    #[error("{message}")]
    UserNotFound { message: String },

    #[error("{message}")]
    GroupNotFound { message: String },

    #[error("{message}")]
    PolicyNotFound { message: String },

    #[error("{message}")]
    ProxyResourceNotFound { message: String },

    #[error("{message}")]
    UserIsAlreadyAMember { message: String },

    #[error("{message}")]
    UserIsNotAMember { message: String },

    #[error("{message}")]
    PolicyIsAlreadyAttached { message: String },

    #[error("{message}")]
    PolicyIsNotAttached { message: String },

    #[error("{message}")]
    UnauthorizedResources { message: String },

    #[error("{message}")]
    UnknownApiError { message: String },
}

impl IamError {
    /// Stable code for the service boundary.
    pub fn code(&self) -> &'static str {
        match self {
            IamError::InvalidParameter { .. } => "InvalidParameter",
            IamError::UserAlreadyExist { .. } => "UserAlreadyExist",
            IamError::GroupAlreadyExist { .. } => "GroupAlreadyExist",
            IamError::PolicyAlreadyExist { .. } => "PolicyAlreadyExist",
            IamError::ProxyResourceAlreadyExist { .. } => "ProxyResourceAlreadyExist",
            IamError::UserNotFound { .. } => "UserNotFound",
            IamError::GroupNotFound { .. } => "GroupNotFound",
            IamError::PolicyNotFound { .. } => "PolicyNotFound",
            IamError::ProxyResourceNotFound { .. } => "ProxyResourceNotFound",
            IamError::UserIsAlreadyAMember { .. } => "UserIsAlreadyAMember",
            IamError::UserIsNotAMember { .. } => "UserIsNotAMember",
            IamError::PolicyIsAlreadyAttached { .. } => "PolicyIsAlreadyAttached",
            IamError::PolicyIsNotAttached { .. } => "PolicyIsNotAttached",
            IamError::UnauthorizedResources { .. } => "UnauthorizedResources",
            IamError::UnknownApiError { .. } => "UnknownApiError",
        }
    }

    /// The human-readable message without the code.
    pub fn message(&self) -> &str {
        match self {
            IamError::InvalidParameter { message }
            | IamError::UserAlreadyExist { message }
            | IamError::GroupAlreadyExist { message }
            | IamError::PolicyAlreadyExist { message }
            | IamError::ProxyResourceAlreadyExist { message }
            | IamError::UserNotFound { message }
            | IamError::GroupNotFound { message }
            | IamError::PolicyNotFound { message }
            | IamError::ProxyResourceNotFound { message }
            | IamError::UserIsAlreadyAMember { message }
            | IamError::UserIsNotAMember { message }
            | IamError::PolicyIsAlreadyAttached { message }
            | IamError::PolicyIsNotAttached { message }
            | IamError::UnauthorizedResources { message }
            | IamError::UnknownApiError { message } => message,
        }
    }
}

// The boundary payload is flat: {"code": ..., "message": ...}
impl Serialize for IamError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("IamError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}

pub type Result<T> = std::result::Result<T, IamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_stable() {
        let err = IamError::PolicyAlreadyExist {
            message: "Policy name: test2 already exists".to_string(),
        };
        assert_eq!(err.code(), "PolicyAlreadyExist");
        assert_eq!(err.message(), "Policy name: test2 already exists");
    }

    #[test]
    fn test_display_is_message_only() {
        let err = IamError::InvalidParameter {
            message: "Invalid parameter: name **!^#~".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter: name **!^#~");
    }

    #[test]
    fn test_serialize_boundary_payload() {
        let err = IamError::UnauthorizedResources {
            message: "User with externalId 1234 is not allowed to access to resource urn:iws:iam:123:policy/path/test".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UnauthorizedResources");
        assert_eq!(
            json["message"],
            "User with externalId 1234 is not allowed to access to resource urn:iws:iam:123:policy/path/test"
        );
    }
}
