//! Authentication primitives: login credentials, registrations, password
//! changes and issued access tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::user::{DisplayName, Email, User, UserValidationError};

/// Minimum length, in characters, of a newly chosen password.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Email was missing or malformed.
    Email(UserValidationError),
    /// Display name was missing or too long.
    Name(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// A newly chosen password is shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
    /// The current password was blank on a change request.
    EmptyOldPassword,
    /// The replacement password was blank.
    EmptyNewPassword,
    /// The replacement password is shorter than [`PASSWORD_MIN`].
    NewPasswordTooShort { min: usize },
}

impl AuthValidationError {
    /// Name of the offending request field, as spelled in JSON payloads.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Name(_) => "name",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::EmptyOldPassword => "oldPassword",
            Self::EmptyNewPassword | Self::NewPasswordTooShort { .. } => "newPassword",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Email(UserValidationError::EmptyEmail) => "empty_email",
            Self::Email(_) => "invalid_email",
            Self::Name(UserValidationError::DisplayNameTooLong { .. }) => "name_too_long",
            Self::Name(_) => "empty_name",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::EmptyOldPassword => "empty_old_password",
            Self::EmptyNewPassword => "empty_password",
            Self::NewPasswordTooShort { .. } => "password_too_short",
        }
    }
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) | Self::Name(err) => err.fmt(f),
            Self::EmptyPassword | Self::EmptyNewPassword => {
                write!(f, "password must not be empty")
            }
            Self::PasswordTooShort { min } | Self::NewPasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::EmptyOldPassword => write!(f, "current password must not be empty"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

fn validate_new_password(password: &str) -> Result<Zeroizing<String>, AuthValidationError> {
    if password.is_empty() {
        return Err(AuthValidationError::EmptyPassword);
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised (trimmed, lower-cased).
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use tweetshare::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "password").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = Email::new(email).map_err(AuthValidationError::Email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    password: Zeroizing<String>,
    name: DisplayName,
}

impl Registration {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, AuthValidationError> {
        let email = Email::new(email).map_err(AuthValidationError::Email)?;
        let password = validate_new_password(password)?;
        let name = DisplayName::new(name).map_err(AuthValidationError::Name)?;
        Ok(Self {
            email,
            password,
            name,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }
}

/// Validated password change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    old_password: Zeroizing<String>,
    new_password: Zeroizing<String>,
}

impl PasswordChange {
    /// Validate raw inputs. The new password must meet [`PASSWORD_MIN`].
    pub fn try_from_parts(
        old_password: &str,
        new_password: &str,
    ) -> Result<Self, AuthValidationError> {
        if old_password.is_empty() {
            return Err(AuthValidationError::EmptyOldPassword);
        }
        let new_password = validate_new_password(new_password).map_err(|err| match err {
            AuthValidationError::PasswordTooShort { min } => {
                AuthValidationError::NewPasswordTooShort { min }
            }
            _ => AuthValidationError::EmptyNewPassword,
        })?;
        Ok(Self {
            old_password: Zeroizing::new(old_password.to_owned()),
            new_password,
        })
    }

    pub fn old_password(&self) -> &str {
        self.old_password.as_str()
    }

    pub fn new_password(&self) -> &str {
        self.new_password.as_str()
    }
}

/// Signed bearer token handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl Serialize for AccessToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Successful authentication outcome: the user and a fresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthSession {
    pub user: User,
    #[schema(value_type = String)]
    pub access_token: AccessToken,
}

/// Acknowledgement returned by a successful password change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PasswordChanged {
    #[schema(example = "Password changed successfully")]
    pub message: String,
}

impl Default for PasswordChanged {
    fn default() -> Self {
        Self {
            message: "Password changed successfully".to_owned(),
        }
    }
}
