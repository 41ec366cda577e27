//! Unified error codes for the statistics service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Hierarchy errors (company, department, stat title)
//! - 4xxx: Stat errors
//! - 5xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize compactly
/// and can be mirrored by front-end code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Staff role required
    StaffRequired = 2002,

    // ==================== 3xxx: Hierarchy ====================
    /// Company not found
    CompanyNotFound = 3001,
    /// Department not found
    DepartmentNotFound = 3002,
    /// Stat title not found
    StatTitleNotFound = 3003,
    /// Slug already used by another record of the same type
    SlugAlreadyExists = 3004,
    /// Slug contains characters that are not URL-safe
    InvalidSlug = 3005,

    // ==================== 4xxx: Stat ====================
    /// Stat not found
    StatNotFound = 4001,
    /// Amount is not a decimal number
    InvalidAmount = 4002,
    /// Date is not a valid calendar date
    InvalidDate = 4003,

    // ==================== 5xxx: User ====================
    /// User not found
    UserNotFound = 5001,
    /// Username already taken
    UsernameAlreadyExists = 5002,
    /// Email already taken
    EmailAlreadyExists = 5003,
    /// User has no profile record
    ProfileMissing = 5004,
    /// Password too short
    PasswordTooShort = 5005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Template rendering error
    TemplateError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field missing",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::StaffRequired => "Staff role required",

            // Hierarchy
            ErrorCode::CompanyNotFound => "Company not found",
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::StatTitleNotFound => "Stat title not found",
            ErrorCode::SlugAlreadyExists => "Slug already exists",
            ErrorCode::InvalidSlug => "Slug may only contain letters, digits, '-' and '_'",

            // Stat
            ErrorCode::StatNotFound => "Stat not found",
            ErrorCode::InvalidAmount => "Amount must be a number",
            ErrorCode::InvalidDate => "Date must be a valid YYYY-MM-DD date",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameAlreadyExists => "Username already exists",
            ErrorCode::EmailAlreadyExists => "Email already exists",
            ErrorCode::ProfileMissing => "User profile is missing",
            ErrorCode::PasswordTooShort => "Password is too short",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::TemplateError => "Template rendering failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::StaffRequired),

            // Hierarchy
            3001 => Ok(ErrorCode::CompanyNotFound),
            3002 => Ok(ErrorCode::DepartmentNotFound),
            3003 => Ok(ErrorCode::StatTitleNotFound),
            3004 => Ok(ErrorCode::SlugAlreadyExists),
            3005 => Ok(ErrorCode::InvalidSlug),

            // Stat
            4001 => Ok(ErrorCode::StatNotFound),
            4002 => Ok(ErrorCode::InvalidAmount),
            4003 => Ok(ErrorCode::InvalidDate),

            // User
            5001 => Ok(ErrorCode::UserNotFound),
            5002 => Ok(ErrorCode::UsernameAlreadyExists),
            5003 => Ok(ErrorCode::EmailAlreadyExists),
            5004 => Ok(ErrorCode::ProfileMissing),
            5005 => Ok(ErrorCode::PasswordTooShort),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::TemplateError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
