//! Authentication and authorization
//!
//! - [`JwtService`] - token issue and validation
//! - [`CurrentUser`] - resolved request principal
//! - [`policy`] - static resource x operation permission table
//! - [`authenticate`] - username-or-email login
//! - [`resolve_user`] - token / cookie resolution middleware
//! - [`require_access`] - API policy middleware
//! - [`require_login`] / [`require_staff`] - HTML page guards

pub mod extractor;
pub mod jwt;
pub mod login;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use login::{LoginOutcome, authenticate};
pub use middleware::{require_access, require_login, require_staff, resolve_user};
pub use password::{hash_password, verify_password};
pub use policy::{Operation, Resource};
