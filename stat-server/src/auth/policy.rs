//! Permission Policy
//!
//! Static table: resource x operation -> minimum role.
//!
//! | Resource   | list / retrieve | create        | update / delete |
//! |------------|-----------------|---------------|-----------------|
//! | Company    | authenticated   | staff         | staff           |
//! | Department | authenticated   | staff         | staff           |
//! | StatTitle  | authenticated   | staff         | staff           |
//! | Stat       | authenticated   | authenticated | staff           |
//! | User       | staff           | staff         | staff           |
//!
//! Roles are ordered `Anonymous < Authenticated < Staff`.

use shared::error::AppError;

use crate::auth::CurrentUser;

/// Protected resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Company = 0,
    Department = 1,
    StatTitle = 2,
    Stat = 3,
    User = 4,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Company,
        Resource::Department,
        Resource::StatTitle,
        Resource::Stat,
        Resource::User,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Company => "company",
            Resource::Department => "department",
            Resource::StatTitle => "stat_title",
            Resource::Stat => "stat",
            Resource::User => "user",
        }
    }
}

/// Operations on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List = 0,
    Retrieve = 1,
    Create = 2,
    Update = 3,
    Delete = 4,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Retrieve,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Retrieve => "retrieve",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Principal roles, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Anonymous,
    Authenticated,
    Staff,
}

impl Role {
    pub fn of(user: Option<&CurrentUser>) -> Self {
        match user {
            None => Role::Anonymous,
            Some(u) if u.is_staff => Role::Staff,
            Some(_) => Role::Authenticated,
        }
    }
}

use Role::{Authenticated as AUTH, Staff as STAFF};

/// Indexed by `[Resource as usize][Operation as usize]`
const RULES: [[Role; 5]; 5] = [
    //  list   retrieve create  update delete
    [AUTH, AUTH, STAFF, STAFF, STAFF],  // Company
    [AUTH, AUTH, STAFF, STAFF, STAFF],  // Department
    [AUTH, AUTH, STAFF, STAFF, STAFF],  // StatTitle
    [AUTH, AUTH, AUTH, STAFF, STAFF],   // Stat
    [STAFF, STAFF, STAFF, STAFF, STAFF], // User
];

/// Minimum role required for `op` on `resource`
pub fn required_role(resource: Resource, op: Operation) -> Role {
    RULES[resource as usize][op as usize]
}

/// Check a principal against the table
///
/// Anonymous callers get `NotAuthenticated` (401), authenticated callers
/// without the role get `StaffRequired` (403).
pub fn authorize(
    user: Option<&CurrentUser>,
    resource: Resource,
    op: Operation,
) -> Result<(), AppError> {
    let required = required_role(resource, op);
    let actual = Role::of(user);
    if actual >= required {
        return Ok(());
    }
    match actual {
        Role::Anonymous => Err(AppError::not_authenticated()),
        _ => Err(AppError::staff_required()
            .with_detail("resource", resource.name())
            .with_detail("operation", op.name())),
    }
}
