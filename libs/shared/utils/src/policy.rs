use std::fmt;

use shared_models::auth::{Role, User};
use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Account,
    Patients,
    Professionals,
    Treatments,
    Bookings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Account => "account",
            Resource::Patients => "patients",
            Resource::Professionals => "professionals",
            Resource::Treatments => "treatments",
            Resource::Bookings => "bookings",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::List => "list",
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Decides whether an authenticated role may perform an action on a resource.
///
/// Consulted by every protected handler after the token gate has passed.
pub trait AccessPolicy: Send + Sync {
    fn permits(&self, role: Role, resource: Resource, action: Action) -> bool;
}

/// Any valid token grants every action. Admin and receptionist are equivalent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticatedOnly;

impl AccessPolicy for AuthenticatedOnly {
    fn permits(&self, _role: Role, _resource: Resource, _action: Action) -> bool {
        true
    }
}

pub fn authorize(
    policy: &dyn AccessPolicy,
    user: &User,
    resource: Resource,
    action: Action,
) -> Result<(), AppError> {
    if policy.permits(user.role, resource, action) {
        Ok(())
    } else {
        tracing::warn!("Role {} denied {} on {}", user.role, action, resource);
        Err(AppError::Forbidden(format!("Not allowed to {} {}", action, resource)))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    struct AdminDeletesOnly;

    impl AccessPolicy for AdminDeletesOnly {
        fn permits(&self, role: Role, _resource: Resource, action: Action) -> bool {
            action != Action::Delete || role == Role::Admin
        }
    }

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "staff@clinic.test".to_string(),
            role,
        }
    }

    #[test]
    fn test_authenticated_only_permits_every_role() {
        for role in [Role::Admin, Role::Receptionist] {
            for action in [Action::List, Action::Read, Action::Create, Action::Update, Action::Delete] {
                assert!(authorize(&AuthenticatedOnly, &user(role), Resource::Bookings, action).is_ok());
            }
        }
    }

    #[test]
    fn test_custom_policy_can_deny() {
        let denied = authorize(&AdminDeletesOnly, &user(Role::Receptionist), Resource::Patients, Action::Delete);
        assert_matches!(denied, Err(AppError::Forbidden(msg)) if msg == "Not allowed to delete patients");

        assert!(authorize(&AdminDeletesOnly, &user(Role::Admin), Resource::Patients, Action::Delete).is_ok());
    }
}
