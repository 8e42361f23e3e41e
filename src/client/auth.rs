use serde::{Deserialize, Serialize};

/// Role string stored with the logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    CommunityLeader,
    Admin,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateEvent,
    EditEvent,
    DeleteEvent,
}

/// Decides which event actions a role may take. The role itself comes from
/// client storage and is not verified; swap the implementation to back it
/// with server-side checks.
pub trait Authorizer: Send + Sync {
    fn allows(&self, role: Role, action: Action) -> bool;
}

/// Rules used by the campus portal: everyone except students places
/// events, leaders and admins rename them, only admins delete.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl Authorizer for RolePolicy {
    fn allows(&self, role: Role, action: Action) -> bool {
        match action {
            Action::CreateEvent => role != Role::Student,
            Action::EditEvent => matches!(role, Role::Admin | Role::CommunityLeader),
            Action::DeleteEvent => role == Role::Admin,
        }
    }
}
