// src/auth/actor.rs
//
// The acting user, resolved once from validated claims and passed
// explicitly into every mutating core operation. Nothing in the core reads
// ambient session state.
use uuid::Uuid;

use crate::models::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl ActorContext {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
