//! User identity port: who is acting, for audit stamps.

use std::sync::Arc;

use hivekeep_domain::id::UserId;

/// Supplies the id of the user performing the current operation.
pub trait UserContext {
    fn user_id(&self) -> UserId;
}

impl<T: UserContext> UserContext for Arc<T> {
    fn user_id(&self) -> UserId {
        (**self).user_id()
    }
}

/// A fixed acting user, configured once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticUser(pub UserId);

impl UserContext for StaticUser {
    fn user_id(&self) -> UserId {
        self.0
    }
}
