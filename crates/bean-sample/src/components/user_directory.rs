use crate::error::OrderError;
use crate::model::{User, UserCreate, UserId};
use bean_container::{Component, Defaulted, Fields};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info};

/// In-memory user store. Registered and injected as a concrete bean.
pub struct UserDirectory {
    users: Defaulted<HashMap<UserId, User>>,
    next_id: AtomicU32,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: Defaulted::unset(),
            next_id: AtomicU32::new(0),
        }
    }

    pub fn create_user(&self, params: UserCreate) -> Result<UserId, OrderError> {
        debug!(?params, "create_user called");
        if params.name.trim().is_empty() {
            return Err(OrderError::ValidationError("user name is empty".into()));
        }
        if !params.email.contains('@') {
            return Err(OrderError::ValidationError(format!(
                "invalid email: {}",
                params.email
            )));
        }

        let id = UserId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let user = User::new(id.clone(), params);
        let size = self
            .users
            .with_mut(|users| {
                users.insert(id.clone(), user);
                users.len()
            })
            .ok_or(OrderError::NotWired("UserDirectory.users"))?;
        info!(user_id = %id, size, "Created");
        Ok(id)
    }

    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.with(|users| users.get(id).cloned()).flatten()
    }

    pub fn len(&self) -> usize {
        self.users.with(HashMap::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for UserDirectory {
    fn describe<'a>(&'a self, fields: &mut Fields<'a>) {
        fields.value("users", &self.users);
    }
}
