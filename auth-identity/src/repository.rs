use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{error::*, models::*};

/// Lookup into the user database, keyed by phone number or e-mail
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find(&self, identifier: &str, role: Role) -> Result<Option<UserRecord>>;
}

/// Mock database held in memory
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    pub fn insert(&self, user: UserRecord) {
        self.users.write().push(user);
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find(&self, identifier: &str, role: Role) -> Result<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|user| user.role == role && user.matches(identifier))
            .cloned())
    }
}
