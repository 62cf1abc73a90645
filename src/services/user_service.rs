// ==================== USER RECORD STORE ====================
// Owns all reads and writes of the persisted user collection. Every
// mutation rewrites the whole collection under the fixed key, so callers
// never observe a partially applied change.

use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::models::User;
use crate::seeds::users_seed;
use crate::storage::KeyValueStore;
use crate::utils::error::AppError;

const USERS_KEY: &str = "users";

#[derive(Clone)]
pub struct UserService {
    storage: Arc<dyn KeyValueStore>,
}

impl UserService {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> UserService {
        UserService { storage }
    }

    /// Returns the full collection, seeding it on first access
    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        match self.storage.get(USERS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::PersistenceFailure(format!("corrupt user collection: {}", e))
            }),
            None => {
                let users = users_seed::initial_users();
                self.persist(&users).await?;
                log::info!("🌱 Seeded user collection with {} initial users", users.len());
                Ok(users)
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, AppError> {
        self.get_all()
            .await?
            .into_iter()
            .find(|user| user.id == id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    /// Appends a new record under a freshly assigned unique id
    pub async fn create(&self, attributes: &BTreeMap<String, String>) -> Result<User, AppError> {
        let mut users = self.get_all().await?;
        let user = User::from_attributes(Self::next_id(&users), attributes)?;

        users.push(user.clone());
        self.persist(&users).await?;

        log::info!("✅ Created user {}", user.id);
        Ok(user)
    }

    /// Shallow-merges the given attributes into the record matching `id`
    pub async fn update(
        &self,
        id: &str,
        attributes: &BTreeMap<String, String>,
    ) -> Result<User, AppError> {
        let mut users = self.get_all().await?;
        let index = users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;

        let updated = users[index].merged_with(attributes)?;
        users[index] = updated.clone();
        self.persist(&users).await?;

        log::info!("✅ Updated user {}", id);
        Ok(updated)
    }

    /// Removes the record if present; an absent id is a no-op, not an error
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut users = self.get_all().await?;
        let before = users.len();
        users.retain(|user| user.id != id);

        if users.len() == before {
            log::warn!("⚠️ Delete requested for absent user {}", id);
            return Ok(());
        }

        self.persist(&users).await?;
        log::info!("🗑️ Deleted user {}", id);
        Ok(())
    }

    /// Discards the persisted collection and reseeds it
    pub async fn reset(&self) -> Result<Vec<User>, AppError> {
        self.storage.remove(USERS_KEY).await?;
        log::info!("🔄 User collection reset to seed data");
        self.get_all().await
    }

    async fn persist(&self, users: &[User]) -> Result<(), AppError> {
        let raw = serde_json::to_string(users)
            .map_err(|e| AppError::Unexpected(format!("failed to serialize users: {}", e)))?;
        self.storage.set(USERS_KEY, &raw).await
    }

    fn next_id(users: &[User]) -> String {
        // v4 collisions are not a practical concern, but the uniqueness
        // invariant is cheap to enforce outright
        loop {
            let id = Uuid::new_v4().to_string();
            if !users.iter().any(|user| user.id == id) {
                return id;
            }
        }
    }
}
