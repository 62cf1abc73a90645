// ==================== LIST CONTROLLER ====================
// Backs the list view: loads the collection once, filters it locally on
// every search keystroke, and applies delete/reset against the record
// store. The held array is a display copy; the store stays authoritative.

use serde::Serialize;

use crate::models::User;
use crate::services::UserService;
use crate::utils::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListState {
    Loading,
    Ready,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub state: ListState,
    pub search_term: String,
    pub rows: Vec<UserRow>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

pub struct ListController {
    service: UserService,
    state: ListState,
    users: Vec<User>,
    search_term: String,
}

impl ListController {
    pub fn new(service: UserService) -> ListController {
        ListController {
            service,
            state: ListState::Loading,
            users: Vec::new(),
            search_term: String::new(),
        }
    }

    /// Fetches the full collection and enters the ready state
    pub async fn enter(&mut self) -> Result<(), AppError> {
        self.state = ListState::Loading;
        self.users = self.service.get_all().await.map_err(|e| {
            log::error!("❌ Failed to fetch users: {}", e);
            e
        })?;
        self.state = ListState::Ready;
        Ok(())
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Case-insensitive substring match over first name, last name, email
    /// and phone. Filters the held array only; nothing is refetched and the
    /// held array itself is never mutated.
    pub fn filtered_users(&self) -> Vec<&User> {
        let term = self.search_term.to_lowercase();
        self.users
            .iter()
            .filter(|user| {
                user.first_name.to_lowercase().contains(&term)
                    || user.last_name.to_lowercase().contains(&term)
                    || user.email.to_lowercase().contains(&term)
                    || user.phone.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Deletes through the record store. The held array only drops the row
    /// after the store call resolves successfully, so a failed delete leaves
    /// the view exactly as it was.
    pub async fn delete(&mut self, id: &str) -> Result<(), AppError> {
        self.service.delete(id).await.map_err(|e| {
            log::error!("❌ Failed to delete user {}: {}", id, e);
            e
        })?;
        self.users.retain(|user| user.id != id);
        Ok(())
    }

    /// Resets the collection to the seed data. On failure the previously
    /// displayed records are restored
    pub async fn reset(&mut self) -> Result<(), AppError> {
        let previous = std::mem::take(&mut self.users);
        self.state = ListState::Loading;

        match self.service.reset().await {
            Ok(users) => {
                self.users = users;
                self.state = ListState::Ready;
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Failed to reset user collection: {}", e);
                self.users = previous;
                self.state = ListState::Ready;
                Err(e)
            }
        }
    }

    pub fn view(&self) -> ListView {
        let rows: Vec<UserRow> = self
            .filtered_users()
            .into_iter()
            .map(|user| UserRow {
                id: user.id.clone(),
                name: format!("{} {}", user.first_name, user.last_name),
                email: user.email.clone(),
                phone: user.phone.clone(),
            })
            .collect();

        ListView {
            state: self.state,
            search_term: self.search_term.clone(),
            total: rows.len(),
            empty_message: if rows.is_empty() {
                Some("No users found.".to_string())
            } else {
                None
            },
            rows,
        }
    }
}
