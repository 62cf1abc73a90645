use serde_json::Map;

use crate::models::User;

/// Dados iniciais de exemplo. Every fresh install starts from these two
/// records, and reset() brings the collection back to exactly this set.
pub fn initial_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            first_name: "Rahul".to_string(),
            last_name: "Singh".to_string(),
            email: "rahul@example.com".to_string(),
            phone: "1234567890".to_string(),
            extra: Map::new(),
        },
        User {
            id: "2".to_string(),
            first_name: "Mohan".to_string(),
            last_name: "sahu".to_string(),
            email: "mohan@example.com".to_string(),
            phone: "0987654321".to_string(),
            extra: Map::new(),
        },
    ]
}
