use bizdesk_domain::{Client, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClientDTO {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl ClientDTO {
    pub fn new(client: Client) -> Self {
        Self {
            id: client.id,
            user_id: client.user_id,
            name: client.name,
            email: client.email.to_string(),
            phone: client.phone,
            category: client.category,
            notes: client.notes,
        }
    }
}
