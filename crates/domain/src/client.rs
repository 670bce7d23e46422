use crate::shared::{
    email::Email,
    entity::{Entity, ID},
};

/// A `Client` is a customer relationship record owned by a `User`. Reminders
/// and sales reference clients but never own them; deleting a client leaves
/// its sales history intact.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl Client {
    pub fn new(user_id: ID, name: String, email: Email) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name,
            email,
            phone: None,
            category: None,
            notes: None,
        }
    }
}

impl Entity for Client {
    fn id(&self) -> &ID {
        &self.id
    }
}
