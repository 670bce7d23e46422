use crate::shared::{
    email::Email,
    entity::{Entity, ID},
};
use bizdesk_utils::create_random_secret;

const API_KEY_LEN: usize = 30;

/// A `User` is the tenant of the system: the business owner every client,
/// product, sale and reminder belongs to. All queries are scoped by the
/// user id, and the `secret_api_key` authenticates their requests.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: Email,
    pub secret_api_key: String,
}

impl User {
    pub fn new(name: String, email: Email) -> Self {
        Self {
            id: Default::default(),
            name,
            email,
            secret_api_key: Self::generate_secret_api_key(),
        }
    }

    pub fn generate_secret_api_key() -> String {
        let rand_secret = create_random_secret(API_KEY_LEN);
        format!("sk_{}", rand_secret)
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_user_with_api_key() {
        let email = Email::new("eva@studio-sax.no".into()).unwrap();
        let user = User::new("Eva".into(), email);
        assert!(user.secret_api_key.starts_with("sk_"));
        assert!(user.secret_api_key.len() > API_KEY_LEN);
    }
}
