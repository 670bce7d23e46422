use crate::dtos::UserDTO;
use bizdesk_domain::User;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod create_user {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub email: String,
        pub code: String,
    }

    /// The api key is only ever returned here, at registration
    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: UserDTO,
        pub secret_api_key: String,
    }

    impl APIResponse {
        pub fn new(user: User) -> Self {
            let secret_api_key = user.secret_api_key.clone();
            Self {
                user: UserDTO::new(user),
                secret_api_key,
            }
        }
    }
}

pub mod get_me {
    use super::*;

    pub type APIResponse = UserResponse;
}
