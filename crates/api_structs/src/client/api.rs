use crate::dtos::ClientDTO;
use bizdesk_domain::{Client, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub client: ClientDTO,
}

impl ClientResponse {
    pub fn new(client: Client) -> Self {
        Self {
            client: ClientDTO::new(client),
        }
    }
}

pub mod create_client {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub email: String,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type APIResponse = ClientResponse;
}

pub mod get_client {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    pub type APIResponse = ClientResponse;
}

pub mod get_clients {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub clients: Vec<ClientDTO>,
    }

    impl APIResponse {
        pub fn new(clients: Vec<Client>) -> Self {
            Self {
                clients: clients.into_iter().map(ClientDTO::new).collect(),
            }
        }
    }
}

pub mod update_client {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type APIResponse = ClientResponse;
}

pub mod delete_client {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub client_id: ID,
    }

    pub type APIResponse = ClientResponse;
}
