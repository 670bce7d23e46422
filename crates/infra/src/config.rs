use bizdesk_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code required to register new `User`s
    pub create_user_secret_code: String,
    /// Port for the application to run on
    pub port: usize,
    /// SMTP connection uri for outgoing notification email. When absent the
    /// server still runs, but outgoing email is disabled.
    pub smtp_uri: Option<String>,
    /// Sender address for outgoing notification email
    pub smtp_from: String,
    /// Products at or below this stock count show up in the inventory report
    pub low_stock_threshold: i64,
}

impl Config {
    pub fn new() -> Self {
        let create_user_secret_code = match std::env::var("CREATE_USER_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find CREATE_USER_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for registering users was generated and set to: {}",
                    code
                );
                code
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let smtp_uri = match std::env::var("SMTP_URI") {
            Ok(uri) => Some(uri),
            Err(_) => {
                warn!("Did not find SMTP_URI environment variable. Outgoing email is disabled.");
                None
            }
        };
        let smtp_from =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@bizdesk.local".into());

        Self {
            create_user_secret_code,
            port,
            smtp_uri,
            smtp_from,
            low_stock_threshold: 3,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
