mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
use repos::Repos;
pub use repos::{IClientRepo, IProductRepo, IReminderRepo, ISaleRepo, IUserRepo};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct BizdeskContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Notifier,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl BizdeskContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let notifier = create_notifier(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        }
    }
}

fn create_notifier(config: &Config) -> Notifier {
    let mailer: Arc<dyn IMailer> = match &config.smtp_uri {
        Some(uri) => match SmtpMailer::new(uri, &config.smtp_from) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                warn!(
                    "Unable to create smtp mailer from SMTP_URI: {:?}. Outgoing email is disabled.",
                    e
                );
                Arc::new(DiscardingMailer {})
            }
        },
        None => Arc::new(DiscardingMailer {}),
    };
    Notifier::new(mailer)
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> BizdeskContext {
    BizdeskContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context with inmemory repos and a recording mailer, for tests
pub fn setup_context_inmemory() -> BizdeskContext {
    BizdeskContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        notifier: Notifier::new(Arc::new(InMemoryMailer::new())),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
