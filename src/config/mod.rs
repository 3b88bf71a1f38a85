use std::env;

/// Runtime configuration, sourced from the environment with `.env` overlay.
///
/// Loading never fails: every setting has a usable default so the service
/// still boots (in degraded form) on a box with nothing exported.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Recipient of contact notifications. Falls back to the relay user so a
    /// minimal deployment only has to set the credentials.
    pub to: String,
}

impl AppConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        let smtp_user = get_env("SMTP_USER", "");
        let smtp_to = recipient_or_relay_user(env::var("SMTP_TO").ok(), &smtp_user);

        AppConfig {
            port: get_env("PORT", "8000").parse().unwrap_or(8000),
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", "mongodb://localhost:27017"),
                name: get_env("DATABASE_NAME", "portfolio_db"),
            },
            smtp: SmtpConfig {
                host: get_env("SMTP_HOST", ""),
                port: get_env("SMTP_PORT", "587").parse().unwrap_or(587),
                user: smtp_user,
                password: get_env("SMTP_PASS", ""),
                to: smtp_to,
            },
        }
    }
}

impl SmtpConfig {
    /// The relay is usable only when the host, both credentials, and a
    /// recipient are all present.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty()
            && !self.user.is_empty()
            && !self.password.is_empty()
            && !self.to.is_empty()
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Notification recipient: an explicit `SMTP_TO` wins, otherwise the relay
/// user receives their own notifications.
fn recipient_or_relay_user(to: Option<String>, user: &str) -> String {
    to.unwrap_or_else(|| user.to_string())
}
