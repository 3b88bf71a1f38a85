pub mod database;
pub mod mailer;
pub mod metrics;

pub use database::{ContactStore, MockStore, MongoStore, CONTACT_COLLECTION};
pub use mailer::{ContactEmail, Mailer, MailerError, MockMailer, SmtpMailer};
pub use metrics::{get_metrics, init_metrics};
