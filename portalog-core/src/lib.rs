pub mod anonymize;
pub mod config;
pub mod error;
pub mod record;
pub mod sanitize;

pub use config::{KeyLabels, PortalogConfig, SinkConfig};
pub use error::PortalogError;
pub use record::{Credential, RawCredential, RawSubmission, SubmissionRecord};
