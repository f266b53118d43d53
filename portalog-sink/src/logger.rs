//! Request-logging facade.

use portalog_core::{PortalogError, RawSubmission, SinkConfig, SubmissionRecord};
use tracing::{info, warn};

use crate::writer::{self, Destination};

/// One configured logging stream.
///
/// Ties the pipeline together for a single call-site profile: build and
/// validate the record, serialize it with the profile's labels, append it
/// durably, and optionally echo the stored line to the diagnostic stream.
pub struct RequestLogger {
    config: SinkConfig,
}

impl RequestLogger {
    pub fn new(config: SinkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Record one submission.
    ///
    /// Returns which location accepted the line. [`PortalogError::InvalidInput`]
    /// means the caller should reject the request; nothing was written.
    /// [`PortalogError::WriteFailure`] means both locations refused the
    /// append; the caller should surface a server error and must not retry.
    pub fn log(&self, raw: RawSubmission<'_>) -> Result<Destination, PortalogError> {
        let record = SubmissionRecord::build(raw, &self.config)?;
        let line = record.to_json_line(&self.config.key_labels)?;

        match writer::append_line(&self.config, &line) {
            Ok(dest) => {
                if self.config.echo_to_diagnostics {
                    info!(target: "portalog", %line, "submission recorded");
                }
                Ok(dest)
            }
            Err(err) => {
                // No record payload here: the line carries secrets.
                warn!(target: "portalog", error = %err, "submission append failed");
                Err(err)
            }
        }
    }
}
