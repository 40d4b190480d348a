//! Log level selection for tour diagnostics.

use shared::{ErrorKind, TourError};
use tracing::{error, info};

/// Logs `err` under `context`. Usage slips are informational; configuration
/// and transport problems are errors.
pub(crate) fn report(err: &TourError, context: &str) {
    let kind = err.kind();
    match kind {
        ErrorKind::Usage => info!(error = %err, ?kind, "tour: {context}"),
        ErrorKind::Configuration | ErrorKind::Transport => {
            error!(error = %err, ?kind, "tour: {context}")
        }
    }
}
