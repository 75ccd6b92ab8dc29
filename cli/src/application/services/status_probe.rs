//! Application service: status probe.
//!
//! One `get_application` call per probe; the desired and running counts of a
//! snapshot are never mixed across calls.

use crate::application::ports::ApplicationInspector;
use crate::domain::{ApplicationStatus, RestartError};

/// Fetch and normalize the current status of `app`.
///
/// # Errors
///
/// Returns `RestartError::PlatformQuery` if the platform lookup fails. The
/// failure is not retried here.
pub async fn fetch(
    inspector: &impl ApplicationInspector,
    app: &str,
) -> Result<ApplicationStatus, RestartError> {
    let descriptor = inspector
        .get_application(app)
        .await
        .map_err(|e| RestartError::platform(app, &e))?;
    let status = ApplicationStatus::from_descriptor(app, descriptor);
    tracing::debug!(
        app,
        state = %status.state,
        desired = status.desired_instances,
        running = status.running_instances,
        "probed application status"
    );
    Ok(status)
}
