//! Normalized application status snapshot and the predicates evaluated on it.
//!
//! Pure functions only: no I/O, no async.

use crate::domain::listing::InstanceListing;

/// Platform state label meaning the application is meant to be up.
pub const STATE_STARTED: &str = "started";
/// Platform state label meaning the application is stopped.
pub const STATE_STOPPED: &str = "stopped";

/// Raw descriptor returned by the platform's "get application" operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    /// Lifecycle label as reported by the platform (open set).
    pub state: String,
    /// Target instance count.
    pub instance_count: u32,
    /// Instances currently up.
    pub running_instances: u32,
}

/// Status snapshot rebuilt on every probe.
///
/// `desired_instances` and `running_instances` always come from the same
/// descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationStatus {
    pub name: String,
    pub state: String,
    pub desired_instances: u32,
    pub running_instances: u32,
}

impl ApplicationStatus {
    /// Normalize a descriptor. A stopped application has no desired count.
    #[must_use]
    pub fn from_descriptor(name: &str, descriptor: AppDescriptor) -> Self {
        let desired_instances = if descriptor.state.eq_ignore_ascii_case(STATE_STOPPED) {
            0
        } else {
            descriptor.instance_count
        };
        Self {
            name: name.to_string(),
            state: descriptor.state,
            desired_instances,
            running_instances: descriptor.running_instances,
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state.eq_ignore_ascii_case(STATE_STARTED)
    }

    /// Started and every desired instance is running.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.is_started() && self.running_instances == self.desired_instances
    }

    /// Started but the counts disagree: the platform has begun tearing an
    /// instance down.
    #[must_use]
    pub fn restart_initiated(&self) -> bool {
        self.is_started() && self.running_instances != self.desired_instances
    }

    /// Stable overall, and every instance of the batch individually reports
    /// running in the listing.
    #[must_use]
    pub fn batch_recovered(&self, listing: &InstanceListing, batch_len: usize) -> bool {
        self.is_stable() && listing.running_count() == batch_len
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Application \"{}\" current state is \"{}\" with requested instances \"{}\" and running instances \"{}\"",
            self.name, self.state, self.desired_instances, self.running_instances
        )
    }
}
