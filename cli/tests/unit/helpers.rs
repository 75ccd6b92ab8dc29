//! Shared test helpers: a simulated platform, a recording reporter, and
//! output constructors.

#![allow(dead_code)]

use std::process::{ExitStatus, Output};
use std::sync::Mutex;

use anyhow::Result;
use rolling_restart::application::ports::{
    ApplicationInspector, PlatformCommands, ProgressReporter,
};
use rolling_restart::domain::AppDescriptor;

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Simulated platform ───────────────────────────────────────────────────────

/// Behaviour knobs for `SimulatedPlatform`.
#[derive(Clone)]
pub struct Scenario {
    pub state: &'static str,
    pub desired: u32,
    /// Running count reported before any restart; `None` means all desired.
    pub initially_running: Option<u32>,
    /// Probes an instance stays down after its restart command.
    pub recovery_probes: u32,
    /// Restart commands are accepted but nothing happens.
    pub ignore_restarts: bool,
    /// Restart commands fail.
    pub reject_restarts: bool,
    /// Instances that never come back once restarted.
    pub stuck: Vec<u32>,
    /// Instances the listing keeps showing as `starting` although the counts
    /// recover.
    pub listing_stuck: Vec<u32>,
    /// Instances missing from the listing.
    pub listing_omits: Vec<u32>,
    /// 1-based probe number that fails.
    pub fail_probe_at: Option<u32>,
    /// 1-based `app <name>` listing that fails.
    pub fail_listing_at: Option<u32>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            state: "STARTED",
            desired: 3,
            initially_running: None,
            recovery_probes: 2,
            ignore_restarts: false,
            reject_restarts: false,
            stuck: Vec::new(),
            listing_stuck: Vec::new(),
            listing_omits: Vec::new(),
            fail_probe_at: None,
            fail_listing_at: None,
        }
    }
}

#[derive(Default)]
struct SimState {
    /// Remaining probes until each instance runs again (0 = running).
    down_for: Vec<u32>,
    restarted: Vec<u32>,
    commands: Vec<Vec<String>>,
    probes: u32,
    listings: u32,
}

/// An application whose instances go down when restarted and come back after
/// `recovery_probes` status probes.
pub struct SimulatedPlatform {
    scenario: Scenario,
    sim: Mutex<SimState>,
}

impl SimulatedPlatform {
    pub fn new(scenario: Scenario) -> Self {
        let sim = SimState {
            down_for: vec![0; scenario.desired as usize],
            ..SimState::default()
        };
        Self {
            scenario,
            sim: Mutex::new(sim),
        }
    }

    /// Instance indices that received a restart command, in issue order.
    pub fn restarted(&self) -> Vec<u32> {
        self.sim.lock().expect("lock").restarted.clone()
    }

    pub fn probes(&self) -> u32 {
        self.sim.lock().expect("lock").probes
    }

    pub fn listings(&self) -> u32 {
        self.sim.lock().expect("lock").listings
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.sim.lock().expect("lock").commands.clone()
    }

    fn is_down(&self, sim: &SimState, index: u32) -> bool {
        sim.down_for[index as usize] > 0
    }
}

impl ApplicationInspector for SimulatedPlatform {
    async fn get_application(&self, _name: &str) -> Result<AppDescriptor> {
        let mut sim = self.sim.lock().expect("lock");
        sim.probes += 1;
        if self.scenario.fail_probe_at == Some(sim.probes) {
            anyhow::bail!("cf curl: connection reset by peer");
        }

        let down = (0..self.scenario.desired)
            .filter(|&i| self.is_down(&sim, i))
            .count();
        let running = if sim.restarted.is_empty() {
            self.scenario
                .initially_running
                .unwrap_or(self.scenario.desired)
        } else {
            self.scenario.desired - u32::try_from(down).expect("fits")
        };

        // Time passes with every probe.
        for i in 0..self.scenario.desired {
            if !self.scenario.stuck.contains(&i) {
                let slot = &mut sim.down_for[i as usize];
                *slot = slot.saturating_sub(1);
            }
        }

        Ok(AppDescriptor {
            state: self.scenario.state.to_string(),
            instance_count: self.scenario.desired,
            running_instances: running,
        })
    }
}

impl PlatformCommands for SimulatedPlatform {
    async fn issue_command(&self, args: &[&str]) -> Result<Vec<String>> {
        let mut sim = self.sim.lock().expect("lock");
        sim.commands
            .push(args.iter().map(ToString::to_string).collect());
        match args {
            ["restart-app-instance", _, index] => {
                let index: u32 = index.parse()?;
                sim.restarted.push(index);
                if self.scenario.reject_restarts {
                    anyhow::bail!("cf restart-app-instance failed: Instance not found");
                }
                if !self.scenario.ignore_restarts {
                    sim.down_for[index as usize] = if self.scenario.stuck.contains(&index) {
                        u32::MAX
                    } else {
                        self.scenario.recovery_probes
                    };
                }
                Ok(vec![format!("Restarting instance {index} of process web...")])
            }
            ["app", name] => {
                sim.listings += 1;
                if self.scenario.fail_listing_at == Some(sim.listings) {
                    anyhow::bail!("cf app {name} failed: Not logged in");
                }
                let mut lines = vec![
                    format!("Showing health and status for app {name} in org o / space s..."),
                    String::new(),
                    "     state      since                  cpu    memory".to_string(),
                ];
                for i in 0..self.scenario.desired {
                    if self.scenario.listing_omits.contains(&i) {
                        continue;
                    }
                    let restarted = sim.restarted.contains(&i);
                    let starting = self.is_down(&sim, i)
                        || (restarted && self.scenario.listing_stuck.contains(&i));
                    let word = if starting { "starting" } else { "running" };
                    lines.push(format!("#{i}   {word}   2024-05-01T10:00:00Z   0.2%   96M of 1G"));
                }
                Ok(lines)
            }
            other => anyhow::bail!("unexpected command {other:?}"),
        }
    }
}

// ── Recording reporter ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    pub steps: Mutex<Vec<String>>,
    pub successes: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
    pub details: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn steps(&self) -> Vec<String> {
        self.steps.lock().expect("lock").clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().expect("lock").clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("lock").clone()
    }

    pub fn details(&self) -> Vec<String> {
        self.details.lock().expect("lock").clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.steps.lock().expect("lock").push(message.to_string());
    }
    fn success(&self, message: &str) {
        self.successes.lock().expect("lock").push(message.to_string());
    }
    fn warn(&self, message: &str) {
        self.warnings.lock().expect("lock").push(message.to_string());
    }
    fn detail(&self, text: &str) {
        self.details.lock().expect("lock").push(text.to_string());
    }
}
