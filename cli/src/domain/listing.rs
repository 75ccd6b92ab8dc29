//! Parser for the platform's free-text per-instance listing.
//!
//! Rows of `cf app <name>` start with `#<index>` followed by the instance
//! state, e.g. `#0   running   2024-05-01T10:00:00Z   0.3%   ...`. The format
//! is owned by the platform; a row that is not recognized counts as not
//! running, which can only delay completion, never fake it.

/// Token the platform prints for an instance that is up.
pub const RUNNING_TOKEN: &str = "running";

/// One listing row attributed to a requested instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceStatusLine {
    pub instance_index: u32,
    pub raw_text: String,
    pub is_running: bool,
}

/// Rows of one listing that belong to the requested instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceListing {
    pub lines: Vec<InstanceStatusLine>,
}

impl InstanceListing {
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_running).count()
    }

    /// Matched rows in original order, each terminated by a newline.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.iter().fold(String::new(), |mut acc, line| {
            acc.push_str(&line.raw_text);
            acc.push('\n');
            acc
        })
    }
}

/// Keep the rows whose `#<index>` marker names one of `instances`.
///
/// The whole run of digits after `#` is the index, so `#10` never matches
/// instance `1`. A matched row is running iff it contains `running`.
#[must_use]
pub fn parse_instance_listing<S: AsRef<str>>(lines: &[S], instances: &[u32]) -> InstanceListing {
    let lines = lines
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|line| {
            let index = leading_index(line)?;
            instances.contains(&index).then(|| InstanceStatusLine {
                instance_index: index,
                raw_text: line.to_string(),
                is_running: line.contains(RUNNING_TOKEN),
            })
        })
        .collect();
    InstanceListing { lines }
}

/// Index from a `#<digits>` row prefix, if the line has one.
fn leading_index(line: &str) -> Option<u32> {
    let rest = line.strip_prefix('#')?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    // Leading zeros are not the platform's rendering of an index.
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}
