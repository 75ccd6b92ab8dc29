//! Restart batches: contiguous groups of instance indices.

use std::ops::Range;

/// A non-empty, contiguous run of instance indices restarted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartBatch {
    /// 1-based position of this batch in the plan.
    pub number: usize,
    indices: Range<u32>,
}

impl RestartBatch {
    /// Instance indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl std::fmt::Display for RestartBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self.indices.clone().map(|i| i.to_string()).collect();
        write!(f, "[{}]", rendered.join(" "))
    }
}

/// Partition `[0, desired)` into contiguous batches of `batch_size`; the last
/// batch holds the remainder.
///
/// Returns no batches when `desired` or `batch_size` is zero.
#[must_use]
pub fn partition(desired: u32, batch_size: u32) -> Vec<RestartBatch> {
    if batch_size == 0 {
        return Vec::new();
    }
    (0..desired)
        .step_by(batch_size as usize)
        .enumerate()
        .map(|(i, start)| RestartBatch {
            number: i + 1,
            indices: start..start.saturating_add(batch_size).min(desired),
        })
        .collect()
}
