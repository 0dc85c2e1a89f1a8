// LogAnalyzer - core/analysis.rs
//
// The per-task analysis step run after the target passed its accessibility
// probe. The shipped implementation is a stand-in: it sleeps for a bounded,
// randomised time. The delay source is injectable so tests can make timing
// deterministic.

use crate::core::model::TaskDescriptor;
use crate::util::constants::{DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS};
use rand::Rng;
use std::time::Duration;

/// Boxed cause carried by `TaskError::AnalysisFailure`.
pub type AnalysisFault = Box<dyn std::error::Error + Send + Sync>;

/// Work performed on a task whose target is reachable.
///
/// Called concurrently from many task runner threads; implementations must
/// not rely on being called in submission order.
pub trait Analysis: Send + Sync {
    fn analyse(&self, task: &TaskDescriptor) -> Result<(), AnalysisFault>;
}

// =============================================================================
// Delay sources
// =============================================================================

/// Produces the simulated work duration for a task.
pub trait WorkDelay: Send + Sync {
    fn delay_for(&self, task: &TaskDescriptor) -> Duration;
}

/// Uniformly random delay in `[min, max]` (both inclusive).
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl RandomDelay {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (self.min, self.max)
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::from_millis(DEFAULT_MIN_DELAY_MS, DEFAULT_MAX_DELAY_MS)
    }
}

impl WorkDelay for RandomDelay {
    fn delay_for(&self, _task: &TaskDescriptor) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

/// The same delay for every task.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay(pub Duration);

impl WorkDelay for FixedDelay {
    fn delay_for(&self, _task: &TaskDescriptor) -> Duration {
        self.0
    }
}

impl<F> WorkDelay for F
where
    F: Fn(&TaskDescriptor) -> Duration + Send + Sync,
{
    fn delay_for(&self, task: &TaskDescriptor) -> Duration {
        self(task)
    }
}

// =============================================================================
// Simulated analysis
// =============================================================================

/// Stand-in analysis: sleeps for the duration chosen by its delay source.
///
/// Never fails. The sleep holds no lock, so runners proceed independently.
pub struct SimulatedAnalysis {
    delay: Box<dyn WorkDelay>,
}

impl SimulatedAnalysis {
    pub fn new(delay: impl WorkDelay + 'static) -> Self {
        Self {
            delay: Box::new(delay),
        }
    }

    /// Zero-delay analysis, for tests and dry runs.
    pub fn instant() -> Self {
        Self::new(FixedDelay(Duration::ZERO))
    }
}

impl Default for SimulatedAnalysis {
    fn default() -> Self {
        Self::new(RandomDelay::default())
    }
}

impl std::fmt::Debug for SimulatedAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedAnalysis").finish_non_exhaustive()
    }
}

impl Analysis for SimulatedAnalysis {
    fn analyse(&self, task: &TaskDescriptor) -> Result<(), AnalysisFault> {
        let delay = self.delay.delay_for(task);
        tracing::trace!(task = %task.id, delay_ms = delay.as_millis() as u64, "Simulating analysis");
        std::thread::sleep(delay);
        Ok(())
    }
}
