// LogAnalyzer - app/engine.rs
//
// Execution engine: runs every submitted task concurrently and returns one
// outcome per task, in arrival order.
//
// Architecture:
//   - Fan-out: one scoped thread per task (default), or a fixed set of worker
//     threads claiming tasks from a shared cursor (`Concurrency::Bounded`).
//   - Fan-in: a bounded `mpsc::sync_channel`. A full channel blocks the
//     sender; outcomes are never dropped. Capacity 0 is a rendezvous handoff.
//   - Termination: each unit of work holds a `CompletionGuard`. A closer
//     thread owns the engine's own sender, waits on the `CompletionTracker`,
//     then drops it. Once every sender is gone the aggregation loop on the
//     calling thread drains the channel and ends.
//   - `thread::scope` joins every thread before `run` returns, so nothing
//     outlives the call.

use crate::app::runner::TaskRunner;
use crate::app::tracker::CompletionTracker;
use crate::core::analysis::{Analysis, SimulatedAnalysis};
use crate::core::model::{Outcome, TaskDescriptor};
use crate::platform::fs::{LocalFs, ResourceProbe};
use crate::util::constants::{DEFAULT_CHANNEL_CAPACITY, WORKER_THREAD_PREFIX};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, SyncSender};
use std::thread;
use std::time::Instant;

// =============================================================================
// Configuration
// =============================================================================

/// How task runners are mapped onto threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Concurrency {
    /// One thread per submitted task.
    #[default]
    PerTask,
    /// At most this many worker threads, each running tasks until none remain.
    Bounded(NonZeroUsize),
}

impl Concurrency {
    /// Build from a worker count where 0 means one thread per task.
    pub fn from_max_workers(max_workers: usize) -> Self {
        NonZeroUsize::new(max_workers).map_or(Self::PerTask, Self::Bounded)
    }

    /// Number of threads started for `task_count` tasks.
    pub fn workers_for(&self, task_count: usize) -> usize {
        match self {
            Self::PerTask => task_count,
            Self::Bounded(limit) => limit.get().min(task_count),
        }
    }
}

/// Tuning knobs for one engine. Neither affects which outcomes are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Capacity of the result channel. 0 is valid (synchronous handoff).
    pub channel_capacity: usize,
    pub concurrency: Concurrency,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            concurrency: Concurrency::PerTask,
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Concurrent task execution engine.
///
/// Stateless between calls: all synchronisation state is created inside
/// `run` and retired before it returns, so one engine may serve many runs.
pub struct Engine {
    config: EngineConfig,
    probe: Box<dyn ResourceProbe>,
    analysis: Box<dyn Analysis>,
}

impl Engine {
    /// Engine probing the local filesystem and running the simulated analysis.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            probe: Box::new(LocalFs),
            analysis: Box::new(SimulatedAnalysis::default()),
        }
    }

    pub fn with_probe(mut self, probe: impl ResourceProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_analysis(mut self, analysis: impl Analysis + 'static) -> Self {
        self.analysis = Box::new(analysis);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every task and return exactly one outcome per task.
    ///
    /// Blocks until all tasks have finished. Outcomes are in arrival
    /// (completion) order, not submission order. A failing task never stops
    /// the others; failures are reported in its outcome.
    pub fn run(&self, tasks: &[TaskDescriptor]) -> Vec<Outcome> {
        let total = tasks.len();
        let workers = self.config.concurrency.workers_for(total);
        let started = Instant::now();

        tracing::info!(
            tasks = total,
            workers,
            channel_capacity = self.config.channel_capacity,
            "Run started"
        );

        let runner = TaskRunner::new(self.probe.as_ref(), self.analysis.as_ref());
        let tracker = CompletionTracker::new();
        let cursor = AtomicUsize::new(0);
        let (tx, rx) = mpsc::sync_channel::<Outcome>(self.config.channel_capacity);
        let mut outcomes: Vec<Outcome> = Vec::with_capacity(total);

        thread::scope(|scope| {
            let runner = &runner;
            let tracker = &tracker;
            let cursor = &cursor;

            // -----------------------------------------------------------------
            // Fan-out
            // -----------------------------------------------------------------
            match self.config.concurrency {
                Concurrency::PerTask => {
                    for (index, task) in tasks.iter().enumerate() {
                        let guard = tracker.enter();
                        let tx = tx.clone();
                        let spawned = thread::Builder::new()
                            .name(format!("{WORKER_THREAD_PREFIX}-{index}"))
                            .spawn_scoped(scope, move || {
                                let _guard = guard;
                                deliver(&tx, runner.run(task));
                            });

                        // The rejected closure (and its guard) is already
                        // dropped; run the task here so it still reports.
                        if let Err(e) = spawned {
                            tracing::warn!(
                                task = %task.id,
                                error = %e,
                                "Could not start task runner thread; running inline"
                            );
                            outcomes.push(runner.run(task));
                        }
                    }
                }
                Concurrency::Bounded(_) => {
                    let mut started_workers = 0;
                    for index in 0..workers {
                        let guard = tracker.enter();
                        let tx = tx.clone();
                        let spawned = thread::Builder::new()
                            .name(format!("{WORKER_THREAD_PREFIX}-{index}"))
                            .spawn_scoped(scope, move || {
                                let _guard = guard;
                                while let Some(task) = claim(cursor, tasks) {
                                    deliver(&tx, runner.run(task));
                                }
                            });
                        match spawned {
                            Ok(_) => started_workers += 1,
                            Err(e) => tracing::warn!(
                                worker = index,
                                error = %e,
                                "Could not start worker thread"
                            ),
                        }
                    }

                    if started_workers == 0 {
                        if total > 0 {
                            tracing::warn!("No worker threads started; running tasks inline");
                        }
                        while let Some(task) = claim(cursor, tasks) {
                            outcomes.push(runner.run(task));
                        }
                    }
                }
            }

            // -----------------------------------------------------------------
            // Close-on-done
            // -----------------------------------------------------------------
            // If this thread cannot start, its closure (holding `tx`) is
            // dropped on the spot and the channel closes once the workers'
            // own senders are gone.
            let closer = thread::Builder::new()
                .name(format!("{WORKER_THREAD_PREFIX}-closer"))
                .spawn_scoped(scope, move || {
                    tracker.wait();
                    tracing::trace!("All task runners finished; closing result channel");
                    drop(tx);
                });
            if let Err(e) = closer {
                tracing::warn!(error = %e, "Could not start closer thread");
            }

            // -----------------------------------------------------------------
            // Fan-in
            // -----------------------------------------------------------------
            for outcome in rx.iter() {
                tracing::debug!(
                    task = %outcome.id(),
                    status = %outcome.status(),
                    received = outcomes.len() + 1,
                    total,
                    "Outcome received"
                );
                outcomes.push(outcome);
            }
        });

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        tracing::info!(
            tasks = total,
            outcomes = outcomes.len(),
            succeeded,
            failed = outcomes.len() - succeeded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Run complete"
        );
        debug_assert_eq!(outcomes.len(), total, "one outcome per task");

        outcomes
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Take the next unclaimed task, if any.
fn claim<'t>(cursor: &AtomicUsize, tasks: &'t [TaskDescriptor]) -> Option<&'t TaskDescriptor> {
    tasks.get(cursor.fetch_add(1, Ordering::Relaxed))
}

/// Hand an outcome to the aggregator, blocking while the channel is full.
fn deliver(tx: &SyncSender<Outcome>, outcome: Outcome) {
    if let Err(mpsc::SendError(outcome)) = tx.send(outcome) {
        // Only possible if the aggregating thread has already unwound.
        tracing::error!(task = %outcome.id(), "Result channel closed; outcome lost");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::{AnalysisFault, FixedDelay};
    use crate::core::model::Status;
    use std::collections::HashMap;
    use std::io;
    use std::path::Path;
    use std::time::Duration;

    /// Probe that treats paths containing "missing" as absent.
    struct NameProbe;

    impl ResourceProbe for NameProbe {
        fn stat(&self, target: &Path) -> io::Result<()> {
            if target.to_string_lossy().contains("missing") {
                Err(io::Error::from(io::ErrorKind::NotFound))
            } else {
                Ok(())
            }
        }
        fn open(&self, _target: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    fn engine(config: EngineConfig) -> Engine {
        Engine::new(config)
            .with_probe(NameProbe)
            .with_analysis(SimulatedAnalysis::instant())
    }

    fn tasks(n: usize) -> Vec<TaskDescriptor> {
        (0..n)
            .map(|i| {
                let target = if i % 3 == 0 {
                    format!("/logs/missing-{i}.log")
                } else {
                    format!("/logs/app-{i}.log")
                };
                TaskDescriptor::new(format!("task-{i}"), target, "custom")
            })
            .collect()
    }

    fn counts_by_id(outcomes: &[Outcome]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for o in outcomes {
            *counts.entry(o.id().to_string()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let outcomes = engine(EngineConfig::default()).run(&[]);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_empty_input_bounded() {
        let config = EngineConfig {
            concurrency: Concurrency::from_max_workers(4),
            ..Default::default()
        };
        assert!(engine(config).run(&[]).is_empty());
    }

    #[test]
    fn test_one_outcome_per_task() {
        let input = tasks(40);
        let outcomes = engine(EngineConfig::default()).run(&input);

        assert_eq!(outcomes.len(), input.len());
        let counts = counts_by_id(&outcomes);
        for task in &input {
            assert_eq!(counts.get(&task.id), Some(&1), "task {}", task.id);
        }
        for o in &outcomes {
            let task = input.iter().find(|t| t.id == o.id()).unwrap();
            assert_eq!(o.target(), task.target);
            let expected = if task.target.contains("missing") {
                Status::Failure
            } else {
                Status::Success
            };
            assert_eq!(o.status(), expected);
        }
    }

    #[test]
    fn test_rendezvous_channel_is_correct() {
        let config = EngineConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        let input = tasks(64);
        let outcomes = engine(config).run(&input);
        assert_eq!(outcomes.len(), 64);
        assert_eq!(counts_by_id(&outcomes).len(), 64);
    }

    #[test]
    fn test_bounded_pool_runs_every_task_once() {
        let config = EngineConfig {
            channel_capacity: 1,
            concurrency: Concurrency::from_max_workers(3),
        };
        let input = tasks(50);
        let outcomes = engine(config).run(&input);
        assert_eq!(outcomes.len(), 50);
        assert!(counts_by_id(&outcomes).values().all(|&c| c == 1));
    }

    #[test]
    fn test_duplicate_ids_produce_duplicate_outcomes() {
        let input = vec![
            TaskDescriptor::new("dup", "/logs/a.log", ""),
            TaskDescriptor::new("dup", "/logs/b.log", ""),
        ];
        let outcomes = engine(EngineConfig::default()).run(&input);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(counts_by_id(&outcomes)["dup"], 2);
    }

    #[test]
    fn test_arrival_order_not_submission_order() {
        let slow_first = |t: &TaskDescriptor| {
            if t.id == "first" {
                Duration::from_millis(200)
            } else {
                Duration::ZERO
            }
        };
        let engine = Engine::new(EngineConfig::default())
            .with_probe(NameProbe)
            .with_analysis(SimulatedAnalysis::new(slow_first));

        let input = vec![
            TaskDescriptor::new("first", "/logs/a.log", ""),
            TaskDescriptor::new("second", "/logs/b.log", ""),
        ];
        let outcomes = engine.run(&input);

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].id(), "second");
        assert_eq!(outcomes[1].id(), "first");
    }

    #[test]
    fn test_tasks_run_concurrently() {
        let engine = Engine::new(EngineConfig::default())
            .with_probe(NameProbe)
            .with_analysis(SimulatedAnalysis::new(FixedDelay(Duration::from_millis(100))));

        let input: Vec<_> = (0..20)
            .map(|i| TaskDescriptor::new(format!("t{i}"), format!("/logs/{i}.log"), ""))
            .collect();

        let start = Instant::now();
        let outcomes = engine.run(&input);
        let elapsed = start.elapsed();

        assert_eq!(outcomes.len(), 20);
        // Sequential execution would take at least 2 s.
        assert!(elapsed < Duration::from_millis(1_500), "took {elapsed:?}");
    }

    #[test]
    fn test_panicking_analysis_does_not_lose_outcomes() {
        struct PanicOnOdd;
        impl Analysis for PanicOnOdd {
            fn analyse(&self, task: &TaskDescriptor) -> Result<(), AnalysisFault> {
                let n: usize = task.id.trim_start_matches("task-").parse()?;
                if n % 2 == 1 {
                    panic!("odd task {n}");
                }
                Ok(())
            }
        }

        let engine = Engine::default()
            .with_probe(NameProbe)
            .with_analysis(PanicOnOdd);
        let input: Vec<_> = (0..10)
            .map(|i| TaskDescriptor::new(format!("task-{i}"), format!("/logs/{i}.log"), ""))
            .collect();

        let outcomes = engine.run(&input);
        assert_eq!(outcomes.len(), 10);
        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        assert_eq!(failed, 5);
    }

    #[test]
    fn test_engine_is_reusable() {
        let engine = engine(EngineConfig::default());
        for _ in 0..5 {
            assert_eq!(engine.run(&tasks(10)).len(), 10);
        }
    }

    #[test]
    fn test_concurrency_from_max_workers() {
        assert_eq!(Concurrency::from_max_workers(0), Concurrency::PerTask);
        assert_eq!(Concurrency::from_max_workers(0).workers_for(7), 7);
        assert_eq!(Concurrency::from_max_workers(4).workers_for(7), 4);
        assert_eq!(Concurrency::from_max_workers(16).workers_for(7), 7);
    }
}
