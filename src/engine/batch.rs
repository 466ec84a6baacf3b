//! Ordered concurrent batch execution.
//!
//! Inputs are dealt round-robin to `min(concurrency, inputs)` workers. Each
//! worker runs its items one at a time through the [`TaskRunner`]; results,
//! the batch-wide [`WarningSet`] and the progress observer all sit behind a
//! single lock, so every progress event reflects exactly the state it
//! reports.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use opentelemetry::KeyValue;
use tokio::sync::Mutex;
use tracing::{Instrument, debug, error, info, warn};
use uuid::Uuid;

use super::diagnostics::{NoiseFilter, WarningSet};
use super::partition::Partition;
use crate::error::{Error, Result};
use crate::event::{ProgressEvent, ProgressObserver};
use crate::model::{BatchRequest, BatchResult, TaskSpec};
use crate::runner::TaskRunner;
use crate::telemetry::batch::{record_batch_completed, start_batch_span, start_worker_span};
use crate::telemetry::metrics;

/// Runs batches of inputs through a [`TaskRunner`].
pub struct BatchExecutor<R> {
    runner: Arc<R>,
    noise: Arc<NoiseFilter>,
}

impl<R> BatchExecutor<R>
where
    R: TaskRunner + 'static,
{
    pub fn new(runner: R, noise: NoiseFilter) -> Self {
        Self::with_shared_runner(Arc::new(runner), noise)
    }

    /// Build an executor around a runner the caller keeps a handle to.
    pub fn with_shared_runner(runner: Arc<R>, noise: NoiseFilter) -> Self {
        Self {
            runner,
            noise: Arc::new(noise),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run every input of `request` and return the results in input order.
    ///
    /// `on_progress` is called once per completed item with the warnings that
    /// item surfaced. The first failing item aborts the batch: workers finish
    /// the invocation they are in, start nothing new, and the failure is
    /// returned in place of any results.
    pub async fn run(
        &self,
        request: BatchRequest,
        on_progress: Option<ProgressObserver>,
    ) -> Result<Vec<BatchResult>> {
        let (inputs, task, concurrency) = request.into_parts();
        let partition = Partition::new(inputs.len(), concurrency);
        let batch_id = Uuid::new_v4();
        let span = start_batch_span(
            &task.name,
            &batch_id,
            partition.total(),
            partition.workers(),
        );

        self.run_partitioned(inputs, task, partition, on_progress)
            .instrument(span)
            .await
    }

    async fn run_partitioned(
        &self,
        inputs: Vec<String>,
        task: TaskSpec,
        partition: Partition,
        on_progress: Option<ProgressObserver>,
    ) -> Result<Vec<BatchResult>> {
        if inputs.is_empty() {
            info!("no inputs, nothing to run");
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let task_label = KeyValue::new("task", task.name.clone());
        let shared = Arc::new(Mutex::new(Aggregate::new(inputs.len(), on_progress)));
        let halted = Arc::new(AtomicBool::new(false));
        let inputs: Arc<[String]> = inputs.into();
        let task = Arc::new(task);

        info!(workers = partition.workers(), "batch started");

        let handles: Vec<_> = (0..partition.workers())
            .map(|worker| {
                let span = start_worker_span(worker, partition.assigned(worker));
                let ctx = Worker {
                    id: worker,
                    partition,
                    runner: Arc::clone(&self.runner),
                    noise: Arc::clone(&self.noise),
                    task: Arc::clone(&task),
                    inputs: Arc::clone(&inputs),
                    shared: Arc::clone(&shared),
                    halted: Arc::clone(&halted),
                };
                tokio::spawn(ctx.run().instrument(span))
            })
            .collect();

        let mut first_error = None;
        for handle in handles {
            let outcome = handle
                .await
                .unwrap_or_else(|e| Err(Error::Worker(e.to_string())));
            if let Err(e) = outcome {
                match first_error {
                    None => first_error = Some(e),
                    Some(_) => debug!(error = %e, "further worker failure"),
                }
            }
        }

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        let mut aggregate = shared.lock().await;
        record_batch_completed(&tracing::Span::current(), aggregate.completed);

        if let Some(e) = first_error {
            metrics::batch_duration_ms().record(
                duration_ms,
                &[task_label, KeyValue::new("result", "error")],
            );
            error!(completed = aggregate.completed, error = %e, "batch failed");
            return Err(e);
        }

        metrics::batch_duration_ms()
            .record(duration_ms, &[task_label, KeyValue::new("result", "ok")]);
        info!(
            completed = aggregate.completed,
            warnings = aggregate.warnings.len(),
            duration_ms = duration_ms as u64,
            "batch completed"
        );
        aggregate.take_results()
    }
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Everything workers share. Only ever touched under the batch lock.
struct Aggregate {
    slots: Vec<Option<BatchResult>>,
    completed: usize,
    warnings: WarningSet,
    on_progress: Option<ProgressObserver>,
}

impl Aggregate {
    fn new(total: usize, on_progress: Option<ProgressObserver>) -> Self {
        Self {
            slots: vec![None; total],
            completed: 0,
            warnings: WarningSet::new(),
            on_progress,
        }
    }

    /// Store one result at its original index, fold its warnings into the
    /// batch set, and notify the observer. Returns the number of new warnings.
    fn record(&mut self, index: usize, result: BatchResult, lines: Vec<String>) -> usize {
        debug_assert!(self.slots[index].is_none(), "slot {index} filled twice");
        self.slots[index] = Some(result);
        self.completed += 1;

        let new_warnings = self.warnings.absorb(lines);
        let surfaced = new_warnings.len();
        if let Some(observer) = self.on_progress.as_mut() {
            observer(ProgressEvent {
                new_warnings,
                total: self.slots.len(),
                completed: self.completed,
            });
        }
        surfaced
    }

    fn take_results(&mut self) -> Result<Vec<BatchResult>> {
        std::mem::take(&mut self.slots)
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| Error::Other(format!("no result recorded for input {index}")))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

struct Worker<R> {
    id: usize,
    partition: Partition,
    runner: Arc<R>,
    noise: Arc<NoiseFilter>,
    task: Arc<TaskSpec>,
    inputs: Arc<[String]>,
    shared: Arc<Mutex<Aggregate>>,
    halted: Arc<AtomicBool>,
}

impl<R: TaskRunner> Worker<R> {
    async fn run(self) -> Result<()> {
        let task_label = [KeyValue::new("task", self.task.name.clone())];

        for position in 0..self.partition.assigned(self.id) {
            if self.halted.load(Ordering::Acquire) {
                debug!(position, "batch halted, stopping early");
                return Ok(());
            }

            let index = self.partition.global_index(self.id, position);
            let input = &self.inputs[index];
            let started = Instant::now();

            let output = match self.runner.run(&self.task, input).await {
                Ok(output) => output,
                Err(e) => return Err(self.halt(e, "spawn")),
            };

            if !output.is_success() {
                return Err(self.halt(
                    Error::TaskExecution {
                        input: input.clone(),
                        stderr: output.stderr,
                    },
                    "exit_status",
                ));
            }

            let value = match serde_json::from_str::<serde_json::Value>(&output.stdout) {
                Ok(value) => value,
                Err(source) => {
                    return Err(self.halt(
                        Error::OutputParse {
                            input: input.clone(),
                            source,
                        },
                        "bad_output",
                    ));
                }
            };

            let lines = self.noise.warnings(&output.stderr);
            let result = BatchResult {
                input: input.clone(),
                output: value,
            };
            let surfaced = self.shared.lock().await.record(index, result, lines);

            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            debug!(index, duration_ms = elapsed_ms as u64, surfaced, "item completed");
            metrics::items_completed().add(1, &task_label);
            metrics::item_duration_ms().record(elapsed_ms, &task_label);
            if surfaced > 0 {
                metrics::warnings_surfaced().add(surfaced as u64, &task_label);
            }
        }

        Ok(())
    }

    /// Stop sibling workers from picking up new items and pass `error` on.
    fn halt(&self, error: Error, reason: &'static str) -> Error {
        self.halted.store(true, Ordering::Release);
        metrics::items_failed().add(
            1,
            &[
                KeyValue::new("task", self.task.name.clone()),
                KeyValue::new("reason", reason),
            ],
        );
        warn!(reason, "item failed, halting batch");
        error
    }
}
