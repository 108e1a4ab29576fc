//! Background execution of pipeline runs.
//!
//! A [`PipelineWorker`] runs one request at a time on a dedicated thread so
//! an interactive caller never blocks on seconds of transform work. The
//! worker is single-slot: submitting while a run is in flight is rejected
//! rather than silently spawning a second thread over the same output.
//! Completion - success or failure - is delivered exactly once through the
//! returned [`JobHandle`].

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{PipelineError, Result};
use crate::pipeline::{ProcessingReport, TransformPipeline};
use crate::request::ProcessingRequest;

/// Clears the in-flight flag when the worker thread ends, panicking or not.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-slot asynchronous adapter around [`TransformPipeline`].
pub struct PipelineWorker {
    pipeline: Arc<TransformPipeline>,
    in_flight: Arc<AtomicBool>,
}

impl PipelineWorker {
    pub fn new(pipeline: TransformPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a run is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start a run on a worker thread.
    ///
    /// Returns [`PipelineError::WorkerBusy`] if a previous run has not yet
    /// reached its terminal state.
    pub fn submit(&self, request: ProcessingRequest) -> Result<JobHandle> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(PipelineError::WorkerBusy);
        }

        let (tx, rx) = bounded(1);
        let pipeline = Arc::clone(&self.pipeline);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));

        let spawn = thread::Builder::new()
            .name("semitone-pipeline".into())
            .spawn(move || {
                let result = pipeline.run(&request);
                // Clear the slot before delivering, so a caller that waits
                // on the result can submit again immediately.
                drop(guard);
                // The receiver may be gone if the caller abandoned the
                // handle; a failed send is discarded, never an error.
                let _ = tx.send(result);
            });

        match spawn {
            Ok(handle) => Ok(JobHandle {
                result_rx: rx,
                thread: Some(handle),
                delivered: false,
            }),
            Err(e) => {
                self.in_flight.store(false, Ordering::Release);
                Err(PipelineError::Worker(format!(
                    "failed to spawn worker thread: {e}"
                )))
            }
        }
    }
}

/// Handle to one in-flight run.
///
/// Poll with [`poll()`](JobHandle::poll) from an event loop, or block with
/// [`wait()`](JobHandle::wait). Dropping the handle abandons the run: the
/// worker finishes on its own and its result is discarded.
pub struct JobHandle {
    result_rx: Receiver<Result<ProcessingReport>>,
    thread: Option<JoinHandle<()>>,
    delivered: bool,
}

impl JobHandle {
    /// Non-blocking check; yields the terminal result exactly once.
    pub fn poll(&mut self) -> Option<Result<ProcessingReport>> {
        if self.delivered {
            return None;
        }
        match self.result_rx.try_recv() {
            Ok(result) => {
                self.delivered = true;
                self.join_thread();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.delivered = true;
                self.join_thread();
                Some(Err(PipelineError::Worker(
                    "worker thread died without reporting".into(),
                )))
            }
        }
    }

    /// Whether the worker thread has finished.
    pub fn is_done(&self) -> bool {
        self.thread
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(true)
    }

    /// Block until the run reaches its terminal state.
    pub fn wait(mut self) -> Result<ProcessingReport> {
        if self.delivered {
            return Err(PipelineError::Worker("result already delivered".into()));
        }
        let result = match self.result_rx.recv() {
            Ok(result) => result,
            Err(_) => Err(PipelineError::Worker(
                "worker thread died without reporting".into(),
            )),
        };
        self.delivered = true;
        self.join_thread();
        result
    }

    fn join_thread(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
