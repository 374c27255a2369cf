#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Background content generation.
//!
//! Providers that need network access are checked out of the world as
//! [`GenerationJob`]s. The [`ContentLoader`] runs them on a dedicated worker
//! thread so the frame loop never blocks, and hands each finished job back as a
//! [`Command::CompleteGeneration`].

use std::{
    io,
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use munch_core::{Command, GenerationJob, GenerationResult};
use thiserror::Error;

const WORKER_NAME: &str = "munch-content-loader";

/// Configuration parameters required to construct the loader.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    queue_depth: usize,
}

impl Config {
    /// Creates a configuration allowing `queue_depth` jobs to wait for the worker.
    #[must_use]
    pub const fn new(queue_depth: usize) -> Self {
        Self { queue_depth }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(4)
    }
}

/// Failures reported when handing a job to the worker.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The worker already holds the maximum number of queued jobs.
    #[error("generation queue is full")]
    QueueFull(GenerationJob),
    /// The worker thread is gone.
    #[error("content loader worker has stopped")]
    Disconnected(GenerationJob),
}

/// Runs generation jobs off the frame loop.
#[derive(Debug)]
pub struct ContentLoader {
    jobs: Option<Sender<GenerationJob>>,
    results: Receiver<GenerationResult>,
    worker: Option<JoinHandle<()>>,
}

impl ContentLoader {
    /// Starts the worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system refuses to spawn the thread.
    pub fn spawn(config: Config) -> io::Result<Self> {
        let depth = config.queue_depth.max(1);
        let (job_sender, job_receiver) = bounded::<GenerationJob>(depth);
        let (result_sender, result_receiver) = unbounded::<GenerationResult>();

        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_owned())
            .spawn(move || run_worker(&job_receiver, &result_sender))?;

        Ok(Self {
            jobs: Some(job_sender),
            results: result_receiver,
            worker: Some(worker),
        })
    }

    /// Queues `job` for the worker without blocking.
    ///
    /// # Errors
    ///
    /// Hands the job back when the queue is full or the worker has stopped.
    pub fn submit(&self, job: GenerationJob) -> Result<(), LoaderError> {
        let Some(jobs) = self.jobs.as_ref() else {
            return Err(LoaderError::Disconnected(job));
        };
        log::debug!("queueing generation ticket {}", job.ticket().epoch());
        jobs.try_send(job).map_err(|error| match error {
            TrySendError::Full(job) => LoaderError::QueueFull(job),
            TrySendError::Disconnected(job) => LoaderError::Disconnected(job),
        })
    }

    /// Submits the checked-out job, if any, and collects finished generations.
    pub fn handle(&mut self, job: Option<GenerationJob>, out: &mut Vec<Command>) {
        if let Some(job) = job {
            if let Err(error) = self.submit(job) {
                log::warn!("{error}; generating inline");
                let job = match error {
                    LoaderError::QueueFull(job) | LoaderError::Disconnected(job) => job,
                };
                out.push(Command::CompleteGeneration { result: job.run() });
            }
        }
        let _ = self.drain(out);
    }

    /// Moves every finished generation into `out`, returning how many arrived.
    pub fn drain(&self, out: &mut Vec<Command>) -> usize {
        let before = out.len();
        out.extend(
            self.results
                .try_iter()
                .map(|result| Command::CompleteGeneration { result }),
        );
        out.len() - before
    }

    /// Blocks up to `timeout` for the next finished generation.
    pub fn wait(&self, timeout: Duration, out: &mut Vec<Command>) -> bool {
        match self.results.recv_timeout(timeout) {
            Ok(result) => {
                out.push(Command::CompleteGeneration { result });
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("content loader worker stopped unexpectedly");
                false
            }
        }
    }
}

impl Drop for ContentLoader {
    fn drop(&mut self) {
        drop(self.jobs.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("content loader worker panicked");
            }
        }
    }
}

fn run_worker(jobs: &Receiver<GenerationJob>, results: &Sender<GenerationResult>) {
    for job in jobs.iter() {
        let ticket = job.ticket();
        log::debug!(
            "generating level {} for ticket {}",
            job.level(),
            ticket.epoch()
        );
        let result = job.run();
        if let Err(error) = &result.outcome {
            log::warn!("generation for ticket {} failed: {error}", ticket.epoch());
        }
        if results.send(result).is_err() {
            log::debug!("content loader dropped before ticket {} finished", ticket.epoch());
            break;
        }
    }
}
