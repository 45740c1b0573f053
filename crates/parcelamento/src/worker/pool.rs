use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info};

use crate::error::WorkerError;
use crate::pipeline::Pipeline;
use crate::worker::cancel::CancellationToken;
use crate::worker::job::{FailureKind, Job, JobResult};

pub struct WorkerPool {
    job_sender: Sender<Job>,
    result_receiver: Receiver<JobResult>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Starts `worker_count` threads sharing one pipeline.
    ///
    /// Every submitted job produces exactly one [`JobResult`], including jobs
    /// that panic or are skipped after cancellation.
    ///
    /// # Panics
    /// Panics if `worker_count` is 0.
    pub fn new(
        pipeline: Arc<Pipeline>,
        worker_count: usize,
        cancel: CancellationToken,
    ) -> Result<Self, WorkerError> {
        assert!(worker_count > 0, "worker_count must be > 0");
        let (job_sender, job_receiver) = bounded::<Job>(worker_count * 2);
        let (result_sender, result_receiver) = bounded::<JobResult>(worker_count * 2);

        let mut workers = Vec::with_capacity(worker_count);

        for worker_id in 0..worker_count {
            let job_rx = job_receiver.clone();
            let result_tx = result_sender.clone();
            let worker_cancel = cancel.clone();
            let worker_pipeline = Arc::clone(&pipeline);

            let handle = thread::Builder::new()
                .name(format!("parcelamento-worker-{}", worker_id))
                .spawn(move || {
                    run_worker(worker_id, job_rx, result_tx, worker_cancel, worker_pipeline);
                })
                .map_err(|e| WorkerError::SpawnFailed(e.to_string()))?;

            workers.push(handle);
        }

        info!("Started {} workers", worker_count);

        Ok(Self {
            job_sender,
            result_receiver,
            workers,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Blocks while the job queue is full.
    pub fn submit(&self, job: Job) -> Result<(), WorkerError> {
        self.job_sender
            .send(job)
            .map_err(|_| WorkerError::ChannelClosed)
    }

    /// Returns `None` once every worker has exited and all results were read.
    pub fn recv_result(&self) -> Option<JobResult> {
        self.result_receiver.recv().ok()
    }

    pub fn wait(self) {
        // Drop sender to signal workers to exit
        drop(self.job_sender);

        for (i, worker) in self.workers.into_iter().enumerate() {
            if let Err(e) = worker.join() {
                error!("Worker {} panicked: {:?}", i, e);
            } else {
                debug!("Worker {} finished", i);
            }
        }

        info!("All workers have stopped");
    }
}

fn run_worker(
    worker_id: usize,
    job_receiver: Receiver<Job>,
    result_sender: Sender<JobResult>,
    cancel: CancellationToken,
    pipeline: Arc<Pipeline>,
) {
    debug!("Worker {} started", worker_id);

    for job in job_receiver.iter() {
        let result = if cancel.is_cancelled() {
            debug!("Worker {} skipping cancelled job: {}", worker_id, job.file_name());
            JobResult::cancelled(job)
        } else {
            debug!("Worker {} processing job: {}", worker_id, job.file_name());
            run_job(&pipeline, job)
        };

        if let Err(e) = result_sender.send(result) {
            error!("Worker {} failed to send result: {}", worker_id, e);
            break;
        }
    }

    debug!("Worker {} stopped", worker_id);
}

fn run_job(pipeline: &Pipeline, job: Job) -> JobResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pipeline.run(job.file_name(), job.bytes())
    }));

    match outcome {
        Ok(Ok(analysis)) => JobResult::analyzed(job, analysis),
        Ok(Err(e)) => JobResult::failure(job, FailureKind::DocumentRead, e.to_string()),
        Err(payload) => {
            let message = format!("Worker panicked: {}", panic_message(payload.as_ref()));
            JobResult::failure(job, FailureKind::WorkerPanicked, message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
