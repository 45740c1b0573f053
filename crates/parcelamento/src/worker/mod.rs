pub mod cancel;
pub mod job;
pub mod pool;

pub use cancel::CancellationToken;
pub use job::{FailureKind, Job, JobOutcome, JobResult};
pub use pool::WorkerPool;
