use thiserror::Error;
use vrad_core::{CoreError, JobId, RadiologistId};
use vrad_pool::PoolError;
use vrad_queue::QueueError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    InvalidParameter(#[from] CoreError),

    #[error(transparent)]
    Causality(#[from] QueueError),

    #[error("radiologist pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("job {0} not found in the job log")]
    UnknownJob(JobId),

    #[error("{radiologist} released {found} but the completion event named {expected}")]
    JobMismatch {
        radiologist: RadiologistId,
        expected:    JobId,
        found:       JobId,
    },

    #[error("job id space exhausted after {0} jobs")]
    TooManyJobs(usize),

    #[error("engine has already run; build a fresh engine for each run")]
    AlreadyRun,
}

pub type SimResult<T> = Result<T, SimError>;
