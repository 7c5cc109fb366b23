use thiserror::Error;
use vrad_core::{JobId, RadiologistId};

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("radiologist {0} is not on the roster")]
    UnknownRadiologist(RadiologistId),

    #[error("radiologist {radiologist} is already reading {current}")]
    AlreadyBusy {
        radiologist: RadiologistId,
        current:     JobId,
    },

    #[error("radiologist {0} is idle and has nothing to release")]
    NotBusy(RadiologistId),
}

pub type PoolResult<T> = Result<T, PoolError>;
