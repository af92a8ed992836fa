use datagen_engine::EncodeError;
use thiserror::Error;

use crate::host::HostError;

/// Why a table could not be produced.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
