use thiserror::Error;

use tienda_store::error::StoreError;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
