use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntakeError>;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Store error: {0}")]
    Store(#[from] dua_store::StoreError),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}
