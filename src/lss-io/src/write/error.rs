use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("Failed to write the listing")]
    IOError(#[from] std::io::Error),

    #[error("Failed to serialize the listing to JSON")]
    JsonError(#[from] serde_json::Error),
}
