use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListerError {
    #[error("Failed to open directory")]
    OpenDirectory(#[source] std::io::Error),
}
