use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Source folder {} does not exist.", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Destination folder {} does not exist.", .0.display())]
    DestinationNotFound(PathBuf),

    #[error("{} is not inside {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
