use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
