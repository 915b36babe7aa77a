pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] netvis_graphlib::Error),

    #[error(transparent)]
    Layout(#[from] netvis_layout::Error),

    #[error("Invalid config value at `{path}`: {message}")]
    InvalidConfig { path: String, message: String },
}

impl Error {
    pub(crate) fn invalid_config(path: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
