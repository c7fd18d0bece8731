use thiserror::Error;

/// Why the model could not be loaded. Always reported, never retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch of {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("buffer {index} is {actual} bytes, expected at least {expected}")]
    BufferTooShort {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported asset: {0}")]
    Unsupported(String),

    #[error("asset contains no triangle meshes")]
    EmptyModel,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface unavailable: {0}")]
    Surface(String),

    #[error("GPU error: {0}")]
    Gpu(String),
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("a model is already attached to this viewer")]
    AlreadyLoaded,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("invalid value {value:?} for `{key}`")]
    InvalidConfig { key: String, value: String },
}
