/// Failures a query lane can surface.
///
/// The provider answers some refusals (rate limits, unknown functions) with
/// HTTP 200 and a prose note instead of an error status; those arrive here as
/// [`Error::Provider`] so the UI can show them rather than spin forever.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider refused the request: {0}")]
    Provider(String),

    #[error("missing configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
