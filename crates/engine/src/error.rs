use thiserror::Error;
use vbatch_fs::CrawlError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("command line template has no value for `{arg}`: {template:?}")]
    MissingArgument { arg: String, template: String },

    #[error("command line template is empty")]
    EmptyTemplate,

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{0} is not supported yet")]
    Unsupported(&'static str),

    #[error("this exporter has already built its script")]
    AlreadyBuilt,

    #[error("background build worker stopped without a result")]
    WorkerLost,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CrawlError> for EngineError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::Unsupported(what) => EngineError::Unsupported(what),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
