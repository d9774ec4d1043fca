mod cmdline;
mod error;
mod export;
mod filter;
mod output;
mod pipeline;

pub use cmdline::*;
pub use error::{EngineError, Result};
pub use export::*;
pub use filter::*;
pub use output::*;
pub use pipeline::*;
