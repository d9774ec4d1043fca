mod resolver;

pub use resolver::{NAME_PLACEHOLDER, OutputMapping, resolve, resolve_one};
