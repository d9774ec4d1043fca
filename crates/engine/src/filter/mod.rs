mod matcher;

pub use matcher::{CompiledMatcher, extension_pattern};
