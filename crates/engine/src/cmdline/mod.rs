//! Command line editing: a tokenizer that re-joins arguments and a scanner
//! that edits the raw text in place.

mod scanner;
mod tokenizer;

pub use scanner::{ArgBounds, arg_value, find_bounds, nth_index_of, remove_arg_and_value};
pub use tokenizer::{CommandLine, CommandToken};
