mod config;
mod filter;
mod record;
mod walker;

pub use filter::{AcceptAll, FileFilter};
pub use record::FileEntry;
pub use walker::{CrawlError, Crawler, discover_all, discover_all_unfiltered};
