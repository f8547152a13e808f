pub mod feed;
pub mod file;
pub mod http;

pub use feed::{FeedSource, decode};
pub use file::FileSource;
pub use http::HttpSource;
