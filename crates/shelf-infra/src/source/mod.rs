//! Asset sources: byte streams behind clipboard locators.

mod http;
mod local_file;
mod scheme;

pub use http::HttpAssetSource;
pub use local_file::LocalFileSource;
pub use scheme::SchemeAssetSource;
