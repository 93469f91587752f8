pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod render;
mod retry;

pub use error::FetchError;
pub use extract::extract_availability;
pub use fetch::PageFetcher;
pub use normalize::normalize_text;
pub use render::{HeadlessBrowser, PageRenderer};
