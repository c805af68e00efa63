pub mod cache;
pub mod client_ext;
pub mod endp;
pub mod error;
pub mod schema;
pub mod www;

pub use cache::QueryCache;
pub use client_ext::ClientExt;
pub use error::{Error, Result};
pub use www::Provider;

use std::time::Duration;

/// Build the shared HTTP client used by every query lane.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::ClientBuilder::new()
        .user_agent(concat!("tickergrid/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(15))
        .build()?;
    Ok(client)
}
