// cdm-net/src/lib.rs
pub mod http;
pub mod validation;

pub use http::{build_http_client, download_artifact, fetch_version_index};
pub use validation::validate_url;
