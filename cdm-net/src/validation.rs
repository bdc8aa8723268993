use cdm_common::error::{CdmError, Result};
use url::Url;

/// Validates a URL, ensuring it uses an http(s) scheme before any request is
/// issued against it.
pub fn validate_url(url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| CdmError::Validation(format!("Failed to parse URL '{url_str}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CdmError::Validation(format!(
            "Invalid URL scheme for '{url_str}': must be http or https, but got '{other}'"
        ))),
    }
}
