//! HTTP(S) acquisition for [`ImageSource::Remote`](super::ImageSource::Remote).
//!
//! The body is handed back as encoded bytes and decoded exactly like
//! [`ImageSource::Bytes`](super::ImageSource::Bytes). Redirects are followed;
//! any other non-success status is an error.

use super::backend::BackendError;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info};

/// Overall deadline for one download.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest response body accepted as a source image.
pub const MAX_REMOTE_BYTES: u64 = 256 * 1024 * 1024;

/// Download `url` and return the raw body.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, BackendError> {
    debug!(url, "fetching remote source");
    let response = match ureq::get(url).timeout(FETCH_TIMEOUT).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            return Err(BackendError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        Err(e) => {
            return Err(BackendError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }
    };

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_REMOTE_BYTES + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > MAX_REMOTE_BYTES {
        return Err(BackendError::Fetch {
            url: url.to_string(),
            reason: format!("response larger than {MAX_REMOTE_BYTES} bytes"),
        });
    }
    info!(url, bytes = bytes.len(), "fetched remote source");
    Ok(bytes)
}
