use crate::api::ApiError;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

/// Decodes a successful JSON response. A non-success status yields `Ok(None)`,
/// transport and decoding failures are returned to the caller.
pub async fn handle_api_response<T>(
    response: Result<reqwest::Response, reqwest::Error>,
    operation_name: &str,
) -> Result<Option<T>, ApiError>
where
    T: DeserializeOwned,
{
    match response {
        Ok(resp) if resp.status().is_success() => {
            let body = resp.bytes().await.map_err(|err| {
                error!(
                    error = err.to_string(),
                    "Failed to read response body for {}", operation_name
                );
                ApiError::Transport(err)
            })?;
            match serde_json::from_slice::<T>(&body) {
                Ok(data) => Ok(Some(data)),
                Err(err) => {
                    error!("Failed to parse JSON for {}: {}", operation_name, err.to_string());
                    Err(ApiError::Decode(err))
                }
            }
        }
        Ok(resp) => {
            warn!(
                status = resp.status().as_u16(),
                "Failed to {}: non-success status code", operation_name
            );
            Ok(None)
        }
        Err(err) => {
            error!(
                error = err.to_string(),
                "Failed to {}, check your configuration", operation_name
            );
            Err(ApiError::Transport(err))
        }
    }
}
