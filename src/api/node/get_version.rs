use crate::api::ApiError;
use crate::api::node::ApiNode;
use crate::api::node::api_handler::handle_api_response;
use serde::de::Error as _;
use serde_json::{Map, Value};
use tracing::{debug, error};

pub const STATE_ROUTE: &str = "?requestType=getState";

// Only a JSON object is a valid state envelope, other fields are ignored
fn extract_version(mut state: Map<String, Value>) -> Result<String, serde_json::Error> {
    let version = state
        .remove("version")
        .ok_or_else(|| serde_json::Error::missing_field("version"))?;
    serde_json::from_value::<String>(version)
}

pub async fn fetch_version(api: &ApiNode) -> Result<String, ApiError> {
    let response = api.get(STATE_ROUTE).send().await;
    let version = match handle_api_response::<Map<String, Value>>(response, "fetch version").await? {
        Some(state) => extract_version(state).map_err(|err| {
            error!(node = api.name.as_str(), error = err.to_string(), "Invalid node state");
            ApiError::Decode(err)
        })?,
        None => String::new(),
    };
    debug!(node = api.name.as_str(), version = version.as_str(), "Fetched node version");
    Ok(version)
}
