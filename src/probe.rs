use crate::api::{ApiError, VersionApi};
use futures::future::join_all;
use std::io::Write;
use tracing::{error, info, warn};

pub struct ProbeResult {
    pub node: String,
    pub version: Result<String, ApiError>,
}

impl ProbeResult {
    pub fn is_failure(&self) -> bool {
        self.version.is_err()
    }
}

async fn probe_node(api: &(dyn VersionApi + Send + Sync)) -> ProbeResult {
    let version = api.version().await;
    match &version {
        Ok(version) if version.is_empty() => {
            warn!(node = api.name(), "Node answered without a version")
        }
        Ok(version) => info!(node = api.name(), version = version.as_str(), "Node version"),
        Err(err) => error!(node = api.name(), error = err.to_string(), "Node version unavailable"),
    }
    ProbeResult {
        node: api.name().to_string(),
        version,
    }
}

/// Fetches every node concurrently, results keep the order of `apis`.
pub async fn probe(apis: &[Box<dyn VersionApi + Send + Sync>]) -> Vec<ProbeResult> {
    join_all(apis.iter().map(|api| probe_node(api.as_ref()))).await
}

/// Writes `name<TAB>version` for every successful fetch. Returns true when
/// no fetch failed.
pub fn report<W: Write>(results: &[ProbeResult], mut out: W) -> std::io::Result<bool> {
    let mut all_succeeded = true;
    for result in results {
        if result.is_failure() {
            all_succeeded = false;
        }
        if let Ok(version) = &result.version {
            writeln!(out, "{}\t{}", result.node, version)?;
        }
    }
    out.flush()?;
    Ok(all_succeeded)
}
