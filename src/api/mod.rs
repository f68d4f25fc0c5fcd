use async_trait::async_trait;

pub mod error;
pub mod node;


pub use error::ApiError;

#[async_trait]
pub trait VersionApi {
    /// Display name of the remote, used in logs and output.
    fn name(&self) -> &str;

    /// Version reported by the remote, or an empty string when it answers
    /// with a non-success status.
    async fn version(&self) -> Result<String, ApiError>;
}
