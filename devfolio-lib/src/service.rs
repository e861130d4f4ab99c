use crate::error::ServiceResult;
use crate::model::PortfolioData;
use async_trait::async_trait;

/// Storage capability implemented identically by every backend.
///
/// Implementations must be behaviorally interchangeable: any sequence of
/// get/update/reset calls leaves the provider in the same observable state
/// regardless of which backend is bound, modulo the URI shape returned by
/// `upload_image`.
#[async_trait]
pub trait PortfolioService: Send + Sync {
    /// Fetch the persisted aggregate. If none exists, create-and-persist the
    /// built-in default and return that same value (the written document is
    /// the fully materialized default, never a partial one).
    async fn get_profile(&self) -> ServiceResult<PortfolioData>;

    /// Replace the persisted aggregate wholesale. There is no field-level
    /// patching anywhere in the system.
    async fn update_profile(&self, data: &PortfolioData) -> ServiceResult<()>;

    /// Store an opaque binary (image) and return a stable retrieval URI: a
    /// self-contained data URI for the local backend, a remote object URL for
    /// hosted ones.
    async fn upload_image(&self, file_name: &str, bytes: &[u8]) -> ServiceResult<String>;

    /// Factory reset: overwrite the persisted aggregate with the built-in
    /// default, discarding all prior content.
    async fn reset_data(&self) -> ServiceResult<()>;
}
