use crate::domain::model::{PostalCode, ServiceRequest};
use crate::utils::error::Result;

/// Point lookup against the region mapping collection.
pub trait RegionStore: Send + Sync {
    /// `Ok(None)` when no mapping exists for `zip`.
    fn find_region(
        &self,
        zip: &PostalCode,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// Append-only sink for accepted service requests.
pub trait RequestStore: Send + Sync {
    fn insert_request(
        &self,
        request: &ServiceRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
