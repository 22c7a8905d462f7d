use crate::RequestId;

/// Work the platform must perform on behalf of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Query the price endpoint for `term`.
    SearchPrices { request_id: RequestId, term: String },
    /// Load the full local-vs-Kroger comparison table.
    FetchComparison { request_id: RequestId },
}
