//! Request checking and failure normalization

/// Parameter validation for Search Listings Items
pub mod params;

/// Failed exchange to `ApiError` mapping
pub mod normalizer;
