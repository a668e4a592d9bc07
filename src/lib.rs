//! # sp-listings
//!
//! Client for the Selling Partner API Search Listings Items operation
//! (`GET /listings/2021-08-01/items/{sellerId}`).
//!
//! ```rust,ignore
//! use sp_listings::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> sp_listings::Result<()> {
//!     let client = ListingsClient::new(
//!         ClientConfig::new("https://sellingpartnerapi-na.amazon.com")
//!             .header("x-amz-access-token", "Atza|..."),
//!     )?;
//!
//!     let params = SearchParams::new("A1SELLER", "ATVPDKIKX0DER")
//!         .included_data(&[IncludedData::Summaries, IncludedData::Issues])
//!         .page_size(20);
//!     let response = client.search_listings_items(&params).await?;
//!     println!("{} listings", response.number_of_results);
//!     Ok(())
//! }
//! ```

pub use error::AppError;

/// Most commonly used types in one import
pub mod prelude {
    pub use crate::Result;
    pub use crate::api::client::ListingsClient;
    pub use crate::api::config::{ClientConfig, ConfigOverrides, EffectiveConfig};
    pub use crate::api::models::{
        IdentifiersType, IncludedData, IssueSeverity, Item, ListingStatus, SearchParams,
        SearchResponse, SortBy, SortOrder,
    };
    pub use crate::api::transport::{HttpRequest, HttpResponse, HttpTransport, TransportFailure};
    pub use crate::error::{ApiError, AppError, ConfigError, ErrorDetail, ValidationError};
}

/// Main architecture layers (dependency flow: CLI → API → Core)
pub mod api; // Listings client, transport, models
pub mod cli; // Command-line interface
pub mod core; // Validation and error normalization
pub mod storage; // Profile configuration and credentials

/// Support modules (used across layers)
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
