//! Terminal output for search results

pub mod table;

pub use table::ListingsTable;
