//! Food catalog domain.
//!
//! - [`food::Food`]: a catalog entry with its nutrition facts
//! - [`query::CatalogQuery`]: type filter plus name search
//! - [`page::Pagination`]: fixed-size pages and the page number window

pub mod food;
pub mod page;
pub mod query;
