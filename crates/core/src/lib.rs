//! BytTech Core - domain library for the storefront.
//!
//! This crate holds everything the storefront computes but does not serve:
//! the cart line model and its transforms, the deterministic catalog
//! generator, the filter/sort/paginate pipeline, and price formatting.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions, with no I/O.
//! The storefront binary parses requests into these types, runs the
//! pipeline, and renders the results.
//!
//! # Modules
//!
//! - [`cart`] - Cart lines, lenient decoding of stored carts, merge/update
//! - [`catalog`] - Categories, brands, products, and the generator
//! - [`pipeline`] - Filtering, sorting, and pagination over the catalog
//! - [`price`] - Ruble display formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod pipeline;
pub mod price;

pub use cart::CartLine;
pub use catalog::{Brand, Category, Product};
pub use pipeline::{CatalogFilter, CatalogPage, Pagination, SortKey};
pub use price::format_rub;
