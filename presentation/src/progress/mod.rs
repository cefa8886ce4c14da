//! Progress feedback while a reply streams in

pub mod reporter;
