//! HTTP request handlers.

pub mod admin;
pub mod catalog;
pub mod checkout;
pub mod common;
pub mod images;
pub mod leads;
pub mod rewrite;

pub use admin::*;
pub use catalog::*;
pub use checkout::*;
pub use images::*;
pub use leads::*;
pub use rewrite::*;
