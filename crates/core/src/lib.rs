//! Core domain types and shared logic for the Atelier storefront.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Application configuration
//! - Rewrite field kinds
//! - Product-variant drafts and the combination generator
//! - Order status lifecycle and order number generation

pub mod config;
pub mod error;
pub mod fields;
pub mod order;
pub mod variants;

pub use error::{Error, Result};
pub use fields::FieldKind;
pub use order::{OrderStatus, generate_order_number};
pub use variants::{CombinationDefaults, VariantDraft, generate_combinations};

/// Default stock assigned to generated variant drafts.
pub const DEFAULT_VARIANT_STOCK: i64 = 10;

/// Number of characters of input text used for the rewrite cache fingerprint.
pub const FINGERPRINT_PREFIX_CHARS: usize = 50;

/// Currency code used when the settings table has none.
pub const DEFAULT_CURRENCY: &str = "EGP";
