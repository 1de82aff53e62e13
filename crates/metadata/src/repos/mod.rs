//! Repository traits, one per aggregate.

pub mod carousel;
pub mod categories;
pub mod leads;
pub mod orders;
pub mod products;
pub mod settings;
pub mod variants;

pub use carousel::CarouselRepo;
pub use categories::CategoryRepo;
pub use leads::{LeadCounts, LeadRepo};
pub use orders::{OrderRepo, SalesSummary};
pub use products::{ProductFilter, ProductRepo};
pub use settings::SettingsRepo;
pub use variants::VariantRepo;
