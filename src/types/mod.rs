// ABOUTME: Validated domain types for image references and catalog data.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;
mod image_source;
mod price;
mod signed_url;
mod variant;

pub use id::VariantId;
pub use image_source::{ClassifierRules, ImageSource};
pub use price::{Price, PriceDisplay};
pub use signed_url::SignedUrl;
pub use variant::VariantRecord;
