//! Calculation logic for the Commission Engine.
//!
//! This module contains the pure calculation functions: locale-aware
//! numeric normalization, store-size classification, bracket resolution,
//! store-group rollup, the central commission calculation with the 120%
//! compliance cap, and temporary-hire detection.

mod bracket;
mod commission;
mod grouping;
mod numeric;
mod store_size;
mod temporary;

pub use bracket::{ResolvedBracket, resolve_bracket};
pub use commission::{COMPLIANCE_CAP, calculate_commission};
pub use grouping::roll_up_groups;
pub use numeric::parse_locale_number;
pub use store_size::{EXTRA_LARGE_KEY, STANDARD_SIZES_KEY, classify_store_size};
pub use temporary::is_temporary_hire;
