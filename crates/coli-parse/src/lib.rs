//! HTML extraction for the cost-of-living calculator pages.
//!
//! Two pages are understood: the calculator form, whose `<option>` elements
//! list the available metros, and the compute results page, which carries a
//! note plus the index and average price tables.

pub mod error;
pub mod normalize;
pub mod options;
pub mod results;

pub use error::{ExtractError, Section};
pub use options::parse_metro_options;
pub use results::parse_comparison;
