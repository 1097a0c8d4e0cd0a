//! Domain layer
//!
//! Pure data types and logic: the ad record shape and the set difference
//! that decides which ads are new. No I/O lives here.

pub mod ad;
pub mod diff;

pub use ad::{AdRecord, AdSet};
pub use diff::new_ads;
