//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use nearby::prelude::*;
//! ```

pub use crate::{Dataset, Engine, EngineConfig, NearbyError, Query, QueryKind};
