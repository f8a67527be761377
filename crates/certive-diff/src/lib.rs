//! Value differencing for identity-governance change detection.
//!
//! This crate compares two versions of in-memory attribute data and
//! produces human-readable [`Difference`] records for audit trails and
//! certification reviews: account snapshots before and after provisioning,
//! entitlement lists between access reviews, detected changes during
//! reconciliation.
//!
//! # Modules
//!
//! - [`value`] - The closed [`Value`] type raw data is converted into
//! - [`bag`] - [`AttributeBag`] named attribute maps
//! - [`config`] - [`DiffConfig`] rendering bounds
//! - [`difference`] - The [`Difference`] change record
//! - [`stringify`] - Bounded display rendering
//! - [`engine`] - The [`DiffEngine`] comparison layers
//!
//! # Example
//!
//! ```
//! use certive_diff::{AttributeBag, DiffEngine};
//!
//! let before = AttributeBag::new()
//!     .with("title", "Engineer")
//!     .with("groups", vec!["dev", "oncall"]);
//! let after = AttributeBag::new()
//!     .with("title", "Manager")
//!     .with("groups", vec!["dev", "managers"]);
//!
//! let engine = DiffEngine::default();
//! let diffs = engine.diff_bags(Some(&before), Some(&after), &[], 0).unwrap();
//! assert_eq!(diffs.len(), 2);
//! assert!(!engine.bags_equal(Some(&before), Some(&after)));
//! ```

pub mod bag;
pub mod config;
pub mod difference;
pub mod engine;
pub mod stringify;
pub mod value;

// Re-export commonly used types
pub use bag::AttributeBag;
pub use config::{DiffConfig, DEFAULT_MAX_STRING_LEN, DEFAULT_MAX_VALUE_COUNT};
pub use difference::Difference;
pub use engine::DiffEngine;
pub use stringify::stringify;
pub use value::{EntityRef, Value};
