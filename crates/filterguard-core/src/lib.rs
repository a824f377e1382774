//! filterguard - required-filter enforcement for document-store queries.
//!
//! Operators configure, per collection, field names that every query filter
//! must reference (a tenant id, a date partition, ...). Before a query is
//! sent to the backing store, the connector calls [`FilterEnforcer::check`]
//! with the target collection and the query's predicate tree; a predicate
//! that never mentions a required field, at any nesting depth, is rejected.
//!
//! # Example
//!
//! ```
//! use filterguard_core::{EnforcerConfig, FilterEnforcer, Predicate};
//!
//! let config = EnforcerConfig::new().with_required_filters("orders:tenantId,orders:region");
//! let enforcer = FilterEnforcer::from_config(&config).unwrap();
//!
//! let filter: Predicate =
//!     serde_json::from_str(r#"{"$and": [{"tenantId": "t1"}, {"region": "us"}]}"#).unwrap();
//! assert!(enforcer.check("orders", &filter).is_ok());
//!
//! let filter: Predicate = serde_json::from_str(r#"{"tenantId": "t1"}"#).unwrap();
//! let err = enforcer.check("orders", &filter).unwrap_err();
//! assert_eq!(err.to_string(), "Collection 'orders' requires a filter on 'region'!");
//! ```

pub mod config;
pub mod enforcer;
pub mod error;
pub mod policy;
pub mod predicate;
pub mod search;
pub mod shared;

pub use config::EnforcerConfig;
pub use enforcer::FilterEnforcer;
pub use error::{error_codes, ConfigError, EnforcementError, Error};
pub use policy::{parse_required_filters, RequiredFilterRegistry};
pub use predicate::{Document, Predicate, Scalar};
pub use search::{contains_field, contains_field_within, DepthExceeded};
pub use shared::SharedFilterEnforcer;
