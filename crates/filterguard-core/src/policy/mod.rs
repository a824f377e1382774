//! Required-filter policies.
//!
//! Policies come from a compact `collection:field,...` string (see
//! [`parser`]) or from a JSON policy document, and are held in an immutable
//! [`RequiredFilterRegistry`].

pub mod parser;
pub mod registry;

pub use parser::{parse_required_filters, ENTRY_SEPARATOR, FIELD_SEPARATOR};
pub use registry::RequiredFilterRegistry;
