//! Change history for grocery-cli
//!
//! Every create, update and delete of an item or budget is appended to a
//! line-delimited JSON log (`audit.log`) with the before and after values.
//!
//! - `AuditEntry`: one logged change.
//! - `AuditLogger`: appends entries and reads them back.
//! - `generate_diff`: summarises the fields that changed between two states.
//!
//! ```rust,ignore
//! use grocery::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Item,
//!     item.id.to_string(),
//!     Some(item.name.clone()),
//!     &item,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
