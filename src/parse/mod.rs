//! parse
//!
//! Pure functions turning raw tool output into structured results.
//!
//! # Design
//!
//! The tool's command-line output is treated as a semi-structured protocol.
//! All knowledge of its textual shape lives here (and in the command
//! construction of each backend), so a change in the tool's output format
//! is fixed in exactly one place.
//!
//! Every parser returns [`DvcsError::Parse`](crate::DvcsError::Parse) on
//! unexpected input; no low-level parser error type escapes.
//!
//! # Modules
//!
//! - [`log`]: changelog entries, XML (`--style xml`) and tab-template forms
//! - [`branches`]: `branches -c` listings
//! - [`status`]: `status` lines
//! - [`summary`]: push/pull confirmation text
//! - [`merge`]: merge-tool JSON objects embedded in merge output

pub mod branches;
pub mod log;
pub mod merge;
pub mod status;
pub mod summary;

pub use branches::parse_branches;
pub use log::{parse_date, parse_template_log, parse_xml_log, LOG_TEMPLATE};
pub use merge::{parse_conflicts, MergeConflict};
pub use status::parse_status;
pub use summary::parse_change_summary;
