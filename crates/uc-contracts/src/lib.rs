//! Shared, version-pinned protocol identifiers.
//!
//! These constants are the single source of truth for schema/version strings that
//! appear in machine-readable output of the uC runtime tooling.

pub const UCDIAG_SCHEMA_VERSION: &str = "uc.ucdiag@0.1.0";

pub const UC_DISPATCH_RESOLVE_REPORT_SCHEMA_VERSION: &str = "uc-dispatch.resolve.report@0.1.0";
pub const UC_DISPATCH_TABLE_REPORT_SCHEMA_VERSION: &str = "uc-dispatch.table.report@0.1.0";
