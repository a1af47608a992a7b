//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// `check` found drift between outline and tree
pub const NOT_IN_SYNC: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (invalid outline)
pub const DATAERR: i32 = 65;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
