//! Constants used throughout the stackforge application

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Version written into every generated package manifest
pub const MANIFEST_VERSION: &str = "0.1.0";

/// Sentinel line separating script-managed env entries from user content
pub const ENV_MARKER: &str = "# Database Configuration added by setup script";

/// Keys after which the env marker is inserted, when present
pub const ENV_ANCHOR_KEYS: &[&str] = &["NODE_ENV", "PORT", "PYTHON_PORT"];

/// Output paths that accumulate contributions instead of being overwritten
pub const MERGEABLE_PATHS: &[&str] = &[".env", ".env.example", ".gitignore"];

/// Listening ports baked into generated servers and deployment manifests
pub mod ports {
    pub const NODE_BACKEND: u16 = 5000;
    pub const PYTHON_BACKEND: u16 = 8000;
    pub const FRONTEND_DEV: u16 = 3000;
}

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
