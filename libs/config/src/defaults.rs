//! Default configuration values
//!
//! Fallbacks used when neither the configuration file nor the environment
//! provides a value.

/// Token precision defaults
pub mod tokens {
    /// SPL-style tokens carry 9 decimals
    pub const BID_DECIMALS: u32 = 9;

    pub const ASK_DECIMALS: u32 = 9;

    /// Largest decimals count that still undecimalizes exactly
    pub const MAX_DECIMALS: u32 = 28;
}

/// Quote tool defaults
pub mod quote {
    /// Accepted drift (base units) when checking curve / inverse-curve agreement
    pub const ROUND_TRIP_TOLERANCE: u64 = 8;
}

/// Logging defaults
pub mod logging {
    pub const LEVEL: &str = "info";
}

/// Configuration file locations
pub mod paths {
    pub const BASE_CONFIG: &str = "config/oracle.toml";

    /// Directory, relative to the base file, holding `<environment>.toml` overlays
    pub const ENVIRONMENTS_DIR: &str = "environments";

    /// Prefix for environment variable overrides (`SEN_TOKENS__BID_DECIMALS=6`)
    pub const ENV_PREFIX: &str = "SEN";
}
