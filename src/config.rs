//! Configuration for the passenger core.
//!
//! Centralizes what a frontend would otherwise hardcode: throttle
//! thresholds, the post-login redirect delay, wallet transfer parameters
//! and the remote endpoints.
//!
//! # Example
//!
//! ```rust
//! use curbside::config::{CurbsideConfig, ThrottleConfig};
//! use chrono::Duration;
//!
//! let config = CurbsideConfig {
//!     throttle: ThrottleConfig {
//!         max_attempts: 3,
//!         lockout_duration: Duration::minutes(30),
//!     },
//!     ..Default::default()
//! };
//! ```

use chrono::Duration;

/// Main configuration struct.
///
/// `CurbsideConfig::default()` carries the deployed defaults.
#[derive(Debug, Clone)]
pub struct CurbsideConfig {
    /// Login throttling thresholds.
    pub throttle: ThrottleConfig,

    /// Post-authentication redirect behavior.
    pub redirect: RedirectConfig,

    /// Wallet transfer parameters.
    pub wallet: WalletConfig,

    /// Remote endpoints.
    pub api: ApiConfig,
}

impl Default for CurbsideConfig {
    fn default() -> Self {
        Self {
            throttle: ThrottleConfig::default(),
            redirect: RedirectConfig::default(),
            wallet: WalletConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl CurbsideConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient settings for development: more attempts, short lockout,
    /// no redirect pause.
    pub fn development() -> Self {
        Self {
            throttle: ThrottleConfig {
                max_attempts: 10,
                lockout_duration: Duration::minutes(1),
            },
            redirect: RedirectConfig {
                delay: Duration::zero(),
            },
            ..Default::default()
        }
    }

    /// Stricter settings: fewer attempts, longer lockout, shorter wallet
    /// timeout.
    pub fn strict() -> Self {
        Self {
            throttle: ThrottleConfig {
                max_attempts: 3,
                lockout_duration: Duration::minutes(30),
            },
            wallet: WalletConfig {
                request_timeout: Duration::seconds(30),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Thresholds for login attempt throttling.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Failed attempts before the device is locked out.
    ///
    /// Default: 5
    pub max_attempts: u32,

    /// How long the lockout lasts after the last failed attempt.
    ///
    /// Default: 15 minutes
    pub lockout_duration: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lockout_duration: Duration::minutes(15),
        }
    }
}

/// Post-login redirect behavior.
#[derive(Debug, Clone)]
pub struct RedirectConfig {
    /// How long the success state is shown before redirecting.
    ///
    /// Default: 2 seconds
    pub delay: Duration,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            delay: Duration::seconds(2),
        }
    }
}

/// Wallet transfer parameters.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Address that receives fare payments.
    pub recipient: String,

    /// Gas limit for a plain ETH transfer.
    ///
    /// Default: 21000
    pub gas: u64,

    /// How long to wait for the wallet before giving up.
    ///
    /// Default: 60 seconds
    pub request_timeout: Duration,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            gas: 21_000,
            request_timeout: Duration::seconds(60),
        }
    }
}

/// Base URLs of the remote collaborators.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Mock REST API holding passenger records (`/signup` resource).
    pub user_api_base: String,

    /// Realtime database root for booking writes.
    pub booking_db_base: String,

    /// JSON-RPC endpoint of the wallet provider.
    pub wallet_rpc_url: String,
}
