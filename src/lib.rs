pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::ClientSettings;
pub use self::core::{
    batch::{BatchSummary, BatchValidator, CheckOutcome},
    client::AccessValidationClient,
    gate::PageGate,
    AccessCheck, AccessRequest, AccessValidator, ConfigProvider, NavigationMask,
};
pub use utils::error::{AccessError, Result};
