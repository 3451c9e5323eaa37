//! Pool CPMM (x·y=k) de dois ativos (nativo × token fungível) com shares de
//! liquidez, swaps com taxa e cotações, tudo em aritmética inteira exata.

pub mod amm;
pub mod config;
pub mod telemetry;

pub use amm::types::U256;
pub use amm::{AccountId, AmmError, AmmErrorCode, Pool, SharedPool, TokenLedger};
pub use config::PoolConfig;
