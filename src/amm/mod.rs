pub mod types;
pub mod guardrails;
pub mod swap;
pub mod liquidity;
pub mod pricing;
pub mod token;
pub mod pool;
pub mod shared;

// referência BigRational para goldens
pub mod ref_golden;

// módulos unificados de erro
pub mod error_catalog;
pub mod error;
pub mod error_map;

pub use error::{AmmError, Result};
pub use error_catalog::AmmErrorCode;
pub use pool::Pool;
pub use shared::SharedPool;
pub use token::{FungibleToken, TokenLedger};
pub use types::{AccountId, FeePolicy, LiquidityReceipt, Reserves, WithdrawalReceipt};
