//! Configuração do pool (imutável após a construção).
//!
//! Variáveis de ambiente (mesmo estilo do `telemetry`):
//! - `AMM_FEE_PPM`: taxa do swap em ppm (padrão 10_000 = 1%)
//! - `AMM_STRICT_TOKEN_REQUIREMENT`: `true|false|1|0` (padrão `true`)

use crate::amm::error::Result;
use crate::amm::error_catalog::AmmErrorCode;
use crate::amm::types::{FeePolicy, Ppm, PPM_SCALE};
use crate::amm_err;

pub const ENV_FEE_PPM: &str = "AMM_FEE_PPM";
pub const ENV_STRICT_TOKEN_REQUIREMENT: &str = "AMM_STRICT_TOKEN_REQUIREMENT";

/// Parâmetros fixados na criação do pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Estratégia de taxa aplicada aos dois sentidos de swap.
    pub fee: FeePolicy,
    /// `true`: depósitos puxam exatamente o token exigido pela taxa atual.
    /// `false`: puxam todo o token ofertado; o excedente fica nas reservas.
    pub strict_token_requirement: bool,
}

impl PoolConfig {
    /// Geração 1: sem taxa, token ofertado puxado integralmente.
    pub const fn no_fee() -> Self {
        Self { fee: FeePolicy::NONE, strict_token_requirement: false }
    }

    /// Geração 2: 1% sobre o input, token puxado no mínimo exigido.
    pub const fn standard() -> Self {
        Self { fee: FeePolicy::ONE_PERCENT, strict_token_requirement: true }
    }

    pub fn with_fee_ppm(mut self, fee_ppm: Ppm) -> Self {
        self.fee = FeePolicy::new(fee_ppm);
        self
    }

    pub fn with_strict_token_requirement(mut self, strict: bool) -> Self {
        self.strict_token_requirement = strict;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.fee.fee_ppm >= PPM_SCALE {
            return Err(amm_err!(
                AmmErrorCode::InvalidConfig,
                fee_ppm => self.fee.fee_ppm,
                max_exclusive => PPM_SCALE,
            ));
        }
        Ok(())
    }

    /// Lê a configuração do ambiente, partindo de [`PoolConfig::standard`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Mesmo que `from_env`, com fonte de variáveis injetável.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::standard();
        if let Some(raw) = lookup(ENV_FEE_PPM) {
            let fee_ppm = raw.trim().parse::<Ppm>().map_err(|_| {
                amm_err!(AmmErrorCode::InvalidConfig, { ENV_FEE_PPM => raw.as_str() })
            })?;
            config = config.with_fee_ppm(fee_ppm);
        }
        if let Some(raw) = lookup(ENV_STRICT_TOKEN_REQUIREMENT) {
            let strict = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(amm_err!(
                        AmmErrorCode::InvalidConfig,
                        { ENV_STRICT_TOKEN_REQUIREMENT => raw.as_str() }
                    ))
                }
            };
            config = config.with_strict_token_requirement(strict);
        }
        config.validate()?;
        Ok(config)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::standard()
    }
}
