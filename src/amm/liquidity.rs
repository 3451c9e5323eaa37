//! Liquidez (CPMM): inicialização, depósito proporcional e saque de shares.
//! Políticas:
//! - shares iniciais: 1:1 com o nativo depositado (quem inicializa fixa a taxa)
//! - token exigido, shares mintadas e amounts de saque: **floor**
//! - shares de depósito: menor valor entre o lado nativo e o lado token
//! - over-burn só é tolerado para o holder único (clamp em `total_shares`)

use crate::amm_err;

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::guardrails::{checked_add, mul_div_floor};
use super::types::{Reserves, Wad};

/// Plano de um depósito, calculado antes de qualquer transferência.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositPlan {
    pub shares_minted: Wad,
    pub native_added: Wad,
    pub token_pulled: Wad,
    /// `true` quando o depósito é a transição de inicialização do pool.
    pub initializes: bool,
}

/// Shares da inicialização: `native` (1:1). Depósito unilateral é rejeitado,
/// pois deixaria uma reserva zerada com shares em circulação.
pub fn initial_shares(native: Wad, token: Wad) -> Result<Wad> {
    if (native == 0) != (token == 0) {
        return Err(amm_err!(
            AmmErrorCode::InvalidState,
            native => native,
            token => token,
        ));
    }
    Ok(native)
}

/// Token que a taxa atual exige para `native_sent`: `floor(dn · T / N)`.
pub fn required_token_amount(native_sent: Wad, reserves: Reserves) -> Result<Wad> {
    mul_div_floor(native_sent, reserves.token, reserves.native)
}

/// Shares que `amount` de um lado vale em pool existente: `floor(amount · S / R)`.
/// O depósito minta o menor valor entre os dois lados.
pub fn shares_for_deposit(amount: Wad, reserve: Wad, total_shares: Wad) -> Result<Wad> {
    mul_div_floor(amount, total_shares, reserve)
}

/// Monta o plano de depósito para o estado atual.
///
/// Com `strict_token_requirement` o pool puxa exatamente o token exigido;
/// sem ele puxa tudo o que foi ofertado e o excedente fica nas reservas.
/// Nos dois casos ofertar menos que o exigido é erro.
pub fn plan_deposit(
    reserves: Reserves,
    total_shares: Wad,
    native_sent: Wad,
    token_offered: Wad,
    strict_token_requirement: bool,
) -> Result<DepositPlan> {
    if total_shares == 0 {
        let shares_minted = initial_shares(native_sent, token_offered)?;
        return Ok(DepositPlan {
            shares_minted,
            native_added: native_sent,
            token_pulled: token_offered,
            initializes: shares_minted > 0,
        });
    }

    let required = required_token_amount(native_sent, reserves)?;
    if token_offered < required {
        return Err(amm_err!(
            AmmErrorCode::InsufficientTokenAmount,
            required => required,
            offered => token_offered,
            native_sent => native_sent,
        ));
    }
    let token_pulled = if strict_token_requirement { required } else { token_offered };
    // cada lado limita o mint: sem isso, depósitos cujo token exigido arredonda
    // para 0 acumulariam shares com direito a token
    let shares_minted = shares_for_deposit(native_sent, reserves.native, total_shares)?
        .min(shares_for_deposit(token_pulled, reserves.token, total_shares)?);

    // reservas e supply precisam caber depois do commit
    checked_add(reserves.native, native_sent)?;
    checked_add(reserves.token, token_pulled)?;
    checked_add(total_shares, shares_minted)?;

    Ok(DepositPlan { shares_minted, native_added: native_sent, token_pulled, initializes: false })
}

/// Quantas shares de fato queimar.
/// `requested > held` só passa quando o caller detém todo o supply.
pub fn effective_burn(requested: Wad, held: Wad, total_shares: Wad) -> Result<Wad> {
    if requested <= held {
        return Ok(requested);
    }
    if held == total_shares && total_shares > 0 {
        return Ok(total_shares);
    }
    Err(amm_err!(
        AmmErrorCode::InsufficientShares,
        requested => requested,
        held => held,
    ))
}

/// Amounts devolvidos ao queimar `burn` shares: `floor(burn · R / S)` por lado.
pub fn withdrawal_amounts(reserves: Reserves, burn: Wad, total_shares: Wad) -> Result<(Wad, Wad)> {
    let native_out = mul_div_floor(burn, reserves.native, total_shares)?;
    let token_out = mul_div_floor(burn, reserves.token, total_shares)?;
    Ok((native_out, token_out))
}
