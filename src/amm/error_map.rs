//! Mapeamento entre condições de domínio e códigos de erro do pool.
//! Usado para pré-checagem (UI, simulação) sem tocar no estado.
use crate::amm::error::AmmError;
use crate::amm::error_catalog::AmmErrorCode;
use crate::amm::swap::get_amount_out;
use crate::amm::types::{Ppm, Wad, PPM_SCALE};

/// Determina o código de erro para um swap a partir dos inputs brutos.
/// `reserves` é (entrada, saída); `None` significa que o swap passaria.
pub fn from_swap_inputs(
    input: Wad,
    reserves: (Wad, Wad),
    fee_ppm: Ppm,
    min_out: Wad,
) -> Option<AmmErrorCode> {
    if reserves.0 == 0 || reserves.1 == 0 {
        return Some(AmmErrorCode::InvalidState);
    }
    if fee_ppm >= PPM_SCALE {
        return Some(AmmErrorCode::InvalidConfig);
    }
    if reserves.0.checked_add(input).is_none() {
        return Some(AmmErrorCode::OverflowNumeric);
    }
    match get_amount_out(input, reserves.0, reserves.1, fee_ppm) {
        Ok(out) if out < min_out => Some(AmmErrorCode::SlippageExceeded),
        Ok(_) => None,
        Err(err) => Some(err.code),
    }
}

/// Determina o código de erro para um saque de `requested` shares.
pub fn from_withdrawal(requested: Wad, held: Wad, total_shares: Wad) -> Option<AmmErrorCode> {
    if total_shares == 0 {
        return Some(AmmErrorCode::InvalidState);
    }
    if requested > held && held != total_shares {
        return Some(AmmErrorCode::InsufficientShares);
    }
    None
}

/// Constrói um [`AmmError`] diretamente de um código.
pub fn to_error(code: AmmErrorCode) -> AmmError {
    AmmError::new(code)
}
