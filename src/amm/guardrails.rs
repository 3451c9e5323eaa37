//! Validações e helpers numéricos seguros para o pool.
//! Objetivo: entradas seguras e divisões/multiplicações sem estouro.

use crate::amm_err;

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::types::{Reserves, Wad, U256};

#[inline]
pub fn ensure_reserves(input_reserve: Wad, output_reserve: Wad) -> Result<()> {
    if input_reserve == 0 || output_reserve == 0 {
        return Err(amm_err!(
            AmmErrorCode::ZeroReserve,
            input_reserve => input_reserve,
            output_reserve => output_reserve,
        ));
    }
    Ok(())
}

/// Pool provisionado: nativo, token e shares todos > 0.
#[inline]
pub fn ensure_provisioned(reserves: Reserves, total_shares: Wad) -> Result<()> {
    if reserves.native == 0 || reserves.token == 0 || total_shares == 0 {
        return Err(amm_err!(
            AmmErrorCode::InvalidState,
            native_reserve => reserves.native,
            token_reserve => reserves.token,
            total_shares => total_shares,
        ));
    }
    Ok(())
}

#[inline]
pub fn checked_add(a: Wad, b: Wad) -> Result<Wad> {
    a.checked_add(b)
        .ok_or_else(|| amm_err!(AmmErrorCode::OverflowNumeric, op => "add", a => a, b => b))
}

#[inline]
pub fn checked_sub(a: Wad, b: Wad) -> Result<Wad> {
    a.checked_sub(b)
        .ok_or_else(|| amm_err!(AmmErrorCode::OverflowNumeric, op => "sub", a => a, b => b))
}

#[inline]
pub fn mul_u128_to_u256(a: Wad, b: Wad) -> U256 {
    U256::from(a) * U256::from(b)
}

#[inline]
pub fn u256_to_u128_checked(v: U256) -> Result<Wad> {
    if v > U256::from(u128::MAX) {
        Err(amm_err!(AmmErrorCode::OverflowNumeric, value => v))
    } else {
        Ok(v.as_u128())
    }
}

/// `floor(a * b / d)` com produto em 256 bits. `d == 0` é erro numérico.
pub fn mul_div_floor(a: Wad, b: Wad, d: Wad) -> Result<Wad> {
    if d == 0 {
        return Err(amm_err!(AmmErrorCode::OverflowNumeric, op => "div", d => 0));
    }
    u256_to_u128_checked(mul_u128_to_u256(a, b) / U256::from(d))
}

/// Divisão com arredondamento *nearest (ties-to-even)* em U256 → U256
pub fn div_nearest_even_u256(n: U256, d: U256) -> Result<U256> {
    if d.is_zero() {
        return Err(amm_err!(AmmErrorCode::OverflowNumeric, op => "div", d => 0));
    }
    let q = n / d;
    let two_r = (n % d) << 1;
    let one = U256::from(1u8);
    if two_r < d {
        return Ok(q);
    }
    if two_r > d {
        return Ok(q + one);
    }
    // empate: arredonda para o par
    if (q & one) == one {
        Ok(q + one)
    } else {
        Ok(q)
    }
}

/// Versão que retorna u128 (com checagem de overflow no downcast)
pub fn div_nearest_even_u256_to_u128(n: U256, d: U256) -> Result<Wad> {
    let q = div_nearest_even_u256(n, d)?;
    u256_to_u128_checked(q)
}

#[inline]
pub(crate) fn ceil_div_u256(n: U256, d: U256) -> U256 {
    // (n + d - 1) / d, assumindo d>0
    (n + (d - U256::from(1u8))) / d
}
