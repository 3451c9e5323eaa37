//! Funções puras de swap (CPMM x·y=k) com taxa sobre o input.
//! - get_amount_out: output (floor) ao vender `input` contra as reservas
//! - get_amount_in: menor input bruto que entrega ao menos `output` (exato)
//!
//! Fórmula única para as duas gerações de taxa (ppm):
//! `out = floor( in·(S-f)·R_out / (R_in·S + in·(S-f)) )`, `S = 1e6`.
//! Com `f = 10_000` o resultado é idêntico à forma `99/100`, pois o fator comum cancela.

use crate::{amm_bail, amm_err};

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::guardrails::{ceil_div_u256, ensure_reserves, u256_to_u128_checked};
use super::types::{Ppm, Wad, PPM_SCALE, U256};

#[inline]
fn fee_complement(fee_ppm: Ppm) -> Result<U256> {
    if fee_ppm >= PPM_SCALE {
        return Err(amm_err!(AmmErrorCode::InvalidConfig, fee_ppm => fee_ppm));
    }
    Ok(U256::from(PPM_SCALE - fee_ppm))
}

#[inline]
fn mul(a: U256, b: U256) -> Result<U256> {
    a.checked_mul(b)
        .ok_or_else(|| amm_err!(AmmErrorCode::OverflowNumeric, op => "mul"))
}

/// Output ao vender `input` do ativo de entrada.
/// Input zero cota zero (swaps nulos são válidos).
pub fn get_amount_out(input: Wad, input_reserve: Wad, output_reserve: Wad, fee_ppm: Ppm) -> Result<Wad> {
    ensure_reserves(input_reserve, output_reserve)?;
    let gamma = fee_complement(fee_ppm)?;
    if input == 0 {
        return Ok(0);
    }

    let input_net = mul(U256::from(input), gamma)?;
    let num = mul(input_net, U256::from(output_reserve))?;
    let den = mul(U256::from(input_reserve), U256::from(PPM_SCALE))?
        .checked_add(input_net)
        .ok_or_else(|| amm_err!(AmmErrorCode::OverflowNumeric, op => "add"))?;

    // den > 0 garantido por input_reserve > 0
    u256_to_u128_checked(num / den)
}

/// Menor input bruto tal que `get_amount_out(input, ..) >= output`.
///
/// Como `floor(n/d) >= out ⇔ n >= out·d`, a desigualdade fecha em
/// `in·(S-f)·(R_out - out) >= out·R_in·S`, logo
/// `in = ceil( out·R_in·S / ((S-f)·(R_out - out)) )` já é o mínimo.
pub fn get_amount_in(output: Wad, input_reserve: Wad, output_reserve: Wad, fee_ppm: Ppm) -> Result<Wad> {
    ensure_reserves(input_reserve, output_reserve)?;
    let gamma = fee_complement(fee_ppm)?;
    if output == 0 {
        return Ok(0);
    }
    // nenhum input esvazia o lado de saída
    if output >= output_reserve {
        amm_bail!(AmmErrorCode::InvalidState, output => output, output_reserve => output_reserve);
    }

    let num = mul(mul(U256::from(output), U256::from(input_reserve))?, U256::from(PPM_SCALE))?;
    let den = mul(gamma, U256::from(output_reserve - output))?;
    u256_to_u128_checked(ceil_div_u256(num, den))
}
