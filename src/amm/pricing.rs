//! Utilitários de cotação para UI/roteadores: spot price, preço de execução,
//! slippage e mínimo aceito. Nada aqui é usado na execução dos swaps, que
//! trabalha sempre com as reservas inteiras exatas.

use crate::amm_err;

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::guardrails::{div_nearest_even_u256, div_nearest_even_u256_to_u128, u256_to_u128_checked};
use super::swap::get_amount_out;
use super::types::{Ppm, Wad, PPM_SCALE, U256, WAD};

/// Preço à vista **reserve_a / reserve_b** em WAD (1e18 = 1.0), nearest-even.
pub fn get_price(reserve_a: Wad, reserve_b: Wad) -> Result<Wad> {
    if reserve_a == 0 || reserve_b == 0 {
        return Err(amm_err!(
            AmmErrorCode::ZeroReserve,
            reserve_a => reserve_a,
            reserve_b => reserve_b,
        ));
    }
    let n = U256::from(reserve_a) * U256::from(WAD);
    div_nearest_even_u256_to_u128(n, U256::from(reserve_b))
}

/// Preço efetivo do swap: **out/in** em WAD.
pub fn execution_price(input: Wad, input_reserve: Wad, output_reserve: Wad, fee_ppm: Ppm) -> Result<Wad> {
    if input == 0 {
        return Err(amm_err!(AmmErrorCode::InvalidState, input => 0));
    }
    let out = get_amount_out(input, input_reserve, output_reserve, fee_ppm)?;
    let n = U256::from(out) * U256::from(WAD);
    div_nearest_even_u256_to_u128(n, U256::from(input))
}

/// Slippage relativo em **PPM** de `p_exec` contra o spot `R_out/R_in` (sempre ≥0):
/// slippage_ppm = ((spot - p_exec) / spot) * 1e6
pub fn slippage_ppm(input: Wad, input_reserve: Wad, output_reserve: Wad, fee_ppm: Ppm) -> Result<Ppm> {
    let spot = get_price(output_reserve, input_reserve)?;
    let exec = execution_price(input, input_reserve, output_reserve, fee_ppm)?;
    if exec >= spot {
        return Ok(0);
    }
    let num = (U256::from(spot) - U256::from(exec)) * U256::from(PPM_SCALE);
    let q = u256_to_u128_checked(div_nearest_even_u256(num, U256::from(spot))?)?;
    Ok(q.min(u128::from(PPM_SCALE)) as Ppm)
}

/// **min_out** para a UI dada uma tolerância (0..1e6 ppm):
/// min_out = floor( out * (1 - tol) )
pub fn min_out_with_tolerance(
    input: Wad,
    input_reserve: Wad,
    output_reserve: Wad,
    fee_ppm: Ppm,
    slippage_tolerance_ppm: Ppm,
) -> Result<Wad> {
    let out = get_amount_out(input, input_reserve, output_reserve, fee_ppm)?;
    let tol = slippage_tolerance_ppm.min(PPM_SCALE);
    let n = U256::from(out) * U256::from(PPM_SCALE - tol);
    u256_to_u128_checked(n / U256::from(PPM_SCALE))
}
