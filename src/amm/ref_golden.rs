//! Referência de alta precisão ("goldens") baseada em **BigInt/BigRational**
//! para o pool CPMM (x·y=k) com taxa sobre o **input**.
//!
//! Objetivos desta referência:
//! 1. Calcular os resultados **contínuos/exatos** (sem quantização) de swap,
//!    depósito e saque.
//! 2. Servir de **oráculo** independente do core inteiro (U256): o core deve
//!    bater 1:1 com o `floor` do valor exato.
//! 3. Medir o desvio do invariante, `Δk/k`, de um swap do core.
//!
//! Não entra no caminho de produção; serve só para testes e geração de goldens.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer; // div_floor
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::amm_err;

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::liquidity;
use super::swap;
use super::types::{Ppm, Reserves, Wad, PPM_SCALE};

// -------------------------
// Helpers de conversão & arredondamento
// -------------------------
#[inline]
fn q(v: u128) -> BigRational { BigRational::from_integer(BigInt::from(v)) }

#[inline]
fn k_big(x: Wad, y: Wad) -> BigUint { BigUint::from(x) * BigUint::from(y) }

#[inline]
fn fee_rate(fee_ppm: Ppm) -> BigRational {
    BigRational::new(BigInt::from(fee_ppm), BigInt::from(PPM_SCALE))
}

fn floor_to_u128(r: &BigRational) -> Result<u128> {
    r.numer()
        .div_floor(r.denom())
        .to_u128()
        .ok_or_else(|| amm_err!(AmmErrorCode::OverflowNumeric, value => r))
}

// -------------------------
// Contínuo/exato (sem quantização)
// -------------------------
/// Output contínuo: `in·(1-f)·R_out / (R_in + in·(1-f))`.
pub fn continuous_amount_out(input: Wad, input_reserve: Wad, output_reserve: Wad, fee_ppm: Ppm) -> Result<BigRational> {
    if input_reserve == 0 || output_reserve == 0 {
        return Err(amm_err!(AmmErrorCode::ZeroReserve));
    }
    let net = q(input) * (BigRational::one() - fee_rate(fee_ppm));
    Ok(net.clone() * q(output_reserve) / (q(input_reserve) + net))
}

/// Spot sem nenhuma fricção: `in · R_out / R_in` (limite superior de qualquer output).
pub fn spot_bound(input: Wad, input_reserve: Wad, output_reserve: Wad) -> BigRational {
    q(input) * q(output_reserve) / q(input_reserve)
}

/// Shares e token exigido num depósito proporcional, exatos.
pub fn continuous_deposit(native_sent: Wad, reserves: Reserves, total_shares: Wad) -> Result<(BigRational, BigRational)> {
    if reserves.native == 0 || reserves.token == 0 {
        return Err(amm_err!(AmmErrorCode::ZeroReserve, native => reserves.native, token => reserves.token));
    }
    let ratio = q(native_sent) / q(reserves.native);
    Ok((ratio.clone() * q(total_shares), ratio * q(reserves.token)))
}

/// Amounts exatos de um saque de `burn` shares.
pub fn continuous_withdrawal(reserves: Reserves, burn: Wad, total_shares: Wad) -> (BigRational, BigRational) {
    let ratio = q(burn) / q(total_shares);
    (ratio.clone() * q(reserves.native), ratio * q(reserves.token))
}

// -------------------------
// Estruturas de comparação (goldens)
// -------------------------
#[derive(Debug, Clone)]
pub struct RefOut {
    pub out_core: Wad,
    pub out_cont_floor: Wad,
    pub out_cont: BigRational,
    /// (k1 - k0) / k0 após aplicar o swap do core; ≥ 0 sempre.
    pub dk_over_k_core: BigRational,
}

#[derive(Debug, Clone)]
pub struct RefDeposit {
    pub shares_core: Wad,
    pub token_core: Wad,
    pub shares_cont: BigRational,
    pub token_cont_floor: Wad,
}

#[derive(Debug, Clone)]
pub struct RefWithdrawal {
    pub core: (Wad, Wad),
    pub cont_floor: (Wad, Wad),
}

fn dk_over_k_from_core(input_reserve: Wad, output_reserve: Wad, input: Wad, out: Wad) -> BigRational {
    let k0 = k_big(input_reserve, output_reserve);
    let k1 = k_big(input_reserve + input, output_reserve - out);
    BigRational::new(BigInt::from(k1) - BigInt::from(k0.clone()), BigInt::from(k0))
}

/// Compara o **core** com a referência para um swap.
pub fn golden_amount_out(input: Wad, input_reserve: Wad, output_reserve: Wad, fee_ppm: Ppm) -> Result<RefOut> {
    let out_core = swap::get_amount_out(input, input_reserve, output_reserve, fee_ppm)?;
    let out_cont = continuous_amount_out(input, input_reserve, output_reserve, fee_ppm)?;
    let out_cont_floor = floor_to_u128(&out_cont)?;
    let dk_over_k_core = dk_over_k_from_core(input_reserve, output_reserve, input, out_core);
    Ok(RefOut { out_core, out_cont_floor, out_cont, dk_over_k_core })
}

/// Compara o **core** (política estrita) com a referência para um depósito
/// em pool provisionado.
pub fn golden_deposit(native_sent: Wad, reserves: Reserves, total_shares: Wad) -> Result<RefDeposit> {
    let (shares_cont, token_cont) = continuous_deposit(native_sent, reserves, total_shares)?;
    let plan = liquidity::plan_deposit(reserves, total_shares, native_sent, Wad::MAX, true)?;
    Ok(RefDeposit {
        shares_core: plan.shares_minted,
        token_core: plan.token_pulled,
        shares_cont,
        token_cont_floor: floor_to_u128(&token_cont)?,
    })
}

/// Compara o **core** com a referência para um saque.
pub fn golden_withdrawal(reserves: Reserves, burn: Wad, total_shares: Wad) -> Result<RefWithdrawal> {
    let core = liquidity::withdrawal_amounts(reserves, burn, total_shares)?;
    let (n, t) = continuous_withdrawal(reserves, burn, total_shares);
    Ok(RefWithdrawal { core, cont_floor: (floor_to_u128(&n)?, floor_to_u128(&t)?) })
}

/// `|Δk/k| ≤ num/den`?
pub fn within_bound(dk_over_k: &BigRational, num: u64, den: u64) -> bool {
    dk_over_k.abs() <= BigRational::new(BigInt::from(num), BigInt::from(den))
}

/// Δk/k é não-negativo (produto não encolhe).
pub fn is_non_negative(r: &BigRational) -> bool {
    *r >= BigRational::zero()
}
