//! Direção de arredondamento: tudo que sai do pool é floor, tudo que entra é ceil.

use exchange_core::amm::guardrails::{div_nearest_even_u256, div_nearest_even_u256_to_u128};
use exchange_core::amm::liquidity::{plan_deposit, required_token_amount, withdrawal_amounts};
use exchange_core::amm::swap::{get_amount_in, get_amount_out};
use exchange_core::amm::types::{Ppm, Reserves, FEE_ONE_PERCENT_PPM, U256, WAD};
use exchange_core::AmmErrorCode;

const FEE0: Ppm = 0;
const FEE1: Ppm = FEE_ONE_PERCENT_PPM;

#[test]
fn r1_amount_out_is_floor_of_continuous_value() {
    let (x, y, dx) = (1_000_000u128 * WAD, 1_000_000u128 * WAD, 10_000u128 * WAD);
    let out = get_amount_out(dx, x, y, FEE0).unwrap();
    // sem taxa: out = floor(dx·y / (x+dx))
    let exact = (U256::from(dx) * U256::from(y)) / U256::from(x + dx);
    assert_eq!(U256::from(out), exact);
    assert!(out < y);
}

#[test]
fn r2_amount_in_is_ceil_minimality() {
    let (x, y, dy) = (1_000_000u128 * WAD, 1_000_000u128 * WAD, 9_870u128 * WAD);
    for fee in [FEE0, FEE1] {
        let dx = get_amount_in(dy, x, y, fee).unwrap();
        assert!(get_amount_out(dx, x, y, fee).unwrap() >= dy, "fee={fee}");
        assert!(get_amount_out(dx - 1, x, y, fee).unwrap() < dy, "fee={fee}");
    }
}

#[test]
fn r3_tiny_input_rounds_to_zero_instead_of_failing() {
    let out = get_amount_out(1, 1_000_000u128 * WAD, 1_000_000u128 * WAD, FEE1).unwrap();
    assert_eq!(out, 0);
}

#[test]
fn r4_deposit_requirement_and_shares_are_floor() {
    let reserves = Reserves::new(3, 10);
    // 1·10/3 = 3.33.. → 3 tokens; 1·7/3 = 2.33.. → 2 shares
    assert_eq!(required_token_amount(1, reserves).unwrap(), 3);
    let plan = plan_deposit(reserves, 7, 1, 3, true).unwrap();
    assert_eq!(plan.token_pulled, 3);
    assert_eq!(plan.shares_minted, 2);
}

#[test]
fn r5_burn_amounts_are_floor_of_proportion() {
    let reserves = Reserves::new(1_000_000u128 * WAD, 3_000_000u128 * WAD);
    let (s, burn) = (1_000_000u128 * WAD, 123_456u128 * WAD);
    let (xo, yo) = withdrawal_amounts(reserves, burn, s).unwrap();
    let xo_theo = ((U256::from(reserves.native) * U256::from(burn)) / U256::from(s)).as_u128();
    let yo_theo = ((U256::from(reserves.token) * U256::from(burn)) / U256::from(s)).as_u128();
    assert_eq!(xo, xo_theo);
    assert_eq!(yo, yo_theo);
}

#[test]
fn r6_intermediate_rounding_is_nearest_even_on_tie() {
    let two = U256::from(2u8);
    // 5/2 = 2.5 → par fica em 2; 3/2 = 1.5 → sobe para 2
    assert_eq!(div_nearest_even_u256(U256::from(5u8), two).unwrap(), U256::from(2u8));
    assert_eq!(div_nearest_even_u256(U256::from(3u8), two).unwrap(), U256::from(2u8));
    assert_eq!(div_nearest_even_u256_to_u128(U256::from(7u8), two).unwrap(), 4);
}

#[test]
fn r7_division_by_zero_is_reported() {
    let err = div_nearest_even_u256(U256::from(1u8), U256::zero()).unwrap_err();
    assert!(err.is(AmmErrorCode::OverflowNumeric));
}
