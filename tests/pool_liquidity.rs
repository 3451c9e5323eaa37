//! Liquidez no pool padrão (1% de taxa, token exigido na medida exata).

use exchange_core::amm::types::Reserves;
use exchange_core::amm::FungibleToken;
use exchange_core::{AccountId, AmmErrorCode, Pool, PoolConfig, TokenLedger};

fn acc(s: &str) -> AccountId {
    AccountId::new(s)
}

fn empty_pool(owner_allowance: u128) -> Pool<TokenLedger> {
    let owner = acc("owner");
    let mut pool = Pool::new(
        acc("exchange"),
        TokenLedger::with_supply("GCP", &owner, 10_000),
        PoolConfig::standard(),
    )
    .unwrap();
    pool.approve_pool(&owner, owner_allowance);
    pool
}

/// (100 nativo, 200 token), 100 shares para `owner`.
fn existing_reserves() -> Pool<TokenLedger> {
    let mut pool = empty_pool(300);
    pool.add_liquidity(&acc("owner"), 200, 100).unwrap();
    pool
}

#[test]
fn add_liquidity_seeds_reserves_and_mints_shares() {
    let mut pool = empty_pool(4_000);
    pool.add_liquidity(&acc("owner"), 2_000, 1_000).unwrap();
    assert_eq!(pool.native_reserve(), 1_000);
    assert_eq!(pool.get_reserve(), 2_000);
    assert_eq!(pool.balance_of(&acc("owner")), 1_000);
    assert_eq!(pool.total_supply(), 1_000);
}

#[test]
fn add_liquidity_with_zero_amounts_keeps_pool_empty() {
    let mut pool = empty_pool(0);
    let r = pool.add_liquidity(&acc("owner"), 0, 0).unwrap();
    assert_eq!(r.shares_minted, 0);
    assert_eq!(pool.native_reserve(), 0);
    assert_eq!(pool.get_reserve(), 0);
    assert!(pool.is_empty());
}

#[test]
fn large_first_deposit_mints_one_to_one() {
    let owner = acc("owner");
    let one = 1_000_000_000_000_000_000u128;
    let mut pool = Pool::new(acc("exchange"), TokenLedger::with_supply("GCP", &owner, 1_000), PoolConfig::standard()).unwrap();
    pool.approve_pool(&owner, 1_000);
    pool.add_liquidity(&owner, 1_000, one).unwrap();
    assert_eq!(pool.reserves(), Reserves::new(one, 1_000));
    assert_eq!(pool.total_supply(), one);
}

#[test]
fn add_liquidity_preserves_exchange_rate() {
    let mut pool = existing_reserves();
    let r = pool.add_liquidity(&acc("owner"), 200, 50).unwrap();
    // só o exigido (50·200/100 = 100) é puxado
    assert_eq!(r.token_pulled, 100);
    assert_eq!(pool.native_reserve(), 150);
    assert_eq!(pool.get_reserve(), 300);
    assert_eq!(pool.token().balance_of(pool.account()), 300);
}

#[test]
fn add_liquidity_on_existing_reserves_mints_proportionally() {
    let mut pool = existing_reserves();
    pool.add_liquidity(&acc("owner"), 200, 50).unwrap();
    assert_eq!(pool.balance_of(&acc("owner")), 150);
    assert_eq!(pool.total_supply(), 150);
}

#[test]
fn add_liquidity_fails_when_not_enough_tokens() {
    let mut pool = existing_reserves();
    let err = pool.add_liquidity(&acc("owner"), 50, 50).unwrap_err();
    assert!(err.is(AmmErrorCode::InsufficientTokenAmount));
    assert_eq!(pool.reserves(), Reserves::new(100, 200));
    assert_eq!(pool.total_supply(), 100);
}

#[test]
fn remove_liquidity_removes_some_liquidity() {
    let mut pool = existing_reserves();
    let tokens_before = pool.token().balance_of(&acc("owner"));

    let r = pool.remove_liquidity(&acc("owner"), 25).unwrap();

    assert_eq!(pool.get_reserve(), 150);
    assert_eq!(pool.native_reserve(), 75);
    assert_eq!(r.native_out, 25);
    assert_eq!(pool.token().balance_of(&acc("owner")) - tokens_before, 50);
    assert_eq!(pool.total_supply(), 75);
}

#[test]
fn remove_liquidity_removes_all_liquidity() {
    let mut pool = existing_reserves();
    let tokens_before = pool.token().balance_of(&acc("owner"));

    let r = pool.remove_liquidity(&acc("owner"), 100).unwrap();

    assert_eq!(pool.reserves(), Reserves::default());
    assert_eq!(r.native_out, 100);
    assert_eq!(pool.token().balance_of(&acc("owner")) - tokens_before, 200);
}

#[test]
fn remove_liquidity_pays_for_provided_liquidity() {
    let mut pool = existing_reserves();
    let tokens_before = pool.token().balance_of(&acc("owner"));

    pool.swap_native_for_token(&acc("trader"), 10, 18).unwrap();
    let r = pool.remove_liquidity(&acc("owner"), 100).unwrap();

    assert_eq!(pool.reserves(), Reserves::default());
    assert_eq!(pool.token().balance_of(&acc("trader")), 18);
    assert_eq!(r.native_out, 110);
    assert_eq!(pool.token().balance_of(&acc("owner")) - tokens_before, 182);
}

#[test]
fn sole_holder_overburn_is_clamped() {
    let mut pool = existing_reserves();
    let r = pool.remove_liquidity(&acc("owner"), 101).unwrap();
    assert_eq!(r.shares_burned, 100);
    assert_eq!((r.native_out, r.token_out), (100, 200));
    assert_eq!(pool.get_reserve(), 0);
    assert_eq!(pool.native_reserve(), 0);
    assert_eq!(pool.token().balance_of(pool.account()), 0);
    assert_eq!(pool.total_supply(), 0);
}

#[test]
fn stranger_cannot_burn() {
    let mut pool = existing_reserves();
    assert_eq!(pool.check_remove_liquidity(&acc("mallory"), 1), Some(AmmErrorCode::InsufficientShares));
    assert_eq!(pool.check_remove_liquidity(&acc("owner"), 101), None);
    let err = pool.remove_liquidity(&acc("mallory"), 1).unwrap_err();
    assert!(err.is(AmmErrorCode::InsufficientShares));
}

#[test]
fn add_then_remove_never_profits() {
    let mut pool = existing_reserves();
    pool.swap_native_for_token(&acc("trader"), 7, 0).unwrap();

    let lp = acc("lp");
    pool.mint_to(&lp, 1_000);
    pool.approve_pool(&lp, 1_000);

    let before = pool.reserves();
    let dep = pool.add_liquidity(&lp, 1_000, 33).unwrap();
    let wd = pool.remove_liquidity(&lp, dep.shares_minted).unwrap();

    assert!(wd.native_out <= dep.native_added);
    assert!(wd.token_out <= dep.token_pulled);
    let after = pool.reserves();
    assert!(after.native >= before.native && after.token >= before.token);
}

#[test]
fn dust_deposits_cannot_drain_token_reserve() {
    let one = 1_000_000_000_000_000_000u128;
    for config in [PoolConfig::standard(), PoolConfig::no_fee()] {
        let owner = acc("owner");
        let attacker = acc("attacker");
        let mut pool = Pool::new(acc("exchange"), TokenLedger::with_supply("GCP", &owner, 1_000), config).unwrap();
        pool.approve_pool(&owner, 1_000);
        pool.add_liquidity(&owner, 1_000, one).unwrap();

        // cada depósito vale 0,9 token: exigido arredonda para 0
        let mut native_in = 0u128;
        for _ in 0..10_000 {
            let r = pool.add_liquidity(&attacker, 0, 900_000_000_000_000).unwrap();
            assert_eq!(r.token_pulled, 0);
            native_in += r.native_added;
        }
        let held = pool.balance_of(&attacker);
        let wd = pool.remove_liquidity(&attacker, held).unwrap();

        assert_eq!(wd.token_out, 0);
        assert!(wd.native_out <= native_in);
        assert_eq!(pool.token().balance_of(&attacker), 0);
        assert_eq!(pool.get_reserve(), 1_000);
        assert_eq!(pool.token().balance_of(pool.account()), 1_000);
    }
}

#[test]
fn pool_account_cannot_provide_or_withdraw() {
    let mut pool = existing_reserves();
    let me = pool.account().clone();
    assert!(pool.add_liquidity(&me, 200, 50).unwrap_err().is(AmmErrorCode::InvalidState));
    assert!(pool.remove_liquidity(&me, 0).unwrap_err().is(AmmErrorCode::InvalidState));
    assert_eq!(pool.reserves(), Reserves::new(100, 200));
    assert_eq!(pool.total_supply(), 100);
    assert_eq!(pool.token().balance_of(&me), pool.get_reserve());
    assert!(!pool.mint_to(&me, 1));
}
