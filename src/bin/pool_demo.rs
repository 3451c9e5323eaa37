use anyhow::Result;
use std::time::Instant;
use tracing::info;

use exchange_core::amm::FungibleToken;
use exchange_core::telemetry;
use exchange_core::{AccountId, Pool, PoolConfig, TokenLedger};

#[tokio::main]
async fn main() -> Result<()> {
    let tel = telemetry::init("exchange-core")?;
    let config = PoolConfig::from_env()?;

    let owner = AccountId::new("owner");
    let trader = AccountId::new("trader");
    let pool_id = AccountId::new("pool");

    let mut token = TokenLedger::with_supply("GCP", &owner, 10_000);
    token.mint(&trader, 1_000);
    token.approve(&owner, &pool_id, 4_000);
    token.approve(&trader, &pool_id, 1_000);

    let mut pool = Pool::new(pool_id, token, config)?;
    pool.add_liquidity(&owner, 2_000, 1_000)?;
    tel.record_liquidity("add");

    for i in 0..5u32 {
        let span = telemetry::make_info_span("swap", i, "pool_demo");
        let _guard = span.enter();

        let before = pool.reserves();
        let t0 = Instant::now();
        let (direction, out) = if i % 2 == 0 {
            ("native_for_token", pool.swap_native_for_token(&trader, 10, 0)?)
        } else {
            ("token_for_native", pool.swap_token_for_native(&trader, 20, 0)?)
        };
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

        tel.record_swap(direction, elapsed_ms, before, pool.reserves());
        info!(direction, out, native = pool.native_reserve(), token = pool.get_reserve(), "swap");
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    let shares = pool.balance_of(&owner);
    let receipt = pool.remove_liquidity(&owner, shares)?;
    tel.record_liquidity("remove");
    info!(
        native_out = receipt.native_out,
        token_out = receipt.token_out,
        trader_tokens = pool.token().balance_of(&trader),
        "pool drenado"
    );

    tel.shutdown();
    Ok(())
}
