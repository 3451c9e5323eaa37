//! Pool compartilhável entre threads: um lock por instância, mantido durante
//! toda a operação, de modo que nenhum leitor observa reservas pela metade.

use std::sync::Arc;

use parking_lot::Mutex;

use super::error::Result;
use super::pool::Pool;
use super::token::FungibleToken;
use super::types::{AccountId, LiquidityReceipt, Reserves, Wad, WithdrawalReceipt};

pub struct SharedPool<T: FungibleToken> {
    inner: Arc<Mutex<Pool<T>>>,
}

impl<T: FungibleToken> Clone for SharedPool<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: FungibleToken> SharedPool<T> {
    pub fn new(pool: Pool<T>) -> Self {
        Self { inner: Arc::new(Mutex::new(pool)) }
    }

    pub fn add_liquidity(&self, caller: &AccountId, token_amount: Wad, native_sent: Wad) -> Result<LiquidityReceipt> {
        self.inner.lock().add_liquidity(caller, token_amount, native_sent)
    }

    pub fn remove_liquidity(&self, caller: &AccountId, share_amount: Wad) -> Result<WithdrawalReceipt> {
        self.inner.lock().remove_liquidity(caller, share_amount)
    }

    pub fn swap_native_for_token(&self, caller: &AccountId, native_in: Wad, min_token_out: Wad) -> Result<Wad> {
        self.inner.lock().swap_native_for_token(caller, native_in, min_token_out)
    }

    pub fn swap_token_for_native(&self, caller: &AccountId, token_in: Wad, min_native_out: Wad) -> Result<Wad> {
        self.inner.lock().swap_token_for_native(caller, token_in, min_native_out)
    }

    /// Snapshot consistente de (reservas, supply).
    pub fn snapshot(&self) -> (Reserves, Wad) {
        let pool = self.inner.lock();
        (pool.reserves(), pool.total_supply())
    }

    /// Executa `f` com o pool travado (leituras compostas, setup de testes).
    pub fn with_pool<R>(&self, f: impl FnOnce(&mut Pool<T>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::token::TokenLedger;
    use crate::config::PoolConfig;
    use std::thread;

    #[test]
    fn concurrent_swaps_keep_product_monotone() {
        let owner = AccountId::new("owner");
        let token = TokenLedger::with_supply("GCP", &owner, 1_000_000);
        let mut pool = Pool::new(AccountId::new("pool"), token, PoolConfig::standard()).unwrap();
        pool.approve_pool(&owner, 1_000_000);
        pool.add_liquidity(&owner, 500_000, 250_000).unwrap();

        let shared = SharedPool::new(pool);
        let k0 = shared.snapshot().0.product();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let trader = AccountId::new(format!("trader-{i}"));
                    for _ in 0..50 {
                        shared.swap_native_for_token(&trader, 100, 0).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let (reserves, supply) = shared.snapshot();
        assert_eq!(reserves.native, 250_000 + 4 * 50 * 100);
        assert!(reserves.product() >= k0);
        assert_eq!(supply, 250_000);
        let pool_balance = shared.with_pool(|p| p.token().balance_of(p.account()));
        assert_eq!(pool_balance, reserves.token);
    }
}
