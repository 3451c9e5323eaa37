//! Interface mínima do ativo fungível consumida pelo pool + ledger em memória.
//!
//! O crate não tem "msg.sender" implícito: quem move os fundos é sempre
//! explícito (`sender` em `transfer`, `spender` em `transfer_from`).

use std::collections::BTreeMap;

use super::types::{AccountId, Wad};

/// Colaborador de token (estilo ERC20). `false` = transferência recusada.
pub trait FungibleToken {
    fn balance_of(&self, holder: &AccountId) -> Wad;

    /// Move `amount` de `sender` para `to`.
    fn transfer(&mut self, sender: &AccountId, to: &AccountId, amount: Wad) -> bool;

    /// Move `amount` de `from` para `to` consumindo allowance dada a `spender`.
    fn transfer_from(&mut self, spender: &AccountId, from: &AccountId, to: &AccountId, amount: Wad) -> bool;
}

/// Bookkeeping de saldos e allowances, suficiente para testes e demos.
#[derive(Clone, Debug, Default)]
pub struct TokenLedger {
    symbol: String,
    total_supply: Wad,
    balances: BTreeMap<AccountId, Wad>,
    allowances: BTreeMap<(AccountId, AccountId), Wad>,
}

impl TokenLedger {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), ..Self::default() }
    }

    /// Ledger com `supply` inicial creditado a `owner`.
    pub fn with_supply(symbol: impl Into<String>, owner: &AccountId, supply: Wad) -> Self {
        let mut ledger = Self::new(symbol);
        ledger.mint(owner, supply);
        ledger
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn total_supply(&self) -> Wad {
        self.total_supply
    }

    /// Cria `amount` para `to`. Retorna `false` se o supply estourar.
    pub fn mint(&mut self, to: &AccountId, amount: Wad) -> bool {
        let Some(supply) = self.total_supply.checked_add(amount) else {
            return false;
        };
        self.total_supply = supply;
        *self.balances.entry(to.clone()).or_default() += amount;
        true
    }

    /// Define (não soma) a allowance de `spender` sobre os fundos de `owner`.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Wad) {
        self.allowances.insert((owner.clone(), spender.clone()), amount);
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Wad {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn move_balance(&mut self, from: &AccountId, to: &AccountId, amount: Wad) -> bool {
        let available = self.balance_of(from);
        if available < amount {
            return false;
        }
        if from == to || amount == 0 {
            return true;
        }
        self.balances.insert(from.clone(), available - amount);
        *self.balances.entry(to.clone()).or_default() += amount;
        true
    }
}

impl FungibleToken for TokenLedger {
    fn balance_of(&self, holder: &AccountId) -> Wad {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn transfer(&mut self, sender: &AccountId, to: &AccountId, amount: Wad) -> bool {
        self.move_balance(sender, to, amount)
    }

    fn transfer_from(&mut self, spender: &AccountId, from: &AccountId, to: &AccountId, amount: Wad) -> bool {
        let allowed = self.allowance(from, spender);
        if allowed < amount || self.balance_of(from) < amount {
            return false;
        }
        if !self.move_balance(from, to, amount) {
            return false;
        }
        self.approve(from, spender, allowed - amount);
        true
    }
}
