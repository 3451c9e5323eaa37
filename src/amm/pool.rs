//! Pool CPMM de dois ativos: reserva nativa × reserva de token + ledger de shares.
//!
//! Toda operação segue a mesma ordem: valida e cota sobre o estado atual,
//! executa a única transferência de token envolvida e só então grava o estado.
//! Uma rejeição (inclusive do colaborador de token) não altera o pool.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::amm_err;
use crate::config::PoolConfig;

use super::error::{AmmError, Result};
use super::error_catalog::AmmErrorCode;
use super::error_map;
use super::guardrails::{checked_add, checked_sub, ensure_provisioned};
use super::liquidity::{effective_burn, plan_deposit, withdrawal_amounts, DepositPlan};
use super::pricing;
use super::swap::get_amount_out;
use super::token::{FungibleToken, TokenLedger};
use super::types::{AccountId, LiquidityReceipt, Reserves, Wad, WithdrawalReceipt};

const TARGET: &str = "exchange_core::pool";

fn rejected(op: &'static str, err: AmmError) -> AmmError {
    warn!(target: TARGET, op, code = err.code.code(), error = %err.to_log_json(), "operação rejeitada");
    err
}

/// Pool ligado permanentemente a um token.
#[derive(Debug)]
pub struct Pool<T: FungibleToken> {
    account: AccountId,
    token: T,
    config: PoolConfig,
    reserves: Reserves,
    total_shares: Wad,
    shares: BTreeMap<AccountId, Wad>,
}

impl<T: FungibleToken> Pool<T> {
    /// Cria um pool vazio. `account` é a identidade do pool no ledger do token.
    pub fn new(account: AccountId, token: T, config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            account,
            token,
            config,
            reserves: Reserves::default(),
            total_shares: 0,
            shares: BTreeMap::new(),
        })
    }

    // ---------- leitura ----------

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    pub fn reserves(&self) -> Reserves {
        self.reserves
    }

    /// Reserva de token.
    pub fn get_reserve(&self) -> Wad {
        self.reserves.token
    }

    pub fn native_reserve(&self) -> Wad {
        self.reserves.native
    }

    pub fn total_supply(&self) -> Wad {
        self.total_shares
    }

    /// Shares de `holder`.
    pub fn balance_of(&self, holder: &AccountId) -> Wad {
        self.shares.get(holder).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total_shares == 0
    }

    /// Spot `reserve_a / reserve_b` em WAD.
    pub fn get_price(&self, reserve_a: Wad, reserve_b: Wad) -> Result<Wad> {
        pricing::get_price(reserve_a, reserve_b)
    }

    /// Fórmula do pool (com a taxa configurada) sobre reservas arbitrárias.
    pub fn get_output_amount(&self, input: Wad, input_reserve: Wad, output_reserve: Wad) -> Result<Wad> {
        get_amount_out(input, input_reserve, output_reserve, self.config.fee.fee_ppm)
    }

    /// Token recebido ao vender `native_in` agora.
    pub fn get_token_amount(&self, native_in: Wad) -> Result<Wad> {
        ensure_provisioned(self.reserves, self.total_shares)?;
        self.get_output_amount(native_in, self.reserves.native, self.reserves.token)
    }

    /// Nativo recebido ao vender `token_in` agora.
    pub fn get_native_amount(&self, token_in: Wad) -> Result<Wad> {
        ensure_provisioned(self.reserves, self.total_shares)?;
        self.get_output_amount(token_in, self.reserves.token, self.reserves.native)
    }

    /// Pré-checagem sem efeito: código do erro que o swap nativo→token daria.
    pub fn check_native_for_token(&self, native_in: Wad, min_token_out: Wad) -> Option<AmmErrorCode> {
        if self.is_empty() {
            return Some(AmmErrorCode::InvalidState);
        }
        error_map::from_swap_inputs(
            native_in,
            (self.reserves.native, self.reserves.token),
            self.config.fee.fee_ppm,
            min_token_out,
        )
    }

    /// Pré-checagem sem efeito: código do erro que o swap token→nativo daria.
    pub fn check_token_for_native(&self, token_in: Wad, min_native_out: Wad) -> Option<AmmErrorCode> {
        if self.is_empty() {
            return Some(AmmErrorCode::InvalidState);
        }
        error_map::from_swap_inputs(
            token_in,
            (self.reserves.token, self.reserves.native),
            self.config.fee.fee_ppm,
            min_native_out,
        )
    }

    /// Pré-checagem sem efeito: código do erro que o saque de `share_amount` daria.
    pub fn check_remove_liquidity(&self, caller: &AccountId, share_amount: Wad) -> Option<AmmErrorCode> {
        error_map::from_withdrawal(share_amount, self.balance_of(caller), self.total_shares)
    }

    // ---------- liquidez ----------

    /// Deposita `native_sent` (já recebido pelo host) e puxa token de `caller`.
    ///
    /// Pool vazio: inicialização, a taxa é a razão ofertada e as shares saem 1:1
    /// com o nativo. Pool provisionado: exige `floor(dn·T/N)` de token e minta
    /// o menor entre `floor(dn·S/N)` e `floor(puxado·S/T)`.
    pub fn add_liquidity(&mut self, caller: &AccountId, token_amount: Wad, native_sent: Wad) -> Result<LiquidityReceipt> {
        self.ensure_external(caller).map_err(|e| rejected("add_liquidity", e))?;
        let plan = plan_deposit(
            self.reserves,
            self.total_shares,
            native_sent,
            token_amount,
            self.config.strict_token_requirement,
        )
        .map_err(|e| rejected("add_liquidity", e.with_context("caller", caller)))?;

        if plan.initializes {
            return self.initialize(caller, plan);
        }

        self.pull_token(caller, plan.token_pulled)
            .map_err(|e| rejected("add_liquidity", e))?;
        self.commit_deposit(caller, plan);

        debug!(
            target: TARGET,
            %caller,
            native = plan.native_added,
            token = plan.token_pulled,
            shares = plan.shares_minted,
            "liquidez adicionada"
        );
        Ok(self.receipt(plan))
    }

    /// Transição de inicialização: fixa a taxa sem checagem proporcional.
    fn initialize(&mut self, caller: &AccountId, plan: DepositPlan) -> Result<LiquidityReceipt> {
        debug_assert!(self.total_shares == 0 && self.reserves.is_empty());
        self.pull_token(caller, plan.token_pulled)
            .map_err(|e| rejected("initialize", e))?;
        self.commit_deposit(caller, plan);

        debug!(
            target: TARGET,
            %caller,
            native = plan.native_added,
            token = plan.token_pulled,
            "pool inicializado"
        );
        Ok(self.receipt(plan))
    }

    fn commit_deposit(&mut self, caller: &AccountId, plan: DepositPlan) {
        // somas já checadas em plan_deposit
        self.reserves.native += plan.native_added;
        self.reserves.token += plan.token_pulled;
        self.total_shares += plan.shares_minted;
        if plan.shares_minted > 0 {
            *self.shares.entry(caller.clone()).or_default() += plan.shares_minted;
        }
    }

    fn receipt(&self, plan: DepositPlan) -> LiquidityReceipt {
        LiquidityReceipt {
            shares_minted: plan.shares_minted,
            native_added: plan.native_added,
            token_pulled: plan.token_pulled,
        }
    }

    /// Queima shares de `caller` e devolve a fatia proporcional das reservas.
    /// O token é transferido aqui; `native_out` do recibo é pago pelo host.
    pub fn remove_liquidity(&mut self, caller: &AccountId, share_amount: Wad) -> Result<WithdrawalReceipt> {
        self.ensure_external(caller).map_err(|e| rejected("remove_liquidity", e))?;
        if self.is_empty() {
            return Err(rejected(
                "remove_liquidity",
                amm_err!(AmmErrorCode::InvalidState, caller => caller, requested => share_amount),
            ));
        }

        let held = self.balance_of(caller);
        let burn = effective_burn(share_amount, held, self.total_shares)
            .map_err(|e| rejected("remove_liquidity", e.with_context("caller", caller)))?;
        let (native_out, token_out) = withdrawal_amounts(self.reserves, burn, self.total_shares)
            .map_err(|e| rejected("remove_liquidity", e))?;

        self.push_token(caller, token_out)
            .map_err(|e| rejected("remove_liquidity", e))?;

        // burn <= held <= total e outs <= reservas: subtrações não estouram
        self.reserves.native -= native_out;
        self.reserves.token -= token_out;
        self.total_shares -= burn;
        let remaining = held - burn;
        if remaining == 0 {
            self.shares.remove(caller);
        } else {
            self.shares.insert(caller.clone(), remaining);
        }

        if burn < share_amount {
            debug!(target: TARGET, %caller, requested = share_amount, burned = burn, "over-burn do holder único limitado ao supply");
        }
        debug!(target: TARGET, %caller, shares = burn, native = native_out, token = token_out, "liquidez removida");
        Ok(WithdrawalReceipt { shares_burned: burn, native_out, token_out })
    }

    // ---------- swaps ----------

    /// Vende `native_in` (já recebido pelo host) e envia token para `caller`.
    pub fn swap_native_for_token(&mut self, caller: &AccountId, native_in: Wad, min_token_out: Wad) -> Result<Wad> {
        self.ensure_external(caller).map_err(|e| rejected("swap_native_for_token", e))?;
        let token_out = self
            .quote_checked(native_in, min_token_out, self.reserves.native, self.reserves.token)
            .map_err(|e| rejected("swap_native_for_token", e.with_context("caller", caller)))?;
        let native_after = checked_add(self.reserves.native, native_in)
            .map_err(|e| rejected("swap_native_for_token", e))?;
        let token_after = checked_sub(self.reserves.token, token_out)
            .map_err(|e| rejected("swap_native_for_token", e))?;

        self.push_token(caller, token_out)
            .map_err(|e| rejected("swap_native_for_token", e))?;
        self.reserves = Reserves::new(native_after, token_after);

        debug!(target: TARGET, %caller, native_in, token_out, "swap nativo→token");
        Ok(token_out)
    }

    /// Puxa `token_in` de `caller`; o nativo devolvido é pago pelo host.
    pub fn swap_token_for_native(&mut self, caller: &AccountId, token_in: Wad, min_native_out: Wad) -> Result<Wad> {
        self.ensure_external(caller).map_err(|e| rejected("swap_token_for_native", e))?;
        let native_out = self
            .quote_checked(token_in, min_native_out, self.reserves.token, self.reserves.native)
            .map_err(|e| rejected("swap_token_for_native", e.with_context("caller", caller)))?;
        let token_after = checked_add(self.reserves.token, token_in)
            .map_err(|e| rejected("swap_token_for_native", e))?;
        let native_after = checked_sub(self.reserves.native, native_out)
            .map_err(|e| rejected("swap_token_for_native", e))?;

        self.pull_token(caller, token_in)
            .map_err(|e| rejected("swap_token_for_native", e))?;
        self.reserves = Reserves::new(native_after, token_after);

        debug!(target: TARGET, %caller, token_in, native_out, "swap token→nativo");
        Ok(native_out)
    }

    /// O pool não negocia consigo mesmo: a transferência viraria no-op no
    /// ledger e as reservas se descolariam do saldo do pool.
    fn ensure_external(&self, caller: &AccountId) -> Result<()> {
        if *caller == self.account {
            return Err(amm_err!(AmmErrorCode::InvalidState, caller => caller, reason => "pool_account"));
        }
        Ok(())
    }

    fn quote_checked(&self, input: Wad, min_out: Wad, input_reserve: Wad, output_reserve: Wad) -> Result<Wad> {
        ensure_provisioned(self.reserves, self.total_shares)?;
        let out = self.get_output_amount(input, input_reserve, output_reserve)?;
        if out < min_out {
            return Err(amm_err!(
                AmmErrorCode::SlippageExceeded,
                input => input,
                out => out,
                min_out => min_out,
            ));
        }
        Ok(out)
    }

    // ---------- colaborador de token ----------

    fn pull_token(&mut self, from: &AccountId, amount: Wad) -> Result<()> {
        if self.token.transfer_from(&self.account, from, &self.account, amount) {
            return Ok(());
        }
        Err(amm_err!(
            AmmErrorCode::TransferFailed,
            direction => "pull",
            account => from,
            amount => amount,
        ))
    }

    fn push_token(&mut self, to: &AccountId, amount: Wad) -> Result<()> {
        if self.token.transfer(&self.account, to, amount) {
            return Ok(());
        }
        Err(amm_err!(
            AmmErrorCode::TransferFailed,
            direction => "push",
            account => to,
            amount => amount,
        ))
    }
}

/// Provisionamento do ledger em memória (testes, benches, demo). Só mexe em
/// contas de terceiros; o saldo do pool continua amarrado à reserva.
impl Pool<TokenLedger> {
    /// Define a allowance de `owner` para o pool.
    pub fn approve_pool(&mut self, owner: &AccountId, amount: Wad) {
        self.token.approve(owner, &self.account, amount);
    }

    /// Credita token novo para `to`; recusa creditar a conta do pool.
    pub fn mint_to(&mut self, to: &AccountId, amount: Wad) -> bool {
        if *to == self.account {
            return false;
        }
        self.token.mint(to, amount)
    }
}
