//! Tipos básicos do pool (montantes inteiros) + U256 para intermediários.

use core::fmt;

use uint::construct_uint;
construct_uint! {
    /// Inteiro de 256 bits para contas intermediárias seguras.
    pub struct U256(4);
}

pub type Wad = u128;   // montante bruto (wei / menor unidade do token)
pub type Ppm = u32;    // 0..=1_000_000

pub const WAD: Wad = 1_000_000_000_000_000_000u128; // 1e18 (escala de preço)
pub const PPM_SCALE: Ppm = 1_000_000;                // 1e6 (ppm)

/// Taxa da geração 2: 1% sobre o input.
pub const FEE_ONE_PERCENT_PPM: Ppm = 10_000;

/// Identidade de uma conta (holder de shares ou de tokens).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Política de taxa do swap (estratégia fixada na construção do pool).
/// A fórmula em si mora em `swap::get_amount_out`; aqui só o parâmetro.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeePolicy {
    pub fee_ppm: Ppm,
}

impl FeePolicy {
    /// Geração 1: produto constante puro, sem taxa.
    pub const NONE: FeePolicy = FeePolicy { fee_ppm: 0 };
    /// Geração 2: 1% retido no pool.
    pub const ONE_PERCENT: FeePolicy = FeePolicy { fee_ppm: FEE_ONE_PERCENT_PPM };

    pub const fn new(fee_ppm: Ppm) -> Self {
        Self { fee_ppm }
    }

    pub const fn is_zero(&self) -> bool {
        self.fee_ppm == 0
    }
}

/// Par de reservas do pool: (nativo, token).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reserves { pub native: Wad, pub token: Wad }
impl Reserves {
    pub fn new(native: Wad, token: Wad) -> Self { Self { native, token } }

    pub fn is_empty(&self) -> bool { self.native == 0 && self.token == 0 }

    /// k = nativo · token (sempre em 256 bits).
    pub fn product(&self) -> U256 { U256::from(self.native) * U256::from(self.token) }
}

/// Resultado de um depósito de liquidez.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityReceipt {
    pub shares_minted: Wad,
    pub native_added: Wad,
    pub token_pulled: Wad,
}

/// Resultado de um saque de liquidez. `native_out` é pago pelo host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalReceipt {
    pub shares_burned: Wad,
    pub native_out: Wad,
    pub token_out: Wad,
}
