//! Catálogo imutável de erros do pool.
use core::fmt;

/// Código de erro do pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum AmmErrorCode {
    /// O colaborador de token recusou a transferência (saldo ou allowance).
    TransferFailed,
    /// Depósito com menos token do que a taxa de câmbio atual exige.
    InsufficientTokenAmount,
    /// Saque de mais shares do que o caller possui.
    InsufficientShares,
    /// Output do swap abaixo do mínimo pedido pelo caller.
    SlippageExceeded,
    /// Operação exige pool provisionado (ou deixaria o pool inconsistente).
    InvalidState,
    /// Reserva zerada passada para uma cotação pura.
    ZeroReserve,
    /// Overflow ou underflow em cálculos numéricos.
    OverflowNumeric,
    /// Configuração do pool fora do domínio.
    InvalidConfig,
}

impl AmmErrorCode {
    /// Código textual estável do erro.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TransferFailed => "AMM-0001",
            Self::InsufficientTokenAmount => "AMM-0002",
            Self::InsufficientShares => "AMM-0003",
            Self::SlippageExceeded => "AMM-0004",
            Self::InvalidState => "AMM-0005",
            Self::ZeroReserve => "AMM-0006",
            Self::OverflowNumeric => "AMM-0007",
            Self::InvalidConfig => "AMM-0008",
        }
    }

    /// Título curto em português.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::TransferFailed => "Transferência recusada",
            Self::InsufficientTokenAmount => "Token insuficiente",
            Self::InsufficientShares => "Shares insuficientes",
            Self::SlippageExceeded => "Slippage excedido",
            Self::InvalidState => "Estado inválido",
            Self::ZeroReserve => "Reserva zerada",
            Self::OverflowNumeric => "Overflow numérico",
            Self::InvalidConfig => "Configuração inválida",
        }
    }

    /// Mensagem base em português.
    pub const fn message_pt(&self) -> &'static str {
        match self {
            Self::TransferFailed => "transferência de token falhou",
            Self::InsufficientTokenAmount => "token_amount abaixo do exigido pela taxa atual",
            Self::InsufficientShares => "shares pedidas excedem o saldo do caller",
            Self::SlippageExceeded => "output abaixo do mínimo aceito",
            Self::InvalidState => "pool vazio ou operação deixaria o pool inconsistente",
            Self::ZeroReserve => "reserve deve ser > 0",
            Self::OverflowNumeric => "overflow/underflow numérico",
            Self::InvalidConfig => "parâmetro de configuração inválido",
        }
    }

    /// Retorna todas as variantes em ordem estável.
    pub fn all() -> &'static [AmmErrorCode] {
        const ALL: &[AmmErrorCode] = &[
            AmmErrorCode::TransferFailed,
            AmmErrorCode::InsufficientTokenAmount,
            AmmErrorCode::InsufficientShares,
            AmmErrorCode::SlippageExceeded,
            AmmErrorCode::InvalidState,
            AmmErrorCode::ZeroReserve,
            AmmErrorCode::OverflowNumeric,
            AmmErrorCode::InvalidConfig,
        ];
        ALL
    }
}

impl fmt::Display for AmmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mensagem padrão na localidade ativa (pt-BR).
pub fn default_locale_message(code: AmmErrorCode) -> &'static str {
    code.message_pt()
}
