//! Tipo de erro unificado do pool com formatação estável.
use core::fmt;
use std::collections::BTreeMap;

use crate::amm::error_catalog::{default_locale_message, AmmErrorCode};

const CONTEXT_VALUE_MAX: usize = 256;

fn sanitize_value(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .collect();
    if cleaned.chars().count() <= CONTEXT_VALUE_MAX {
        return cleaned;
    }
    let mut truncated: String = cleaned.chars().take(CONTEXT_VALUE_MAX - 1).collect();
    truncated.push('…');
    truncated
}

fn escape_json(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => {
                use core::fmt::Write as _;
                let _ = write!(&mut escaped, "\\u{:04x}", c as u32);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Substitui `{chave}` pelo valor do contexto; chaves desconhecidas ficam intactas.
fn render_template(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match context.get(key) {
                    Some(value) if !key.is_empty() => rendered.push_str(value),
                    _ => {
                        rendered.push('{');
                        rendered.push_str(key);
                        rendered.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                rendered.push('{');
                rendered.push_str(after);
                rest = "";
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

/// Erro do pool com contexto estruturado (montantes, reservas, caller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmmError {
    pub code: AmmErrorCode,
    pub context: BTreeMap<String, String>,
}

impl AmmError {
    /// Cria um novo erro sem contexto adicional.
    pub fn new(code: AmmErrorCode) -> Self {
        Self {
            code,
            context: BTreeMap::new(),
        }
    }

    /// Adiciona um par chave/valor ao contexto.
    pub fn with_context<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        let key_string = key.into();
        if !key_string.is_empty() {
            let sanitized = sanitize_value(&value.to_string());
            self.context.insert(key_string, sanitized);
        }
        self
    }

    /// Atalho para comparar só o código.
    pub fn is(&self, code: AmmErrorCode) -> bool {
        self.code == code
    }

    fn resolved_message(&self) -> String {
        render_template(default_locale_message(self.code), &self.context)
    }

    /// Mensagem curta para UI.
    pub fn to_user_string(&self) -> String {
        format!("[{}] {}", self.code.code(), self.resolved_message())
    }

    /// Renderiza um template arbitrário usando o contexto atual.
    pub fn render_with_template(&self, template: &str) -> String {
        render_template(template, &self.context)
    }

    /// Serialização estável em JSON para logs.
    pub fn to_log_json(&self) -> String {
        let context = self
            .context
            .iter()
            .map(|(k, v)| format!("\"{}\":\"{}\"", escape_json(k), escape_json(v)))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{{\"code\":\"{}\",\"title\":\"{}\",\"message\":\"{}\",\"context\":{{{}}}}}",
            escape_json(self.code.code()),
            escape_json(self.code.title()),
            escape_json(&self.resolved_message()),
            context
        )
    }
}

impl From<AmmErrorCode> for AmmError {
    fn from(code: AmmErrorCode) -> Self {
        AmmError::new(code)
    }
}

impl fmt::Display for AmmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_user_string())
    }
}

impl std::error::Error for AmmError {}

/// Resultado padrão para operações do pool.
pub type Result<T> = std::result::Result<T, AmmError>;

#[macro_export]
macro_rules! amm_err {
  ($code:expr) => {{
    $crate::amm::error::AmmError::new($code)
  }};
  ($code:expr, $($key:ident => $value:expr),+ $(,)?) => {{
    let mut err = $crate::amm::error::AmmError::new($code);
    $(
      err = err.with_context(stringify!($key), $value);
    )+
    err
  }};
  ($code:expr, { $($key:expr => $value:expr),+ $(,)? }) => {{
    let mut err = $crate::amm::error::AmmError::new($code);
    $(
      err = err.with_context($key, $value);
    )+
    err
  }};
}

#[macro_export]
macro_rules! amm_bail {
  ($($tt:tt)*) => {
    return Err($crate::amm_err!($($tt)*))
  };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_string_basic() {
        let err = AmmError::new(AmmErrorCode::InsufficientShares);
        assert_eq!(
            err.to_user_string(),
            "[AMM-0003] shares pedidas excedem o saldo do caller"
        );
    }

    #[test]
    fn placeholder_subst() {
        let err = AmmError::new(AmmErrorCode::SlippageExceeded)
            .with_context("min_out", 19)
            .with_context("out", 18);
        let rendered = err.render_with_template("out={out} < min={min_out}");
        assert_eq!(rendered, "out=18 < min=19");
    }

    #[test]
    fn unterminated_placeholder_kept() {
        let err = AmmError::new(AmmErrorCode::InvalidState);
        assert_eq!(err.render_with_template("pool {aberto"), "pool {aberto");
    }

    #[test]
    fn log_json_shape() {
        let err = AmmError::new(AmmErrorCode::InsufficientTokenAmount)
            .with_context("required", 100)
            .with_context("offered", 50);
        let json = err.to_log_json();
        assert!(json.starts_with("{\"code\":\"AMM-0002\""));
        assert!(json.contains("\"title\":\"Token insuficiente\""));
        assert!(json.ends_with("\"context\":{\"offered\":\"50\",\"required\":\"100\"}}"));
    }

    #[test]
    fn macros_variants() {
        let err = amm_err!(AmmErrorCode::TransferFailed, amount => 0);
        assert!(err.is(AmmErrorCode::TransferFailed));
        assert_eq!(err.context.get("amount").map(String::as_str), Some("0"));

        let err_block = amm_err!(AmmErrorCode::ZeroReserve, { "reserve" => 0 });
        assert_eq!(err_block.code, AmmErrorCode::ZeroReserve);
        assert_eq!(err_block.context.get("reserve").map(String::as_str), Some("0"));
    }

    #[test]
    fn bail_returns_err() {
        fn reject() -> Result<()> {
            amm_bail!(AmmErrorCode::InvalidState, op => "swap");
        }
        assert!(reject().unwrap_err().is(AmmErrorCode::InvalidState));
    }
}
