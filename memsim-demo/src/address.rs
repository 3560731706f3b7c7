//! Leitura dos endereços digitados pelo usuário.
//!
//! O núcleo só aceita `u16`, então validar formato e faixa é trabalho daqui.

use std::num::IntErrorKind;

use thiserror::Error;

/// Base usada para endereços sem prefixo `0x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressFormat {
    Hex,
    Decimal,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Please enter an address")]
    Empty,

    #[error("Invalid address format: {0:?}")]
    InvalidFormat(String),

    /// Guarda o texto digitado, já que o valor pode nem caber num `u64`.
    #[error("Address out of range (0x0000-0xFFFF): {0}")]
    OutOfRange(String),
}

pub fn parse_address(raw: &str, format: AddressFormat) -> Result<u16, AddressParseError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(AddressParseError::Empty);
    }

    let (digits, radix) = match raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
    {
        Some(digits) => (digits, 16),
        None if format == AddressFormat::Hex => (raw, 16),
        None => (raw, 10),
    };

    let value = u64::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => AddressParseError::OutOfRange(raw.to_string()),
        _ => AddressParseError::InvalidFormat(raw.to_string()),
    })?;

    u16::try_from(value).map_err(|_| AddressParseError::OutOfRange(raw.to_string()))
}
