//! CPF type
//!
//! Brazilian individual taxpayer number. Eleven digits, the last two being
//! mod-11 check digits over the first nine (and ten).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CPF_LENGTH: usize = 11;

/// A CPF whose check digits have been verified.
///
/// Stored as the bare eleven digits; punctuation such as `284.759.346-25`
/// is accepted on input and stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CpfError {
    #[error("must have {CPF_LENGTH} digits")]
    InvalidLength,

    #[error("contains invalid characters")]
    InvalidCharacters,

    #[error("invalid check digits")]
    InvalidCheckDigits,
}

impl Cpf {
    pub fn parse(input: &str) -> Result<Self, CpfError> {
        let mut digits = Vec::with_capacity(CPF_LENGTH);
        for c in input.trim().chars() {
            match c {
                '.' | '-' => continue,
                c if c.is_ascii_digit() => digits.push(c as u32 - '0' as u32),
                _ => return Err(CpfError::InvalidCharacters),
            }
        }

        if digits.len() != CPF_LENGTH {
            return Err(CpfError::InvalidLength);
        }

        // 000.000.000-00, 111.111.111-11, ... pass the checksum but are not issued
        if digits.iter().all(|d| *d == digits[0]) {
            return Err(CpfError::InvalidCheckDigits);
        }

        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(CpfError::InvalidCheckDigits);
        }

        Ok(Self(digits.iter().map(|d| char::from(b'0' + *d as u8)).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Weights run from `len + 1` down to 2
fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cpf::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = CpfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cpf::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}
