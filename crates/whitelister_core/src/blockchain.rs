//! Supported blockchains.

use crate::address;

/// Blockchain whose wallet addresses a guild collects.
///
/// The string form is the short code admins type after `>blockchain`.
///
/// ```
/// use std::str::FromStr;
/// use whitelister_core::Blockchain;
///
/// assert_eq!(Blockchain::from_str("eth").unwrap(), Blockchain::Eth);
/// assert_eq!(Blockchain::Matic.to_string(), "matic");
/// assert!(Blockchain::from_str("xyz").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Blockchain {
    /// Ethereum mainnet
    Eth,
    /// Solana
    Sol,
    /// Cardano
    Ada,
    /// Polygon
    Matic,
}

impl Blockchain {
    /// Short code as stored in the database.
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Whether `text` is a well-formed wallet address on this chain.
    pub fn validate(self, text: &str) -> bool {
        match self {
            Blockchain::Eth | Blockchain::Matic => address::is_valid_evm_address(text),
            Blockchain::Sol => address::is_valid_sol_address(text),
            Blockchain::Ada => address::is_valid_ada_address(text),
        }
    }
}
