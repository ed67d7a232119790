//! Wallet address format validators.
//!
//! These are format checks only: they prove an address is well formed for
//! its chain, not that it exists or holds funds.

use crate::Blockchain;
use sha3::{Digest, Keccak256};

const EVM_PREFIX: &str = "0x";
const EVM_HEX_LEN: usize = 40;

const SOL_KEY_LEN: usize = 32;
const SOL_MIN_CHARS: usize = 32;
const SOL_MAX_CHARS: usize = 44;

const ADA_SHELLEY_HRP: &str = "addr";
const ADA_MAINNET: u8 = 0b0001;
// Header byte + 28-byte payment credential.
const ADA_MIN_PAYLOAD: usize = 29;
const ADA_BYRON_PREFIXES: [&str; 2] = ["Ae2", "DdzFF"];

/// Validate `text` as a wallet address for `blockchain`.
///
/// ```
/// use whitelister_core::{Blockchain, validate};
///
/// assert!(validate(Blockchain::Eth, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
/// assert!(!validate(Blockchain::Eth, "hello"));
/// ```
pub fn validate(blockchain: Blockchain, text: &str) -> bool {
    blockchain.validate(text)
}

/// Ethereum-style (EVM) address: `0x` followed by 40 hex digits.
///
/// Single-case bodies are accepted as-is. Mixed-case bodies must carry a
/// valid EIP-55 checksum.
pub fn is_valid_evm_address(text: &str) -> bool {
    let Some(body) = text.strip_prefix(EVM_PREFIX) else {
        return false;
    };
    if body.len() != EVM_HEX_LEN || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        has_eip55_checksum(body)
    } else {
        true
    }
}

fn has_eip55_checksum(body: &str) -> bool {
    let hash = Keccak256::digest(body.to_ascii_lowercase().as_bytes());
    body.bytes().enumerate().all(|(i, b)| {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        match b {
            b'a'..=b'f' => nibble < 8,
            b'A'..=b'F' => nibble >= 8,
            _ => true,
        }
    })
}

/// Solana address: base58 text encoding a 32-byte ed25519 public key.
pub fn is_valid_sol_address(text: &str) -> bool {
    if !(SOL_MIN_CHARS..=SOL_MAX_CHARS).contains(&text.len()) {
        return false;
    }
    bs58::decode(text)
        .into_vec()
        .is_ok_and(|bytes| bytes.len() == SOL_KEY_LEN)
}

/// Cardano mainnet address.
///
/// Accepts Shelley payment addresses (bech32, `addr1...`) and legacy Byron
/// addresses (base58, `Ae2...` / `DdzFF...`).
pub fn is_valid_ada_address(text: &str) -> bool {
    if ADA_BYRON_PREFIXES
        .iter()
        .any(|prefix| text.starts_with(prefix))
    {
        return bs58::decode(text).into_vec().is_ok();
    }

    let Ok((hrp, payload)) = bech32::decode(text) else {
        return false;
    };
    if hrp.to_lowercase() != ADA_SHELLEY_HRP || payload.len() < ADA_MIN_PAYLOAD {
        return false;
    }

    let header = payload[0];
    let address_type = header >> 4;
    let network = header & 0x0f;
    address_type <= 7 && network == ADA_MAINNET
}
