//! Tests for per-blockchain wallet address validation.

use bech32::{Bech32, Hrp};
use std::str::FromStr;
use strum::IntoEnumIterator;
use whitelister_core::{
    Blockchain, is_valid_ada_address, is_valid_evm_address, is_valid_sol_address, validate,
};

// Reference vectors from EIP-55.
const EIP55_VECTORS: [&str; 4] = [
    "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
    "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
    "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
    "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
];

fn shelley_address(header: u8, payload_len: usize) -> String {
    let mut payload = vec![header];
    payload.extend((1..payload_len).map(|i| i as u8));
    bech32::encode::<Bech32>(Hrp::parse("addr").expect("valid hrp"), &payload)
        .expect("encodable address")
}

#[test]
fn test_eip55_checksummed_addresses_are_valid() {
    for address in EIP55_VECTORS {
        assert!(is_valid_evm_address(address), "{address} should be valid");
    }
}

#[test]
fn test_single_case_evm_addresses_skip_checksum() {
    assert!(is_valid_evm_address(
        "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
    ));
    assert!(is_valid_evm_address(
        "0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"
    ));
}

#[test]
fn test_broken_eip55_checksum_is_rejected() {
    // First vector with one letter's case flipped.
    assert!(!is_valid_evm_address(
        "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
    ));
}

#[test]
fn test_malformed_evm_addresses_are_rejected() {
    assert!(!is_valid_evm_address(""));
    assert!(!is_valid_evm_address("0x"));
    assert!(!is_valid_evm_address("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
    assert!(!is_valid_evm_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe"));
    assert!(!is_valid_evm_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAedd"));
    assert!(!is_valid_evm_address("0xzzzzb6053f3e94c9b9a09f33669435e7ef1beaed"));
    assert!(!is_valid_evm_address(" 0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
}

#[test]
fn test_solana_addresses() {
    assert!(is_valid_sol_address("11111111111111111111111111111111"));

    let key: Vec<u8> = (0u8..32).map(|b| b.wrapping_mul(7).wrapping_add(3)).collect();
    let encoded = bs58::encode(&key).into_string();
    assert!(is_valid_sol_address(&encoded));

    let short = bs58::encode(&key[..20]).into_string();
    assert!(!is_valid_sol_address(&short));
    // '0', 'O', 'I' and 'l' are not in the base58 alphabet.
    assert!(!is_valid_sol_address("0OIl1111111111111111111111111111"));
    assert!(!is_valid_sol_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
}

#[test]
fn test_cardano_shelley_addresses() {
    // Base address (type 0) and enterprise address (type 6) on mainnet.
    assert!(is_valid_ada_address(&shelley_address(0x01, 57)));
    assert!(is_valid_ada_address(&shelley_address(0x61, 29)));

    // Testnet network id.
    assert!(!is_valid_ada_address(&shelley_address(0x00, 57)));
    // Reward address header under the payment hrp.
    assert!(!is_valid_ada_address(&shelley_address(0xe1, 29)));
    // Truncated payload.
    assert!(!is_valid_ada_address(&shelley_address(0x61, 10)));
}

#[test]
fn test_cardano_rejects_bad_checksum_and_foreign_hrp() {
    let mut address = shelley_address(0x61, 29);
    let last = address.pop().expect("non-empty");
    address.push(if last == 'q' { 'p' } else { 'q' });
    assert!(!is_valid_ada_address(&address));

    let stake = bech32::encode::<Bech32>(Hrp::parse("stake").expect("valid hrp"), &[0xe1; 29])
        .expect("encodable address");
    assert!(!is_valid_ada_address(&stake));
    assert!(!is_valid_ada_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
}

#[test]
fn test_cardano_byron_addresses() {
    let byron = format!("Ae2{}", bs58::encode([9u8; 40]).into_string());
    assert!(is_valid_ada_address(&byron));
    assert!(!is_valid_ada_address("Ae2tdPwUPEZ0OIl"));
}

#[test]
fn test_registry_is_total_over_blockchain_codes() {
    for chain in Blockchain::iter() {
        // Every code has a validator and the empty string never passes.
        assert!(!validate(chain, ""));
    }
    assert!(validate(Blockchain::Matic, EIP55_VECTORS[1]));
    assert!(!validate(Blockchain::Sol, EIP55_VECTORS[1]));
}

#[test]
fn test_blockchain_codes_parse() {
    assert_eq!(Blockchain::from_str("eth").ok(), Some(Blockchain::Eth));
    assert_eq!(Blockchain::from_str("SOL").ok(), Some(Blockchain::Sol));
    assert_eq!(Blockchain::from_str("ada").ok(), Some(Blockchain::Ada));
    assert_eq!(Blockchain::from_str("matic").ok(), Some(Blockchain::Matic));
    assert!(Blockchain::from_str("xyz").is_err());
    assert!(Blockchain::from_str("").is_err());
    assert_eq!(Blockchain::Ada.code(), "ada");
}
