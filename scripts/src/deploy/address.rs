//! Contract address prediction

use alloy::primitives::{keccak256, Address};
use ethers::{prelude::U256, utils::rlp};

/// Predict the address of a contract created by `sender` at `nonce`
///
/// This is `keccak256(rlp([sender, nonce]))[12..]`
pub fn predict_contract_address(sender: Address, nonce: u64) -> Address {
    let mut stream = rlp::RlpStream::new();
    stream.begin_list(2);
    stream.append(&sender.to_vec());
    stream.append(&U256::from(nonce));
    let hash = keccak256(stream.out());

    Address::from_slice(&hash[12..])
}
