use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

/// Width of one cleartext word in a fulfilment payload.
pub const WORD_LEN: u32 = 32;

const PROOF_DOMAIN: &[u8] = b"decryption-proof-v1";

/// Encodes a plaintext as a 32-byte big-endian word.
pub fn encode_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Binds a cleartext payload to one request of one oracle instance:
///
/// `sha256(domain || oracle || request_id || handle_1 .. handle_k || cleartexts)`
pub fn compute(
    env: &Env,
    oracle: &Address,
    request_id: u64,
    handles: &Vec<BytesN<32>>,
    cleartexts: &Bytes,
) -> BytesN<32> {
    let mut preimage = Bytes::from_slice(env, PROOF_DOMAIN);
    preimage.append(&oracle.clone().to_xdr(env));
    preimage.extend_from_array(&request_id.to_be_bytes());
    for handle in handles.iter() {
        preimage.extend_from_array(&handle.to_array());
    }
    preimage.append(cleartexts);
    env.crypto().sha256(&preimage).into()
}
