use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

/// State hash of an ordered handle snapshot:
/// `sha256(handle_1 || .. || handle_k || identity)`.
///
/// `identity` is the address of the contract instance holding the state, so
/// two deployments over identical ciphertexts never share a fingerprint.
pub fn compute(env: &Env, handles: &Vec<BytesN<32>>, identity: &Address) -> BytesN<32> {
    let mut preimage = Bytes::new(env);
    for handle in handles.iter() {
        preimage.extend_from_array(&handle.to_array());
    }
    preimage.append(&identity.clone().to_xdr(env));
    env.crypto().sha256(&preimage).into()
}

/// Fingerprint bound to the running contract.
pub fn of_current_instance(env: &Env, handles: &Vec<BytesN<32>>) -> BytesN<32> {
    compute(env, handles, &env.current_contract_address())
}
