#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

pub fn publish_ciphertext_created(env: &Env, handle: BytesN<32>, owner: Address) {
    env.events()
        .publish((symbol_short!("CT_NEW"), owner), handle);
}

pub fn publish_decryptor_set(env: &Env, decryptor: Address) {
    env.events().publish((symbol_short!("DECRYPTR"),), decryptor);
}
