use soroban_sdk::{contracttype, Env};

/// Paillier public key with `g = n + 1`.
///
/// `n` must stay below 2^63 so that every residue mod `n^2` fits in 126 bits
/// and the modular helpers below never overflow `u128`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaillierPublicKey {
    pub n: u128,  // n = p * q
    pub nn: u128, // n^2
    pub g: u128,  // g = n + 1
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaillierPrivateKey {
    pub lambda: u128, // phi(n) = (p-1)(q-1)
    pub mu: u128,     // lambda^-1 mod n
}

const MAX_MODULUS: u128 = 1 << 63;

impl PaillierPublicKey {
    pub fn is_well_formed(&self) -> bool {
        // n > 2 keeps the nonce range 2..n non-empty.
        self.n > 2
            && self.n < MAX_MODULUS
            && self.n.checked_mul(self.n) == Some(self.nn)
            && self.g == self.n + 1
    }
}

pub struct HomomorphicEngine;

impl HomomorphicEngine {
    /// c = g^m * r^n mod n^2, with `r` drawn from the ledger PRNG.
    pub fn encrypt(env: &Env, pub_key: &PaillierPublicKey, m: u128) -> u128 {
        let r = env.prng().gen_range::<u64>(2..pub_key.n as u64) as u128;
        Self::encrypt_with_nonce(pub_key, m, r)
    }

    pub fn encrypt_with_nonce(pub_key: &PaillierPublicKey, m: u128, r: u128) -> u128 {
        let gm = Self::pow_mod(pub_key.g, m, pub_key.nn);
        let rn = Self::pow_mod(r, pub_key.n, pub_key.nn);
        Self::mul_mod(gm, rn, pub_key.nn)
    }

    /// m = L(c^lambda mod n^2) * mu mod n, where L(u) = (u - 1) / n.
    pub fn decrypt(pub_key: &PaillierPublicKey, priv_key: &PaillierPrivateKey, c: u128) -> u128 {
        let u = Self::pow_mod(c, priv_key.lambda, pub_key.nn);
        let l_u = (u.saturating_sub(1)) / pub_key.n;
        Self::mul_mod(l_u, priv_key.mu, pub_key.n)
    }

    /// Additive property: E(m1 + m2) = E(m1) * E(m2) mod n^2
    pub fn add_ciphertexts(pub_key: &PaillierPublicKey, c1: u128, c2: u128) -> u128 {
        Self::mul_mod(c1, c2, pub_key.nn)
    }

    fn add_mod(a: u128, b: u128, m: u128) -> u128 {
        // a, b < m < 2^127, so the sum cannot wrap.
        let s = a + b;
        if s >= m {
            s - m
        } else {
            s
        }
    }

    fn mul_mod(a: u128, mut b: u128, m: u128) -> u128 {
        let mut a = a % m;
        let mut res = 0u128;
        b %= m;
        while b > 0 {
            if b & 1 == 1 {
                res = Self::add_mod(res, a, m);
            }
            a = Self::add_mod(a, a, m);
            b >>= 1;
        }
        res
    }

    fn pow_mod(base: u128, mut exp: u128, m: u128) -> u128 {
        let mut res = 1 % m;
        let mut base = base % m;
        while exp > 0 {
            if exp & 1 == 1 {
                res = Self::mul_mod(res, base, m);
            }
            base = Self::mul_mod(base, base, m);
            exp >>= 1;
        }
        res
    }
}
