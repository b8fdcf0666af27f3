//! Test doubles for code that drives the sale, built with the `testutils`
//! feature.

use soroban_sdk::{contract, contractimpl, contracttype, BytesN, Env, String, Symbol, Vec};

#[derive(Clone)]
#[contracttype]
enum OracleKey {
    Fee,
    Issued,
    LastTimeout,
}

/// Oracle that charges a settable fee and hands out sequential query ids.
/// Answers are pushed by the test through `on_price_delivered`.
#[contract]
pub struct MockOracle;

#[contractimpl]
impl MockOracle {
    pub fn set_fee(env: Env, fee: i128) {
        env.storage().instance().set(&OracleKey::Fee, &fee);
    }

    pub fn fee(env: Env, _datasource: Symbol) -> i128 {
        env.storage().instance().get(&OracleKey::Fee).unwrap_or(0)
    }

    pub fn query(env: Env, _datasource: Symbol, _argument: String, timeout: u64) -> BytesN<32> {
        let mut issued = Self::issued(env.clone());
        let mut raw = [0u8; 32];
        raw[..4].copy_from_slice(&(issued.len() + 1).to_be_bytes());
        let id = BytesN::from_array(&env, &raw);
        issued.push_back(id.clone());
        env.storage().instance().set(&OracleKey::Issued, &issued);
        env.storage()
            .instance()
            .set(&OracleKey::LastTimeout, &timeout);
        id
    }

    /// Every id issued so far, oldest first.
    pub fn issued(env: Env) -> Vec<BytesN<32>> {
        env.storage()
            .instance()
            .get(&OracleKey::Issued)
            .unwrap_or(Vec::new(&env))
    }

    pub fn last_timeout(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&OracleKey::LastTimeout)
            .unwrap_or(0)
    }
}
