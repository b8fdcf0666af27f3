use soroban_sdk::{contractclient, BytesN, Env, String, Symbol};

/// External price oracle. Answers arrive later through
/// `on_price_delivered`, signed by the oracle address.
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    /// Fee charged for one query against `datasource`, in payment units.
    fn fee(env: Env, datasource: Symbol) -> i128;

    /// Schedules a query to run after `timeout` seconds and returns its id.
    fn query(env: Env, datasource: Symbol, argument: String, timeout: u64) -> BytesN<32>;
}
