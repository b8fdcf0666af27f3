#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, log, symbol_short, token,
    Address, Env, Vec,
};

contractmeta!(
    key = "Description",
    val = "Four-checkpoint vesting timelock with catch-up release"
);

pub const VESTING_PERIODS: u32 = 4;
pub const ONE_TOKEN: i128 = 10_000_000;
/// Nominal grant in raw units. Not rescaled by the token's decimals.
pub const TOTAL_GRANT: i128 = 40_000_000 * ONE_TOKEN;
pub const PER_PERIOD: i128 = TOTAL_GRANT / VESTING_PERIODS as i128;

const DAY_IN_LEDGERS: u32 = 17_280;
/// Checkpoints are a year apart, so keep the schedule alive for the longest
/// span the network allows and top it up on every touch.
pub const INSTANCE_TTL_AMOUNT: u32 = 180 * DAY_IN_LEDGERS;
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - 30 * DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidArgument = 3,
    NoNewPeriod = 4,
}

#[contracttype]
pub enum DataKey {
    Schedule,
    PeriodsReleased,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Schedule {
    pub beneficiary: Address,
    pub token: Address,
    /// Ledger account that approved the timelock as spender of the grant.
    pub funder: Address,
    pub checkpoints: Vec<u64>,
    pub token_decimals: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct InitializedEvent {
    pub funder: Address,
    pub beneficiary: Address,
    pub token: Address,
    pub checkpoints: Vec<u64>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReleasedEvent {
    pub beneficiary: Address,
    pub periods_released: u32,
    pub amount: i128,
}

impl Schedule {
    /// Number of checkpoints reached at `now`.
    pub fn reached(&self, now: u64) -> u32 {
        self.checkpoints.iter().take_while(|at| now >= *at).count() as u32
    }

    /// Amount owed for moving from `released` to `reached` periods.
    pub fn owed(released: u32, reached: u32) -> i128 {
        PER_PERIOD * reached.saturating_sub(released) as i128
    }
}

fn validate_checkpoints(checkpoints: &Vec<u64>) -> Result<(), Error> {
    if checkpoints.len() != VESTING_PERIODS {
        return Err(Error::InvalidArgument);
    }
    for i in 1..checkpoints.len() {
        if checkpoints.get_unchecked(i) <= checkpoints.get_unchecked(i - 1) {
            return Err(Error::InvalidArgument);
        }
    }
    Ok(())
}

fn get_schedule(env: &Env) -> Result<Schedule, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Schedule)
        .ok_or(Error::NotInitialized)
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

fn get_periods_released(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PeriodsReleased)
        .unwrap_or(0)
}

#[contract]
pub struct VestingTimelock;

#[contractimpl]
impl VestingTimelock {
    /// Fixes the beneficiary, the token and the four checkpoints. The funder
    /// must separately approve this contract for `TOTAL_GRANT`.
    pub fn initialize(
        env: Env,
        funder: Address,
        beneficiary: Address,
        token: Address,
        checkpoints: Vec<u64>,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Schedule) {
            return Err(Error::AlreadyInitialized);
        }
        funder.require_auth();
        validate_checkpoints(&checkpoints)?;

        let token_decimals = token::Client::new(&env, &token).decimals();
        let schedule = Schedule {
            beneficiary,
            token,
            funder,
            checkpoints,
            token_decimals,
        };
        env.storage().instance().set(&DataKey::Schedule, &schedule);
        env.storage().instance().set(&DataKey::PeriodsReleased, &0u32);
        extend_instance_ttl(&env);

        env.events().publish(
            ("VEST", symbol_short!("init")),
            InitializedEvent {
                funder: schedule.funder,
                beneficiary: schedule.beneficiary,
                token: schedule.token,
                checkpoints: schedule.checkpoints,
            },
        );
        Ok(())
    }

    /// Pays every period reached since the last release. Anyone may call it;
    /// the tokens only ever go to the beneficiary.
    pub fn release(env: Env) -> Result<i128, Error> {
        let schedule = get_schedule(&env)?;
        let released = get_periods_released(&env);
        let reached = schedule.reached(env.ledger().timestamp());
        if reached <= released {
            return Err(Error::NoNewPeriod);
        }
        let amount = Schedule::owed(released, reached);

        env.storage()
            .instance()
            .set(&DataKey::PeriodsReleased, &reached);
        extend_instance_ttl(&env);

        token::Client::new(&env, &schedule.token).transfer_from(
            &env.current_contract_address(),
            &schedule.funder,
            &schedule.beneficiary,
            &amount,
        );

        log!(&env, "vesting released", reached, amount);
        env.events().publish(
            ("VEST", symbol_short!("released")),
            ReleasedEvent {
                beneficiary: schedule.beneficiary,
                periods_released: reached,
                amount,
            },
        );
        Ok(amount)
    }

    // View functions
    pub fn releasable(env: Env) -> Result<i128, Error> {
        let schedule = get_schedule(&env)?;
        let reached = schedule.reached(env.ledger().timestamp());
        Ok(Schedule::owed(get_periods_released(&env), reached))
    }

    pub fn periods_released(env: Env) -> u32 {
        get_periods_released(&env)
    }

    pub fn schedule(env: Env) -> Result<Schedule, Error> {
        get_schedule(&env)
    }
}
