//! Ownership with a two-step handover, the pause switch, and the buyer
//! whitelist.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::Error;
use crate::events;
use crate::storage::*;
use crate::types::Ownership;

impl Ownership {
    pub fn new(owner: Address) -> Self {
        Ownership {
            owner,
            pending_owner: None,
        }
    }

    pub fn require_owner(&self, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if *caller != self.owner {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    /// Takes effect only once the nominee claims it.
    pub fn propose(&mut self, new_owner: Address) {
        self.pending_owner = Some(new_owner);
    }

    /// Hands ownership to the pending owner, returning the previous owner.
    pub fn claim(&mut self, caller: &Address) -> Result<Address, Error> {
        caller.require_auth();
        match &self.pending_owner {
            Some(pending) if pending == caller => {
                let previous = core::mem::replace(&mut self.owner, caller.clone());
                self.pending_owner = None;
                Ok(previous)
            }
            _ => Err(Error::Unauthorized),
        }
    }
}

/// Loads the ownership record and checks `caller` against it.
pub fn require_owner(env: &Env, caller: &Address) -> Result<Ownership, Error> {
    let ownership = get_ownership(env)?;
    ownership.require_owner(caller)?;
    Ok(ownership)
}

pub fn transfer_ownership(env: &Env, caller: &Address, new_owner: Address) -> Result<(), Error> {
    let mut ownership = require_owner(env, caller)?;
    ownership.propose(new_owner.clone());
    set_ownership(env, &ownership);
    events::emit_ownership_proposed(env, ownership.owner, new_owner);
    Ok(())
}

pub fn cancel_ownership_transfer(env: &Env, caller: &Address) -> Result<(), Error> {
    let mut ownership = require_owner(env, caller)?;
    let pending = ownership.pending_owner.take().ok_or(Error::InvalidState)?;
    set_ownership(env, &ownership);
    events::emit_ownership_cancelled(env, ownership.owner, pending);
    Ok(())
}

pub fn claim_ownership(env: &Env, caller: &Address) -> Result<(), Error> {
    let mut ownership = get_ownership(env)?;
    let previous = ownership.claim(caller)?;
    set_ownership(env, &ownership);
    events::emit_ownership_changed(env, previous, caller.clone());
    Ok(())
}

pub fn pause(env: &Env, caller: &Address) -> Result<(), Error> {
    require_owner(env, caller)?;
    if is_paused(env) {
        return Err(Error::InvalidState);
    }
    set_paused(env, true);
    events::emit_paused(env);
    Ok(())
}

pub fn unpause(env: &Env, caller: &Address) -> Result<(), Error> {
    require_owner(env, caller)?;
    if !is_paused(env) {
        return Err(Error::InvalidState);
    }
    set_paused(env, false);
    events::emit_unpaused(env);
    Ok(())
}

/// Returns whether membership actually changed.
fn set_listing(env: &Env, account: &Address, listed: bool) -> bool {
    if is_whitelisted(env, account) == listed {
        return false;
    }
    set_whitelisted(env, account, listed);
    events::emit_whitelist_changed(env, account.clone(), listed);
    true
}

pub fn update_whitelist(
    env: &Env,
    caller: &Address,
    accounts: &Vec<Address>,
    listed: bool,
) -> Result<bool, Error> {
    require_owner(env, caller)?;
    let mut changed = false;
    for account in accounts.iter() {
        changed |= set_listing(env, &account, listed);
    }
    Ok(changed)
}
