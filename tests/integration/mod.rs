//! End-to-end scenarios across the sale and the vesting timelock.

mod sale_lifecycle;
