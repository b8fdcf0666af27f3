use crate::errors::Error;
use crate::types::{PriceFeed, CENTS_PER_UNIT, COMMODITY_PRECISION, ONE_TOKEN};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Conversion {
    pub value_units: i128,
    pub token_units: i128,
}

/// Converts a payment into tokens in two truncating steps:
///
/// ```text
/// value_units = floor(payment × reference_rate_cents / 100)
/// token_units = floor(value_units × 100 / commodity_rate_cents)
/// ```
///
/// Each division rounds toward zero on its own, so small payments can come
/// out as zero tokens.
pub fn convert(
    payment_amount: i128,
    reference_rate_cents: i128,
    commodity_rate_cents: i128,
) -> Result<Conversion, Error> {
    if payment_amount <= 0 {
        return Err(Error::InvalidArgument);
    }
    if reference_rate_cents <= 0 || commodity_rate_cents <= 0 {
        return Err(Error::StalePrice);
    }
    let value_units = payment_amount
        .checked_mul(reference_rate_cents)
        .ok_or(Error::InvalidArgument)?
        / CENTS_PER_UNIT;
    let token_units = value_units
        .checked_mul(COMMODITY_PRECISION)
        .ok_or(Error::InvalidArgument)?
        / commodity_rate_cents;
    Ok(Conversion {
        value_units,
        token_units,
    })
}

impl PriceFeed {
    pub fn convert(&self, payment_amount: i128) -> Result<Conversion, Error> {
        convert(
            payment_amount,
            self.reference_rate_cents,
            self.commodity_rate_cents,
        )
    }
}

/// Anything short of one whole token is dust.
pub fn check_dust_floor(conversion: &Conversion) -> Result<(), Error> {
    if conversion.token_units < ONE_TOKEN {
        return Err(Error::BelowMinimum);
    }
    Ok(())
}
