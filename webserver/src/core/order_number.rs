//! Order number allocation

use rand::Rng;
use std::ops::RangeInclusive;

use crate::error::{WebServerError, WebServerResult};

/// Generated numbers are always seven digits
pub const ORDER_NUMBER_RANGE: RangeInclusive<u32> = 7_000_000..=9_999_999;

const MAX_ATTEMPTS: usize = 32;

pub fn random_order_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(ORDER_NUMBER_RANGE).to_string()
}

/// Draw random numbers until one is not `taken`
pub fn pick_unused<R, F>(rng: &mut R, taken: F) -> WebServerResult<String>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..MAX_ATTEMPTS {
        let candidate = random_order_number(rng);
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }

    Err(WebServerError::conflict("Could not allocate a unique order number"))
}
