//! Double-width integer helpers
//!
//! `x * y / z` without losing the high half of the product.

use super::MoneyError;

const LOW_MASK: u128 = u64::MAX as u128;

/// Full 256-bit product of two `u128` values as `(high, low)`
pub(crate) fn widening_mul(x: u128, y: u128) -> (u128, u128) {
    let (x1, x0) = (x >> 64, x & LOW_MASK);
    let (y1, y0) = (y >> 64, y & LOW_MASK);

    let p00 = x0 * y0;
    let p01 = x0 * y1;
    let p10 = x1 * y0;
    let p11 = x1 * y1;

    // At most 3 * (2^64 - 1), fits comfortably
    let mid = (p00 >> 64) + (p01 & LOW_MASK) + (p10 & LOW_MASK);

    let low = (p00 & LOW_MASK) | (mid << 64);
    let high = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
    (high, low)
}

/// `floor(x * y / z)`, exact for every input whose quotient fits in `u128`
pub(crate) fn mul_div_floor(x: u128, y: u128, z: u128) -> Result<u128, MoneyError> {
    mul_div_rem(x, y, z).map(|(quotient, _)| quotient)
}

/// Quotient and remainder of `x * y / z`
pub(crate) fn mul_div_rem(x: u128, y: u128, z: u128) -> Result<(u128, u128), MoneyError> {
    if z == 0 {
        return Err(MoneyError::DivisionByZero);
    }

    let (high, low) = widening_mul(x, y);
    if high == 0 {
        return Ok((low / z, low % z));
    }
    if high >= z {
        return Err(MoneyError::Overflow);
    }

    // Schoolbook binary long division; remainder stays below z.
    let mut rem = high;
    let mut quotient: u128 = 0;
    for bit in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((low >> bit) & 1);
        quotient <<= 1;
        if carry == 1 || rem >= z {
            rem = rem.wrapping_sub(z);
            quotient |= 1;
        }
    }

    Ok((quotient, rem))
}

/// `floor(x * y * w / (d1 * d2))` with a single truncation
///
/// With `x * y = q * d1 + r` and `q * w = q2 * d2 + r2`, the result is
/// `q2 + floor((r2 + floor(r * w / d1)) / d2)`.
pub(crate) fn mul_mul_div_floor(
    x: u128,
    y: u128,
    w: u128,
    d1: u128,
    d2: u128,
) -> Result<u128, MoneyError> {
    let (q, r) = mul_div_rem(x, y, d1)?;
    let (q2, r2) = mul_div_rem(q, w, d2)?;
    let t = mul_div_floor(r, w, d1)?;

    // r2 < d2 and t % d2 < d2, so the carry term is 0 or 1
    let carry = (r2 + t % d2) / d2;
    q2.checked_add(t / d2)
        .and_then(|v| v.checked_add(carry))
        .ok_or(MoneyError::Overflow)
}
