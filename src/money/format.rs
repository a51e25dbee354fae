//! Decimal string conversion for [`Money`]

use super::{Money, MoneyError, DECIMALS, SCALE};

/// Parse a plain base-10 decimal (`"12"`, `"0.000025"`) into scaled units.
///
/// Fractional digits beyond [`DECIMALS`] are truncated, not rounded.
pub(crate) fn parse_decimal(input: &str) -> Result<Money, MoneyError> {
    let invalid = || MoneyError::Parse(input.to_string());

    let (int_part, frac_part) = match input.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (input, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let mut raw: u128 = 0;
    for digit in int_part.bytes() {
        raw = raw
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(digit - b'0')))
            .ok_or(MoneyError::Overflow)?;
    }
    raw = raw.checked_mul(SCALE).ok_or(MoneyError::Overflow)?;

    if let Some(frac_part) = frac_part {
        if frac_part.is_empty() || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let mut frac: u128 = 0;
        let mut place = SCALE;
        for digit in frac_part.bytes().take(DECIMALS as usize) {
            place /= 10;
            frac += u128::from(digit - b'0') * place;
        }
        raw = raw.checked_add(frac).ok_or(MoneyError::Overflow)?;
    }

    Ok(Money::from_raw(raw))
}

/// Canonical form: no trailing fractional zeros, no dangling point
pub(crate) fn to_canonical(money: Money) -> String {
    let whole = money.raw() / SCALE;
    let frac = money.raw() % SCALE;
    if frac == 0 {
        return whole.to_string();
    }

    let digits = format!("{:0width$}", frac, width = DECIMALS as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Exactly `decimals` fractional digits, truncating the rest
pub(crate) fn to_fixed(money: Money, decimals: u32) -> String {
    let whole = money.raw() / SCALE;
    if decimals == 0 {
        return whole.to_string();
    }

    let decimals = decimals.min(DECIMALS);
    let frac = money.raw() % SCALE;
    let digits = format!("{:0width$}", frac, width = DECIMALS as usize);
    format!("{}.{}", whole, &digits[..decimals as usize])
}
