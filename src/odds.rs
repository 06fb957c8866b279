//! Fractional odds rendering
//!
//! Converts decimal odds to the British fractional convention: price `d`
//! becomes the reduced fraction for `d - 1`, e.g. 2.50 → "3/2". The
//! conversion is exact rational arithmetic on the decimal's mantissa, so a
//! price like 2.10 renders as "11/10" rather than a float-artifact
//! denominator. Denominators are capped at 100 by best rational
//! approximation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest denominator a rendered fraction may carry
const MAX_DENOMINATOR: i128 = 100;

/// Prices at or below this render as the sentinel instead of a fraction
const MIN_RENDERABLE_PRICE: Decimal = dec!(1.01);

/// Sentinel for prices too short to render fractionally
pub const SENTINEL: &str = "N/A";

/// Render decimal odds as a fractional odds string
pub fn to_fractional(price: Decimal) -> String {
    if price <= MIN_RENDERABLE_PRICE {
        return SENTINEL.to_string();
    }

    // d - 1 as an exact num/den pair; scale is capped so the cross
    // multiplications below stay inside i128
    let fractional_part = (price - Decimal::ONE).round_dp(10).normalize();
    let scale = fractional_part.scale();
    let num = fractional_part.mantissa().max(0);
    let den = 10_i128.pow(scale);

    let (num, den) = limit_denominator(num, den, MAX_DENOMINATOR);
    format!("{}/{}", num, den)
}

/// Reduce `num/den` to lowest terms, then find the closest fraction with a
/// denominator no greater than `max_den` (continued-fraction convergents)
fn limit_denominator(num: i128, den: i128, max_den: i128) -> (i128, i128) {
    let g = gcd(num, den);
    let (num, den) = (num / g, den / g);
    if den <= max_den {
        return (num, den);
    }

    let (mut p0, mut q0, mut p1, mut q1) = (0_i128, 1_i128, 1_i128, 0_i128);
    let (mut n, mut d) = (num, den);
    loop {
        let a = n / d;
        let q2 = q0 + a * q1;
        if q2 > max_den {
            break;
        }
        let p2 = p0 + a * p1;
        (p0, q0, p1, q1) = (p1, q1, p2, q2);
        (n, d) = (d, n - a * d);
        if d == 0 {
            return (p1, q1);
        }
    }

    let k = (max_den - q0) / q1;
    let (pa, qa) = (p0 + k * p1, q0 + k * q1);
    let (pb, qb) = (p1, q1);

    // Pick whichever bound lies closer to num/den, preferring the later
    // convergent on a tie (matches exact rational comparison)
    let err_a = (pa * den - num * qa).abs() * qb;
    let err_b = (pb * den - num * qb).abs() * qa;
    if err_b <= err_a {
        (pb, qb)
    } else {
        (pa, qa)
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}
