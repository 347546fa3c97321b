//! Integer-first rounding helpers.
//!
//! Everything that is shown to a human (quotient grid, vote shares) is rounded
//! here, half-to-even, and **after** ranking. Nothing in this module is used to
//! order quotients.

/// Round an `f64` to the nearest integer, ties to even. Non-finite input is returned as-is.
#[inline]
pub fn round_half_even_f64(x: f64) -> f64 {
    x.round_ties_even()
}

/// `num / den` rounded half-to-even using integer arithmetic only.
///
/// `den == 0` yields 0.
pub fn div_round_half_even(num: u128, den: u128) -> u128 {
    if den == 0 {
        return 0;
    }
    let q = num / den;
    let r = num % den;
    // Compare 2r with den without overflowing: r < den, so r >= den - r is 2r >= den.
    let twice_r_cmp = r.cmp(&(den - r));
    match twice_r_cmp {
        core::cmp::Ordering::Less => q,
        core::cmp::Ordering::Greater => q + 1,
        core::cmp::Ordering::Equal => {
            if q % 2 == 0 { q } else { q + 1 }
        }
    }
}

/// Display value of a quotient `votes / divisor`, rounded to the nearest integer (half-even).
#[inline]
pub fn quotient_display_int(votes: u64, divisor: u32) -> u64 {
    // votes / divisor <= votes, so the narrowing cannot overflow.
    div_round_half_even(votes as u128, divisor as u128) as u64
}

/// Share of `part` over `max(total, 1)` in hundredths of a percent (half-even).
///
/// `share_hundredths(1, 3) == 3333` → "33.33".
pub fn share_hundredths(part: u64, total: u64) -> u64 {
    let den = total.max(1) as u128;
    div_round_half_even((part as u128) * 10_000, den) as u64
}

/// Format hundredths as a fixed two-decimal string without float arithmetic.
pub fn format_hundredths(h: u64) -> String {
    format!("{}.{:02}", h / 100, h % 100)
}

/// Convenience: share of `part` in `total` as a `"NN.NN"` percent string.
pub fn percent_two_decimals(part: u64, total: u64) -> String {
    format_hundredths(share_hundredths(part, total))
}
