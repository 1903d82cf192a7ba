//! Q12 fixed-point scalars.
//!
//! A [`Fixed`] is a signed 32-bit integer holding `value * 4096`. Products are
//! widened to 64 bits and truncated back after shifting out the fractional
//! bits; quotients widen the numerator before shifting it up. Overflow is not
//! checked: keep magnitudes below roughly ±500,000 so multiply intermediates
//! stay in range after the shift.
//!
//! Angles for the trigonometric functions are expressed in *turns*:
//! `0` is 0°, `FIXED_ONE` (one full turn) is 360°.
//!
//! The only floating-point operation in the whole pipeline is [`fixed_sqrt`],
//! which backs vector length and normalization.

/// Q12 fixed-point scalar.
pub type Fixed = i32;

/// Number of fractional bits.
pub const FIXED_SHIFT: u32 = 12;

/// 1.0 in Q12.
pub const FIXED_ONE: Fixed = 1 << FIXED_SHIFT;

/// 0.5 in Q12.
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1;

/// A quarter turn (90°).
pub const QUARTER_TURN: Fixed = FIXED_ONE >> 2;

#[inline]
pub const fn int_to_fixed(value: i32) -> Fixed {
    value << FIXED_SHIFT
}

/// Truncates toward negative infinity.
#[inline]
pub const fn fixed_to_int(value: Fixed) -> i32 {
    value >> FIXED_SHIFT
}

/// Rounds to the nearest integer (halves round up).
#[inline]
pub const fn fixed_round_to_int(value: Fixed) -> i32 {
    value.wrapping_add(FIXED_HALF) >> FIXED_SHIFT
}

/// Converts a float, truncating toward zero.
#[inline]
pub fn float_to_fixed(value: f32) -> Fixed {
    (value * FIXED_ONE as f32) as Fixed
}

#[inline]
pub fn fixed_to_float(value: Fixed) -> f32 {
    value as f32 / FIXED_ONE as f32
}

#[inline]
pub const fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    ((a as i64 * b as i64) >> FIXED_SHIFT) as Fixed
}

/// Fixed-point division. `den` must not be zero.
#[inline]
pub const fn fixed_div(num: Fixed, den: Fixed) -> Fixed {
    (((num as i64) << FIXED_SHIFT) / den as i64) as Fixed
}

/// Square root of a Q12 value, computed in double precision.
///
/// Negative inputs yield zero.
#[inline]
pub fn fixed_sqrt(value: Fixed) -> Fixed {
    fixed_sqrt_wide(value as i64)
}

/// Square root of a Q12 value held in 64 bits (for squared lengths that may
/// exceed the 32-bit range before the root is taken).
#[inline]
pub(crate) fn fixed_sqrt_wide(value: i64) -> Fixed {
    if value <= 0 {
        return 0;
    }
    (value as f64 * FIXED_ONE as f64).sqrt() as Fixed
}

#[inline]
pub fn fixed_min(a: Fixed, b: Fixed) -> Fixed {
    a.min(b)
}

#[inline]
pub fn fixed_max(a: Fixed, b: Fixed) -> Fixed {
    a.max(b)
}

#[inline]
pub fn fixed_abs(a: Fixed) -> Fixed {
    a.wrapping_abs()
}

// Quarter-wave polynomial sin(t * pi/2) ~ t * (A - t^2 * (B - t^2 * C)), t in [0, 1].
// Coefficients match value and slope at both ends of the quarter wave.
const SIN_A: i64 = 6434; // pi/2
const SIN_B: i64 = 2628; // pi - 5/2
const SIN_C: i64 = 290; // pi/2 - 3/2

/// Sine of an angle given in turns. Integer-only.
///
/// Exact at multiples of a quarter turn; within a couple of Q12 units elsewhere.
pub fn isin(angle: Fixed) -> Fixed {
    // One turn is FIXED_ONE, so the low 12 bits are the position in the turn.
    let angle = angle & (FIXED_ONE - 1);
    let quadrant = angle >> 10;
    let mut t = ((angle & (QUARTER_TURN - 1)) << 2) as i64;

    if quadrant & 1 == 1 {
        t = FIXED_ONE as i64 - t;
    }

    let t2 = (t * t) >> FIXED_SHIFT;
    let inner = SIN_B - ((t2 * SIN_C) >> FIXED_SHIFT);
    let inner = SIN_A - ((t2 * inner) >> FIXED_SHIFT);
    let y = ((t * inner) >> FIXED_SHIFT) as Fixed;

    if quadrant >= 2 {
        -y
    } else {
        y
    }
}

/// Cosine of an angle given in turns: sine shifted by a quarter turn.
#[inline]
pub fn icos(angle: Fixed) -> Fixed {
    isin(angle.wrapping_add(QUARTER_TURN))
}

/// Tangent of an angle given in turns. Undefined where the cosine is zero.
#[inline]
pub fn itan(angle: Fixed) -> Fixed {
    fixed_div(isin(angle), icos(angle))
}
