// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// See LICENSE for licensing information.

//! Fixed-base precomputation for basepoint scalar multiplication.
//!
//! An [`EdwardsBasepointTable`] of window width `w` stores the
//! \\((2^w - 1) \cdot \lceil 256/w \rceil\\) multiples
//! \\(\\{k \cdot 2^{wi} B : 1 \le k < 2^w\\}\\) of a basepoint \\(B\\).
//! Multiplication then adds one table entry per `w`-bit window of the
//! scalar, starting from the identity; every doubling has been baked
//! into the table, so none happen at multiplication time.
//!
//! The default width is 4 (960 entries, 120 KiB of points); width 8
//! (8160 entries) halves the number of additions in exchange for a
//! megabyte of memory.
//!
//! The basepoint table used by
//! [`EdwardsPoint::mul_base`](crate::edwards::EdwardsPoint::mul_base)
//! lives in a process-wide slot, built lazily on first use and
//! replaceable with [`precompute`].  The slot holds an `Arc`, so a
//! replacement is published as one atomic pointer swap: concurrent
//! readers observe either the old table or the new one, never a torn
//! mixture.

use std::sync::{Arc, RwLock};

use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;

/// The window width used for the table built on first use of
/// [`EdwardsPoint::mul_base`](crate::edwards::EdwardsPoint::mul_base).
pub const DEFAULT_WINDOW_WIDTH: usize = 4;

/// The process-wide basepoint table slot.
static BASEPOINT_TABLE: RwLock<Option<Arc<EdwardsBasepointTable>>> = RwLock::new(None);

/// A precomputed table of multiples of a basepoint.
pub struct EdwardsBasepointTable {
    /// Window width in bits; entries per window is `2^w - 1`.
    w: usize,
    /// `ceil(256 / w)` windows of `2^w - 1` points each, row-major.
    table: Vec<EdwardsPoint>,
}

impl EdwardsBasepointTable {
    /// Build a table of multiples of `basepoint` at window width `w`.
    ///
    /// # Panics
    ///
    /// Panics if `w` is outside `1..=8`.  Widths above 8 cost megabytes
    /// of memory for diminishing returns and are assumed to be bugs.
    pub fn create(basepoint: &EdwardsPoint, w: usize) -> EdwardsBasepointTable {
        assert!((1..=8).contains(&w), "window width must be in 1..=8");

        let windows = (256 + w - 1) / w;
        let entries_per_window = (1usize << w) - 1;
        let mut table = Vec::with_capacity(windows * entries_per_window);

        // window_base holds 2^(w*i) * B for the current window i.
        let mut window_base = *basepoint;
        for _ in 0..windows {
            // Enumerate k * window_base for k = 1 .. 2^w - 1 by
            // successive additions.
            let mut multiple = window_base;
            for _ in 0..entries_per_window {
                table.push(multiple);
                multiple = &multiple + &window_base;
            }
            for _ in 0..w {
                window_base = window_base.double();
            }
        }

        EdwardsBasepointTable { w, table }
    }

    /// The window width this table was built at.
    pub fn window_width(&self) -> usize {
        self.w
    }

    /// Compute `scalar * B`, where `B` is the basepoint this table was
    /// built from.
    ///
    /// The accumulation starts at the identity and adds the selected
    /// entry of each window; a zero window selects the identity.  Each
    /// table row is scanned with a constant-time select rather than
    /// indexed directly, so the memory access pattern does not depend
    /// on the scalar.
    pub fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        let windows = (256 + self.w - 1) / self.w;
        let mut acc = EdwardsPoint::identity();
        for i in 0..windows {
            acc = &acc + &self.select(i, self.window_digit(scalar, i));
        }
        acc
    }

    /// Extract window `i` of the scalar: bits `[w*i, w*i + w)` of the
    /// little-endian value.
    fn window_digit(&self, scalar: &Scalar, i: usize) -> usize {
        let bytes = scalar.as_bytes();
        let mut digit = 0usize;
        for j in 0..self.w {
            let bit = self.w * i + j;
            if bit < 256 {
                digit |= (((bytes[bit >> 3] >> (bit & 7)) & 1) as usize) << j;
            }
        }
        digit
    }

    /// Select `digit * 2^(w*i) * B` from window `i` in constant time;
    /// `digit == 0` yields the identity.
    fn select(&self, i: usize, digit: usize) -> EdwardsPoint {
        let entries_per_window = (1usize << self.w) - 1;
        let row = &self.table[i * entries_per_window..(i + 1) * entries_per_window];

        let mut selected = EdwardsPoint::identity();
        for (k, entry) in row.iter().enumerate() {
            let is_wanted = (digit as u16).ct_eq(&((k + 1) as u16));
            selected.conditional_assign(entry, is_wanted);
        }
        selected
    }
}

/// Get the process-wide basepoint table, building it at
/// [`DEFAULT_WINDOW_WIDTH`] on first use.
pub(crate) fn basepoint_table() -> Arc<EdwardsBasepointTable> {
    if let Some(table) = BASEPOINT_TABLE
        .read()
        .expect("basepoint table lock poisoned")
        .as_ref()
    {
        return Arc::clone(table);
    }

    // Built outside the lock: a racing builder produces an identical
    // table, and whichever lands in the slot first is kept.
    let fresh = Arc::new(EdwardsBasepointTable::create(
        &constants::ED25519_BASEPOINT_POINT,
        DEFAULT_WINDOW_WIDTH,
    ));
    let mut slot = BASEPOINT_TABLE
        .write()
        .expect("basepoint table lock poisoned");
    Arc::clone(slot.get_or_insert(fresh))
}

/// Replace the process-wide basepoint table with one built at window
/// width `w`.
///
/// Calls to
/// [`EdwardsPoint::mul_base`](crate::edwards::EdwardsPoint::mul_base)
/// concurrent with the replacement see either the old table or the new
/// one; both compute identical results.
///
/// # Panics
///
/// Panics if `w` is outside `1..=8`.
pub fn precompute(w: usize) {
    let table = Arc::new(EdwardsBasepointTable::create(
        &constants::ED25519_BASEPOINT_POINT,
        w,
    ));
    *BASEPOINT_TABLE
        .write()
        .expect("basepoint table lock poisoned") = Some(table);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::IsIdentity;

    #[test]
    fn table_sizes() {
        let t4 = EdwardsBasepointTable::create(&constants::ED25519_BASEPOINT_POINT, 4);
        assert_eq!(t4.table.len(), 15 * 64);
        let t5 = EdwardsBasepointTable::create(&constants::ED25519_BASEPOINT_POINT, 5);
        assert_eq!(t5.table.len(), 31 * 52);
    }

    #[test]
    fn mul_base_small_cases() {
        let t = EdwardsBasepointTable::create(&constants::ED25519_BASEPOINT_POINT, 4);
        assert!(t.mul_base(&Scalar::ZERO).is_identity());
        assert_eq!(t.mul_base(&Scalar::ONE), constants::ED25519_BASEPOINT_POINT);
        assert_eq!(
            t.mul_base(&Scalar::from(17u64)),
            constants::ED25519_BASEPOINT_POINT.vartime_mul(&Scalar::from(17u64))
        );
    }

    #[test]
    fn widths_agree_with_vartime_mul() {
        let scalar = Scalar::from_bytes_mod_order_wide(&[0xd7u8; 64]);
        let expected = constants::ED25519_BASEPOINT_POINT.vartime_mul(&scalar);
        for w in 1..=8 {
            let t = EdwardsBasepointTable::create(&constants::ED25519_BASEPOINT_POINT, w);
            assert_eq!(t.mul_base(&scalar), expected, "width {} disagrees", w);
        }
    }

    #[test]
    fn process_table_replacement() {
        let scalar = Scalar::from(0xdead_beefu64);
        let before = EdwardsPoint::mul_base(&scalar);
        precompute(6);
        let after = EdwardsPoint::mul_base(&scalar);
        assert_eq!(before, after);
        // Leave the default width behind for other tests.
        precompute(DEFAULT_WINDOW_WIDTH);
    }
}
