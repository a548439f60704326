//! Common formatting for numbers written to PENELOPE inputs and summaries
//!
//! These are left public for convenience.
//!
//! The GNUPLOT slice files expect C-style scientific notation with a signed,
//! two digit exponent. Rust's `{:e}` gives `1.5e0` instead, so
//! [NumFormat::sci()] exists to produce `1.50000e+00`.

// standard library
use std::fmt::LowerExp;

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Extends primitives with C-style scientific formatting
pub trait NumFormat {
    /// Scientific number formatting with a padded, signed exponent
    ///
    /// Works for anything that can be represented as scientific using the
    /// `LowerExp` trait, which is pretty much every numerical primitive.
    ///
    /// ```rust
    /// # use penvox_format::NumFormat;
    /// assert_eq!(1.5.sci(5, 2), "1.50000e+00");
    /// assert_eq!((-0.00125).sci(5, 2), "-1.25000e-03");
    /// assert_eq!(62.79.sci(6, 2), "6.279000e+01");
    /// assert_eq!(0.0.sci(6, 2), "0.000000e+00");
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> NumFormat for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let num = f!("{:.precision$e}", &self, precision = precision);
        let Some((mantissa, exp)) = num.split_once('e') else {
            return num;
        };
        let (sign, digits) = match exp.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exp),
        };
        f!("{mantissa}e{sign}{digits:0>exp_pad$}")
    }
}

/// Extends unsigned counts with digit grouping
pub trait Thousands {
    /// Group digits in threes with a comma
    ///
    /// ```rust
    /// # use penvox_format::Thousands;
    /// assert_eq!(8_usize.thousands(), "8");
    /// assert_eq!(1000_usize.thousands(), "1,000");
    /// assert_eq!(14_255_244_usize.thousands(), "14,255,244");
    /// ```
    fn thousands(&self) -> String;
}

impl Thousands for usize {
    fn thousands(&self) -> String {
        let digits = self.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }
}
