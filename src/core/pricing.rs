//! Discount arithmetic used by the product form.

/// Price after applying a percentage discount.
///
/// Both inputs must be present and non-zero, otherwise the result is `0` (a zero
/// discount does NOT yield the full amount). No range checks are made: a negative
/// discount produces a result above `amount`, and discounts over 100 go negative.
/// Non-finite inputs also yield `0`.
#[must_use]
pub fn discounted_amount(amount: Option<f64>, discount: Option<f64>) -> f64 {
    match (amount, discount) {
        (Some(amount), Some(discount))
            if amount.is_finite() && discount.is_finite() && amount != 0.0 && discount != 0.0 =>
        {
            amount - amount * (discount / 100.0)
        }
        _ => 0.0,
    }
}
