//! Per-ticket discount arithmetic. This is the only place discount amounts
//! are computed; aggregate totals are always `per_ticket * quantity`, never
//! a discount of a pre-multiplied order total.

use crate::entity::DiscountType;

pub struct Rule {
  pub discount_type: DiscountType,
  /// Percentage points or minor currency units, depending on the type.
  pub value: i64,
  /// Per-ticket cap for percentage discounts.
  pub max_discount_amount: Option<i64>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Computed {
  pub discount_amount: i64,
  pub final_amount: i64,
}

/// Applies `rule` to a single ticket priced in minor currency units.
///
/// Guarantees `0 <= discount_amount <= price` and
/// `discount_amount + final_amount == price`, whatever the rule values.
pub fn per_ticket(price: i64, rule: &Rule) -> Computed {
  let raw = match rule.discount_type {
    DiscountType::Percentage => {
      let raw = percent_raw(price, rule.value);
      match rule.max_discount_amount {
        Some(cap) => raw.min(cap),
        None => raw,
      }
    }
    DiscountType::FixedAmount => rule.value.min(price),
    DiscountType::Free => price,
  };

  let discount_amount = raw.max(0).min(price.max(0));
  Computed { discount_amount, final_amount: price - discount_amount }
}

/// Round-half-up percentage of `price`.
fn percent_raw(price: i64, value: i64) -> i64 {
  let scaled = price.saturating_mul(value);
  if scaled <= 0 {
    return 0;
  }
  scaled.saturating_add(50) / 100
}

/// Share of `base_total` covered by `discount_total`, as a percentage
/// rounded to two decimals. Zero when the base is zero.
pub fn percent_of(discount_total: i64, base_total: i64) -> f64 {
  if base_total == 0 {
    return 0.0;
  }
  let pct = discount_total as f64 / base_total as f64 * 100.0;
  (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rule(discount_type: DiscountType, value: i64, cap: Option<i64>) -> Rule {
    Rule { discount_type, value, max_discount_amount: cap }
  }

  #[test]
  fn test_percentage() {
    let out = per_ticket(30000, &rule(DiscountType::Percentage, 20, None));
    assert_eq!(out, Computed { discount_amount: 6000, final_amount: 24000 });
  }

  #[test]
  fn test_percentage_rounds_half_up() {
    // 15% of 333 = 49.95 -> 50
    let out = per_ticket(333, &rule(DiscountType::Percentage, 15, None));
    assert_eq!(out.discount_amount, 50);
    assert_eq!(out.final_amount, 283);
  }

  #[test]
  fn test_percentage_respects_cap() {
    let out =
      per_ticket(30000, &rule(DiscountType::Percentage, 20, Some(5000)));
    assert_eq!(out, Computed { discount_amount: 5000, final_amount: 25000 });
  }

  #[test]
  fn test_percentage_over_hundred_clamps_to_price() {
    let out = per_ticket(1000, &rule(DiscountType::Percentage, 150, None));
    assert_eq!(out, Computed { discount_amount: 1000, final_amount: 0 });
  }

  #[test]
  fn test_fixed_amount_capped_at_price() {
    let out = per_ticket(8000, &rule(DiscountType::FixedAmount, 10000, None));
    assert_eq!(out, Computed { discount_amount: 8000, final_amount: 0 });
  }

  #[test]
  fn test_fixed_amount_below_price() {
    let out = per_ticket(8000, &rule(DiscountType::FixedAmount, 1500, None));
    assert_eq!(out, Computed { discount_amount: 1500, final_amount: 6500 });
  }

  #[test]
  fn test_free_waives_full_price() {
    let out = per_ticket(15000, &rule(DiscountType::Free, 0, None));
    assert_eq!(out, Computed { discount_amount: 15000, final_amount: 0 });
  }

  #[test]
  fn test_negative_value_never_inflates_price() {
    let out = per_ticket(5000, &rule(DiscountType::Percentage, -20, None));
    assert_eq!(out, Computed { discount_amount: 0, final_amount: 5000 });

    let out = per_ticket(5000, &rule(DiscountType::FixedAmount, -300, None));
    assert_eq!(out, Computed { discount_amount: 0, final_amount: 5000 });
  }

  #[test]
  fn test_amounts_always_sum_to_price() {
    for price in [0, 1, 99, 100, 12345] {
      for value in [-50, 0, 7, 50, 100, 999] {
        for ty in
          [DiscountType::Percentage, DiscountType::FixedAmount, DiscountType::Free]
        {
          let out = per_ticket(price, &rule(ty, value, Some(40)));
          assert!(out.discount_amount >= 0);
          assert!(out.discount_amount <= price);
          assert_eq!(out.discount_amount + out.final_amount, price);
        }
      }
    }
  }

  #[test]
  fn test_percent_of() {
    assert_eq!(percent_of(10000, 60000), 16.67);
    assert_eq!(percent_of(15000, 15000), 100.0);
    assert_eq!(percent_of(0, 500), 0.0);
    assert_eq!(percent_of(500, 0), 0.0);
  }
}
