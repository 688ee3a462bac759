use uuid::Uuid;

/// Codes are stored upper-cased; every lookup goes through here.
pub fn normalize_code(code: &str) -> String {
  code.trim().to_uppercase()
}

/// Minor currency units to a human-readable amount, e.g. 5000 -> "50.00".
pub fn format_amount(amount: i64, currency: &str) -> String {
  format!("{}.{:02} {}", amount / 100, (amount % 100).abs(), currency)
}

/// Short upper-cased token for courtesy code assignment.
pub fn generate_code() -> String {
  Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize_code() {
    assert_eq!(normalize_code("  summer20 "), "SUMMER20");
    assert_eq!(normalize_code("VIP"), "VIP");
  }

  #[test]
  fn test_format_amount() {
    assert_eq!(format_amount(5000, "USD"), "50.00 USD");
    assert_eq!(format_amount(1234567, "EUR"), "12345.67 EUR");
    assert_eq!(format_amount(5, "USD"), "0.05 USD");
  }

  #[test]
  fn test_generate_code_shape() {
    let code = generate_code();
    assert_eq!(code.len(), 8);
    assert_eq!(code, code.to_uppercase());
  }
}
