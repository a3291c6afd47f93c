//! Local pre-flight checks for bet amounts.
//!
//! These guards only spare the player a round trip. The ledger re-validates
//! every bet against its own balance before moving money.

use super::{
    errors::{WagerError, WagerResult},
    models::{Balance, QuickBet},
};

/// Parse a digits-only bet amount.
///
/// Empty input, signs, whitespace, decimals and values that do not fit in a
/// [`Balance`] are all rejected as [`WagerError::InvalidAmount`].
pub fn parse_amount(input: &str) -> WagerResult<Balance> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WagerError::InvalidAmount(input.to_string()));
    }

    input
        .parse::<Balance>()
        .map_err(|_| WagerError::InvalidAmount(input.to_string()))
}

/// Validate a pending bet amount against the cached balance.
///
/// # Errors
///
/// * `WagerError::InvalidAmount` - Not a positive integer
/// * `WagerError::InsufficientBalance` - Amount exceeds `balance`
pub fn validate_bet(input: &str, balance: Balance) -> WagerResult<Balance> {
    let amount = parse_amount(input)?;

    if amount == 0 {
        return Err(WagerError::InvalidAmount(input.to_string()));
    }

    if amount > balance {
        return Err(WagerError::InsufficientBalance {
            available: balance,
            required: amount,
        });
    }

    Ok(amount)
}

/// Whether an edit to the bet field should be accepted.
///
/// Only the empty string or digits whose value does not exceed `balance`
/// are let through.
pub fn accepts_input(input: &str, balance: Balance) -> bool {
    if input.is_empty() {
        return true;
    }

    matches!(parse_amount(input), Ok(amount) if amount <= balance)
}

/// Amount a quick-bet preset puts in the bet field.
pub fn quick_bet_amount(balance: Balance, preset: QuickBet) -> Balance {
    preset.amount_of(balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_zero() {
        assert_eq!(validate_bet("", 100), Err(WagerError::InvalidAmount(String::new())));
        assert_eq!(validate_bet("0", 100), Err(WagerError::InvalidAmount("0".to_string())));
        assert_eq!(validate_bet("000", 100), Err(WagerError::InvalidAmount("000".to_string())));
    }

    #[test]
    fn test_rejects_non_digits() {
        for input in ["-5", "+5", "1.5", "abc", " 10", "10 ", "1e3", "١٢"] {
            assert!(
                matches!(validate_bet(input, 1000), Err(WagerError::InvalidAmount(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_unrepresentable_amount() {
        let huge = "99999999999999999999999";
        assert!(matches!(validate_bet(huge, u64::MAX), Err(WagerError::InvalidAmount(_))));
    }

    #[test]
    fn test_insufficient_balance() {
        assert_eq!(
            validate_bet("150", 100),
            Err(WagerError::InsufficientBalance {
                available: 100,
                required: 150
            })
        );
    }

    #[test]
    fn test_accepts_whole_balance() {
        assert_eq!(validate_bet("100", 100), Ok(100));
        assert_eq!(validate_bet("007", 100), Ok(7));
    }

    #[test]
    fn test_input_guard() {
        assert!(accepts_input("", 0));
        assert!(accepts_input("50", 100));
        assert!(accepts_input("100", 100));
        assert!(!accepts_input("101", 100));
        assert!(!accepts_input("5a", 100));
        assert!(!accepts_input("-1", 100));
    }
}
