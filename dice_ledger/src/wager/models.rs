//! Wager data models shared by the engine and the ledger service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spendable amount in whole chips.
pub type Balance = u64;

/// Balance seeded on first use when nothing has been cached yet.
pub const DEFAULT_BALANCE: Balance = 1000;

/// Identifier under which the cached balance is persisted.
pub const BALANCE_KEY: &str = "diceGameBalance";

/// Number of faces on the die the ledger rolls.
pub const DIE_FACES: u8 = 6;

/// Payout multiplier chosen for a bet.
///
/// Serialized as the bare integer (`1`, `2`, `3`). The odds attached to each
/// multiplier belong to the ledger service; the client only ever forwards the
/// selection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Multiplier {
    #[default]
    X1,
    X2,
    X3,
}

impl Multiplier {
    /// Every selectable multiplier, lowest first.
    pub const ALL: [Multiplier; 3] = [Multiplier::X1, Multiplier::X2, Multiplier::X3];

    /// Numeric factor applied to the bet amount.
    pub fn factor(self) -> u64 {
        match self {
            Multiplier::X1 => 1,
            Multiplier::X2 => 2,
            Multiplier::X3 => 3,
        }
    }
}

/// Raised when a multiplier outside the supported set is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unsupported multiplier: {0}")]
pub struct UnknownMultiplier(pub u8);

impl TryFrom<u8> for Multiplier {
    type Error = UnknownMultiplier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Multiplier::X1),
            2 => Ok(Multiplier::X2),
            3 => Ok(Multiplier::X3),
            other => Err(UnknownMultiplier(other)),
        }
    }
}

impl From<Multiplier> for u8 {
    fn from(multiplier: Multiplier) -> Self {
        multiplier.factor() as u8
    }
}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

/// A proposed wager awaiting resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    #[serde(rename = "betAmount")]
    pub amount: Balance,
    pub multiplier: Multiplier,
}

impl Bet {
    pub fn new(amount: Balance, multiplier: Multiplier) -> Self {
        Self { amount, multiplier }
    }

    /// Amount lost if the bet does not win, `None` on overflow.
    pub fn exposure(&self) -> Option<Balance> {
        self.amount.checked_mul(self.multiplier.factor())
    }
}

/// Authoritative outcome of a resolved bet, as reported by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub roll: u8,
    pub is_win: bool,
    pub new_balance: Balance,
    pub potential_winnings: Balance,
}

impl Settlement {
    /// Whether the reported die face is a real face.
    pub fn is_well_formed(&self) -> bool {
        (1..=DIE_FACES).contains(&self.roll)
    }

    /// Amount surfaced to the player: the winnings on a win, the exposure on a loss.
    pub fn amount_delta(&self, bet: &Bet) -> Balance {
        if self.is_win {
            self.potential_winnings
        } else {
            bet.exposure().unwrap_or(Balance::MAX)
        }
    }
}

/// Quick-bet presets expressed as a fraction of the current balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickBet {
    Quarter,
    Half,
    ThreeQuarters,
    Max,
}

impl QuickBet {
    pub const ALL: [QuickBet; 4] = [
        QuickBet::Quarter,
        QuickBet::Half,
        QuickBet::ThreeQuarters,
        QuickBet::Max,
    ];

    /// Fraction as `(numerator, denominator)`.
    pub fn ratio(self) -> (u64, u64) {
        match self {
            QuickBet::Quarter => (1, 4),
            QuickBet::Half => (1, 2),
            QuickBet::ThreeQuarters => (3, 4),
            QuickBet::Max => (1, 1),
        }
    }

    pub fn fraction(self) -> f64 {
        let (num, den) = self.ratio();
        num as f64 / den as f64
    }

    /// `floor(balance * fraction)`, computed without floating point.
    pub fn amount_of(self, balance: Balance) -> Balance {
        let (num, den) = self.ratio();
        // 128-bit intermediate keeps `balance * 3` exact for any u64 balance.
        (u128::from(balance) * u128::from(num) / u128::from(den)) as Balance
    }
}

impl std::fmt::Display for QuickBet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuickBet::Quarter => write!(f, "25%"),
            QuickBet::Half => write!(f, "50%"),
            QuickBet::ThreeQuarters => write!(f, "75%"),
            QuickBet::Max => write!(f, "100%"),
        }
    }
}

/// Where the single bet lifecycle currently sits.
///
/// A bet is validated under the same lock that moves it to `Submitting`, and
/// every outcome (rejected, settled, failed) lands back in `Idle`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BetPhase {
    #[default]
    Idle,
    /// A roll request is awaiting the ledger
    Submitting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_wire_format() {
        let bet = Bet::new(100, Multiplier::X2);
        let json = serde_json::to_value(bet).unwrap();
        assert_eq!(json, serde_json::json!({"betAmount": 100, "multiplier": 2}));
    }

    #[test]
    fn test_multiplier_rejects_unknown_value() {
        let err = serde_json::from_str::<Bet>(r#"{"betAmount": 5, "multiplier": 7}"#);
        assert!(err.is_err());
        assert_eq!(Multiplier::try_from(0), Err(UnknownMultiplier(0)));
    }

    #[test]
    fn test_settlement_wire_format() {
        let settlement: Settlement = serde_json::from_str(
            r#"{"roll": 4, "isWin": true, "newBalance": 1300, "potentialWinnings": 300}"#,
        )
        .unwrap();
        assert_eq!(settlement.roll, 4);
        assert!(settlement.is_win);
        assert_eq!(settlement.new_balance, 1300);
        assert_eq!(settlement.potential_winnings, 300);
    }

    #[test]
    fn test_settlement_amount_delta() {
        let bet = Bet::new(100, Multiplier::X2);
        let win = Settlement {
            roll: 6,
            is_win: true,
            new_balance: 1300,
            potential_winnings: 300,
        };
        let loss = Settlement {
            roll: 1,
            is_win: false,
            new_balance: 800,
            potential_winnings: 300,
        };
        assert_eq!(win.amount_delta(&bet), 300);
        assert_eq!(loss.amount_delta(&bet), 200);
    }

    #[test]
    fn test_settlement_face_bounds() {
        let mut settlement = Settlement {
            roll: 0,
            is_win: false,
            new_balance: 0,
            potential_winnings: 0,
        };
        assert!(!settlement.is_well_formed());
        settlement.roll = 7;
        assert!(!settlement.is_well_formed());
        settlement.roll = 6;
        assert!(settlement.is_well_formed());
    }

    #[test]
    fn test_quick_bet_fractions() {
        assert_eq!(QuickBet::Quarter.amount_of(1000), 250);
        assert_eq!(QuickBet::Half.amount_of(999), 499);
        assert_eq!(QuickBet::ThreeQuarters.amount_of(10), 7);
        assert_eq!(QuickBet::Max.amount_of(1234), 1234);
        assert_eq!(QuickBet::ThreeQuarters.amount_of(u64::MAX), u64::MAX / 4 * 3 + 2);
    }
}
