use dice_ledger::wager::{Multiplier, QuickBet};
use std::fmt;

/// A single line of player input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the bet amount field with the raw text; empty clears it.
    Bet(String),
    QuickBet(QuickBet),
    Multiplier(Multiplier),
    Roll,
    Reset,
    Balance,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Multiplier command without a value.
    MissingMultiplier,
    /// Multiplier outside 1, 2 or 3.
    InvalidMultiplier(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMultiplier => {
                write!(f, "Multiplier command requires a value (e.g., 'mult 2')")
            }
            Self::InvalidMultiplier(value) => write!(
                f,
                "Invalid multiplier '{}'. Choose 1, 2 or 3 (e.g., 'x2')",
                value
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a [`Command`].
///
/// Bet amounts are not checked here: the raw text is handed to the engine's
/// input guard, which knows the current balance.
///
/// # Examples
///
/// ```
/// use dice_client::commands::{parse_command, Command};
/// use dice_ledger::wager::{Multiplier, QuickBet};
///
/// assert_eq!(parse_command("roll"), Ok(Command::Roll));
/// assert_eq!(parse_command("half"), Ok(Command::QuickBet(QuickBet::Half)));
/// assert_eq!(parse_command("x3"), Ok(Command::Multiplier(Multiplier::X3)));
/// assert_eq!(parse_command("bet 250"), Ok(Command::Bet("250".to_string())));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "roll" | "r" => return Ok(Command::Roll),
        "reset" => return Ok(Command::Reset),
        "balance" | "b" => return Ok(Command::Balance),
        "help" | "h" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "quarter" | "25%" => return Ok(Command::QuickBet(QuickBet::Quarter)),
        "half" | "50%" => return Ok(Command::QuickBet(QuickBet::Half)),
        "three-quarters" | "75%" => return Ok(Command::QuickBet(QuickBet::ThreeQuarters)),
        "max" | "100%" => return Ok(Command::QuickBet(QuickBet::Max)),
        "x1" => return Ok(Command::Multiplier(Multiplier::X1)),
        "x2" => return Ok(Command::Multiplier(Multiplier::X2)),
        "x3" => return Ok(Command::Multiplier(Multiplier::X3)),
        _ => {}
    }

    // Parse multi-word commands
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"bet") => Ok(Command::Bet(parts.get(1).unwrap_or(&"").to_string())),
        Some(&"mult") => parse_multiplier_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a multiplier command: "mult N"
fn parse_multiplier_command(parts: &[&str]) -> Result<Command, ParseError> {
    let value = parts.get(1).ok_or(ParseError::MissingMultiplier)?;
    let raw = value.trim_end_matches(['x', 'X']);
    raw.parse::<u8>()
        .ok()
        .and_then(|n| Multiplier::try_from(n).ok())
        .map(Command::Multiplier)
        .ok_or_else(|| ParseError::InvalidMultiplier(value.to_string()))
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  bet N               Set the bet amount (digits only, at most your balance)
  quarter|half|three-quarters|max
                      Bet that share of your balance
  x1|x2|x3, mult N    Choose the payout multiplier
  roll                Roll the die for the current bet
  reset               Reset your balance
  balance             Show balance, bet and multiplier
  help                Show this help
  quit                Leave the table";

#[cfg(test)]
mod tests {
    use super::*;

    // === Single-word command tests ===

    #[test]
    fn test_parse_roll() {
        assert_eq!(parse_command("roll"), Ok(Command::Roll));
        assert_eq!(parse_command("r"), Ok(Command::Roll));
    }

    #[test]
    fn test_parse_reset() {
        assert_eq!(parse_command("reset"), Ok(Command::Reset));
    }

    #[test]
    fn test_parse_quit_aliases() {
        for input in ["quit", "exit", "q"] {
            assert_eq!(parse_command(input), Ok(Command::Quit));
        }
    }

    #[test]
    fn test_parse_quick_bets() {
        assert_eq!(
            parse_command("quarter"),
            Ok(Command::QuickBet(QuickBet::Quarter))
        );
        assert_eq!(
            parse_command("75%"),
            Ok(Command::QuickBet(QuickBet::ThreeQuarters))
        );
        assert_eq!(parse_command("max"), Ok(Command::QuickBet(QuickBet::Max)));
    }

    #[test]
    fn test_parse_multiplier_shortcuts() {
        assert_eq!(parse_command("x1"), Ok(Command::Multiplier(Multiplier::X1)));
        assert_eq!(parse_command("x2"), Ok(Command::Multiplier(Multiplier::X2)));
    }

    // === Whitespace handling ===

    #[test]
    fn test_parse_with_surrounding_whitespace() {
        assert_eq!(parse_command("  roll  "), Ok(Command::Roll));
    }

    // === Bet command tests ===

    #[test]
    fn test_parse_bet_keeps_raw_text() {
        assert_eq!(parse_command("bet 100"), Ok(Command::Bet("100".to_string())));
        // The engine's input guard decides whether this is acceptable
        assert_eq!(parse_command("bet 1.5"), Ok(Command::Bet("1.5".to_string())));
    }

    #[test]
    fn test_parse_bet_without_amount_clears() {
        assert_eq!(parse_command("bet"), Ok(Command::Bet(String::new())));
    }

    // === Multiplier command tests ===

    #[test]
    fn test_parse_mult_with_value() {
        assert_eq!(
            parse_command("mult 3"),
            Ok(Command::Multiplier(Multiplier::X3))
        );
        assert_eq!(
            parse_command("mult 2x"),
            Ok(Command::Multiplier(Multiplier::X2))
        );
    }

    #[test]
    fn test_parse_mult_missing_value() {
        assert_eq!(parse_command("mult"), Err(ParseError::MissingMultiplier));
    }

    #[test]
    fn test_parse_mult_out_of_range() {
        assert_eq!(
            parse_command("mult 4"),
            Err(ParseError::InvalidMultiplier("4".to_string()))
        );
        assert_eq!(
            parse_command("mult two"),
            Err(ParseError::InvalidMultiplier("two".to_string()))
        );
    }

    // === Error tests ===

    #[test]
    fn test_parse_unrecognized() {
        let err = parse_command("fold").unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedCommand("fold".to_string()));
        assert!(err.to_string().contains("help"));
    }

    #[test]
    fn test_parse_empty_is_unrecognized() {
        assert!(matches!(
            parse_command(""),
            Err(ParseError::UnrecognizedCommand(_))
        ));
    }
}
