//! Plain terminal rendering of engine state and outcome events.

use dice_ledger::wager::{OutcomeEvent, SessionState};

/// Unicode die face for a roll, `?` when out of range.
pub fn die_face(roll: u8) -> char {
    match roll {
        1 => '⚀',
        2 => '⚁',
        3 => '⚂',
        4 => '⚃',
        5 => '⚄',
        6 => '⚅',
        _ => '?',
    }
}

/// One line per event, as a toast would show it.
pub fn render_event(event: &OutcomeEvent) -> String {
    match event {
        OutcomeEvent::RollResolved { roll, is_win, .. } => {
            let tag = if *is_win { "WIN " } else { "LOSS" };
            format!("{} [{tag}] {event}", die_face(*roll))
        }
        OutcomeEvent::BetRejected(_) => format!("  [REJECTED] {event}"),
        OutcomeEvent::NetworkFailure(_) => format!("  [ERROR] {event}"),
        OutcomeEvent::BalanceReset(_) => format!("  [RESET] {event}"),
    }
}

/// Status line for the `balance` command.
pub fn render_session(session: &SessionState) -> String {
    let bet = if session.bet_amount.is_empty() {
        "-"
    } else {
        session.bet_amount.as_str()
    };
    format!(
        "Balance: ${}  Bet: {bet}  Multiplier: {}",
        session.balance, session.multiplier
    )
}
