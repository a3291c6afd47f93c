//! In-process authoritative ledger.
//!
//! `HouseLedger` owns the real balance. It re-validates every bet on its own
//! figures, since whatever the client believes its balance to be is untrusted
//! input.

use super::{
    errors::{LedgerError, LedgerResult},
    models::{EntryDirection, EntryType, LedgerEntry},
    service::LedgerService,
};
use crate::wager::{Balance, Bet, DIE_FACES, Multiplier, Settlement};
use async_trait::async_trait;
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Lowest face that wins for each multiplier.
pub fn win_threshold(multiplier: Multiplier) -> u8 {
    match multiplier {
        Multiplier::X1 => 3,
        Multiplier::X2 => 4,
        Multiplier::X3 => 5,
    }
}

/// Settle `bet` against `balance` for a given die face.
///
/// A win credits `amount * (multiplier + 1)`; a loss debits
/// `amount * multiplier`.
///
/// # Errors
///
/// * `LedgerError::Rejected` - Zero amount or exposure above `balance`
/// * `LedgerError::Overflow` - Arithmetic would not fit in a [`Balance`]
pub fn settle_roll(balance: Balance, bet: &Bet, roll: u8) -> LedgerResult<Settlement> {
    if bet.amount == 0 {
        return Err(LedgerError::Rejected("invalid amount".to_string()));
    }

    let exposure = bet.exposure().ok_or(LedgerError::Overflow)?;
    if exposure > balance {
        return Err(LedgerError::Rejected("insufficient balance".to_string()));
    }

    let potential_winnings = bet
        .amount
        .checked_mul(bet.multiplier.factor() + 1)
        .ok_or(LedgerError::Overflow)?;

    let is_win = roll >= win_threshold(bet.multiplier);
    let new_balance = if is_win {
        balance
            .checked_add(potential_winnings)
            .ok_or(LedgerError::Overflow)?
    } else {
        balance - exposure
    };

    Ok(Settlement {
        roll,
        is_win,
        new_balance,
        potential_winnings,
    })
}

enum Die {
    Fair(StdRng),
    Loaded(VecDeque<u8>),
}

impl Die {
    fn roll(&mut self) -> u8 {
        match self {
            Die::Fair(rng) => rng.random_range(1..=DIE_FACES),
            Die::Loaded(faces) => {
                let face = faces.pop_front().unwrap_or(1);
                faces.push_back(face);
                face
            }
        }
    }
}

/// Entries kept in memory; the oldest are dropped past this.
pub const MAX_ENTRIES: usize = 10_000;

struct Book {
    balance: Balance,
    entries: VecDeque<LedgerEntry>,
    entry_capacity: usize,
    next_id: u64,
    die: Die,
}

impl Book {
    fn record(
        &mut self,
        amount: Balance,
        balance_after: Balance,
        direction: EntryDirection,
        entry_type: EntryType,
        description: String,
    ) {
        if self.entries.len() >= self.entry_capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LedgerEntry {
            id: self.next_id,
            amount,
            balance_after,
            direction,
            entry_type,
            description: Some(description),
            created_at: Utc::now(),
        });
        self.next_id += 1;
    }
}

/// Authoritative single-player ledger
pub struct HouseLedger {
    default_balance: Balance,
    book: Mutex<Book>,
}

impl HouseLedger {
    /// Create a ledger rolling a fair die seeded from the OS
    pub fn new(default_balance: Balance) -> Self {
        Self::with_die(default_balance, Die::Fair(StdRng::from_os_rng()))
    }

    /// Create a ledger with a reproducible die
    pub fn with_seed(default_balance: Balance, seed: u64) -> Self {
        Self::with_die(default_balance, Die::Fair(StdRng::seed_from_u64(seed)))
    }

    /// Create a ledger whose die cycles through `faces`.
    ///
    /// Faces outside `1..=6` are clamped onto the die.
    pub fn with_loaded_die(default_balance: Balance, faces: impl IntoIterator<Item = u8>) -> Self {
        let faces = faces
            .into_iter()
            .map(|face| face.clamp(1, DIE_FACES))
            .collect();
        Self::with_die(default_balance, Die::Loaded(faces))
    }

    fn with_die(default_balance: Balance, die: Die) -> Self {
        let mut book = Book {
            balance: default_balance,
            entries: VecDeque::new(),
            entry_capacity: MAX_ENTRIES,
            next_id: 1,
            die,
        };
        book.record(
            default_balance,
            default_balance,
            EntryDirection::Credit,
            EntryType::Opening,
            "Opening balance".to_string(),
        );

        Self {
            default_balance,
            book: Mutex::new(book),
        }
    }

    /// Current authoritative balance
    pub async fn balance(&self) -> Balance {
        self.book.lock().await.balance
    }

    #[cfg(test)]
    fn with_entry_capacity(mut self, capacity: usize) -> Self {
        self.book.get_mut().entry_capacity = capacity.max(1);
        self
    }

    /// Most recent entries, newest first
    pub async fn entries(&self, limit: usize) -> Vec<LedgerEntry> {
        self.book
            .lock()
            .await
            .entries
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LedgerService for HouseLedger {
    async fn verify_balance(&self, client_balance: Balance) -> LedgerResult<Balance> {
        let balance = self.book.lock().await.balance;
        if client_balance != balance {
            log::warn!("Client reported balance {client_balance}, ledger holds {balance}");
        }
        Ok(balance)
    }

    async fn roll_dice(&self, bet: Bet) -> LedgerResult<Settlement> {
        let mut book = self.book.lock().await;
        let balance = book.balance;

        // Reject before rolling so a refused bet does not consume a face.
        settle_roll(balance, &bet, DIE_FACES)?;
        let roll = book.die.roll();
        let settlement = settle_roll(balance, &bet, roll)?;

        if settlement.is_win {
            book.record(
                settlement.potential_winnings,
                settlement.new_balance,
                EntryDirection::Credit,
                EntryType::Payout,
                format!("Winnings for {} bet, rolled {roll}", bet.multiplier),
            );
        } else {
            book.record(
                balance - settlement.new_balance,
                settlement.new_balance,
                EntryDirection::Debit,
                EntryType::Wager,
                format!("Lost {} bet, rolled {roll}", bet.multiplier),
            );
        }
        book.balance = settlement.new_balance;

        log::info!(
            "Settled {} bet of {}: rolled {roll}, {}, balance {balance} -> {}",
            bet.multiplier,
            bet.amount,
            if settlement.is_win { "win" } else { "loss" },
            settlement.new_balance
        );

        Ok(settlement)
    }

    async fn reset_balance(&self) -> LedgerResult<Balance> {
        let mut book = self.book.lock().await;
        let fresh = self.default_balance;
        book.balance = fresh;
        book.record(
            fresh,
            fresh,
            EntryDirection::Credit,
            EntryType::Reset,
            "Balance reset".to_string(),
        );

        log::info!("Balance reset to {fresh}");
        Ok(fresh)
    }
}
