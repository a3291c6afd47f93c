//! Wager engine: the single owner of the player's balance.
//!
//! The engine sits between two tiers:
//!
//! - a [`BalanceStore`], the local cache of the last accepted balance, and
//! - a [`LedgerService`], the authority that resolves every bet.
//!
//! Reconciliation policy: when the ledger answers, its balance wins; when it
//! cannot be reached, the cached balance is kept as is. The engine never
//! derives a balance from its own arithmetic.
//!
//! At most one ledger round trip (bet or reset) is in flight at a time. A
//! second submission while one is pending is rejected with
//! [`WagerError::RequestInFlight`].

use super::{
    config::EngineConfig,
    errors::{WagerError, WagerResult},
    events::{OutcomeEvent, OutcomeSender},
    models::{Balance, Bet, BetPhase, Multiplier, QuickBet, Settlement},
    validation::{accepts_input, quick_bet_amount, validate_bet},
};
use crate::{
    balance::BalanceStore,
    ledger::{LedgerError, LedgerResult, LedgerService},
};
use std::{future::Future, sync::Arc};
use tokio::sync::{Mutex, RwLock};

/// Observable session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Best known balance
    pub balance: Balance,
    /// Pending bet amount exactly as entered
    pub bet_amount: String,
    /// Selected multiplier
    pub multiplier: Multiplier,
    /// Bet lifecycle phase
    pub phase: BetPhase,
}

/// Wager engine
pub struct WagerEngine {
    store: Arc<dyn BalanceStore>,
    ledger: Arc<dyn LedgerService>,
    config: EngineConfig,
    session: RwLock<SessionState>,
    in_flight: Mutex<()>,
    events: OutcomeSender,
}

impl WagerEngine {
    /// Create a new wager engine
    ///
    /// The balance starts at the cached value (or the configured default) and
    /// stays there until [`reconcile`](Self::reconcile) consults the ledger.
    ///
    /// # Arguments
    ///
    /// * `store` - Local balance cache
    /// * `ledger` - Authoritative ledger service
    /// * `config` - Engine configuration
    /// * `events` - Outcome event channel
    pub fn new(
        store: Arc<dyn BalanceStore>,
        ledger: Arc<dyn LedgerService>,
        config: EngineConfig,
        events: OutcomeSender,
    ) -> Self {
        let balance = load_cached(store.as_ref(), config.default_balance);

        Self {
            store,
            ledger,
            config,
            session: RwLock::new(SessionState {
                balance,
                bet_amount: String::new(),
                multiplier: Multiplier::default(),
                phase: BetPhase::Idle,
            }),
            in_flight: Mutex::new(()),
            events,
        }
    }

    /// Align the cached balance with the ledger.
    ///
    /// Runs once at the start of a session. Waits for any in-flight request
    /// to finish first. A ledger failure is logged and otherwise ignored: the
    /// session carries on with the last persisted balance.
    ///
    /// # Returns
    ///
    /// * `Balance` - Balance the session continues with
    pub async fn reconcile(&self) -> Balance {
        let _flight = self.in_flight.lock().await;

        let cached = load_cached(self.store.as_ref(), self.config.default_balance);
        self.session.write().await.balance = cached;

        match self.call(self.ledger.verify_balance(cached)).await {
            Ok(authoritative) if authoritative != cached => {
                log::info!("Ledger corrected cached balance {cached} -> {authoritative}");
                let mut session = self.session.write().await;
                self.commit_balance(&mut session, authoritative);
                authoritative
            }
            Ok(_) => {
                log::debug!("Ledger confirmed cached balance {cached}");
                cached
            }
            Err(e) => {
                log::warn!("Balance verification failed, keeping cached balance {cached}: {e}");
                cached
            }
        }
    }

    /// Resolve the pending bet through the ledger.
    ///
    /// # Returns
    ///
    /// * `WagerResult<Settlement>` - Authoritative settlement or error
    ///
    /// # Errors
    ///
    /// * `WagerError::RequestInFlight` - Another bet or reset is pending
    /// * `WagerError::InvalidAmount` / `InsufficientBalance` - Rejected locally, no call made
    /// * `WagerError::NetworkFailure` / `ServiceError` - Ledger failed; balance untouched
    pub async fn roll(&self) -> WagerResult<Settlement> {
        let Ok(_flight) = self.in_flight.try_lock() else {
            return Err(self.reject(WagerError::RequestInFlight));
        };

        let bet = {
            // Validation and the move to Submitting share one write lock.
            let mut session = self.session.write().await;
            match validate_bet(&session.bet_amount, session.balance) {
                Ok(amount) => {
                    session.phase = BetPhase::Submitting;
                    Bet::new(amount, session.multiplier)
                }
                Err(e) => return Err(self.reject(e)),
            }
        };

        log::debug!("Submitting {} bet of {}", bet.multiplier, bet.amount);
        let result = self
            .call(self.ledger.roll_dice(bet))
            .await
            .and_then(|settlement| {
                if settlement.is_well_formed() {
                    Ok(settlement)
                } else {
                    Err(LedgerError::UnexpectedResponse(format!(
                        "die face {} out of range",
                        settlement.roll
                    )))
                }
            });

        let mut session = self.session.write().await;
        session.phase = BetPhase::Idle;

        match result {
            Ok(settlement) => {
                self.commit_balance(&mut session, settlement.new_balance);
                if settlement.new_balance == 0 {
                    session.bet_amount.clear();
                }
                drop(session);

                self.emit(OutcomeEvent::RollResolved {
                    roll: settlement.roll,
                    is_win: settlement.is_win,
                    amount_delta: settlement.amount_delta(&bet),
                });
                Ok(settlement)
            }
            Err(e) => {
                drop(session);
                log::error!("Roll failed, balance left untouched: {e}");
                self.emit(OutcomeEvent::NetworkFailure("roll dice".to_string()));
                Err(e.into())
            }
        }
    }

    /// Ask the ledger for a fresh balance and clear the pending bet.
    ///
    /// # Errors
    ///
    /// * `WagerError::RequestInFlight` - Another bet or reset is pending
    /// * `WagerError::NetworkFailure` / `ServiceError` - Ledger failed; balance untouched
    pub async fn reset(&self) -> WagerResult<Balance> {
        let Ok(_flight) = self.in_flight.try_lock() else {
            return Err(self.reject(WagerError::RequestInFlight));
        };

        match self.call(self.ledger.reset_balance()).await {
            Ok(fresh) => {
                let mut session = self.session.write().await;
                self.commit_balance(&mut session, fresh);
                session.bet_amount.clear();
                drop(session);

                self.emit(OutcomeEvent::BalanceReset(fresh));
                Ok(fresh)
            }
            Err(e) => {
                log::error!("Balance reset failed, balance left untouched: {e}");
                self.emit(OutcomeEvent::NetworkFailure("reset balance".to_string()));
                Err(e.into())
            }
        }
    }

    /// Edit the pending bet amount.
    ///
    /// Only the empty string or digits not exceeding the balance are taken;
    /// anything else leaves the field as it was.
    ///
    /// # Returns
    ///
    /// * `bool` - Whether the edit was accepted
    pub async fn enter_bet_amount(&self, input: &str) -> bool {
        let mut session = self.session.write().await;
        if accepts_input(input, session.balance) {
            session.bet_amount = input.to_string();
            true
        } else {
            false
        }
    }

    /// Fill the bet field with a fraction of the balance
    pub async fn quick_bet(&self, preset: QuickBet) -> Balance {
        let mut session = self.session.write().await;
        let amount = quick_bet_amount(session.balance, preset);
        session.bet_amount = amount.to_string();
        amount
    }

    pub async fn select_multiplier(&self, multiplier: Multiplier) {
        self.session.write().await.multiplier = multiplier;
    }

    pub async fn balance(&self) -> Balance {
        self.session.read().await.balance
    }

    pub async fn bet_amount(&self) -> String {
        self.session.read().await.bet_amount.clone()
    }

    pub async fn multiplier(&self) -> Multiplier {
        self.session.read().await.multiplier
    }

    pub async fn phase(&self) -> BetPhase {
        self.session.read().await.phase
    }

    pub async fn snapshot(&self) -> SessionState {
        self.session.read().await.clone()
    }

    /// Bound a ledger call by the configured timeout
    async fn call<T>(&self, request: impl Future<Output = LedgerResult<T>>) -> LedgerResult<T> {
        tokio::time::timeout(self.config.request_timeout, request)
            .await
            .unwrap_or(Err(LedgerError::Timeout))
    }

    /// Adopt an authoritative balance and persist it before anyone can read it
    fn commit_balance(&self, session: &mut SessionState, balance: Balance) {
        session.balance = balance;
        if let Err(e) = self.store.save(balance) {
            log::error!("Failed to persist balance {balance}: {e}");
        }
    }

    fn reject(&self, reason: WagerError) -> WagerError {
        log::debug!("Rejected locally: {reason}");
        self.emit(OutcomeEvent::BetRejected(reason.clone()));
        reason
    }

    fn emit(&self, event: OutcomeEvent) {
        if self.events.send(event).is_err() {
            log::debug!("Outcome receiver dropped");
        }
    }
}

fn load_cached(store: &dyn BalanceStore, default_balance: Balance) -> Balance {
    match store.load() {
        Ok(Some(balance)) => balance,
        Ok(None) => default_balance,
        Err(e) => {
            log::warn!("Ignoring unreadable cached balance: {e}");
            default_balance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{balance::MemoryBalanceStore, ledger::HouseLedger, wager::outcome_channel};

    fn engine_with(store: MemoryBalanceStore, ledger: HouseLedger) -> WagerEngine {
        let (tx, _rx) = outcome_channel();
        WagerEngine::new(
            Arc::new(store),
            Arc::new(ledger),
            EngineConfig::default(),
            tx,
        )
    }

    #[tokio::test]
    async fn test_starts_from_cache_or_default() {
        let engine = engine_with(MemoryBalanceStore::new(), HouseLedger::with_seed(1000, 1));
        assert_eq!(engine.balance().await, 1000);

        let engine = engine_with(
            MemoryBalanceStore::with_balance(42),
            HouseLedger::with_seed(1000, 1),
        );
        assert_eq!(engine.balance().await, 42);
    }

    #[tokio::test]
    async fn test_input_guard_keeps_previous_value() {
        let engine = engine_with(
            MemoryBalanceStore::with_balance(100),
            HouseLedger::with_seed(100, 1),
        );

        assert!(engine.enter_bet_amount("50").await);
        assert!(!engine.enter_bet_amount("500").await);
        assert!(!engine.enter_bet_amount("5x").await);
        assert_eq!(engine.bet_amount().await, "50");
        assert!(engine.enter_bet_amount("").await);
        assert_eq!(engine.bet_amount().await, "");
    }

    #[tokio::test]
    async fn test_quick_bet_populates_field() {
        let engine = engine_with(
            MemoryBalanceStore::with_balance(999),
            HouseLedger::with_seed(999, 1),
        );

        assert_eq!(engine.quick_bet(QuickBet::Half).await, 499);
        assert_eq!(engine.bet_amount().await, "499");
        assert_eq!(engine.quick_bet(QuickBet::Max).await, 999);
    }

    #[tokio::test]
    async fn test_multiplier_selection_is_idempotent() {
        let engine = engine_with(MemoryBalanceStore::new(), HouseLedger::with_seed(1000, 1));

        engine.select_multiplier(Multiplier::X3).await;
        engine.select_multiplier(Multiplier::X3).await;
        let snapshot = engine.snapshot().await;

        assert_eq!(snapshot.multiplier, Multiplier::X3);
        assert_eq!(snapshot.balance, 1000);
        assert_eq!(snapshot.phase, BetPhase::Idle);
    }

    #[tokio::test]
    async fn test_roll_against_house_ledger() {
        let store = MemoryBalanceStore::new();
        let engine = engine_with(store.clone(), HouseLedger::with_loaded_die(1000, [4]));
        engine.reconcile().await;

        engine.select_multiplier(Multiplier::X2).await;
        assert!(engine.enter_bet_amount("100").await);
        let settlement = engine.roll().await.unwrap();

        assert_eq!(settlement.new_balance, 1300);
        assert_eq!(engine.balance().await, 1300);
        assert_eq!(store.load().unwrap(), Some(1300));
        assert_eq!(engine.phase().await, BetPhase::Idle);
    }
}
