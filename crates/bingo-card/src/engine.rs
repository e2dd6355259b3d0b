//! The optimistic update engine.
//!
//! Cards live in a store with no read-modify-write primitive. The engine
//! turns a pure `Card -> Card` transform into a safe concurrent update with a
//! compare-and-swap loop:
//!
//! 1. read the card and its generation,
//! 2. apply the transform to that snapshot,
//! 3. write the result only if the generation is unchanged,
//! 4. on conflict, start over from a fresh read.
//!
//! The transform is re-run from scratch on every attempt, so a committed card
//! is never computed from stale state. Only conflicts are retried; every
//! other failure ends the update immediately with its kind preserved.

use std::time::Duration;

use backon::{BackoffBuilder, ExponentialBackoff, ExponentialBuilder};
use bingo_types::{Card, CardName};
use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};
use crate::repository::{CardRepository, WriteOutcome};

/// Retry policy for [`UpdateEngine::update`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePolicy {
    /// Total number of read-transform-write attempts before giving up.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds. Zero disables backoff.
    pub backoff_base_ms: u64,
    /// Upper bound on any single retry delay, in milliseconds.
    pub backoff_max_ms: u64,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            backoff_base_ms: 10,
            backoff_max_ms: 250,
        }
    }
}

impl UpdatePolicy {
    /// A policy that retries immediately, without sleeping.
    pub fn without_backoff(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff_base_ms: 0,
            backoff_max_ms: 0,
        }
    }

    /// Attempt bound, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delays to sleep between conflicting attempts, one per retry.
    ///
    /// Exponential from `backoff_base_ms`, capped at `backoff_max_ms`, with
    /// random jitter so that writers which collided once do not collide
    /// again in lockstep. Yields exactly `attempts() - 1` delays.
    pub fn backoff_schedule(&self) -> ExponentialBackoff {
        let base = self.backoff_base_ms;
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(base))
            .with_max_delay(Duration::from_millis(self.backoff_max_ms.max(base)))
            .with_jitter()
            .with_max_times(self.attempts() as usize - 1)
            .build()
    }
}

/// Runs card transforms under the compare-and-swap protocol.
#[derive(Clone, Debug)]
pub struct UpdateEngine {
    repository: CardRepository,
    policy: UpdatePolicy,
}

impl UpdateEngine {
    pub fn new(repository: CardRepository, policy: UpdatePolicy) -> Self {
        Self { repository, policy }
    }

    pub fn repository(&self) -> &CardRepository {
        &self.repository
    }

    pub fn policy(&self) -> &UpdatePolicy {
        &self.policy
    }

    /// Apply `transform` to the card stored under `name` and commit the
    /// result atomically with respect to every other writer.
    ///
    /// `transform` must be pure: it may be called several times, each time
    /// with a freshly read card, and only the result of the last call is
    /// committed. An error from `transform` aborts the update without retry.
    ///
    /// Returns the committed card, or [`CardError::UpdateAbandoned`] when
    /// every one of the policy's attempts lost its race.
    pub async fn update<F>(&self, name: &CardName, transform: F) -> CardResult<Card>
    where
        F: Fn(Card) -> CardResult<Card> + Send,
    {
        let attempts = self.policy.attempts();
        let mut delays = self.policy.backoff_schedule();

        for attempt in 1..=attempts {
            let (card, generation) = self.repository.read(name).await?;
            let updated = transform(card)?;

            match self
                .repository
                .write_if_version(name, &updated, generation)
                .await?
            {
                WriteOutcome::Written(committed) => {
                    tracing::debug!(card = %name, attempt, from = %generation, to = %committed, "card updated");
                    return Ok(updated);
                }
                WriteOutcome::Conflict => {
                    tracing::debug!(card = %name, attempt, stale = %generation, "card update conflicted");
                    if attempt < attempts {
                        if let Some(delay) = delays.next().filter(|d| !d.is_zero()) {
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
            }
        }

        tracing::warn!(card = %name, attempts, "card update abandoned under contention");
        Err(CardError::UpdateAbandoned {
            name: name.clone(),
            attempts,
        })
    }
}
