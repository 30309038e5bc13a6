//! Stand-in policies used to drive simulations.

use holdem_engine::engine::{Decision, Policy};
use holdem_engine::player::PlayerAction;
use holdem_engine::rules::LegalAction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Checks whenever that is free and calls everything else. Never folds or raises.
///
/// # Example
///
/// ```rust
/// use holdem_ai::placeholder::PassivePolicy;
/// use holdem_ai::Policy;
///
/// assert_eq!(PassivePolicy.name(), "passive");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PassivePolicy;

impl Policy for PassivePolicy {
    fn decide(&mut self, decision: &Decision<'_>) -> PlayerAction {
        if decision.legal.contains(&LegalAction::Check) {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        }
    }

    fn name(&self) -> &str {
        "passive"
    }
}

/// Picks uniformly among the legal actions. Raises land anywhere between the
/// minimum target and the all-in ceiling. Same seed, same choices.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, decision: &Decision<'_>) -> PlayerAction {
        let legal = &decision.legal;
        if legal.is_empty() {
            return PlayerAction::Fold;
        }
        match legal[self.rng.random_range(0..legal.len())] {
            LegalAction::Check => PlayerAction::Check,
            LegalAction::Call(_) => PlayerAction::Call,
            LegalAction::Fold => PlayerAction::Fold,
            LegalAction::RaiseTo { target, .. } => {
                let ceiling = legal
                    .iter()
                    .filter_map(|a| match a {
                        LegalAction::RaiseTo { target, .. } => Some(*target),
                        _ => None,
                    })
                    .max()
                    .unwrap_or(target);
                PlayerAction::RaiseTo(self.rng.random_range(target..=ceiling))
            }
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}
