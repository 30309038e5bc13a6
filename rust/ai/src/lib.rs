//! # holdem-ai: Placeholder Action Policies
//!
//! Action sources for the hand orchestrator. These are stand-ins that
//! exercise the legal-action surface, not playing strategies.
//!
//! ## Core Components
//!
//! - [`Policy`] - Engine trait every policy implements (re-exported)
//! - [`placeholder`] - `PassivePolicy` and `RandomPolicy`
//! - [`create_policy`] - Factory that builds a policy by name
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::create_policy;
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::Stakes;
//! use holdem_engine::player::Player;
//!
//! let mut policy = create_policy("passive", None).expect("known policy");
//! let players = (0..4).map(|i| Player::new(i, format!("p{i}"), 1_000)).collect();
//! let mut engine = Engine::new(players, Stakes::default(), Some(42)).unwrap();
//!
//! let record = engine.play_hand(policy.as_mut()).unwrap();
//! assert_eq!(record.board.len(), 5);
//! assert_eq!(engine.total_chips(), 4_000);
//! ```
//!
//! ## Policy Names
//!
//! - `"passive"` - check when free, otherwise call
//! - `"random"` - uniform choice among legal actions, seeded

pub use holdem_engine::engine::{Decision, Policy};

pub mod placeholder;

/// Names accepted by [`create_policy`].
pub const POLICY_NAMES: [&str; 2] = ["passive", "random"];

/// Factory function to create a policy by name.
///
/// # Arguments
///
/// * `name` - Policy identifier (case-insensitive), one of [`POLICY_NAMES`]
/// * `seed` - RNG seed for policies that randomize; ignored otherwise
///
/// # Returns
///
/// The boxed policy, or `None` for an unknown name
///
/// # Example
///
/// ```rust
/// use holdem_ai::create_policy;
///
/// let policy = create_policy("random", Some(7)).unwrap();
/// assert_eq!(policy.name(), "random");
/// assert!(create_policy("shark", None).is_none());
/// ```
pub fn create_policy(name: &str, seed: Option<u64>) -> Option<Box<dyn Policy>> {
    match name.to_ascii_lowercase().as_str() {
        "passive" => Some(Box::new(placeholder::PassivePolicy)),
        "random" => Some(Box::new(placeholder::RandomPolicy::new(seed.unwrap_or(0)))),
        _ => None,
    }
}
