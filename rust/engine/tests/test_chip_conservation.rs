use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::Stakes;
use holdem_engine::player::{Player, PlayerAction};
use holdem_engine::rules::LegalAction;

/// Random legal action, with raise sizes anywhere in the legal range.
fn pick(rng: &mut ChaCha8Rng, legal: &[LegalAction]) -> PlayerAction {
    match legal[rng.random_range(0..legal.len())] {
        LegalAction::Check => PlayerAction::Check,
        LegalAction::Call(_) => PlayerAction::Call,
        LegalAction::Fold => PlayerAction::Fold,
        LegalAction::RaiseTo { target, .. } => {
            let top = legal
                .iter()
                .filter_map(|a| match a {
                    LegalAction::RaiseTo { target, .. } => Some(*target),
                    _ => None,
                })
                .max()
                .unwrap_or(target);
            PlayerAction::RaiseTo(rng.random_range(target..=top))
        }
    }
}

fn run_session(seed: u64, stacks: &[u32], hands: usize) {
    let players: Vec<Player> = stacks
        .iter()
        .enumerate()
        .map(|(i, &c)| Player::new(i, format!("p{i}"), c))
        .collect();
    let total: u64 = stacks.iter().map(|&c| u64::from(c)).sum();
    let mut eng = Engine::new(players, Stakes::default(), Some(seed)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..hands {
        let mut done = match eng.start_round() {
            Ok(done) => done,
            Err(GameError::NotEnoughPlayers(_)) => break,
            Err(e) => panic!("seed {seed}: {e}"),
        };
        assert_eq!(eng.total_chips(), total, "seed {seed}: after blinds");
        while done.is_none() {
            let legal = eng.legal_actions();
            assert!(!legal.is_empty(), "seed {seed}: actor without actions");
            let action = pick(&mut rng, &legal);
            done = eng.act(action).unwrap_or_else(|e| panic!("seed {seed}: {e}"));
            assert_eq!(eng.total_chips(), total, "seed {seed}: after {action:?}");
        }
        let record = done.unwrap();
        let paid: u32 = record.winnings().iter().map(|(_, a)| a).sum();
        let put_in: u32 = record.settlements.iter().map(|s| s.amount).sum();
        assert_eq!(paid, put_in, "seed {seed}: payouts match pots");
        assert_eq!(eng.live_pot(), 0);
        let stacks: u64 = eng.players().iter().map(|p| u64::from(p.chips())).sum();
        assert_eq!(stacks, total, "seed {seed}: stacks after hand");
    }
}

#[test]
fn random_play_conserves_chips_heads_up() {
    for seed in 0..20 {
        run_session(seed, &[1_000, 1_000], 50);
    }
}

#[test]
fn random_play_conserves_chips_full_ring() {
    for seed in 100..110 {
        run_session(seed, &[1_000; 9], 40);
    }
}

#[test]
fn random_play_conserves_chips_with_uneven_stacks() {
    for seed in 200..215 {
        run_session(seed, &[35, 400, 1_000, 95, 2_500, 15], 60);
    }
}

#[test]
fn random_play_conserves_chips_with_stacks_below_the_blinds() {
    for seed in 0..400 {
        let mut setup = ChaCha8Rng::seed_from_u64(seed ^ 0x5EED);
        let seats = setup.random_range(2..=10);
        let stacks: Vec<u32> = (0..seats).map(|_| setup.random_range(1..300)).collect();
        run_session(seed, &stacks, 30);
    }
}
