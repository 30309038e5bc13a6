use std::collections::BTreeSet;

use holdem_engine::cards::parse_cards;
use holdem_engine::errors::GameError;
use holdem_engine::hand::evaluate_hand;
use holdem_engine::logger::{HandRecord, ShowdownInfo};
use holdem_engine::player::Player;
use holdem_engine::pot::Pot;
use holdem_engine::showdown::{award_uncontested, pay, settle_pots};

const BOARD: &str = "2c 7d 9h Js Kd";

fn seat_with(id: usize, hole: &str) -> Player {
    let mut p = Player::new(id, format!("p{id}"), 0);
    let hole = parse_cards(hole).unwrap();
    let mut cards = hole.clone();
    cards.extend(parse_cards(BOARD).unwrap());
    p.receive_cards(&hole);
    p.set_best_hand(evaluate_hand(&cards));
    p
}

fn pot(amount: u32, eligible: &[usize]) -> Pot {
    Pot {
        amount,
        eligible: eligible.iter().copied().collect::<BTreeSet<_>>(),
    }
}

#[test]
fn single_winner_takes_whole_pot() {
    let players = vec![seat_with(0, "Ah Ac"), seat_with(1, "Kh Qh"), seat_with(2, "3s 4s")];
    let s = settle_pots(&[pot(60, &[0, 1, 2])], &players, 0).unwrap();
    assert_eq!(s[0].winners, vec![0]);
    assert_eq!(s[0].payouts, vec![(0, 60)]);
    assert_eq!(s[0].remainder, 0);
}

#[test]
fn odd_chip_goes_left_of_button() {
    // seats 0 and 2 split with the same ace-high; button on seat 2
    let players = vec![seat_with(0, "Ah 3c"), seat_with(1, "4s 5s"), seat_with(2, "Ad 3d")];
    let s = settle_pots(&[pot(101, &[0, 1, 2])], &players, 2).unwrap();
    assert_eq!(s[0].share, 50);
    assert_eq!(s[0].remainder, 1);
    assert_eq!(s[0].payouts, vec![(0, 51), (2, 50)]);

    // button on seat 0: seat 2 is reached first going left
    let s = settle_pots(&[pot(101, &[0, 1, 2])], &players, 0).unwrap();
    assert_eq!(s[0].payouts, vec![(2, 51), (0, 50)]);
}

#[test]
fn side_pot_goes_to_best_eligible_hand() {
    let players = vec![seat_with(0, "Kh Kc"), seat_with(1, "Qh Qc"), seat_with(2, "3s 4s")];
    let pots = [pot(300, &[0, 1, 2]), pot(400, &[1, 2])];
    let mut stacks = players.clone();
    let s = settle_pots(&pots, &players, 0).unwrap();
    assert_eq!(s[0].winners, vec![0]);
    assert_eq!(s[1].winners, vec![1]);
    pay(&mut stacks, &s);
    assert_eq!(stacks[0].chips(), 300);
    assert_eq!(stacks[1].chips(), 400);
}

#[test]
fn folded_seat_cannot_win_its_pot() {
    let mut players = vec![seat_with(0, "Ah Ac"), seat_with(1, "3s 4s")];
    players[0].fold();
    let s = settle_pots(&[pot(50, &[0, 1])], &players, 0).unwrap();
    assert_eq!(s[0].winners, vec![1]);
}

#[test]
fn pot_without_contender_is_an_error() {
    let mut players = vec![seat_with(0, "Ah Ac"), seat_with(1, "3s 4s")];
    players[1].fold();
    let err = settle_pots(&[pot(50, &[0, 1]), pot(20, &[1])], &players, 0).unwrap_err();
    assert_eq!(err, GameError::NoEligibleWinner { pot: 1 });
}

#[test]
fn empty_pot_is_skipped() {
    let players = vec![seat_with(0, "Ah Ac"), seat_with(1, "3s 4s")];
    let s = settle_pots(&[pot(0, &[1]), pot(40, &[0, 1])], &players, 0).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s[0].pot, 1);
}

#[test]
fn uncontested_award_pays_every_pot() {
    let s = award_uncontested(&[pot(30, &[0, 1]), pot(10, &[1])], 1);
    let total: u32 = s.iter().flat_map(|x| x.payouts.iter()).map(|(_, a)| a).sum();
    assert_eq!(total, 40);
}

#[test]
fn showdown_info_serializes() {
    let mut rec = HandRecord::new("20250102-000001".into(), Some(1), 0);
    rec.board = parse_cards(BOARD).unwrap();
    rec.result = Some("p0".into());
    rec.showdown = Some(ShowdownInfo {
        winners: vec![0],
        hands: Vec::new(),
        notes: Some("kicker A".into()),
    });
    let s = serde_json::to_string(&rec).unwrap();
    let back: HandRecord = serde_json::from_str(&s).unwrap();
    assert_eq!(back, rec);
    assert_eq!(back.showdown.unwrap().winners, vec![0]);
}
