use std::collections::HashSet;

use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn deck_reset_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.reset();
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(
        deck.deal_card().is_err(),
        "after 52 cards, deck should be empty"
    );
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    // Compare first 10 cards
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.deal_card().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal_card().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn burn_and_deal_follow_holdem_procedure() {
    let mut deck = Deck::new_with_seed(777);
    deck.shuffle();

    // preflop: deal 2 each
    let p1 = [deck.deal_card().unwrap(), deck.deal_card().unwrap()];
    let p2 = [deck.deal_card().unwrap(), deck.deal_card().unwrap()];
    assert_ne!(p1, p2);

    // flop
    deck.burn().unwrap();
    let flop = [
        deck.deal_card().unwrap(),
        deck.deal_card().unwrap(),
        deck.deal_card().unwrap(),
    ];
    // turn
    deck.burn().unwrap();
    let turn = deck.deal_card().unwrap();
    // river
    deck.burn().unwrap();
    let river = deck.deal_card().unwrap();

    // Ensure all these cards are unique
    let mut set = HashSet::new();
    for c in [
        p1[0], p1[1], p2[0], p2[1], flop[0], flop[1], flop[2], turn, river,
    ] {
        assert!(set.insert(c));
    }
}

#[test]
fn deal_more_than_remaining_fails_without_removing() {
    let mut deck = Deck::new_with_seed(9);
    deck.shuffle();
    deck.deal(50).unwrap();
    let err = deck.deal(3).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientCards {
            requested: 3,
            remaining: 2
        }
    );
    assert_eq!(deck.remaining(), 2);
    assert_eq!(deck.deal(2).unwrap().len(), 2);
}

#[test]
fn reshuffle_restores_a_full_deck() {
    let mut deck = Deck::new_with_seed(5);
    deck.shuffle();
    let first = deck.deal(52).unwrap();
    deck.shuffle();
    assert_eq!(deck.remaining(), 52);
    let second = deck.deal(52).unwrap();
    assert_ne!(first, second, "the rng keeps advancing between shuffles");
}

#[test]
fn stacked_deck_deals_in_given_order() {
    let cards = parse_cards("As Kd 2c").unwrap();
    let mut deck = Deck::stacked(cards.clone());
    assert_eq!(deck.deal(3).unwrap(), cards);
}
