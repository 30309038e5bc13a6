use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{all_suits, Card, Rank};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Ranked result of a hand evaluation.
///
/// Ordering and equality look at `category` then `tiebreakers` (high to low).
/// `best_five` is kept for display and auditing and never decides a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub tiebreakers: Vec<u8>,
    pub best_five: Vec<Card>,
}

impl PartialEq for HandRank {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.tiebreakers == other.tiebreakers
    }
}

impl Eq for HandRank {}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tiebreakers.cmp(&other.tiebreakers))
    }
}

impl HandRank {
    /// Ace-high straight flush. Same category and strength as any other
    /// straight flush, only the label differs.
    pub fn is_royal(&self) -> bool {
        self.category == Category::StraightFlush && self.tiebreakers.first() == Some(&14)
    }

    /// Human readable summary, e.g. "Full House, Kings over Queens".
    pub fn describe(&self) -> String {
        let tb = &self.tiebreakers;
        let at = |i: usize| rank_name(tb.get(i).copied().unwrap_or(0));
        let list = |from: usize| {
            tb.iter()
                .skip(from)
                .map(|&v| rank_name(v))
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self.category {
            Category::StraightFlush if self.is_royal() => "Royal Flush".to_string(),
            Category::StraightFlush => format!("Straight Flush, {}-high", at(0)),
            Category::FourOfAKind => {
                format!("Four of a Kind, {}s with {} kicker", at(0), at(1))
            }
            Category::FullHouse => format!("Full House, {}s over {}s", at(0), at(1)),
            Category::Flush => format!("Flush, high cards {}", list(0)),
            Category::Straight => format!("Straight, {}-high", at(0)),
            Category::ThreeOfAKind => {
                format!("Three of a Kind, {}s with kickers {}", at(0), list(1))
            }
            Category::TwoPair => format!(
                "Two Pair, {}s and {}s with kicker {}",
                at(0),
                at(1),
                at(2)
            ),
            Category::OnePair => format!("One Pair, {}s with kickers {}", at(0), list(1)),
            Category::HighCard => format!("High Card, {}", list(0)),
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn rank_name(v: u8) -> String {
    match Rank::from_u8(v) {
        Some(r) => r.name().to_string(),
        None => v.to_string(),
    }
}

/// Ranks the best five-card combination out of `cards` (normally 5 to 7).
///
/// Categories are tried from strongest to weakest and the first match wins.
/// The input is never modified; every step works on its own sorted copy.
pub fn evaluate_hand(cards: &[Card]) -> HandRank {
    let sorted = sorted_desc(cards);
    let counts = rank_counts(&sorted);

    let checks: [(Category, Check); 8] = [
        (Category::StraightFlush, straight_flush),
        (Category::FourOfAKind, four_of_a_kind),
        (Category::FullHouse, full_house),
        (Category::Flush, flush),
        (Category::Straight, straight),
        (Category::ThreeOfAKind, three_of_a_kind),
        (Category::TwoPair, two_pair),
        (Category::OnePair, one_pair),
    ];
    for (category, check) in checks {
        if let Some((tiebreakers, best_five)) = check(&sorted, &counts) {
            return HandRank {
                category,
                tiebreakers,
                best_five,
            };
        }
    }

    let best_five: Vec<Card> = sorted.iter().copied().take(5).collect();
    HandRank {
        category: Category::HighCard,
        tiebreakers: best_five.iter().map(Card::value).collect(),
        best_five,
    }
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    a.cmp(b)
}

type Found = Option<(Vec<u8>, Vec<Card>)>;
type Check = fn(&[Card], &[u8; 15]) -> Found;

fn sorted_desc(cards: &[Card]) -> Vec<Card> {
    let mut v = cards.to_vec();
    v.sort_by(|a, b| b.value().cmp(&a.value()).then(b.suit.cmp(&a.suit)));
    v
}

fn rank_counts(cards: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.value() as usize] += 1;
    }
    counts
}

/// Ranks whose card count satisfies `pred`, highest first.
fn ranks_with(counts: &[u8; 15], pred: impl Fn(u8) -> bool) -> Vec<u8> {
    (2..=14u8).rev().filter(|&r| pred(counts[r as usize])).collect()
}

fn distinct_desc(cards: &[Card]) -> Vec<u8> {
    let mut v: Vec<u8> = cards.iter().map(Card::value).collect();
    v.sort_unstable_by(|a, b| b.cmp(a));
    v.dedup();
    v
}

/// Highest five-long consecutive window over distinct ranks, ace also
/// counting as 1. `distinct` must be strictly descending.
fn straight_window(distinct: &[u8]) -> Option<Vec<u8>> {
    let mut values = distinct.to_vec();
    if values.first() == Some(&14) {
        values.push(1);
    }
    values
        .windows(5)
        .find(|w| w[0] - w[4] == 4)
        .map(<[u8]>::to_vec)
}

/// One card per requested value, taken from `sorted` in order. Value 1 maps to an ace.
fn pick(sorted: &[Card], values: &[u8]) -> Vec<Card> {
    values
        .iter()
        .filter_map(|&v| {
            sorted
                .iter()
                .find(|c| c.value() == v || (v == 1 && c.rank == Rank::Ace))
                .copied()
        })
        .collect()
}

fn of_rank(sorted: &[Card], value: u8, n: usize) -> Vec<Card> {
    sorted
        .iter()
        .filter(|c| c.value() == value)
        .take(n)
        .copied()
        .collect()
}

/// Top `n` distinct values among cards whose rank is not excluded.
fn kickers(sorted: &[Card], exclude: &[u8], n: usize) -> Vec<u8> {
    let rest: Vec<Card> = sorted
        .iter()
        .filter(|c| !exclude.contains(&c.value()))
        .copied()
        .collect();
    distinct_desc(&rest).into_iter().take(n).collect()
}

fn straight_flush(sorted: &[Card], _counts: &[u8; 15]) -> Found {
    all_suits()
        .into_iter()
        .filter_map(|suit| {
            let suited: Vec<Card> = sorted.iter().filter(|c| c.suit == suit).copied().collect();
            if suited.len() < 5 {
                return None;
            }
            let run = straight_window(&distinct_desc(&suited))?;
            Some((vec![run[0]], pick(&suited, &run)))
        })
        .max_by_key(|(tb, _)| tb[0])
}

fn four_of_a_kind(sorted: &[Card], counts: &[u8; 15]) -> Found {
    let quad = *ranks_with(counts, |n| n == 4).first()?;
    let mut best = of_rank(sorted, quad, 4);
    let mut tiebreakers = vec![quad];
    if let Some(kicker) = sorted.iter().find(|c| c.value() != quad) {
        tiebreakers.push(kicker.value());
        best.push(*kicker);
    }
    Some((tiebreakers, best))
}

fn full_house(sorted: &[Card], counts: &[u8; 15]) -> Found {
    let triple = *ranks_with(counts, |n| n >= 3).first()?;
    // A second set of trips also qualifies here and plays as the pair.
    let pair = *ranks_with(counts, |n| n >= 2)
        .iter()
        .find(|&&r| r != triple)?;
    let mut best = of_rank(sorted, triple, 3);
    best.extend(of_rank(sorted, pair, 2));
    Some((vec![triple, pair], best))
}

fn flush(sorted: &[Card], _counts: &[u8; 15]) -> Found {
    all_suits()
        .into_iter()
        .filter_map(|suit| {
            let top: Vec<Card> = sorted
                .iter()
                .filter(|c| c.suit == suit)
                .take(5)
                .copied()
                .collect();
            if top.len() < 5 {
                return None;
            }
            Some((top.iter().map(Card::value).collect::<Vec<u8>>(), top))
        })
        .max_by(|a, b| a.0.cmp(&b.0))
}

fn straight(sorted: &[Card], _counts: &[u8; 15]) -> Found {
    let run = straight_window(&distinct_desc(sorted))?;
    Some((vec![run[0]], pick(sorted, &run)))
}

fn three_of_a_kind(sorted: &[Card], counts: &[u8; 15]) -> Found {
    let triple = *ranks_with(counts, |n| n == 3).first()?;
    let kick = kickers(sorted, &[triple], 2);
    let mut best = of_rank(sorted, triple, 3);
    best.extend(pick(sorted, &kick));
    let mut tiebreakers = vec![triple];
    tiebreakers.extend(kick);
    Some((tiebreakers, best))
}

fn two_pair(sorted: &[Card], counts: &[u8; 15]) -> Found {
    let pairs = ranks_with(counts, |n| n >= 2);
    let (high, low) = match pairs.as_slice() {
        [h, l, ..] => (*h, *l),
        _ => return None,
    };
    let mut best = of_rank(sorted, high, 2);
    best.extend(of_rank(sorted, low, 2));
    let mut tiebreakers = vec![high, low];
    if let Some(kicker) = sorted.iter().find(|c| c.value() != high && c.value() != low) {
        tiebreakers.push(kicker.value());
        best.push(*kicker);
    }
    Some((tiebreakers, best))
}

fn one_pair(sorted: &[Card], counts: &[u8; 15]) -> Found {
    let pair = *ranks_with(counts, |n| n >= 2).first()?;
    let kick = kickers(sorted, &[pair], 3);
    let mut best = of_rank(sorted, pair, 2);
    best.extend(pick(sorted, &kick));
    let mut tiebreakers = vec![pair];
    tiebreakers.extend(kick);
    Some((tiebreakers, best))
}
