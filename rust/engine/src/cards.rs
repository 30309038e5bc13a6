use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Represents one of the four suits in a standard 52-card deck.
/// Suits carry no ranking weight; they only matter for flushes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn glyph(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    fn from_symbol(c: char) -> Option<Suit> {
        match c {
            'c' | 'C' | '♣' => Some(Suit::Clubs),
            'd' | 'D' | '♦' => Some(Suit::Diamonds),
            'h' | 'H' | '♥' => Some(Suit::Hearts),
            's' | 'S' | '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// The discriminant is the default ranking weight (2..=14).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14, or 1 at the bottom of a wheel)
    Ace,
}

impl Rank {
    /// Maps a ranking weight back to a rank. Accepts 1 as the low ace.
    pub fn from_u8(v: u8) -> Option<Rank> {
        let r = match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            1 | 14 => Rank::Ace,
            _ => return None,
        };
        Some(r)
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Weight used only for low-end straights: the ace counts as 1.
    pub fn alt_value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            r => r.value(),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    fn from_symbol(s: &str) -> Option<Rank> {
        let r = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return None,
        };
        Some(r)
    }
}

/// Represents a single playing card with a suit and rank.
/// Cards are immutable values shared between hole cards, the board, and the deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn alt_value(&self) -> u8 {
        self.rank.alt_value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.glyph())
    }
}

/// Parses `As`, `Td`, `10h` or `A♠`.
impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || GameError::InvalidCard(s.to_string());
        let suit_char = s.chars().last().ok_or_else(invalid)?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];
        let suit = Suit::from_symbol(suit_char).ok_or_else(invalid)?;
        let rank = Rank::from_symbol(rank_part).ok_or_else(invalid)?;
        Ok(Card { suit, rank })
    }
}

/// Parses a whitespace- or comma-separated list of cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
