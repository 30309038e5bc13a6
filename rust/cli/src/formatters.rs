//! Card, action and payout formatters for terminal display.
//!
//! Pure functions over engine values. Cards render through the engine's
//! `Display` impl (`A♠`, `10♥`).

use holdem_engine::cards::Card;
use holdem_engine::game::Street;
use holdem_engine::logger::{ActionRecord, BlindPost};
use holdem_engine::player::PlayerAction;
use holdem_engine::showdown::PotSettlement;

/// Display name of a seat.
pub fn seat_name(seat: usize) -> String {
    format!("p{}", seat)
}

/// Space separated cards, `-` for none.
pub fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bracketed board, e.g. `[Q♥ 9♣ 7♦]`.
pub fn format_board(cards: &[Card]) -> String {
    format!(
        "[{}]",
        cards
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    )
}

pub fn format_street(street: Street) -> &'static str {
    match street {
        Street::Preflop => "preflop",
        Street::Flop => "flop",
        Street::Turn => "turn",
        Street::River => "river",
        Street::Showdown => "showdown",
    }
}

pub fn format_blind(post: &BlindPost) -> String {
    format!("{} posts {}", seat_name(post.seat), post.amount)
}

/// One action line, e.g. `[flop] p2 raises to 80 (stack 920)`.
pub fn format_action(rec: &ActionRecord) -> String {
    let verb = match rec.action {
        PlayerAction::Fold => "folds".to_string(),
        PlayerAction::Check => "checks".to_string(),
        PlayerAction::Call => format!("calls {}", rec.amount),
        PlayerAction::RaiseTo(target) => format!("raises to {}", target),
    };
    let all_in = match rec.action {
        PlayerAction::Call | PlayerAction::RaiseTo(_) if rec.chips_after == 0 => " all-in",
        _ => "",
    };
    format!(
        "[{}] {} {}{} (stack {})",
        format_street(rec.street),
        seat_name(rec.seat),
        verb,
        all_in,
        rec.chips_after
    )
}

/// One pot line: single winners, splits and odd chips.
pub fn format_settlement(s: &PotSettlement) -> String {
    let paid = s
        .payouts
        .iter()
        .map(|(seat, amount)| format!("{} {}", seat_name(*seat), amount))
        .collect::<Vec<_>>()
        .join(", ");
    let label = if s.pot == 0 {
        "Main pot".to_string()
    } else {
        format!("Side pot {}", s.pot)
    };
    if s.winners.len() > 1 {
        let mut line = format!("{} {}: split {}", label, s.amount, paid);
        if s.remainder > 0 {
            line.push_str(&format!(" (odd chips {})", s.remainder));
        }
        line
    } else {
        format!("{} {}: {}", label, s.amount, paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;

    #[test]
    fn formats_cards_and_board() {
        let cards = parse_cards("As Td").unwrap();
        assert_eq!(format_cards(&cards), "A♠ 10♦");
        assert_eq!(format_board(&cards), "[A♠ 10♦]");
        assert_eq!(format_cards(&[]), "-");
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn marks_all_in_calls_and_raises() {
        let rec = ActionRecord {
            seat: 2,
            street: Street::Turn,
            action: PlayerAction::RaiseTo(300),
            amount: 300,
            chips_after: 0,
        };
        assert_eq!(format_action(&rec), "[turn] p2 raises to 300 all-in (stack 0)");
        let check = ActionRecord {
            action: PlayerAction::Check,
            amount: 0,
            chips_after: 0,
            ..rec
        };
        assert_eq!(format_action(&check), "[turn] p2 checks (stack 0)");
    }

    #[test]
    fn formats_split_with_odd_chip() {
        let s = PotSettlement {
            pot: 1,
            amount: 61,
            winners: vec![3, 0],
            share: 30,
            remainder: 1,
            payouts: vec![(3, 31), (0, 30)],
        };
        assert_eq!(
            format_settlement(&s),
            "Side pot 1 61: split p3 31, p0 30 (odd chips 1)"
        );
        let single = PotSettlement {
            pot: 0,
            amount: 60,
            winners: vec![1],
            share: 60,
            remainder: 0,
            payouts: vec![(1, 60)],
        };
        assert_eq!(format_settlement(&single), "Main pot 60: p1 60");
    }
}
