// SPDX-License-Identifier: Apache-2.0

//! Five, six, and seven cards hand evaluation.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use showdown_cards::{Card, CardSeq, CodeError};

use crate::tables::{self, TABLES};

/// Hand evaluation errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// A hand must have five, six, or seven cards.
    #[error("invalid hand size {0}, expected 5, 6 or 7 cards")]
    InvalidHandSize(usize),
    /// The cards failed to decode.
    #[error(transparent)]
    Code(#[from] CodeError),
}

/// Hand category, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        write!(f, "{rank}")
    }
}

/// The strength of a poker hand.
///
/// Strengths are the canonical class numbers in `[1, 7462]` where 1 is
/// the ace high straight flush and 7462 the 7-5-4-3-2 high card, so a
/// smaller value is a stronger hand:
///
/// ```
/// # use showdown_eval::evaluate;
/// let royal = evaluate("sAsKsQsJsT").unwrap();
/// let pair = evaluate("sAc8s8sQsT").unwrap();
/// assert!(royal < pair);
/// assert_eq!(royal.strength(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandValue(u16);

impl HandValue {
    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// Six and seven cards hands are scored as the best five cards
    /// subset, dropping one or two cards in every way and keeping the
    /// minimum strength.
    pub fn eval(cards: &[Card]) -> Result<HandValue, EvalError> {
        match cards.len() {
            5 => Ok(Self::eval5(cards)),
            6 => {
                let mut best = u16::MAX;
                let mut five = [cards[0]; 5];
                for skip in 0..6 {
                    fill_omitting(cards, &mut five, skip, skip);
                    best = best.min(Self::eval5(&five).0);
                }
                Ok(HandValue(best))
            }
            7 => {
                let mut best = u16::MAX;
                let mut five = [cards[0]; 5];
                for skip1 in 0..7 {
                    for skip2 in skip1 + 1..7 {
                        fill_omitting(cards, &mut five, skip1, skip2);
                        best = best.min(Self::eval5(&five).0);
                    }
                }
                Ok(HandValue(best))
            }
            len => Err(EvalError::InvalidHandSize(len)),
        }
    }

    /// The canonical strength in `[1, 7462]`, lower is stronger.
    pub fn strength(&self) -> u16 {
        self.0
    }

    /// The hand category for this strength.
    pub fn rank(&self) -> HandRank {
        match self.0 {
            1..=10 => HandRank::StraightFlush,
            11..=166 => HandRank::FourOfAKind,
            167..=322 => HandRank::FullHouse,
            323..=1599 => HandRank::Flush,
            1600..=1609 => HandRank::Straight,
            1610..=2467 => HandRank::ThreeOfAKind,
            2468..=3325 => HandRank::TwoPair,
            3326..=6185 => HandRank::OnePair,
            _ => HandRank::HighCard,
        }
    }

    /// Scores exactly five cards through the lookup tables.
    fn eval5(cards: &[Card]) -> HandValue {
        let mask = cards
            .iter()
            .fold(0u16, |mask, card| mask | 1 << card.rank() as u16);

        let value = TABLES.unique(mask);
        if value != 0 {
            // Five distinct ranks, a suit check picks the flush band.
            let flush = cards[1..].iter().all(|card| card.suit() == cards[0].suit());
            let strength = match (flush, value < tables::THREE_OF_A_KIND) {
                (true, true) => value - tables::STRAIGHT_FLUSH_BIAS,
                (true, false) => value - tables::FLUSH_BIAS,
                (false, _) => value,
            };
            HandValue(strength)
        } else {
            let product = cards
                .iter()
                .map(|card| card.rank().prime())
                .product::<u32>();
            HandValue(TABLES.paired(product))
        }
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rank(), self.0)
    }
}

impl fmt::Debug for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandValue({})", self.0)
    }
}

/// Copies `cards` into `five` skipping the two given positions.
fn fill_omitting(cards: &[Card], five: &mut [Card; 5], skip1: usize, skip2: usize) {
    let mut n = 0;
    for (pos, &card) in cards.iter().enumerate() {
        if pos != skip1 && pos != skip2 {
            five[n] = card;
            n += 1;
        }
    }
}

/// Evaluates a hand given as a concatenated cards string.
///
/// Hole and community cards are scored as one sequence, concatenate
/// them before the call:
///
/// ```
/// # use showdown_eval::evaluate;
/// let value = evaluate("sAsKsQsJsTcAdA").unwrap();
/// assert_eq!(value.strength(), 1);
/// ```
pub fn evaluate(cards: &str) -> Result<HandValue, EvalError> {
    let seq: CardSeq = cards.parse()?;
    HandValue::eval(seq.cards())
}

/// Evaluates a hand given as a base-53 composite cards code.
pub fn evaluate_code(code: u64) -> Result<HandValue, EvalError> {
    let seq = CardSeq::from_code(code)?;
    HandValue::eval(seq.cards())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use showdown_cards::Deck;

    #[test]
    fn royal_flush() {
        let value = evaluate("sAsKsQsJsT").unwrap();
        assert_eq!(value.strength(), 1);
        assert_eq!(value.rank(), HandRank::StraightFlush);

        // The two extra aces do not help.
        let value = evaluate("sAsKsQsJsTcAdA").unwrap();
        assert_eq!(value.strength(), 1);
    }

    #[test]
    fn worst_high_card() {
        let value = evaluate("s7h5d4c3s2").unwrap();
        assert_eq!(value.strength(), 7462);
        assert_eq!(value.rank(), HandRank::HighCard);
    }

    #[test]
    fn one_pair_benchmark_hand() {
        // Pair of eights with A Q T kickers, a fixed reference value.
        let value = evaluate("sAc8s8sQsT").unwrap();
        assert_eq!(value.strength(), 4657);
        assert_eq!(value.rank(), HandRank::OnePair);
    }

    #[test]
    fn category_samples() {
        let hands = [
            ("s9s8s7s6s5", HandRank::StraightFlush),
            ("sAhAdAcAs2", HandRank::FourOfAKind),
            ("sKhKdKc2s2", HandRank::FullHouse),
            ("sAsKsQsJs9", HandRank::Flush),
            ("sAhKdQcJsT", HandRank::Straight),
            ("s5h5d5c2s3", HandRank::ThreeOfAKind),
            ("sJhJd4c4s9", HandRank::TwoPair),
            ("sThTd2c3s4", HandRank::OnePair),
            ("s2h4d6c8sJ", HandRank::HighCard),
        ];

        let mut last = 0;
        for (cards, rank) in hands {
            let value = evaluate(cards).unwrap();
            assert_eq!(value.rank(), rank, "{cards}");
            assert!(value.strength() > last, "{cards}");
            last = value.strength();
        }
    }

    #[test]
    fn wheel_straights() {
        let wheel = evaluate("sAh2d3c4s5").unwrap();
        assert_eq!(wheel.strength(), 1609);
        assert_eq!(wheel.rank(), HandRank::Straight);

        let wheel_flush = evaluate("sAs2s3s4s5").unwrap();
        assert_eq!(wheel_flush.strength(), 10);
        assert_eq!(wheel_flush.rank(), HandRank::StraightFlush);
    }

    #[test]
    fn evaluate_by_code() {
        let seq: CardSeq = "sAsKsQsJsT".parse().unwrap();
        let value = evaluate_code(seq.code().unwrap()).unwrap();
        assert_eq!(value.strength(), 1);

        assert_eq!(
            evaluate_code(49 * 53 * 53),
            Err(EvalError::Code(showdown_cards::CodeError::OutOfRange(
                49 * 53 * 53
            )))
        );
    }

    #[test]
    fn invalid_hand_sizes() {
        assert_eq!(evaluate(""), Err(EvalError::InvalidHandSize(0)));
        assert_eq!(evaluate("sAsKsQsJ"), Err(EvalError::InvalidHandSize(4)));
        assert_eq!(
            evaluate("sAsKsQsJsTh2h3h4"),
            Err(EvalError::InvalidHandSize(8))
        );
    }

    #[test]
    fn six_and_seven_cards_best_subset() {
        let mut rng = rand::rng();

        for _ in 0..200 {
            for len in [6, 7] {
                let hand = random_hand(&mut rng, len);
                let value = HandValue::eval(&hand).unwrap();

                // Brute force minimum over every five cards subset.
                let mut best = u16::MAX;
                for skip1 in 0..len {
                    for skip2 in skip1..len {
                        if len == 7 && skip2 == skip1 {
                            continue;
                        }
                        let five = hand
                            .iter()
                            .enumerate()
                            .filter(|&(pos, _)| pos != skip1 && pos != skip2)
                            .map(|(_, &card)| card)
                            .collect::<Vec<_>>();
                        if five.len() == 5 {
                            best = best.min(HandValue::eval(&five).unwrap().strength());
                        }
                    }
                }

                assert_eq!(value.strength(), best);
            }
        }
    }

    #[test]
    fn exhaustive_five_cards_total_order() {
        // The table driven scorer must induce the same total order as
        // an independent rank counting classifier over all 2,598,960
        // hands, and hit every one of the 7462 classes.
        let mut keys = vec![None; tables::CLASSES as usize + 1];
        let mut counts = [0usize; 9];

        Deck::default().for_each(5, |hand| {
            let value = HandValue::eval(hand).unwrap();
            let strength = value.strength() as usize;
            assert!((1..=tables::CLASSES as usize).contains(&strength));
            counts[value.rank() as usize] += 1;

            let key = brute_key(hand);
            match keys[strength] {
                None => keys[strength] = Some(key),
                Some(k) => assert_eq!(k, key, "class {strength} split"),
            }
        });

        // Stronger class, larger brute force key.
        for (pos, pair) in keys[1..].windows(2).enumerate() {
            let stronger = pair[0].expect("missing class");
            let weaker = pair[1].expect("missing class");
            assert!(stronger > weaker, "classes {} and {}", pos + 1, pos + 2);
        }

        assert_eq!(counts[HandRank::HighCard as usize], 1_302_540);
        assert_eq!(counts[HandRank::OnePair as usize], 1_098_240);
        assert_eq!(counts[HandRank::TwoPair as usize], 123_552);
        assert_eq!(counts[HandRank::ThreeOfAKind as usize], 54_912);
        assert_eq!(counts[HandRank::Straight as usize], 10_200);
        assert_eq!(counts[HandRank::Flush as usize], 5_108);
        assert_eq!(counts[HandRank::FullHouse as usize], 3_744);
        assert_eq!(counts[HandRank::FourOfAKind as usize], 624);
        assert_eq!(counts[HandRank::StraightFlush as usize], 40);
    }

    fn random_hand<R: Rng>(rng: &mut R, len: usize) -> Vec<Card> {
        let mut codes = Vec::with_capacity(len);
        while codes.len() < len {
            let code = rng.random_range(1..=52u64);
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
            .into_iter()
            .map(|code| Card::from_code(code).unwrap())
            .collect()
    }

    /// Independent classifier: category and tiebreak ranks packed so
    /// that a larger key is a stronger hand.
    fn brute_key(cards: &[Card]) -> u32 {
        let mut counts = [0u8; 13];
        for card in cards {
            counts[card.rank() as usize] += 1;
        }

        let flush = cards[1..].iter().all(|card| card.suit() == cards[0].suit());
        let straight = straight_high(&counts);

        // Ranks ordered by count then rank, high first.
        let mut order = counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(rank, &count)| (count, rank))
            .collect::<Vec<_>>();
        order.sort_unstable_by(|a, b| b.cmp(a));

        let shape = order.iter().map(|&(count, _)| count).collect::<Vec<_>>();
        let category: u32 = match (flush, straight, shape.as_slice()) {
            (true, Some(_), _) => 8,
            (_, _, [4, 1]) => 7,
            (_, _, [3, 2]) => 6,
            (true, None, _) => 5,
            (false, Some(_), _) => 4,
            (_, _, [3, 1, 1]) => 3,
            (_, _, [2, 2, 1]) => 2,
            (_, _, [2, 1, 1, 1]) => 1,
            _ => 0,
        };

        let key = category << 20;
        if let (4 | 8, Some(high)) = (category, straight) {
            // Only the straight high card breaks ties.
            return key | high as u32;
        }

        order
            .iter()
            .enumerate()
            .fold(key, |key, (pos, &(_, rank))| {
                key | (rank as u32) << (16 - 4 * pos as u32)
            })
    }

    /// The straight high rank for five distinct consecutive ranks, the
    /// wheel counts as five high.
    fn straight_high(counts: &[u8; 13]) -> Option<u8> {
        if counts.iter().any(|&count| count > 1) {
            return None;
        }

        let ranks = (0..13).filter(|&r| counts[r] > 0).collect::<Vec<_>>();
        if ranks == [0, 1, 2, 3, 12] {
            return Some(3);
        }
        if ranks.windows(2).all(|w| w[1] == w[0] + 1) {
            return Some(ranks[4] as u8);
        }
        None
    }
}
