// SPDX-License-Identifier: Apache-2.0

//! Ordered card sequences and the base-53 composite codec.
use serde::{Deserialize, Serialize};
use std::{fmt, str};

use crate::{Card, CodeError, Rank, Suit};

/// Composite code radix: digits 1 to 52 are cards, 0 is the reserved
/// absent card sentinel that terminates a code.
const RADIX: u64 = 53;

/// An ordered sequence of cards.
///
/// A sequence has two interchangeable encodings: the concatenation of
/// each card 2-character string, and a base-53 composite integer with
/// the first card in the most significant digit:
///
/// ```
/// # use showdown_cards::CardSeq;
/// let seq: CardSeq = "sAh7".parse().unwrap();
/// assert_eq!(seq.to_string(), "sAh7");
///
/// let code = seq.code().unwrap();
/// assert_eq!(code, 49 * 53 + 22);
/// assert_eq!(CardSeq::from_code(code).unwrap(), seq);
/// ```
///
/// Code 0 encodes the empty sequence, and a 0 digit inside a nonzero
/// code is rejected as [CodeError::OutOfRange] since the codec never
/// emits one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSeq(Vec<Card>);

impl CardSeq {
    /// Longest sequence whose composite code always fits a `u64`.
    pub const MAX_CODE_LEN: usize = 11;

    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a sequence from its base-53 composite code.
    pub fn from_code(code: u64) -> Result<Self, CodeError> {
        let mut cards = Vec::new();
        let mut rest = code;

        while rest > 0 {
            let digit = rest % RADIX;
            if digit == 0 {
                // The absent card sentinel never appears inside a code
                // produced by this codec.
                return Err(CodeError::OutOfRange(code));
            }
            cards.push(Card::from_code(digit)?);
            rest /= RADIX;
        }

        cards.reverse();
        Ok(Self(cards))
    }

    /// Encodes this sequence into its base-53 composite code.
    ///
    /// Fails with [CodeError::MalformedLength] for sequences longer
    /// than [CardSeq::MAX_CODE_LEN] whose code may not fit a `u64`.
    pub fn code(&self) -> Result<u64, CodeError> {
        if self.0.len() > Self::MAX_CODE_LEN {
            return Err(CodeError::MalformedLength(self.0.len()));
        }

        Ok(self
            .0
            .iter()
            .fold(0, |code, card| code * RADIX + card.code() as u64))
    }

    /// The cards in this sequence.
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// Appends a card to the sequence.
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    /// Iterates the cards in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.0.iter()
    }

    /// Number of cards in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Card>> for CardSeq {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl FromIterator<Card> for CardSeq {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CardSeq {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CardSeq {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl str::FromStr for CardSeq {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.chars().collect::<Vec<_>>();
        if chars.len() % 2 != 0 {
            return Err(CodeError::MalformedLength(chars.len()));
        }

        chars
            .chunks(2)
            .map(|pair| Ok(Card::new(Rank::try_from(pair[1])?, Suit::try_from(pair[0])?)))
            .collect()
    }
}

impl fmt::Display for CardSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.0 {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn single_card_codes() {
        assert_eq!("s2".parse::<CardSeq>().unwrap().code().unwrap(), 1);
        assert_eq!("cA".parse::<CardSeq>().unwrap().code().unwrap(), 52);
        assert_eq!("sA".parse::<CardSeq>().unwrap().code().unwrap(), 49);
    }

    #[test]
    fn empty_sequence() {
        let seq = CardSeq::new();
        assert!(seq.is_empty());
        assert_eq!(seq.code().unwrap(), 0);
        assert_eq!(seq.to_string(), "");
        assert_eq!(CardSeq::from_code(0).unwrap(), seq);
    }

    #[test]
    fn composite_codes() {
        // Most significant card first: "s2s2" is 1 * 53 + 1.
        let seq: CardSeq = "s2s2".parse().unwrap();
        assert_eq!(seq.code().unwrap(), 54);
        assert_eq!(CardSeq::from_code(54).unwrap().to_string(), "s2s2");

        let seq: CardSeq = "sAh7".parse().unwrap();
        assert_eq!(seq.code().unwrap(), 49 * 53 + 22);
    }

    #[test]
    fn string_roundtrip() {
        for s in ["sA", "sAsKsQsJsT", "h2d3c4", "sAc8s8sQsT"] {
            let seq: CardSeq = s.parse().unwrap();
            assert_eq!(seq.to_string(), s);

            let code = seq.code().unwrap();
            assert_eq!(CardSeq::from_code(code).unwrap(), seq);
        }
    }

    #[test]
    fn random_code_roundtrip() {
        let mut rng = rand::rng();

        for _ in 0..1000 {
            let len = rng.random_range(1..=7);
            let seq = (0..len)
                .map(|_| Card::from_code(rng.random_range(1..=52)).unwrap())
                .collect::<CardSeq>();

            let code = seq.code().unwrap();
            assert_eq!(CardSeq::from_code(code).unwrap(), seq);
            assert_eq!(seq.to_string().parse::<CardSeq>().unwrap(), seq);
        }
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "sAs".parse::<CardSeq>(),
            Err(CodeError::MalformedLength(3))
        );
        assert_eq!(
            "sAxK".parse::<CardSeq>(),
            Err(CodeError::InvalidSuit('x'))
        );
        assert_eq!(
            "sAsZ".parse::<CardSeq>(),
            Err(CodeError::InvalidRank('Z'))
        );
    }

    #[test]
    fn reserved_zero_digit() {
        // 53 = 1 * 53 + 0 has an embedded absent card digit.
        assert_eq!(CardSeq::from_code(53), Err(CodeError::OutOfRange(53)));
        assert_eq!(
            CardSeq::from_code(49 * 53 * 53),
            Err(CodeError::OutOfRange(49 * 53 * 53))
        );
    }

    #[test]
    fn code_overflow() {
        let seq = (0..12)
            .map(|_| Card::from_code(52).unwrap())
            .collect::<CardSeq>();
        assert_eq!(seq.code(), Err(CodeError::MalformedLength(12)));
    }
}
