// SPDX-License-Identifier: Apache-2.0

//! Poker card definitions and the single card codec.
use serde::{Deserialize, Serialize};
use std::{fmt, str};
use thiserror::Error;

/// Primes used to encode a card rank.
const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Errors raised by the cards codec.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeError {
    /// The suit character is not one of `s`, `h`, `d`, `c`.
    #[error("invalid suit character {0:?}")]
    InvalidSuit(char),
    /// The rank character is not one of `2`-`9`, `T`, `J`, `Q`, `K`, `A`.
    #[error("invalid rank character {0:?}")]
    InvalidRank(char),
    /// A cards string must be a sequence of 2-character cards.
    #[error("malformed cards string of length {0}")]
    MalformedLength(usize),
    /// A card or sequence code outside its valid range.
    #[error("cards code {0} out of range")]
    OutOfRange(u64),
}

/// A Poker card.
///
/// A card is stored as its integer code in `[1, 52]`:
///
/// ```text
///   code = suit + 4 * rank + 1
/// ```
///
/// with suits numbered `spades=0, hearts=1, diamonds=2, clubs=3` and
/// ranks `deuce=0, trey=1, ..., ace=12`. The mapping is a bijection,
/// every code in `[1, 52]` is exactly one card.
///
/// The string form is the suit character followed by the rank
/// character, so the ace of spades is `"sA"` with code 49:
///
/// ```
/// # use showdown_cards::{Card, Rank, Suit};
/// let card: Card = "sA".parse().unwrap();
/// assert_eq!(card, Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(card.code(), 49);
/// assert_eq!(card.to_string(), "sA");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    /// Creates a card given a rank and a suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card(suit as u8 + 4 * rank as u8 + 1)
    }

    /// Decodes a card from its integer code in `[1, 52]`.
    pub fn from_code(code: u64) -> Result<Card, CodeError> {
        if (1..=52).contains(&code) {
            Ok(Card(code as u8))
        } else {
            Err(CodeError::OutOfRange(code))
        }
    }

    /// This card integer code in `[1, 52]`.
    pub const fn code(&self) -> u8 {
        self.0
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::from_index((self.0 - 1) / 4)
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        Suit::from_index((self.0 - 1) % 4)
    }
}

impl str::FromStr for Card {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(suit), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CodeError::MalformedLength(s.chars().count()));
        };
        Ok(Card::new(Rank::try_from(rank)?, Suit::try_from(suit)?))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit(), self.rank())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.suit(), self.rank())
    }
}

/// Card rank, deuce first so that rank indices sort numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The distinct small prime for this rank, used for multiplicative
    /// hashing of rank multisets.
    pub const fn prime(self) -> u32 {
        PRIMES[self as usize]
    }

    fn from_index(index: u8) -> Rank {
        match index {
            0 => Rank::Deuce,
            1 => Rank::Trey,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            12 => Rank::Ace,
            _ => panic!("invalid rank index {index}"),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = CodeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let rank = match c {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(CodeError::InvalidRank(c)),
        };
        Ok(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit.
    Spades = 0,
    /// Hearts suit.
    Hearts = 1,
    /// Diamonds suit.
    Diamonds = 2,
    /// Clubs suit.
    Clubs = 3,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs].into_iter()
    }

    fn from_index(index: u8) -> Suit {
        match index {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            3 => Suit::Clubs,
            _ => panic!("invalid suit index {index}"),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = CodeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let suit = match c {
            's' => Suit::Spades,
            'h' => Suit::Hearts,
            'd' => Suit::Diamonds,
            'c' => Suit::Clubs,
            _ => return Err(CodeError::InvalidSuit(c)),
        };
        Ok(suit)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        };

        write!(f, "{suit}")
    }
}
