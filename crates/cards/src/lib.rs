// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types and codec.
//!
//! This crate defines the card types and the two interchangeable card
//! encodings used across the workspace, a 2-character string and an
//! integer code:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit};
//! let card: Card = "sA".parse().unwrap();
//! assert_eq!(card, Card::new(Rank::Ace, Suit::Spades));
//! assert_eq!(card.code(), 49);
//! ```
//!
//! and an ordered [CardSeq] sequence with a compact base-53 composite
//! form used to pass whole hands around as a single integer:
//!
//! ```
//! # use showdown_cards::CardSeq;
//! let seq: CardSeq = "sAsKsQsJsT".parse().unwrap();
//! let code = seq.code().unwrap();
//! assert_eq!(CardSeq::from_code(code).unwrap(), seq);
//! ```
//!
//! The [Deck] type enumerates k-cards hands out of the full deck, for
//! example to iterate through all five cards hands:
//!
//! ```no_run
//! # use showdown_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod card;
mod deck;
mod seq;

pub use card::{Card, CodeError, Rank, Suit};
pub use deck::Deck;
pub use seq::CardSeq;
