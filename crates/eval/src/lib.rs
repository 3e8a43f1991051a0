// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands following the
//! [Cactus Kev's][kevlink] perfect-hash design: every five cards hand
//! maps to one of 7462 strength classes where 1 is the ace high
//! straight flush and 7462 the worst high card, six and seven cards
//! hands score as their best five cards subset.
//!
//! Hands come in as typed cards, as a concatenated cards string, or as
//! a base-53 composite code:
//!
//! ```
//! # use showdown_eval::*;
//! let royal = evaluate("sAsKsQsJsT").unwrap();
//! assert_eq!(royal.strength(), 1);
//! assert_eq!(royal.rank(), HandRank::StraightFlush);
//!
//! let pair = evaluate("sAc8s8sQsT").unwrap();
//! assert!(royal < pair);
//! ```
//!
//! The lookup tables are built once on first use by combinatorial
//! enumeration, see the `tables` module.
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod eval;
mod tables;

pub use eval::{EvalError, HandRank, HandValue, evaluate, evaluate_code};
pub use tables::CLASSES;

// Reexport cards types.
pub use showdown_cards::{Card, CardSeq, CodeError, Deck, Rank, Suit};
