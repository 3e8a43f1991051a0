// SPDX-License-Identifier: Apache-2.0

//! Perfect-hash lookup tables for five cards scoring.
//!
//! The tables encode the complete classification of the 2,598,960 five
//! cards hands into the canonical 7462 strength classes and are built
//! once, on first use, by pure combinatorial enumeration:
//!
//! - The `unique` table covers the 1287 hands with five distinct
//!   ranks, keyed by the 13-bit rank presence mask. The stored value
//!   carries the non-flush strength; a flush rebases it into the
//!   straight flush or flush band with a fixed offset, so a single
//!   table serves both cases and only a suit check tells them apart.
//! - The pair hash covers the repeated rank hands, keyed by the
//!   product of the five rank primes through a two-stage displacement
//!   hash. A single multiplicative fold over all rank multiset
//!   products is not collision free within a small table, the second
//!   stage displaces each bucket onto unused slots to make it so.
use ahash::HashSet;
use std::sync::LazyLock;
use std::time::Instant;

use showdown_cards::Rank;

/// Number of distinct five cards hand classes.
pub const CLASSES: u16 = 7462;

/// First strength of each canonical band, strongest class is 1.
pub(crate) const FOUR_OF_A_KIND: u16 = 11;
pub(crate) const FULL_HOUSE: u16 = 167;
pub(crate) const FLUSH: u16 = 323;
pub(crate) const STRAIGHT: u16 = 1600;
pub(crate) const THREE_OF_A_KIND: u16 = 1610;
pub(crate) const TWO_PAIR: u16 = 2468;
pub(crate) const ONE_PAIR: u16 = 3326;
pub(crate) const HIGH_CARD: u16 = 6186;

/// Rebase offset from a straight value to its straight flush value.
pub(crate) const STRAIGHT_FLUSH_BIAS: u16 = STRAIGHT - 1;

/// Rebase offset from a high card value to its flush value, common to
/// all flushes sharing the same rank pattern.
pub(crate) const FLUSH_BIAS: u16 = HIGH_CARD - FLUSH;

/// Rank masks for the ten straights, broadway first, wheel last.
const STRAIGHTS: [u16; 10] = [
    0x1F00, // T J Q K A
    0x0F80, // 9 T J Q K
    0x07C0, // 8 9 T J Q
    0x03E0, // 7 8 9 T J
    0x01F0, // 6 7 8 9 T
    0x00F8, // 5 6 7 8 9
    0x007C, // 4 5 6 7 8
    0x003E, // 3 4 5 6 7
    0x001F, // 2 3 4 5 6
    0x100F, // A 2 3 4 5
];

/// Number of repeated rank hand classes.
const PAIRED_CLASSES: usize = 4888;

/// Slots in the pair hash values table.
const PAIR_SLOTS: usize = 1 << 14;

/// Buckets in the pair hash displacement table.
const PAIR_BUCKETS: usize = 1 << 11;

/// First multiplier tried by the pair hash build.
const FIRST_SEED: u32 = 0xe91a_aa35;

/// Multipliers tried before declaring the build broken.
const MAX_SEEDS: u32 = 1024;

/// The evaluator lookup tables, built on first use and read-only for
/// the process lifetime.
pub(crate) static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

/// The three evaluator lookup tables.
pub(crate) struct Tables {
    unique: Box<[u16; 1 << 13]>,
    pair_adjust: Box<[u16]>,
    pair_values: Box<[u16]>,
    seed: u32,
}

impl Tables {
    fn build() -> Self {
        let start = Instant::now();

        let unique = build_unique();
        let entries = pair_entries();
        let (seed, pair_adjust, pair_values) = build_pair_hash(&entries);

        log::debug!(
            "evaluator tables built in {:?}, pair hash seed {seed:#010x}",
            start.elapsed()
        );

        Self {
            unique,
            pair_adjust,
            pair_values,
            seed,
        }
    }

    /// Non-flush strength for a rank presence mask, 0 when the mask
    /// does not have five distinct ranks.
    pub(crate) fn unique(&self, mask: u16) -> u16 {
        self.unique[mask as usize]
    }

    /// Strength for a repeated rank hand keyed by its rank prime
    /// product.
    pub(crate) fn paired(&self, product: u32) -> u16 {
        let (slot, bucket) = fold(self.seed, product);
        self.pair_values[slot ^ self.pair_adjust[bucket] as usize]
    }
}

/// Folds the 32-bit prime product into a slot index and a bucket index
/// for the two-stage hash.
fn fold(seed: u32, product: u32) -> (usize, usize) {
    let mut u = product.wrapping_mul(seed);
    u ^= u >> 16;
    u = u.wrapping_add(u << 8);
    u ^= u >> 4;

    let slot = (u >> 18) as usize & (PAIR_SLOTS - 1);
    let bucket = (u >> 7) as usize & (PAIR_BUCKETS - 1);
    (slot, bucket)
}

/// Builds the distinct ranks table: straights in 1600..=1609 and the
/// remaining patterns in the high card band 6186..=7462.
fn build_unique() -> Box<[u16; 1 << 13]> {
    let mut table = Box::new([0u16; 1 << 13]);

    for (pos, mask) in STRAIGHTS.iter().enumerate() {
        table[*mask as usize] = STRAIGHT + pos as u16;
    }

    let mut strength = HIGH_CARD;
    for_each_distinct(|mask| {
        if !STRAIGHTS.contains(&mask) {
            table[mask as usize] = strength;
            strength += 1;
        }
    });
    debug_assert_eq!(strength, CLASSES + 1);

    table
}

/// Visits the 1287 five distinct ranks masks in descending order of
/// hand strength.
fn for_each_distinct<F: FnMut(u16)>(mut f: F) {
    for a in (4..13).rev() {
        for b in (3..a).rev() {
            for c in (2..b).rev() {
                for d in (1..c).rev() {
                    for e in (0..d).rev() {
                        f(1 << a | 1 << b | 1 << c | 1 << d | 1 << e);
                    }
                }
            }
        }
    }
}

/// Prime product and strength for each repeated rank hand class,
/// enumerated band by band in canonical order, primary rank first and
/// kickers in descending lexicographic order.
fn pair_entries() -> Vec<(u32, u16)> {
    let primes = Rank::ranks().map(Rank::prime).collect::<Vec<_>>();
    let mut entries = Vec::with_capacity(PAIRED_CLASSES);
    let mut strength = FOUR_OF_A_KIND;

    // Four of a kind with one kicker.
    for q in (0..13).rev() {
        for k in (0..13).rev().filter(|&k| k != q) {
            entries.push((primes[q].pow(4) * primes[k], strength));
            strength += 1;
        }
    }
    debug_assert_eq!(strength, FULL_HOUSE);

    // Full house, trips rank then pair rank.
    for t in (0..13).rev() {
        for p in (0..13).rev().filter(|&p| p != t) {
            entries.push((primes[t].pow(3) * primes[p].pow(2), strength));
            strength += 1;
        }
    }
    debug_assert_eq!(strength, FLUSH);

    // Three of a kind with two kickers.
    strength = THREE_OF_A_KIND;
    for t in (0..13).rev() {
        for k1 in (0..13).rev().filter(|&k| k != t) {
            for k2 in (0..k1).rev().filter(|&k| k != t) {
                entries.push((primes[t].pow(3) * primes[k1] * primes[k2], strength));
                strength += 1;
            }
        }
    }
    debug_assert_eq!(strength, TWO_PAIR);

    // Two pair with one kicker.
    for p1 in (0..13).rev() {
        for p2 in (0..p1).rev() {
            for k in (0..13).rev().filter(|&k| k != p1 && k != p2) {
                entries.push((primes[p1].pow(2) * primes[p2].pow(2) * primes[k], strength));
                strength += 1;
            }
        }
    }
    debug_assert_eq!(strength, ONE_PAIR);

    // One pair with three kickers.
    for p in (0..13).rev() {
        for k1 in (0..13).rev().filter(|&k| k != p) {
            for k2 in (0..k1).rev().filter(|&k| k != p) {
                for k3 in (0..k2).rev().filter(|&k| k != p) {
                    entries.push((
                        primes[p].pow(2) * primes[k1] * primes[k2] * primes[k3],
                        strength,
                    ));
                    strength += 1;
                }
            }
        }
    }
    debug_assert_eq!(strength, HIGH_CARD);
    debug_assert_eq!(entries.len(), PAIRED_CLASSES);

    entries
}

/// Builds the two-stage displacement hash over the pair entries.
///
/// Buckets every product by its fold index, then assigns each bucket a
/// displacement that sends all its slots onto unused cells of the
/// values table, largest buckets first. A multiplier whose buckets
/// cannot all be placed is discarded and the build retries with the
/// next one; running out of multipliers is a construction invariant
/// violation and aborts.
fn build_pair_hash(entries: &[(u32, u16)]) -> (u32, Box<[u16]>, Box<[u16]>) {
    let products = entries.iter().map(|&(p, _)| p).collect::<HashSet<_>>();
    assert_eq!(products.len(), entries.len(), "duplicate prime product");

    let mut seed = FIRST_SEED | 1;
    for _ in 0..MAX_SEEDS {
        if let Some((adjust, values)) = try_seed(seed, entries) {
            return (seed, adjust, values);
        }
        seed = seed.wrapping_add(2);
    }

    panic!("no collision-free pair hash after {MAX_SEEDS} multipliers");
}

fn try_seed(seed: u32, entries: &[(u32, u16)]) -> Option<(Box<[u16]>, Box<[u16]>)> {
    let mut buckets: Vec<Vec<(usize, u16)>> = vec![Vec::new(); PAIR_BUCKETS];
    for &(product, strength) in entries {
        let (slot, bucket) = fold(seed, product);

        // Two products folding to the same slot and bucket can never
        // be separated by a displacement.
        if buckets[bucket].iter().any(|&(s, _)| s == slot) {
            return None;
        }
        buckets[bucket].push((slot, strength));
    }

    let mut order = (0..PAIR_BUCKETS).collect::<Vec<_>>();
    order.sort_by_key(|&b| std::cmp::Reverse(buckets[b].len()));

    let mut adjust = vec![0u16; PAIR_BUCKETS].into_boxed_slice();
    let mut values = vec![0u16; PAIR_SLOTS].into_boxed_slice();
    let mut used = vec![false; PAIR_SLOTS];

    for &b in &order {
        let bucket = &buckets[b];
        if bucket.is_empty() {
            continue;
        }

        let disp = (0..PAIR_SLOTS).find(|&d| bucket.iter().all(|&(s, _)| !used[s ^ d]))?;
        adjust[b] = disp as u16;
        for &(slot, strength) in bucket {
            used[slot ^ disp] = true;
            values[slot ^ disp] = strength;
        }
    }

    Some((adjust, values))
}
