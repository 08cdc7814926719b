//! Looking up and choosing book moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::{debug, warn};
use rand::Rng;
use super::{decode, BookPosition, CandidateMove, PolyglotKey, RecordStore};

/// Strength values must be below this
pub const MAX_STRENGTH: f64 = 4.0;

/// Returns every move the book has for `pos`, in the order the book lists them.
///
/// The result is empty if the position is not in the book.
pub fn plies<P: BookPosition + ?Sized>(store: &RecordStore, pos: &P) -> Vec<CandidateMove> {
    let key = PolyglotKey::from_position(pos);
    let moves: Vec<_> = store.find_run(key).map(|rec| decode(pos, &rec)).collect();
    debug!("book lookup {}: {} moves", key, moves.len());
    moves
}

/// Picks one of the book's moves for `pos` at random, using the thread's random number generator.
///
/// See [`choose_with`](fn.choose_with.html).
pub fn choose<P: BookPosition + ?Sized>(store: &RecordStore, pos: &P, strength: f64)
    -> Option<CandidateMove>
{
    choose_with(store, pos, strength, &mut rand::thread_rng())
}

/// Picks one of the book's moves for `pos` at random.
///
/// Each move's chance of being picked is proportional to its weight raised to the power of
/// `strength`. A `strength` of 1 uses the book's weights as they are, 0 treats every move the same,
/// and anything above 1 favors the moves the book already prefers.
///
/// Returns `None` if the book has no moves for the position, or if all of its moves have a weight
/// of zero.
///
/// # Panics
/// Panics unless `0 <= strength < 4`.
pub fn choose_with<P, R>(store: &RecordStore, pos: &P, strength: f64, rng: &mut R)
    -> Option<CandidateMove>
    where P: BookPosition + ?Sized, R: Rng + ?Sized
{
    assert!(strength >= 0.0 && strength < MAX_STRENGTH,
            "strength must be in [0, {}), got {}", MAX_STRENGTH, strength);

    let moves = plies(store, pos);
    if moves.is_empty() {
        return None;
    }

    let weights: Vec<u128> = moves.iter()
        .map(|mv| effective_weight(mv.weight(), strength))
        .collect();
    let total: u128 = weights.iter().sum();
    if total == 0 {
        warn!("all {} book moves for {} have zero weight", moves.len(),
              PolyglotKey::from_position(pos));
        return None;
    }

    let r = rng.gen_range(0, total);
    let mut running = 0;
    for (mv, w) in moves.iter().zip(&weights) {
        running += w;
        if running > r {
            return Some(*mv);
        }
    }

    unreachable!("random draw {} exceeded total weight {}", r, total)
}

/// Returns `weight` raised to `strength`, rounded to the nearest integer.
fn effective_weight(weight: u16, strength: f64) -> u128 {
    f64::from(weight).powf(strength).round() as u128
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::book::{PackedMove, RECORD_SIZE};
    use crate::chess::{Position, Square};

    fn book(pos: &Position, moves: &[(Square, Square, u16)]) -> RecordStore {
        let key = u64::from(PolyglotKey::from_position(pos));
        let mut bytes = Vec::new();
        for (orig, dest, weight) in moves {
            bytes.extend_from_slice(&key.to_be_bytes());
            bytes.extend_from_slice(&u16::from(PackedMove::new(*orig, *dest, None)).to_be_bytes());
            bytes.extend_from_slice(&weight.to_be_bytes());
            bytes.extend_from_slice(&[0; 4]);
        }
        assert_eq!(bytes.len(), moves.len() * RECORD_SIZE);
        RecordStore::from_bytes(bytes).unwrap()
    }

    fn opening(weights: [u16; 3]) -> (Position, RecordStore) {
        let pos = Position::new();
        let store = book(&pos, &[
            (Square::E2, Square::E4, weights[0]),
            (Square::D2, Square::D4, weights[1]),
            (Square::G1, Square::F3, weights[2]),
        ]);
        (pos, store)
    }

    fn frequencies(strength: f64, weights: [u16; 3], trials: usize) -> [f64; 3] {
        let (pos, store) = opening(weights);
        let moves = plies(&store, &pos);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            let mv = choose_with(&store, &pos, strength, &mut rng).unwrap();
            let i = moves.iter().position(|m| *m == mv).unwrap();
            counts[i] += 1;
        }
        let mut freq = [0.0; 3];
        for i in 0..3 {
            freq[i] = counts[i] as f64 / trials as f64;
        }
        freq
    }

    #[test]
    fn plies_keeps_book_order() {
        let (pos, store) = opening([10, 20, 70]);
        let moves: Vec<_> = plies(&store, &pos).iter()
            .map(|m| (m.to_string(), m.weight()))
            .collect();
        assert_eq!(moves, vec![
            ("e2e4".to_string(), 10),
            ("d2d4".to_string(), 20),
            ("g1f3".to_string(), 70),
        ]);
    }

    #[test]
    fn strength_one_follows_book_weights() {
        let freq = frequencies(1.0, [10, 20, 70], 20_000);
        for (f, expected) in freq.iter().zip(&[0.1, 0.2, 0.7]) {
            assert!((f - expected).abs() < 0.02, "{:?}", freq);
        }
    }

    #[test]
    fn strength_zero_is_uniform() {
        let freq = frequencies(0.0, [10, 20, 70], 30_000);
        for f in &freq {
            assert!((f - 1.0 / 3.0).abs() < 0.02, "{:?}", freq);
        }
    }

    #[test]
    fn high_strength_favors_popular_moves() {
        let freq = frequencies(2.0, [10, 20, 70], 20_000);
        // 100 : 400 : 4900
        assert!(freq[2] > 0.85, "{:?}", freq);
    }

    #[test]
    fn effective_weights_round() {
        assert_eq!(effective_weight(70, 1.0), 70);
        assert_eq!(effective_weight(70, 0.0), 1);
        assert_eq!(effective_weight(0, 0.0), 1);
        assert_eq!(effective_weight(0, 1.0), 0);
        assert_eq!(effective_weight(10, 0.5), 3);
        assert!(effective_weight(u16::max_value(), 3.99) > u128::from(u64::max_value() / 2));
    }

    #[test]
    fn seeded_choices_repeat() {
        let (pos, store) = opening([10, 20, 70]);
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| choose_with(&store, &pos, 1.0, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }

    #[test]
    fn zero_weight_moves_are_never_picked() {
        let (pos, store) = opening([0, 5, 0]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(choose_with(&store, &pos, 1.0, &mut rng).unwrap().to_string(), "d2d4");
        }
    }

    #[test]
    fn all_zero_weights_choose_nothing() {
        let (pos, store) = opening([0, 0, 0]);
        assert_eq!(plies(&store, &pos).len(), 3);
        assert_eq!(choose(&store, &pos, 1.0), None);
        // every weight becomes 1 at strength 0
        assert!(choose(&store, &pos, 0.0).is_some());
    }

    #[test]
    fn unknown_position_chooses_nothing() {
        let (_, store) = opening([10, 20, 70]);
        let other: Position = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(plies(&store, &other).is_empty());
        assert_eq!(choose(&store, &other, 1.0), None);

        let empty = RecordStore::from_bytes(Vec::new()).unwrap();
        assert_eq!(choose(&empty, &Position::new(), 1.0), None);
    }

    #[test]
    #[should_panic(expected = "strength")]
    fn strength_of_four_panics() {
        let (pos, store) = opening([10, 20, 70]);
        choose(&store, &pos, 4.0);
    }

    #[test]
    #[should_panic(expected = "strength")]
    fn negative_strength_panics() {
        let (pos, store) = opening([10, 20, 70]);
        choose(&store, &pos, -0.5);
    }
}
