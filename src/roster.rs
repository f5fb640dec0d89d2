//! Name rotation — picks which group members answer the next round of
//! follow-up questions.
//!
//! The pool is the comma-separated `names` field from the input form. Names
//! already assigned a question accumulate in a used set; once fewer than two
//! unused names remain the set is cleared and rotation starts over.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::RosterError;

/// Parse a free-text comma-separated name list: split, trim, drop empties,
/// dedup preserving first occurrence.
pub fn parse_names(field: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for raw in field.split(',') {
        let name = raw.trim();
        if name.is_empty() {
            continue;
        }
        if names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

/// Pick two distinct names for the next follow-up round.
///
/// Explicit two-step rotation: check how many names are still unused, clear
/// the used set if fewer than two remain, then sample uniformly without
/// replacement from the unused subset. Both picks are recorded in `used`.
/// A name may repeat on back-to-back rounds across a reset boundary.
pub fn pick_pair<R: Rng + ?Sized>(
    names_field: &str,
    used: &mut HashSet<String>,
    rng: &mut R,
) -> Result<(String, String), RosterError> {
    let names = parse_names(names_field);
    if names.len() < 2 {
        return Err(RosterError::NotEnoughParticipants { found: names.len() });
    }

    let mut unused: Vec<&String> = names.iter().filter(|n| !used.contains(*n)).collect();
    if unused.len() < 2 {
        tracing::debug!(pool = names.len(), "Name pool exhausted, resetting rotation");
        used.clear();
        unused = names.iter().collect();
    }

    let picked: Vec<&String> = unused.choose_multiple(rng, 2).cloned().collect();
    let (first, second) = (picked[0].clone(), picked[1].clone());
    used.insert(first.clone());
    used.insert(second.clone());
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn parse_trims_and_drops_empties() {
        let names = parse_names(" Alex , Bea ,, Cam ,");
        assert_eq!(names, vec!["Alex", "Bea", "Cam"]);
    }

    #[test]
    fn parse_dedups_preserving_order() {
        let names = parse_names("Alex, Bea, Alex, Bea");
        assert_eq!(names, vec!["Alex", "Bea"]);
    }

    #[test]
    fn pool_of_two_returns_both() {
        let mut used = HashSet::new();
        let (a, b) = pick_pair("Alex, Bea", &mut used, &mut rng()).unwrap();
        assert_ne!(a, b);
        let mut picked = vec![a, b];
        picked.sort();
        assert_eq!(picked, vec!["Alex", "Bea"]);
    }

    #[test]
    fn fewer_than_two_names_errors() {
        let mut used = HashSet::new();
        let err = pick_pair("Alex", &mut used, &mut rng()).unwrap_err();
        assert!(matches!(err, RosterError::NotEnoughParticipants { found: 1 }));
        assert!(used.is_empty());
    }

    #[test]
    fn duplicates_do_not_count_as_distinct() {
        let mut used = HashSet::new();
        let err = pick_pair("Alex, Alex, Alex", &mut used, &mut rng()).unwrap_err();
        assert!(matches!(err, RosterError::NotEnoughParticipants { found: 1 }));
    }

    #[test]
    fn never_picks_same_name_twice_in_one_call() {
        let mut rng = rng();
        for _ in 0..50 {
            let mut used = HashSet::new();
            let (a, b) = pick_pair("Alex, Bea, Cam, Dee", &mut used, &mut rng).unwrap();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn picks_are_recorded_as_used() {
        let mut used = HashSet::new();
        let (a, b) = pick_pair("Alex, Bea, Cam", &mut used, &mut rng()).unwrap();
        assert!(used.contains(&a));
        assert!(used.contains(&b));
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn avoids_used_names_until_exhausted() {
        let mut rng = rng();
        let mut used = HashSet::new();
        let (a, b) = pick_pair("Alex, Bea, Cam, Dee", &mut used, &mut rng).unwrap();
        let (c, d) = pick_pair("Alex, Bea, Cam, Dee", &mut used, &mut rng).unwrap();
        // Second round must draw from the two names the first round skipped.
        let first: HashSet<_> = [a, b].into();
        assert!(!first.contains(&c));
        assert!(!first.contains(&d));
        assert_eq!(used.len(), 4);
    }

    #[test]
    fn exhausted_pool_resets_and_picks_again() {
        let mut rng = rng();
        let mut used = HashSet::new();
        pick_pair("Alex, Bea", &mut used, &mut rng).unwrap();
        assert_eq!(used.len(), 2);

        // Pool fully used; next call resets and selects from the whole pool.
        let (a, b) = pick_pair("Alex, Bea", &mut used, &mut rng).unwrap();
        assert_ne!(a, b);
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn odd_pool_resets_when_one_name_remains() {
        let mut rng = rng();
        let mut used = HashSet::new();
        pick_pair("Alex, Bea, Cam", &mut used, &mut rng).unwrap();
        assert_eq!(used.len(), 2);

        // One unused name left — not enough for a pair, so the set resets
        // and exactly two of the three are marked used afterwards.
        let (a, b) = pick_pair("Alex, Bea, Cam", &mut used, &mut rng).unwrap();
        assert_ne!(a, b);
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn used_names_stay_subset_of_pool() {
        let mut rng = rng();
        let mut used = HashSet::new();
        let pool = "Alex, Bea, Cam";
        let names = parse_names(pool);
        for _ in 0..10 {
            pick_pair(pool, &mut used, &mut rng).unwrap();
            assert!(used.iter().all(|n| names.contains(n)));
        }
    }
}
