// src/spawner/select.rs
//! Weighted rule selection.

use rand::Rng;

use crate::spawner::core::SpawnRule;

/// Pick one rule, weighted by `weight` (negatives count as zero).
///
/// When every weight is zero or below, falls back to a uniform pick so a
/// misconfigured manifest still spawns something. `None` only for an empty
/// list. O(n); fine at the handful-of-rules scale this runs at.
pub fn pick_rule<'a>(rules: &'a [SpawnRule], rng: &mut impl Rng) -> Option<&'a SpawnRule> {
    if rules.is_empty() {
        return None;
    }

    let total: f32 = rules.iter().map(|r| r.weight.max(0.0)).sum();
    if total <= 0.0 {
        return Some(&rules[rng.random_range(0..rules.len())]);
    }

    let roll = rng.random::<f32>() * total;
    let mut acc = 0.0;
    for rule in rules {
        acc += rule.weight.max(0.0);
        if roll <= acc {
            return Some(rule);
        }
    }
    // Float accumulation can land the roll past the final bucket.
    rules.last()
}
