// ============================================================
// Layer 4: Stratified Train/Test Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into a
// training set and a held-out test set, keeping the class
// proportions of both sets close to those of the whole dataset.
//
// Sizes:
//   n_test  = ceil(test_fraction * n)
//   n_train = n - n_test
//   Each class receives floor(n_test * class_count / n) test
//   samples; the leftover test slots go to the classes with the
//   largest fractional remainder.
//
// Determinism:
//   The same samples, fraction and seed always produce the same
//   split. The RNG is a StdRng seeded from the given u64, never
//   thread_rng().
//
// Reference: rand crate documentation (SeedableRng, SliceRandom)

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("test fraction must be strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),

    #[error("cannot split {n} samples with test fraction {fraction}: one side would be empty")]
    EmptySide { n: usize, fraction: f64 },

    #[error("the least populated class has only {0} member(s); at least 2 are required")]
    ClassTooSmall(usize),

    #[error("{side} size {size} is smaller than the number of classes {classes}")]
    TooFewForClasses { side: &'static str, size: usize, classes: usize },
}

/// Split `samples` into (train, test), stratified by `key`.
pub fn stratified_split<T, K, F>(
    samples:       Vec<T>,
    key:           F,
    test_fraction: f64,
    seed:          u64,
) -> Result<(Vec<T>, Vec<T>), SplitError>
where
    K: Ord + Copy,
    F: Fn(&T) -> K,
{
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(test_fraction));
    }

    let total  = samples.len();
    let n_test = (test_fraction * total as f64).ceil() as usize;
    let n_train = total.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(SplitError::EmptySide { n: total, fraction: test_fraction });
    }

    // ── Group samples by class (BTreeMap keeps class order stable) ───────────
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for sample in samples {
        groups.entry(key(&sample)).or_default().push(sample);
    }

    let smallest = groups.values().map(Vec::len).min().unwrap_or(0);
    if smallest < 2 {
        return Err(SplitError::ClassTooSmall(smallest));
    }
    let classes = groups.len();
    if n_test < classes {
        return Err(SplitError::TooFewForClasses { side: "test", size: n_test, classes });
    }
    if n_train < classes {
        return Err(SplitError::TooFewForClasses { side: "train", size: n_train, classes });
    }

    // ── Allocate test slots per class ─────────────────────────────────────────
    let counts: Vec<usize> = groups.values().map(Vec::len).collect();
    let allocation = allocate_test_counts(&counts, n_test);

    // ── Shuffle each class and carve off its test slice ───────────────────────
    let mut rng   = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test  = Vec::with_capacity(n_test);

    for (mut group, take) in groups.into_values().zip(allocation) {
        group.shuffle(&mut rng);
        let keep = group.len() - take;
        test.extend(group.split_off(keep));
        train.extend(group);
    }

    // Interleave the classes again
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    tracing::debug!(
        "Stratified split: {} train, {} test (seed {})",
        train.len(),
        test.len(),
        seed,
    );

    Ok((train, test))
}

/// Largest-remainder allocation of `n_test` slots over class sizes.
fn allocate_test_counts(counts: &[usize], n_test: usize) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    let mut alloc: Vec<usize> = counts.iter().map(|&c| n_test * c / total).collect();

    let mut assigned: usize = alloc.iter().sum();
    let mut order: Vec<usize> = (0..counts.len()).collect();
    // Largest remainder first, then larger class, then class order
    order.sort_by(|&a, &b| {
        let ra = (n_test * counts[a]) % total;
        let rb = (n_test * counts[b]) % total;
        rb.cmp(&ra).then(counts[b].cmp(&counts[a])).then(a.cmp(&b))
    });

    let mut i = 0;
    while assigned < n_test && !order.is_empty() {
        let idx = order[i % order.len()];
        if alloc[idx] < counts[idx] {
            alloc[idx] += 1;
            assigned += 1;
        }
        i += 1;
    }
    alloc
}
