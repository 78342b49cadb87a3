//! Seeded input shapes for sort, compare, copy and reverse tests.
//!
//! All generators draw from one per-process seed, so a failing run can be reproduced by setting
//! `OVERRIDE_SEED` to the seed the test harness printed.

use std::env;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use rand::prelude::*;
use zipf::ZipfDistribution;

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = new_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::
    let mut rng = new_rng();
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // https://en.wikipedia.org/wiki/Zipf's_law
    if len == 0 {
        return Vec::new();
    }

    let mut rng = new_rng();
    let dist = ZipfDistribution::new(len, exponent).unwrap();

    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    //  ^      ^
    //  |      |
    // sorted  |
    //     unsorted

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;

    v[0..sorted_len].sort_unstable();

    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    saw(len, saw_count, |_| false)
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    saw(len, saw_count, |_| true)
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    let directions = random_uniform(saw_count.max(1) + 1, 0..=1);
    saw(len, saw_count, |i| directions[i % directions.len()] == 1)
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random(len);

    vals[0..(len / 2)].sort();
    vals[(len / 2)..len].sort_by_key(|&e| std::cmp::Reverse(e));

    vals
}

/// Random bytes, the raw material for copy and relational tests.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = new_rng();
    let mut v = vec![0u8; len];
    rng.fill_bytes(&mut v);
    v
}

/// Per-process seed, either random or taken from `OVERRIDE_SEED`.
pub fn random_init_seed() -> u64 {
    static SEED: OnceCell<u64> = OnceCell::new();

    *SEED.get_or_init(|| {
        env::var("OVERRIDE_SEED")
            .ok()
            .map(|seed| u64::from_str(&seed).expect("OVERRIDE_SEED must be a u64"))
            .unwrap_or_else(|| thread_rng().gen())
    })
}

// --- Private ---

fn new_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

fn saw(len: usize, saw_count: usize, mut descending: impl FnMut(usize) -> bool) -> Vec<i32> {
    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunk_size = (len / saw_count.max(1)).max(1);

    for (i, chunk) in vals.chunks_mut(chunk_size).enumerate() {
        if descending(i) {
            chunk.sort_by_key(|&e| std::cmp::Reverse(e));
        } else {
            chunk.sort();
        }
    }

    vals
}
