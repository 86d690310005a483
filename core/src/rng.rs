//! Deterministic random number generation for sample tables.
//!
//! RULE: Sample data never touches a platform RNG.
//! Each table gets its own stream, seeded from
//! (master_seed XOR table_index × golden-ratio constant). This means:
//!   - Changing the row count of one table never changes another table.
//!   - Each table is fully reproducible in isolation.

use crate::dataset::TableKind;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct TableRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl TableRng {
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, table_index: u64) -> Self {
        let derived_seed = master_seed ^ (table_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform float in [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Uniform integer in [low, high).
    pub fn range(&mut self, low: u64, high: u64) -> u64 {
        assert!(high > low, "empty range {low}..{high}");
        low + self.next_u64_below(high - low)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let i = self.next_u64_below(items.len() as u64) as usize;
        &items[i]
    }
}

/// All table RNGs for one sample run.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_table(&self, kind: TableKind) -> TableRng {
        TableRng::new(self.master_seed, table_slot(kind)).with_name(kind.name())
    }
}

/// Stable stream assignments. NEVER reorder, only append.
fn table_slot(kind: TableKind) -> u64 {
    match kind {
        TableKind::Revenue   => 0,
        TableKind::Customers => 1,
        TableKind::Marketing => 2,
        TableKind::Costs     => 3,
    }
}
