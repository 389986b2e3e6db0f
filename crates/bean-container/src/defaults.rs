//! # Value-Default Provider
//!
//! Untagged value fields are seeded once, at registration time, so a
//! component never observes an unset map, sequence or random source after it
//! has been handed to the container.
//!
//! A field takes part by being a [`Defaulted`] slot whose value type implements
//! [`DefaultValue`]. Slots that already hold a value are left alone.

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::atomic::{AtomicU64, Ordering};

/// The three value categories the provider knows how to seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCategory {
    Map,
    Sequence,
    RandomSource,
}

/// Source of seeds for [`ValueCategory::RandomSource`] fields.
///
/// With a fixed base seed every generator is derived from `base + n`, where `n`
/// counts the generators handed out so far; without one, generators are seeded
/// from OS entropy.
#[derive(Debug)]
pub struct SeedSource {
    base: Option<u64>,
    issued: AtomicU64,
}

impl SeedSource {
    pub fn new(base: Option<u64>) -> Self {
        Self {
            base,
            issued: AtomicU64::new(0),
        }
    }

    pub fn entropy() -> Self {
        Self::new(None)
    }

    pub fn next_rng(&self) -> StdRng {
        let n = self.issued.fetch_add(1, Ordering::Relaxed);
        match self.base {
            Some(base) => StdRng::seed_from_u64(base.wrapping_add(n)),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::entropy()
    }
}

/// A value type with a semantic "empty" default.
pub trait DefaultValue: Send + Sync + 'static {
    const CATEGORY: ValueCategory;

    fn make_default(seeds: &SeedSource) -> Self;
}

impl<K, V, S> DefaultValue for HashMap<K, V, S>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    const CATEGORY: ValueCategory = ValueCategory::Map;

    fn make_default(_: &SeedSource) -> Self {
        HashMap::default()
    }
}

impl<K, V> DefaultValue for BTreeMap<K, V>
where
    K: Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    const CATEGORY: ValueCategory = ValueCategory::Map;

    fn make_default(_: &SeedSource) -> Self {
        BTreeMap::new()
    }
}

impl<T: Send + Sync + 'static> DefaultValue for Vec<T> {
    const CATEGORY: ValueCategory = ValueCategory::Sequence;

    fn make_default(_: &SeedSource) -> Self {
        Vec::new()
    }
}

impl<T: Send + Sync + 'static> DefaultValue for VecDeque<T> {
    const CATEGORY: ValueCategory = ValueCategory::Sequence;

    fn make_default(_: &SeedSource) -> Self {
        VecDeque::new()
    }
}

impl<T, S> DefaultValue for HashSet<T, S>
where
    T: Eq + Hash + Send + Sync + 'static,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    const CATEGORY: ValueCategory = ValueCategory::Sequence;

    fn make_default(_: &SeedSource) -> Self {
        HashSet::default()
    }
}

impl<T: Ord + Send + Sync + 'static> DefaultValue for BTreeSet<T> {
    const CATEGORY: ValueCategory = ValueCategory::Sequence;

    fn make_default(_: &SeedSource) -> Self {
        BTreeSet::new()
    }
}

impl DefaultValue for StdRng {
    const CATEGORY: ValueCategory = ValueCategory::RandomSource;

    fn make_default(seeds: &SeedSource) -> Self {
        seeds.next_rng()
    }
}

/// Object-safe view of a [`Defaulted`] slot.
pub trait ValueField: Send + Sync {
    fn category(&self) -> ValueCategory;

    fn type_name(&self) -> &'static str;

    fn is_unset(&self) -> bool;

    /// Installs a fresh default if the slot is still unset.
    fn install_default(&self, seeds: &SeedSource) -> bool;
}

/// A value field the container seeds at registration time.
pub struct Defaulted<V: DefaultValue> {
    value: RwLock<Option<V>>,
}

impl<V: DefaultValue> Defaulted<V> {
    /// An unset slot; the provider will fill it.
    pub fn unset() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    /// A slot that already holds `value`; the provider leaves it alone.
    pub fn with_value(value: V) -> Self {
        Self {
            value: RwLock::new(Some(value)),
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.read().is_some()
    }

    /// Runs `f` against the value, `None` while unset.
    pub fn with<R>(&self, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.value.read().as_ref().map(f)
    }

    /// Runs `f` against the value mutably, `None` while unset.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.value.write().as_mut().map(f)
    }
}

impl<V: DefaultValue> Default for Defaulted<V> {
    fn default() -> Self {
        Self::unset()
    }
}

impl<V: DefaultValue> ValueField for Defaulted<V> {
    fn category(&self) -> ValueCategory {
        V::CATEGORY
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<V>()
    }

    fn is_unset(&self) -> bool {
        !self.is_set()
    }

    fn install_default(&self, seeds: &SeedSource) -> bool {
        let mut value = self.value.write();
        if value.is_some() {
            return false;
        }
        *value = Some(V::make_default(seeds));
        true
    }
}

impl<V: DefaultValue> fmt::Debug for Defaulted<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaulted")
            .field("type", &std::any::type_name::<V>())
            .field("set", &self.is_set())
            .finish()
    }
}

/// Seeds `field` with its category default if it is still unset.
///
/// Returns `true` when a default was installed.
pub fn apply_default_providers(field: &dyn ValueField, seeds: &SeedSource) -> bool {
    if !field.is_unset() {
        return false;
    }
    field.install_default(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_unset_map_gets_empty_default() {
        let field: Defaulted<HashMap<String, u32>> = Defaulted::unset();
        assert!(apply_default_providers(&field, &SeedSource::entropy()));
        assert_eq!(field.with(|m| m.len()), Some(0));
        assert_eq!(field.category(), ValueCategory::Map);
    }

    #[test]
    fn test_existing_sequence_left_alone() {
        let field = Defaulted::with_value(vec![1, 2, 3]);
        assert!(!apply_default_providers(&field, &SeedSource::entropy()));
        assert_eq!(field.with(|v| v.clone()), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let a: Defaulted<StdRng> = Defaulted::unset();
        let b: Defaulted<StdRng> = Defaulted::unset();
        apply_default_providers(&a, &SeedSource::new(Some(7)));
        apply_default_providers(&b, &SeedSource::new(Some(7)));

        let x: u64 = a.with_mut(|rng| rng.gen()).unwrap();
        let y: u64 = b.with_mut(|rng| rng.gen()).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_seed_source_advances() {
        let seeds = SeedSource::new(Some(42));
        let x: u64 = seeds.next_rng().gen();
        let y: u64 = seeds.next_rng().gen();
        assert_ne!(x, y);
    }
}
