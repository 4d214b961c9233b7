/// Identity of a scroll target (typically a category label).
#[cfg(feature = "std")]
pub trait AnchorKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> AnchorKey for T {}

#[cfg(not(feature = "std"))]
pub trait AnchorKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> AnchorKey for T {}

#[cfg(not(feature = "std"))]
pub(crate) type AnchorTable<K> = alloc::collections::BTreeMap<K, u64>;
#[cfg(feature = "std")]
pub(crate) type AnchorTable<K> = std::collections::HashMap<K, u64>;
