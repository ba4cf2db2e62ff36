use crate::ViewKind;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KindMap<V> = HashMap<ViewKind, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KindMap<V> = BTreeMap<ViewKind, V>;
