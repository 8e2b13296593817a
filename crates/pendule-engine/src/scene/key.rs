/// Opaque identifier of a primitive drawn into a [`Scene`](super::Scene).
///
/// Handles are allocated monotonically and never reused within a scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Handle(pub(crate) u64);

/// Paint-order key for scene items.
///
/// Lower values are painted first (further back). Drawing or raising a
/// primitive gives it the next key, which places it on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey(pub u64);
