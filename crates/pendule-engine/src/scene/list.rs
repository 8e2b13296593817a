use crate::coords::Vec2;

use super::{DrawCmd, Handle, SceneError, SortKey, Tags};

/// A single retained primitive: handle + paint-order key + tags + command.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub handle: Handle,
    pub key: SortKey,
    pub tags: Tags,
    pub cmd: DrawCmd,
}

/// Retained primitive store for one window.
///
/// Unlike an immediate-mode draw list, items survive across frames until
/// erased. Callers group items with [`Tags`] and act on whole groups.
///
/// Performance characteristics:
/// - drawing is O(1)
/// - tag-scoped operations are O(n)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Pan offset
///
/// The scene owns the current pan offset. It is never applied implicitly:
/// callers add it to the geometry of new primitives, and use
/// [`move_by_tag`](Self::move_by_tag) to shift primitives that already exist.
#[derive(Debug, Default)]
pub struct Scene {
    items: Vec<SceneItem>,
    next_handle: u64,
    next_order: u64,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    pan: Vec2,
    closed: bool,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns items in storage order.
    #[inline]
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a live primitive by handle.
    pub fn get(&self, handle: Handle) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.handle == handle)
    }

    #[inline]
    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    #[inline]
    pub fn set_pan_offset(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Marks the scene as destroyed. Every later mutation fails with [`SceneError::Closed`].
    pub fn close(&mut self) {
        if !self.closed {
            log::debug!("scene closed with {} primitives", self.items.len());
        }
        self.closed = true;
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Records a primitive on top of everything drawn so far.
    pub fn push(&mut self, tags: Tags, cmd: DrawCmd) -> Result<Handle, SceneError> {
        self.ensure_open()?;

        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        let key = self.next_key();

        self.items.push(SceneItem { handle, key, tags, cmd });
        self.sorted_dirty = true;

        Ok(handle)
    }

    /// Removes every primitive sharing a flag with `tags`. Returns how many were removed.
    pub fn erase_by_tag(&mut self, tags: Tags) -> Result<usize, SceneError> {
        self.ensure_open()?;

        let before = self.items.len();
        self.items.retain(|item| !item.tags.intersects(tags));
        let removed = before - self.items.len();

        if removed > 0 {
            self.sorted_dirty = true;
        }
        Ok(removed)
    }

    /// Moves every primitive sharing a flag with `tags` above all others.
    ///
    /// The raised primitives keep their order relative to each other.
    pub fn raise_by_tag(&mut self, tags: Tags) -> Result<(), SceneError> {
        self.ensure_open()?;

        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        // Walk in paint order so the raised group keeps its internal order.
        let mut raised = false;
        for pos in 0..self.sorted_indices.len() {
            let i = self.sorted_indices[pos];
            if self.items[i].tags.intersects(tags) {
                let key = SortKey(self.next_order);
                self.next_order += 1;
                self.items[i].key = key;
                raised = true;
            }
        }

        if raised {
            self.sorted_dirty = true;
        }
        Ok(())
    }

    /// Translates every primitive sharing a flag with `tags` by `delta`.
    pub fn move_by_tag(&mut self, tags: Tags, delta: Vec2) -> Result<(), SceneError> {
        self.ensure_open()?;

        for item in self.items.iter_mut().filter(|item| item.tags.intersects(tags)) {
            item.cmd.translate(delta);
        }
        Ok(())
    }

    /// Iterates items in paint order without cloning commands.
    ///
    /// The index buffer is owned by `Scene` and reused across frames.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &SceneItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    /// The primitive painted last, if any.
    pub fn topmost(&mut self) -> Option<&SceneItem> {
        self.iter_in_paint_order().last()
    }

    fn ensure_open(&self) -> Result<(), SceneError> {
        if self.closed {
            Err(SceneError::Closed)
        } else {
            Ok(())
        }
    }

    fn next_key(&mut self) -> SortKey {
        let key = SortKey(self.next_order);
        self.next_order += 1;
        key
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Keys are unique, so an unstable sort is deterministic.
        let items = &self.items;
        self.sorted_indices.sort_unstable_by_key(|&i| items[i].key);

        self.sorted_dirty = false;
    }
}
