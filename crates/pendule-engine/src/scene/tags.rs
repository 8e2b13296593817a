use bitflags::bitflags;

bitflags! {
    /// Group flags carried by each scene primitive.
    ///
    /// The flags are orthogonal; a primitive may carry any combination.
    /// Tag-scoped operations (`erase_by_tag`, `raise_by_tag`, `move_by_tag`)
    /// match every primitive sharing at least one flag with the argument.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Tags: u8 {
        /// Follows pointer drags and double-click resets.
        const DRAGGABLE  = 1 << 0;
        /// Transient; erased and redrawn on every tick.
        const REMOVABLE  = 1 << 1;
        /// Raised above everything else after every tick.
        const ALWAYS_TOP = 1 << 2;
    }
}
