//! Circular versioned history log
//!
//! Undo history is a fixed ring of shape snapshots, each tagged with a
//! monotonically increasing version. The ring is reused oldest-first
//! once full, so a slot adjacent to the current one is only a valid
//! undo/redo target when its version is on the right side of the
//! current entry's version. A plain occupancy flag could not tell "one
//! step older than current" apart from "recycled for a much newer,
//! already superseded state".

use glam::Vec2;

use crate::shape::Shape;

/// Number of snapshot slots in the ring. States older than the last
/// `HISTORY_CAPACITY - 1` commits are deliberately forgotten.
pub const HISTORY_CAPACITY: usize = 128;

#[derive(Debug, Clone, Default)]
struct Entry {
    shape: Shape,
    version: u64,
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<Entry>,
    current: usize,
    /// Highest version handed out so far; never reused within one log
    /// lifetime.
    version_counter: u64,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// A fresh log holding a single empty version-0 shape.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Capacity-injectable constructor for tests. `slots` must be at
    /// least 2, otherwise commit would overwrite the entry it copies.
    pub fn with_capacity(slots: usize) -> Self {
        assert!(slots >= 2, "history needs at least two slots");
        Self {
            entries: vec![Entry::default(); slots],
            current: 0,
            version_counter: 0,
        }
    }

    pub fn slots(&self) -> usize {
        self.entries.len()
    }

    pub fn current_slot(&self) -> usize {
        self.current
    }

    pub fn current_version(&self) -> u64 {
        self.entries[self.current].version
    }

    pub fn current_shape(&self) -> &Shape {
        &self.entries[self.current].shape
    }

    pub fn current_shape_mut(&mut self) -> &mut Shape {
        &mut self.entries[self.current].shape
    }

    /// Copy the current entry into the next ring slot, stamp it with a
    /// fresh version, make it current and hand it out for mutation.
    ///
    /// Must run before any destructive edit (insert/remove), and never
    /// while a drag is in progress: drags hold a slot/vertex address
    /// into the current entry and mutate it in place frame by frame.
    pub fn commit(&mut self) -> &mut Shape {
        let next = (self.current + 1) % self.entries.len();
        let shape = self.entries[self.current].shape.clone();
        self.version_counter += 1;
        self.entries[next] = Entry {
            shape,
            version: self.version_counter,
        };
        self.current = next;
        &mut self.entries[self.current].shape
    }

    /// Step to the previous slot if it still holds an older state.
    /// Returns false (and changes nothing) once the ring has recycled
    /// everything older than the current entry.
    pub fn undo(&mut self) -> bool {
        let prev = (self.current + self.entries.len() - 1) % self.entries.len();
        if self.entries[prev].version < self.entries[self.current].version {
            self.current = prev;
            true
        } else {
            false
        }
    }

    /// Symmetric to [`undo`](Self::undo): the next slot is a valid
    /// target only while it holds a strictly newer state.
    pub fn redo(&mut self) -> bool {
        let next = (self.current + 1) % self.entries.len();
        if self.entries[next].version > self.entries[self.current].version {
            self.current = next;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        let prev = (self.current + self.entries.len() - 1) % self.entries.len();
        self.entries[prev].version < self.entries[self.current].version
    }

    pub fn can_redo(&self) -> bool {
        let next = (self.current + 1) % self.entries.len();
        self.entries[next].version > self.entries[self.current].version
    }

    /// Start a new log lifetime with an empty shape ("new document").
    pub fn reset(&mut self) {
        self.reset_with(Shape::new());
    }

    /// Start a new log lifetime seeded with `shape` as the version-0
    /// entry (used when opening a file).
    pub fn reset_with(&mut self, shape: Shape) {
        for entry in &mut self.entries {
            *entry = Entry::default();
        }
        self.entries[0].shape = shape;
        self.current = 0;
        self.version_counter = 0;
    }

    /// Re-resolve a drag target through the log. `slot` is the slot
    /// that was current when the drag started; the state machine
    /// guarantees no commit happens while the drag is alive, so the
    /// slot is still current.
    pub fn vertex_mut(&mut self, slot: usize, index: usize) -> &mut Vec2 {
        self.entries[slot].shape.vertex_mut(index)
    }
}
