/*!

A slot arena for reference counted, immutable table entries. Entries are addressed by `SlotIndex`. Freed slots go on a
free list and are reused by later allocations, so a `SlotIndex` is only meaningful while the entry it names is live.
Each allocation additionally receives a creation-order id that is never reused.

*/

use std::fmt::{Display, Formatter};

/// Index of a slot within an `Arena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct SlotIndex(u32);

impl SlotIndex {
  #[inline(always)]
  pub fn idx(self) -> usize {
    self.0 as usize
  }
}

impl Display for SlotIndex {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "@{}", self.0)
  }
}

pub(crate) struct Slot<T> {
  pub(crate) value    : T,
  /// Creation-order id. Strictly increasing across the lifetime of the arena.
  pub(crate) id       : u64,
  /// Number of owning shares: handles plus parent entries.
  pub(crate) ref_count: u32,
}

pub(crate) struct Arena<T> {
  slots    : Vec<Option<Slot<T>>>,
  free_list: Vec<SlotIndex>,
  next_id  : u64,
  live     : usize,
}

impl<T> Arena<T> {
  pub fn with_capacity(capacity: usize) -> Self {
    Arena {
      slots    : Vec::with_capacity(capacity),
      free_list: Vec::new(),
      next_id  : 1,
      live     : 0,
    }
  }

  /// Places `value` in a free slot with a share count of zero and returns its index.
  pub fn allocate(&mut self, value: T) -> SlotIndex {
    let slot = Slot {
      value,
      id: self.next_id,
      ref_count: 0,
    };
    self.next_id += 1;
    self.live    += 1;

    match self.free_list.pop() {
      Some(index) => {
        self.slots[index.idx()] = Some(slot);
        index
      }
      None => {
        let index = u32::try_from(self.slots.len()).expect("arena exhausted the 32-bit index space");
        self.slots.push(Some(slot));
        SlotIndex(index)
      }
    }
  }

  /// Removes the entry at `index` and returns its value. The slot joins the free list.
  pub fn free(&mut self, index: SlotIndex) -> T {
    let slot = self.slots[index.idx()].take().expect("freed an empty arena slot");
    self.free_list.push(index);
    self.live -= 1;
    slot.value
  }

  #[inline(always)]
  pub fn get(&self, index: SlotIndex) -> &Slot<T> {
    self.slots[index.idx()].as_ref().expect("accessed an empty arena slot")
  }

  #[inline(always)]
  pub fn get_mut(&mut self, index: SlotIndex) -> &mut Slot<T> {
    self.slots[index.idx()].as_mut().expect("accessed an empty arena slot")
  }

  #[cfg(test)]
  pub fn is_live(&self, index: SlotIndex) -> bool {
    matches!(self.slots.get(index.idx()), Some(Some(_)))
  }

  /// Number of live entries.
  #[inline(always)]
  pub fn len(&self) -> usize {
    self.live
  }

  /// Number of slots ever allocated, live or free.
  #[inline(always)]
  pub fn capacity_used(&self) -> usize {
    self.slots.len()
  }

  /// Number of free slots awaiting reuse.
  #[inline(always)]
  pub fn free_count(&self) -> usize {
    self.free_list.len()
  }

  /// The id the next allocation will receive.
  #[inline(always)]
  pub fn next_id(&self) -> u64 {
    self.next_id
  }

  /// Iterates over live entries in slot order.
  #[cfg(test)]
  pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &Slot<T>)> {
    self.slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.as_ref().map(|slot| (SlotIndex(i as u32), slot)))
  }
}
