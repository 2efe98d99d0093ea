/*!

A hash-consing table: an `Arena` of reference counted entries plus a map from structural key to slot. Interning an
existing key returns the existing slot; interning a new key allocates a slot, takes a share on each of the key's
children, and records the key in the map.

Releasing the last share on an entry evicts it immediately and releases the shares it held on its children. Release
runs off an explicit worklist rather than the call stack, so dropping the root of an arbitrarily deep term cannot
overflow the stack.

Children always precede their parents in creation order, since a key can only name children that are already live.
This is what keeps the graph acyclic.

*/

use std::hash::Hash;

use crate::{
  abstractions::HashMap,
  core::allocator::arena::{Arena, SlotIndex},
};

/// A structural key that can be hash-consed. `children` lists the slots this key holds a share on. They must live in
/// the same table.
pub(crate) trait Interned: Clone + Eq + Hash {
  fn children(&self) -> &[SlotIndex];
}

/// An entry in the table: the structural key plus data that does not participate in identity.
pub(crate) struct Entry<K, A> {
  pub(crate) key      : K,
  pub(crate) attribute: A,
}

pub(crate) struct HashConsTable<K: Interned, A> {
  arena: Arena<Entry<K, A>>,
  index: HashMap<K, SlotIndex>,
}

impl<K: Interned, A> HashConsTable<K, A> {
  pub fn with_capacity(capacity: usize) -> Self {
    HashConsTable {
      arena: Arena::with_capacity(capacity),
      index: HashMap::with_capacity(capacity),
    }
  }

  /// Returns the canonical slot for `key` together with a new share for the caller, and whether the entry was
  /// created by this call. `make_attribute` is only invoked for a new entry.
  ///
  /// Every child named by `key` must be live. The caller keeps whatever shares it held on those children.
  pub fn intern(&mut self, key: K, make_attribute: impl FnOnce() -> A) -> (SlotIndex, bool) {
    if let Some(&index) = self.index.get(&key) {
      self.arena.get_mut(index).ref_count += 1;
      return (index, false);
    }

    for &child in key.children() {
      self.acquire(child);
    }

    let index = self.arena.allocate(Entry { key: key.clone(), attribute: make_attribute() });
    self.arena.get_mut(index).ref_count = 1;
    self.index.insert(key, index);

    (index, true)
  }

  /// Looks up the slot for `key` without taking a share.
  pub fn lookup(&self, key: &K) -> Option<SlotIndex> {
    self.index.get(key).copied()
  }

  /// Takes an additional share on a live entry.
  #[inline(always)]
  pub fn acquire(&mut self, index: SlotIndex) {
    self.arena.get_mut(index).ref_count += 1;
  }

  /// Gives up one share on `index`. Entries whose share count reaches zero are evicted, transitively, and returned in
  /// eviction order so that the owner can release anything the attributes refer to in other tables.
  pub fn release(&mut self, index: SlotIndex) -> Vec<Entry<K, A>> {
    let mut evicted  = Vec::new();
    let mut worklist = vec![index];

    while let Some(current) = worklist.pop() {
      let slot = self.arena.get_mut(current);
      debug_assert!(slot.ref_count > 0, "released an entry with no outstanding shares");
      slot.ref_count -= 1;
      if slot.ref_count > 0 {
        continue;
      }

      let entry = self.arena.free(current);
      self.index.remove(&entry.key);
      worklist.extend_from_slice(entry.key.children());
      evicted.push(entry);
    }

    evicted
  }

  // region Accessors

  #[inline(always)]
  pub fn key(&self, index: SlotIndex) -> &K {
    &self.arena.get(index).value.key
  }

  #[inline(always)]
  pub fn attribute(&self, index: SlotIndex) -> &A {
    &self.arena.get(index).value.attribute
  }

  #[inline(always)]
  pub fn attribute_mut(&mut self, index: SlotIndex) -> &mut A {
    &mut self.arena.get_mut(index).value.attribute
  }

  /// The creation-order id of the entry.
  #[inline(always)]
  pub fn id(&self, index: SlotIndex) -> u64 {
    self.arena.get(index).id
  }

  #[cfg(test)]
  pub fn ref_count(&self, index: SlotIndex) -> u32 {
    self.arena.get(index).ref_count
  }

  #[cfg(test)]
  pub fn is_live(&self, index: SlotIndex) -> bool {
    self.arena.is_live(index)
  }

  /// Number of live entries.
  #[inline(always)]
  pub fn len(&self) -> usize {
    self.arena.len()
  }

  #[inline(always)]
  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.arena.len() == 0
  }

  #[cfg(test)]
  pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &K)> {
    self.arena.iter().map(|(index, slot)| (index, &slot.value.key))
  }

  // endregion Accessors

  /// A one-line summary of the table's occupancy, for diagnostics.
  pub fn statistics(&self) -> String {
    format!(
      "live={} slots={} free={} next_id={}",
      self.arena.len(),
      self.arena.capacity_used(),
      self.arena.free_count(),
      self.arena.next_id()
    )
  }
}
