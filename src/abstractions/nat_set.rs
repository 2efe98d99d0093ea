/*!

A set of natural numbers backed by a bit set. Used for visited sets when walking a term DAG, where the elements are
slot indices in a hash-consing table.

*/

use bit_set::BitSet;

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct NatSet(BitSet);

impl NatSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts `value`, returning `true` if it was not already present.
  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_reports_new_elements() {
    let mut set = NatSet::new();
    assert!(set.is_empty());
    assert!(set.insert(3));
    assert!(!set.insert(3));
    assert!(set.insert(70));
    assert_eq!(set.len(), 2);
  }
}
