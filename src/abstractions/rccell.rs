/*!

A thin wrapper around `Rc<RefCell<T>>`. The wrapper exists so that the rest of the crate names a single type and
so that identity comparison (`RcCell::ptr_eq`) reads naturally at call sites.

`RcCell` is deliberately `!Send` and `!Sync`. Everything that shares one `RcCell` is confined to one thread.

*/

use std::{
  cell::{Ref, RefCell, RefMut},
  fmt::{Debug, Formatter},
  rc::Rc
};

pub struct RcCell<T>(Rc<RefCell<T>>);

impl<T> RcCell<T> {
  #[inline(always)]
  pub fn new(value: T) -> Self {
    RcCell(Rc::new(RefCell::new(value)))
  }

  /// Immutably borrows the wrapped value. Panics if the value is currently mutably borrowed.
  #[inline(always)]
  pub fn borrow(&self) -> Ref<'_, T> {
    self.0.borrow()
  }

  /// Mutably borrows the wrapped value. Panics if the value is currently borrowed.
  #[inline(always)]
  pub fn borrow_mut(&self) -> RefMut<'_, T> {
    self.0.borrow_mut()
  }

  /// Do `this` and `other` point to the same allocation?
  #[inline(always)]
  pub fn ptr_eq(this: &Self, other: &Self) -> bool {
    Rc::ptr_eq(&this.0, &other.0)
  }
}

impl<T> Clone for RcCell<T> {
  fn clone(&self) -> Self {
    RcCell(Rc::clone(&self.0))
  }
}

impl<T: Debug> Debug for RcCell<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.0.try_borrow() {
      Ok(value) => write!(f, "RcCell({:?})", &*value),
      Err(_)    => write!(f, "RcCell(<borrowed>)"),
    }
  }
}
