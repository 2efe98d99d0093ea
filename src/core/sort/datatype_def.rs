/*!

Datatype definitions as the manager stores them. A definition is created once per `mk_datatype_sort` call or per
distinct instantiation and lives as long as the manager. The sorts it mentions are held as shares in the sort table.

A selector whose range is `SelfSort` refers to the datatype being defined. For an instantiated datatype, `SelfSort`
refers to the instance.

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::IString,
  core::allocator::SlotIndex
};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct DatatypeIndex(pub usize);

impl DatatypeIndex {
  #[inline(always)]
  pub fn idx(self) -> usize {
    self.0
  }
}

impl Display for DatatypeIndex {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "datatype#{}", self.0)
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum RangeDef {
  Sort(SlotIndex),
  SelfSort,
}

#[derive(Clone, Debug)]
pub(crate) struct SelectorDef {
  pub name : IString,
  pub range: RangeDef,
}

#[derive(Clone, Debug)]
pub(crate) struct ConstructorDef {
  pub name     : IString,
  pub selectors: Vec<SelectorDef>,
}

impl ConstructorDef {
  /// Does some selector of this constructor refer back to the datatype?
  pub fn is_recursive(&self) -> bool {
    self.selectors.iter().any(|selector| selector.range == RangeDef::SelfSort)
  }
}

#[derive(Debug)]
pub(crate) struct DatatypeDef {
  pub name        : IString,
  /// The `PARAM_SORT` placeholders of a parametric datatype. Empty otherwise, and empty for instances.
  pub params      : Vec<SlotIndex>,
  pub constructors: Vec<ConstructorDef>,
  /// The datatype's own sort.
  pub sort        : SlotIndex,
  /// For an instance, the generic datatype and the actual parameters it was instantiated with.
  pub instance_of : Option<(DatatypeIndex, Vec<SlotIndex>)>,
}

impl DatatypeDef {
  #[inline(always)]
  pub fn is_parametric(&self) -> bool {
    !self.params.is_empty()
  }

  /// Every sort this definition holds a share on, except its own sort.
  pub fn held_sorts(&self) -> impl Iterator<Item = SlotIndex> + '_ {
    let ranges = self.constructors
                     .iter()
                     .flat_map(|constructor| constructor.selectors.iter())
                     .filter_map(|selector| match selector.range {
                       RangeDef::Sort(sort) => Some(sort),
                       RangeDef::SelfSort   => None,
                     });
    let arguments = self.instance_of.iter().flat_map(|(_, arguments)| arguments.iter().copied());

    ranges.chain(arguments)
  }
}
