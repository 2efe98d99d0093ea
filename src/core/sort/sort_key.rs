/*!

The structural key of a sort. Component sorts are children in the sort table, in this order:

| kind                  | children                          | payload                    |
|:----------------------|:----------------------------------|:---------------------------|
| `BITVECTOR_SORT`      | none                              | width                      |
| `FLOATINGPOINT_SORT`  | none                              | exponent, significand      |
| `ARRAY_SORT`          | index, element                    | none                       |
| `SET_SORT`            | element                           | none                       |
| `TUPLE_SORT`          | components                        | none                       |
| `FUNCTION_SORT`       | domains, then codomain            | none                       |
| `DATATYPE_SORT`       | free parameters (empty if none)   | datatype                   |
| `SORT_CONSTRUCTOR_SORT` | none                            | name, arity                |
| `UNINTERPRETED_SORT`  | parameters (empty if none)        | name                       |
| `PARAM_SORT`          | none                              | name                       |

The builtin sorts have neither children nor payload.

*/

use crate::{
  abstractions::IString,
  api::kind::Kind,
  core::{
    allocator::{HashConsTable, Interned, SlotIndex},
    sort::DatatypeIndex
  }
};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) enum SortPayload {
  None,
  Width(u32),
  FloatingPoint {
    exponent   : u32,
    significand: u32
  },
  Name(IString),
  SortConstructor {
    name : IString,
    arity: usize
  },
  Datatype(DatatypeIndex),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct SortKey {
  pub kind    : Kind,
  pub children: Vec<SlotIndex>,
  pub payload : SortPayload,
}

impl SortKey {
  pub fn new(kind: Kind, children: Vec<SlotIndex>, payload: SortPayload) -> Self {
    SortKey { kind, children, payload }
  }

  pub fn builtin(kind: Kind) -> Self {
    SortKey { kind, children: vec![], payload: SortPayload::None }
  }

  /// Function and sort-constructor sorts cannot be the sort of a term's component.
  #[inline(always)]
  pub fn is_first_class(&self) -> bool {
    !matches!(self.kind, Kind::FunctionSort | Kind::SortConstructorSort)
  }

  pub fn name(&self) -> Option<&IString> {
    match &self.payload {
      SortPayload::Name(name) | SortPayload::SortConstructor { name, .. } => Some(name),
      _ => None,
    }
  }
}

impl Interned for SortKey {
  #[inline(always)]
  fn children(&self) -> &[SlotIndex] {
    &self.children
  }
}

pub(crate) type SortTable = HashConsTable<SortKey, ()>;
