/*!

Term nodes as they are stored in the manager's node table.

A node's identity is its `NodeKey`: the kind, the ordered children, and the payload. For a parameterized kind the
operator is stored as the first child, so `(_ extract 7 0) x` is the key `BITVECTOR_EXTRACT [op, x]`. Variables are
given a serial number in their payload, which keeps two variables of the same name and sort distinct.

The node's sort is not part of its identity. It is recorded in the `NodeAttribute` when the node is first interned,
or later by `assign_type`, and the node holds one share on it.

*/

use crate::{
  abstractions::IString,
  api::{constant::Constant, kind::Kind},
  core::allocator::{HashConsTable, Interned, SlotIndex}
};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) enum NodePayload {
  None,
  Constant(Constant),
  Symbol {
    name  : IString,
    serial: u64
  },
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct NodeKey {
  pub kind    : Kind,
  pub children: Vec<SlotIndex>,
  pub payload : NodePayload,
}

impl NodeKey {
  pub fn new(kind: Kind, children: Vec<SlotIndex>) -> Self {
    NodeKey { kind, children, payload: NodePayload::None }
  }

  pub fn constant(constant: Constant) -> Self {
    NodeKey {
      kind    : constant.payload_type().constant_kind(),
      children: vec![],
      payload : NodePayload::Constant(constant),
    }
  }

  /// The children that are arguments, skipping an operator.
  #[inline(always)]
  pub fn arguments(&self) -> &[SlotIndex] {
    if self.kind.is_parameterized() {
      &self.children[1..]
    } else {
      &self.children
    }
  }

  #[inline(always)]
  pub fn operator(&self) -> Option<SlotIndex> {
    if self.kind.is_parameterized() {
      self.children.first().copied()
    } else {
      None
    }
  }
}

impl Interned for NodeKey {
  #[inline(always)]
  fn children(&self) -> &[SlotIndex] {
    &self.children
  }
}

#[derive(Default, Debug)]
pub(crate) struct NodeAttribute {
  /// A share on the node's sort in the sort table, once known.
  pub sort: Option<SlotIndex>,
}

pub(crate) type NodeTable = HashConsTable<NodeKey, NodeAttribute>;
