/*!

`Expr` is the public handle to a term. A handle owns one share on a canonical node in its manager's node table:
cloning takes another share, dropping gives it back, and a node lives exactly as long as some handle or parent node
holds a share on it.

Two handles are equal when they name the same canonical node of the same manager. Because of hash-consing this
coincides with structural equality, so comparing handles is O(1). Ordering follows node creation order, so a
subterm always sorts before any term built from it. The null expression, `Expr::default()`, is equal only to itself
and sorts before every other expression.

Handles do not carry a fixed manager. Assigning `a = b.clone()` releases `a`'s node in `a`'s old manager and makes
`a` a handle into `b`'s manager. Operations that combine handles of different managers fail with
`ExprError::ForeignManager`.

*/

use std::{
  cmp::Ordering,
  fmt::{Debug, Display, Formatter},
  hash::{Hash, Hasher},
  io::{self, Write}
};

use crate::{
  abstractions::{IString, NatSet, RcCell},
  api::{
    Arity,
    constant::ConstantValue,
    error::{ExprError, ExprResult},
    expr_manager::ExprManager,
    kind::Kind,
    sort::Sort
  },
  core::{
    allocator::SlotIndex,
    format::{node_repr, write_tree, FormatStyle, Formattable},
    node::NodePayload,
    ManagerCore
  }
};

pub(crate) struct NodeRef {
  pub(crate) manager: RcCell<ManagerCore>,
  pub(crate) index  : SlotIndex,
}

#[derive(Default)]
pub struct Expr {
  node: Option<NodeRef>,
}

impl Expr {
  /// The null expression.
  pub fn null() -> Expr {
    Expr::default()
  }

  /// Wraps a share the caller already holds on `index`.
  pub(crate) fn from_raw(manager: RcCell<ManagerCore>, index: SlotIndex) -> Expr {
    Expr { node: Some(NodeRef { manager, index }) }
  }

  /// Takes a new share on each of `indices` and wraps them. The core must not be borrowed.
  pub(crate) fn share_all(manager: &RcCell<ManagerCore>, indices: Vec<SlotIndex>) -> Vec<Expr> {
    {
      let mut core = manager.borrow_mut();
      for &index in &indices {
        core.acquire_node(index);
      }
    }
    indices.into_iter().map(|index| Expr::from_raw(manager.clone(), index)).collect()
  }

  pub(crate) fn node_ref(&self) -> ExprResult<&NodeRef> {
    self.node.as_ref().ok_or(ExprError::NullExpression)
  }

  /// The node index of this expression, checked to belong to `manager`.
  pub(crate) fn index_in(&self, manager: &RcCell<ManagerCore>) -> ExprResult<SlotIndex> {
    let node = self.node_ref()?;
    if RcCell::ptr_eq(&node.manager, manager) {
      Ok(node.index)
    } else {
      Err(ExprError::ForeignManager)
    }
  }

  /// Runs `f` with the node's manager borrowed.
  fn inspect<R>(&self, f: impl FnOnce(&ManagerCore, SlotIndex) -> R) -> ExprResult<R> {
    let node = self.node_ref()?;
    let core = node.manager.borrow();
    Ok(f(&core, node.index))
  }

  // region Structure

  #[inline(always)]
  pub fn is_null(&self) -> bool {
    self.node.is_none()
  }

  pub fn kind(&self) -> ExprResult<Kind> {
    self.inspect(|core, index| core.node_key(index).kind)
  }

  /// The number of arguments, not counting an operator.
  pub fn num_children(&self) -> ExprResult<usize> {
    self.inspect(|core, index| core.node_key(index).arguments().len())
  }

  /// The arguments, not including an operator.
  pub fn children(&self) -> ExprResult<Vec<Expr>> {
    let indices = self.inspect(|core, index| core.node_key(index).arguments().to_vec())?;
    Ok(Expr::share_all(&self.node_ref()?.manager, indices))
  }

  pub fn child(&self, position: usize) -> ExprResult<Expr> {
    let found = self.inspect(|core, index| {
      let arguments = core.node_key(index).arguments();
      arguments.get(position).copied().ok_or(arguments.len())
    })?;

    match found {
      Ok(child) => Ok(Expr::share_all(&self.node_ref()?.manager, vec![child]).remove(0)),
      Err(count) => Err(ExprError::ArityMismatch {
        what    : "child position",
        expected: Arity::Value(count),
        actual  : position,
      }),
    }
  }

  /// Is there an explicit operator, as for `(_ extract 7 0)` or the function of an uninterpreted application?
  pub fn has_operator(&self) -> bool {
    self.inspect(|core, index| core.node_key(index).operator().is_some()).unwrap_or(false)
  }

  pub fn operator(&self) -> ExprResult<Expr> {
    let operator = self.inspect(|core, index| {
      let key = core.node_key(index);
      key.operator().ok_or(key.kind)
    })?;

    match operator {
      Ok(operator) => Ok(Expr::share_all(&self.node_ref()?.manager, vec![operator]).remove(0)),
      Err(kind) => Err(ExprError::WrongTermKind { expected: "a parameterized kind", actual: kind }),
    }
  }

  /// The sort assigned to this term, or `None` if it has not been computed.
  pub fn sort(&self) -> ExprResult<Option<Sort>> {
    let sort = self.inspect(|core, index| core.node_sort(index))?;
    let manager = &self.node_ref()?.manager;
    Ok(sort.map(|sort| Sort::share(manager, sort)))
  }

  /// Is this a constant or an operator payload node?
  pub fn is_const(&self) -> bool {
    self.kind().map(Kind::is_constant_kind).unwrap_or(false)
  }

  /// Does this node have no children? Constants and variables are atomic.
  pub fn is_atomic(&self) -> bool {
    self.inspect(|core, index| core.node_key(index).children.is_empty()).unwrap_or(false)
  }

  /// Reads the constant payload as a `T`. Fails unless this node's kind carries a payload of type `T`.
  pub fn constant<T: ConstantValue>(&self) -> ExprResult<T> {
    self.inspect(|core, index| {
      let key = core.node_key(index);
      let mismatch = ExprError::WrongConstType { kind: key.kind, requested: T::PAYLOAD };

      if key.kind.payload_type() != Some(T::PAYLOAD) {
        return Err(mismatch);
      }
      match &key.payload {
        NodePayload::Constant(constant) => T::from_constant(constant).ok_or(mismatch),
        _ => Err(mismatch),
      }
    })?
  }

  /// The name of a variable.
  pub fn name(&self) -> ExprResult<IString> {
    self.inspect(|core, index| {
      let key = core.node_key(index);
      match &key.payload {
        NodePayload::Symbol { name, .. } => Ok(name.clone()),
        _ => Err(ExprError::WrongTermKind { expected: "a variable", actual: key.kind }),
      }
    })?
  }

  /// Number of distinct nodes in the DAG rooted here, operators included. Zero for the null expression.
  pub fn dag_size(&self) -> usize {
    self.inspect(|core, root| {
      let mut visited  = NatSet::new();
      let mut worklist = vec![root];
      while let Some(current) = worklist.pop() {
        if visited.insert(current.idx()) {
          worklist.extend_from_slice(&core.node_key(current).children);
        }
      }
      visited.len()
    }).unwrap_or(0)
  }

  // endregion Structure

  // region Identity

  /// The creation-order id of the node.
  pub fn id(&self) -> ExprResult<u64> {
    self.inspect(|core, index| core.nodes.id(index))
  }

  pub fn manager(&self) -> ExprResult<ExprManager> {
    Ok(ExprManager::from_core(self.node_ref()?.manager.clone()))
  }

  /// Total order within one manager: creation order, with null first.
  pub fn compare(&self, other: &Expr) -> ExprResult<Ordering> {
    match (&self.node, &other.node) {
      (None, None)    => Ok(Ordering::Equal),
      (None, Some(_)) => Ok(Ordering::Less),
      (Some(_), None) => Ok(Ordering::Greater),
      (Some(left), Some(right)) => {
        if !RcCell::ptr_eq(&left.manager, &right.manager) {
          return Err(ExprError::ForeignManager);
        }
        let core = left.manager.borrow();
        Ok(core.nodes.id(left.index).cmp(&core.nodes.id(right.index)))
      }
    }
  }

  // endregion Identity

  // region Output

  pub fn to_stream(&self, out: &mut dyn Write) -> io::Result<()> {
    write!(out, "{}", self)
  }

  /// Prints the term as an indented tree.
  pub fn print_ast(&self, out: &mut dyn Write, indent: usize) -> io::Result<()> {
    match &self.node {
      None => writeln!(out, "{}null", " ".repeat(indent)),
      Some(node) => write_tree(&node.manager.borrow(), node.index, indent, out),
    }
  }

  // endregion Output
}

impl Formattable for Expr {
  fn repr(&self, style: FormatStyle) -> String {
    self.inspect(|core, index| node_repr(core, index, style))
        .unwrap_or_else(|_| "null".to_string())
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Default))
  }
}

impl Debug for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Debug))
  }
}

impl Clone for Expr {
  fn clone(&self) -> Self {
    match &self.node {
      None => Expr::null(),
      Some(node) => {
        node.manager.borrow_mut().acquire_node(node.index);
        Expr::from_raw(node.manager.clone(), node.index)
      }
    }
  }
}

impl Drop for Expr {
  fn drop(&mut self) {
    if let Some(node) = self.node.take() {
      node.manager.borrow_mut().release_node(node.index);
    }
  }
}

impl PartialEq for Expr {
  fn eq(&self, other: &Self) -> bool {
    match (&self.node, &other.node) {
      (None, None) => true,
      (Some(left), Some(right)) => left.index == right.index && RcCell::ptr_eq(&left.manager, &right.manager),
      _ => false,
    }
  }
}

impl Eq for Expr {}

/// Undefined (`None`) across managers.
impl PartialOrd for Expr {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    self.compare(other).ok()
  }
}

impl Hash for Expr {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.node.as_ref().map(|node| node.index).hash(state);
  }
}
