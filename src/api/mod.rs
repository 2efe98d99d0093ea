/*!

The public API of the library.

Everything starts from an [`ExprManager`](expr_manager::ExprManager). It owns the canonical tables of term nodes and
sorts for one solving session. Its factory methods return [`Expr`](expr::Expr) and [`Sort`](sort::Sort) handles,
which are cheap to clone, share the underlying canonical entry, and keep the manager's tables alive for as long as
any handle exists.

*/

pub mod kind;
pub mod constant;
pub mod error;
pub mod expr;
pub mod bool_expr;
pub mod sort;
pub mod datatype;
pub mod expr_manager;

#[cfg(test)]
mod tests;

use std::fmt::{Display, Formatter};

// Small utility types used throughout
/// The number of children a kind admits. For sort kinds, the number of component sorts.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Arity {
  /// Exactly this many.
  Value(usize),
  /// At least this many.
  Variadic(usize)
}

impl Arity {
  /// Does a node with `count` children satisfy this arity?
  #[inline(always)]
  pub fn admits(self, count: usize) -> bool {
    match self {
      Arity::Value(n)    => count == n,
      Arity::Variadic(n) => count >= n,
    }
  }

  #[inline(always)]
  pub fn minimum(self) -> usize {
    match self {
      Arity::Value(n) | Arity::Variadic(n) => n,
    }
  }
}

impl Display for Arity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Arity::Value(n)    => write!(f, "{}", n),
      Arity::Variadic(n) => write!(f, "at least {}", n),
    }
  }
}

// Reexports to flatten the public surface
pub use bool_expr::BoolExpr;
pub use constant::{
  BitVector,
  BitVectorExtract,
  BitVectorRepeat,
  BitVectorSignExtend,
  BitVectorZeroExtend,
  Constant,
  ConstantValue,
  FloatingPoint,
  PayloadType,
  Rational,
  RoundingMode
};
pub use datatype::{ConstructorDecl, Datatype, DatatypeConstructor, DatatypeDecl, DatatypeSelector, SelectorRange};
pub use error::{ExprError, ExprResult};
pub use expr::Expr;
pub use expr_manager::{ExprManager, ManagerOptions};
pub use kind::{Kind, KindAttribute, KindClass, OperatorSpec};
pub use sort::Sort;
pub use crate::core::format::{FormatStyle, Formattable};
