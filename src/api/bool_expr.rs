/*!

`BoolExpr` is an `Expr` known to have boolean sort. It adds the logical connectives. Narrowing an arbitrary `Expr`
is checked: it succeeds only if the term's sort is known and boolean.

*/

use std::{
  fmt::{Debug, Display, Formatter},
  ops::Deref
};

use crate::api::{
  error::{ExprError, ExprResult},
  expr::Expr,
  kind::Kind
};

/// Always wraps a term of boolean sort; there is no null `BoolExpr`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd)]
pub struct BoolExpr(Expr);

impl BoolExpr {
  /// Narrows `expr`. Fails if it is null, has no sort yet, or has a sort other than boolean.
  pub fn new(expr: &Expr) -> ExprResult<BoolExpr> {
    match expr.sort()? {
      Some(sort) if sort.is_boolean() => Ok(BoolExpr(expr.clone())),
      Some(sort) => Err(ExprError::WrongSortKind { expected: Kind::BooleanSort.name(), actual: sort.kind() }),
      None => Err(ExprError::MalformedTerm(format!("{} has no sort, so it cannot be narrowed to boolean", expr))),
    }
  }

  /// Wraps a term built from a boolean-valued kind.
  pub(crate) fn from_boolean_valued(expr: Expr) -> BoolExpr {
    BoolExpr(expr)
  }

  pub fn as_expr(&self) -> &Expr {
    &self.0
  }

  pub fn into_expr(self) -> Expr {
    self.0
  }

  fn build(&self, kind: Kind, operands: &[&Expr]) -> ExprResult<Expr> {
    let manager  = self.0.manager()?;
    let children = operands.iter().map(|&operand| operand.clone()).collect::<Vec<_>>();
    manager.mk_expr(kind, &children)
  }

  fn connective(&self, kind: Kind, operands: &[&Expr]) -> ExprResult<BoolExpr> {
    self.build(kind, operands).map(BoolExpr)
  }

  // region Connectives

  pub fn not_expr(&self) -> ExprResult<BoolExpr> {
    self.connective(Kind::Not, &[&self.0])
  }

  pub fn and_expr(&self, right: &BoolExpr) -> ExprResult<BoolExpr> {
    self.connective(Kind::And, &[&self.0, &right.0])
  }

  pub fn or_expr(&self, right: &BoolExpr) -> ExprResult<BoolExpr> {
    self.connective(Kind::Or, &[&self.0, &right.0])
  }

  pub fn xor_expr(&self, right: &BoolExpr) -> ExprResult<BoolExpr> {
    self.connective(Kind::Xor, &[&self.0, &right.0])
  }

  pub fn iff_expr(&self, right: &BoolExpr) -> ExprResult<BoolExpr> {
    self.connective(Kind::Iff, &[&self.0, &right.0])
  }

  pub fn imp_expr(&self, right: &BoolExpr) -> ExprResult<BoolExpr> {
    self.connective(Kind::Implies, &[&self.0, &right.0])
  }

  /// `(ite self then_branch else_branch)` over boolean branches.
  pub fn ite_expr(&self, then_branch: &BoolExpr, else_branch: &BoolExpr) -> ExprResult<BoolExpr> {
    self.connective(Kind::Ite, &[&self.0, &then_branch.0, &else_branch.0])
  }

  /// `(ite self then_branch else_branch)` over branches of any sort.
  pub fn ite_term(&self, then_branch: &Expr, else_branch: &Expr) -> ExprResult<Expr> {
    self.build(Kind::Ite, &[&self.0, then_branch, else_branch])
  }

  // endregion Connectives
}

impl Deref for BoolExpr {
  type Target = Expr;

  fn deref(&self) -> &Expr {
    &self.0
  }
}

impl TryFrom<Expr> for BoolExpr {
  type Error = ExprError;

  fn try_from(expr: Expr) -> ExprResult<BoolExpr> {
    BoolExpr::new(&expr)
  }
}

impl From<BoolExpr> for Expr {
  fn from(expr: BoolExpr) -> Expr {
    expr.0
  }
}

impl Display for BoolExpr {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(&self.0, f)
  }
}

impl Debug for BoolExpr {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Debug::fmt(&self.0, f)
  }
}
