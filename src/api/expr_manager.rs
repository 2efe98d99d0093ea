/*!

The `ExprManager` is the context for one solving session. It owns the canonical node and sort tables, and every term
and sort is built through it. Managers are independent: terms of two managers are never equal, and combining them
fails with `ExprError::ForeignManager`.

An `ExprManager` value is itself a cheap handle. Cloning it, or asking an `Expr` for its manager, yields another
handle onto the same tables. The tables are torn down when the last manager, expression, or sort handle is dropped.

```rust
use smtexpr::api::{ExprManager, Kind};

let em = ExprManager::new();
let x  = em.mk_var("x", &em.integer_sort()).unwrap();
let y  = em.mk_var("y", &em.integer_sort()).unwrap();

let sum   = em.mk_expr(Kind::Plus, &[x.clone(), y.clone()]).unwrap();
let again = em.mk_expr(Kind::Plus, &[x, y]).unwrap();
assert_eq!(sum, again);
assert_eq!(sum.to_string(), "(+ x y)");
```

*/

use std::fmt::{Debug, Formatter};

use crate::{
  abstractions::{IString, RcCell},
  api::{
    bool_expr::BoolExpr,
    constant::{BitVector, ConstantValue, Rational},
    datatype::{DatatypeDecl, SelectorRange},
    error::{ExprError, ExprResult},
    expr::Expr,
    kind::Kind,
    sort::Sort
  },
  core::{
    allocator::SlotIndex,
    sort::{ConstructorDef, RangeDef, SelectorDef},
    ManagerCore
  }
};

/// Initial sizes of the manager's tables. The tables grow as needed.
#[derive(Copy, Clone, Debug)]
pub struct ManagerOptions {
  pub node_capacity: usize,
  pub sort_capacity: usize,
}

impl Default for ManagerOptions {
  fn default() -> Self {
    ManagerOptions {
      node_capacity: 1024,
      sort_capacity: 64,
    }
  }
}

#[derive(Clone)]
pub struct ExprManager {
  core: RcCell<ManagerCore>,
}

impl Default for ExprManager {
  fn default() -> Self {
    ExprManager::new()
  }
}

impl ExprManager {
  pub fn new() -> Self {
    ExprManager::with_options(ManagerOptions::default())
  }

  pub fn with_options(options: ManagerOptions) -> Self {
    ExprManager { core: RcCell::new(ManagerCore::new(&options)) }
  }

  pub(crate) fn from_core(core: RcCell<ManagerCore>) -> Self {
    ExprManager { core }
  }

  // region Handle plumbing

  fn wrap_expr(&self, index: SlotIndex) -> Expr {
    Expr::from_raw(self.core.clone(), index)
  }

  fn wrap_sort(&self, index: SlotIndex) -> Sort {
    Sort::from_raw(self.core.clone(), index)
  }

  fn expr_indices(&self, exprs: &[Expr]) -> ExprResult<Vec<SlotIndex>> {
    exprs.iter().map(|expr| expr.index_in(&self.core)).collect()
  }

  fn sort_indices(&self, sorts: &[Sort]) -> ExprResult<Vec<SlotIndex>> {
    sorts.iter().map(|sort| sort.index_in(&self.core)).collect()
  }

  // endregion

  // region Builtin sorts

  fn builtin_sort(&self, kind: Kind) -> Sort {
    let index = self.core.borrow_mut().mk_builtin_sort(kind);
    self.wrap_sort(index)
  }

  pub fn boolean_sort(&self) -> Sort {
    self.builtin_sort(Kind::BooleanSort)
  }

  pub fn integer_sort(&self) -> Sort {
    self.builtin_sort(Kind::IntegerSort)
  }

  pub fn real_sort(&self) -> Sort {
    self.builtin_sort(Kind::RealSort)
  }

  pub fn string_sort(&self) -> Sort {
    self.builtin_sort(Kind::StringSort)
  }

  pub fn rounding_mode_sort(&self) -> Sort {
    self.builtin_sort(Kind::RoundingModeSort)
  }

  // endregion Builtin sorts

  // region Sort factories

  pub fn mk_bit_vector_sort(&self, width: u32) -> ExprResult<Sort> {
    let index = self.core.borrow_mut().mk_bit_vector_sort(width)?;
    Ok(self.wrap_sort(index))
  }

  pub fn mk_floating_point_sort(&self, exponent: u32, significand: u32) -> ExprResult<Sort> {
    let index = self.core.borrow_mut().mk_floating_point_sort(exponent, significand)?;
    Ok(self.wrap_sort(index))
  }

  pub fn mk_array_sort(&self, index_sort: &Sort, element_sort: &Sort) -> ExprResult<Sort> {
    let index_sort   = index_sort.index_in(&self.core)?;
    let element_sort = element_sort.index_in(&self.core)?;
    let index = self.core.borrow_mut().mk_array_sort(index_sort, element_sort)?;
    Ok(self.wrap_sort(index))
  }

  pub fn mk_set_sort(&self, element_sort: &Sort) -> ExprResult<Sort> {
    let element_sort = element_sort.index_in(&self.core)?;
    let index = self.core.borrow_mut().mk_set_sort(element_sort)?;
    Ok(self.wrap_sort(index))
  }

  pub fn mk_tuple_sort(&self, component_sorts: &[Sort]) -> ExprResult<Sort> {
    let components = self.sort_indices(component_sorts)?;
    let index = self.core.borrow_mut().mk_tuple_sort(&components)?;
    Ok(self.wrap_sort(index))
  }

  pub fn mk_function_sort(&self, domain_sorts: &[Sort], codomain_sort: &Sort) -> ExprResult<Sort> {
    let domains  = self.sort_indices(domain_sorts)?;
    let codomain = codomain_sort.index_in(&self.core)?;
    let index = self.core.borrow_mut().mk_function_sort(&domains, codomain)?;
    Ok(self.wrap_sort(index))
  }

  /// An uninterpreted sort. Sorts with equal names and parameters are the same sort.
  pub fn mk_uninterpreted_sort(&self, name: &str, param_sorts: &[Sort]) -> ExprResult<Sort> {
    let params = self.sort_indices(param_sorts)?;
    let index  = self.core.borrow_mut().mk_uninterpreted_sort(IString::from(name), &params)?;
    Ok(self.wrap_sort(index))
  }

  pub fn mk_sort_constructor_sort(&self, name: &str, arity: usize) -> Sort {
    let index = self.core.borrow_mut().mk_sort_constructor_sort(IString::from(name), arity);
    self.wrap_sort(index)
  }

  /// A placeholder for use in parametric datatype declarations.
  pub fn mk_param_sort(&self, name: &str) -> Sort {
    let index = self.core.borrow_mut().mk_param_sort(IString::from(name));
    self.wrap_sort(index)
  }

  /// Declares a datatype. Every call declares a new datatype, so two declarations with the same name yield different
  /// sorts.
  pub fn mk_datatype_sort(&self, declaration: &DatatypeDecl) -> ExprResult<Sort> {
    let params = self.sort_indices(&declaration.params)?;

    let mut constructors = Vec::with_capacity(declaration.constructors.len());
    for constructor in &declaration.constructors {
      let mut selectors = Vec::with_capacity(constructor.selectors.len());
      for (name, range) in &constructor.selectors {
        let range = match range {
          SelectorRange::Sort(sort) => RangeDef::Sort(sort.index_in(&self.core)?),
          SelectorRange::SelfSort   => RangeDef::SelfSort,
        };
        selectors.push(SelectorDef { name: name.clone(), range });
      }
      constructors.push(ConstructorDef { name: constructor.name.clone(), selectors });
    }

    let index = self.core.borrow_mut().mk_datatype_sort(declaration.name.clone(), params, constructors)?;
    Ok(self.wrap_sort(index))
  }

  // endregion Sort factories

  // region Term factories

  /// A free variable. Every call creates a new variable, even for a repeated name.
  pub fn mk_var(&self, name: &str, sort: &Sort) -> ExprResult<Expr> {
    self.mk_variable(Kind::Variable, name, sort)
  }

  /// A variable for binding by a quantifier. Every call creates a new variable.
  pub fn mk_bound_var(&self, name: &str, sort: &Sort) -> ExprResult<Expr> {
    self.mk_variable(Kind::BoundVariable, name, sort)
  }

  fn mk_variable(&self, kind: Kind, name: &str, sort: &Sort) -> ExprResult<Expr> {
    let sort_index = sort.index_in(&self.core)?;
    // A variable of function sort is an uninterpreted function. Sort constructors are not sorts of terms at all.
    if sort.is_sort_constructor() {
      return Err(ExprError::MalformedTerm(format!("a variable cannot have sort {}", sort)));
    }
    let index = self.core.borrow_mut().mk_variable(kind, IString::from(name), sort_index);
    Ok(self.wrap_expr(index))
  }

  /// A constant, or an operator payload such as `BitVectorExtract`.
  pub fn mk_const<T: ConstantValue>(&self, value: T) -> Expr {
    let index = self.core.borrow_mut().mk_constant(value.into_constant());
    self.wrap_expr(index)
  }

  pub fn mk_true(&self) -> BoolExpr {
    BoolExpr::from_boolean_valued(self.mk_const(true))
  }

  pub fn mk_false(&self) -> BoolExpr {
    BoolExpr::from_boolean_valued(self.mk_const(false))
  }

  pub fn mk_integer(&self, value: i64) -> Expr {
    self.mk_const(Rational::from_integer(value))
  }

  pub fn mk_rational(&self, numerator: i64, denominator: i64) -> ExprResult<Expr> {
    let value = Rational::new(numerator, denominator)
        .ok_or_else(|| ExprError::MalformedTerm(format!("{}/{} is not a representable rational", numerator, denominator)))?;
    Ok(self.mk_const(value))
  }

  pub fn mk_bit_vector(&self, width: u32, value: u128) -> ExprResult<Expr> {
    let value = BitVector::new(width, value)
        .ok_or_else(|| ExprError::MalformedTerm(format!("bit-vector constants have 1 to 128 bits, not {}", width)))?;
    Ok(self.mk_const(value))
  }

  pub fn mk_string(&self, value: &str) -> Expr {
    self.mk_const(IString::from(value))
  }

  /// Applies `kind` to `children`. Parameterized kinds need `mk_expr_with_operator`.
  pub fn mk_expr(&self, kind: Kind, children: &[Expr]) -> ExprResult<Expr> {
    let children = self.expr_indices(children)?;
    let index    = self.core.borrow_mut().mk_expr(kind, children)?;
    Ok(self.wrap_expr(index))
  }

  /// Applies a parameterized `kind`, such as `BITVECTOR_EXTRACT` or `APPLY_UF`, with an explicit operator.
  pub fn mk_expr_with_operator(&self, kind: Kind, operator: &Expr, children: &[Expr]) -> ExprResult<Expr> {
    let operator = operator.index_in(&self.core)?;
    let children = self.expr_indices(children)?;
    let index    = self.core.borrow_mut().mk_expr_with_operator(kind, operator, &children)?;
    Ok(self.wrap_expr(index))
  }

  /// Records the sort an external type checker computed for `expr`. Assigning a different sort to a term that
  /// already has one is an error.
  pub fn assign_type(&self, expr: &Expr, sort: &Sort) -> ExprResult<()> {
    let node = expr.index_in(&self.core)?;
    let sort = sort.index_in(&self.core)?;
    self.core.borrow_mut().assign_type(node, sort)
  }

  // endregion Term factories

  // region Statistics

  /// Live term nodes, operators and constants included.
  pub fn node_count(&self) -> usize {
    self.core.borrow().nodes.len()
  }

  /// Live sorts, builtin sorts included.
  pub fn sort_count(&self) -> usize {
    self.core.borrow().sorts.len()
  }

  /// Declared datatypes, instances included.
  pub fn datatype_count(&self) -> usize {
    self.core.borrow().datatypes.len()
  }

  // endregion Statistics
}

impl PartialEq for ExprManager {
  fn eq(&self, other: &Self) -> bool {
    RcCell::ptr_eq(&self.core, &other.core)
  }
}

impl Eq for ExprManager {}

impl Debug for ExprManager {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "ExprManager#{}", self.core.borrow().id)
  }
}
