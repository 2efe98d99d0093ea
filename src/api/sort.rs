/*!

`Sort` is the public handle to a sort. Like `Expr`, it owns one share on a canonical entry, this time in the manager's
sort table, and equal handles name the same canonical sort.

Every kind-specific accessor checks the sort's kind first and fails with `ExprError::WrongSortKind` on a mismatch. An
accessor never answers a question about a sort of the wrong kind with a default value.

```rust
use smtexpr::api::{ExprError, ExprManager};

let em = ExprManager::new();
let bv = em.mk_bit_vector_sort(32).unwrap();
assert_eq!(bv.bv_size().unwrap(), 32);
assert!(matches!(bv.array_index_sort(), Err(ExprError::WrongSortKind { .. })));
```

*/

use std::{
  cmp::Ordering,
  fmt::{Debug, Display, Formatter},
  hash::{Hash, Hasher}
};

use paste::paste;

use crate::{
  abstractions::{IString, RcCell},
  api::{
    datatype::Datatype,
    error::{ExprError, ExprResult},
    expr_manager::ExprManager,
    kind::Kind
  },
  core::{
    allocator::SlotIndex,
    format::{sort_repr, FormatStyle, Formattable},
    sort::{SortKey, SortPayload},
    ManagerCore
  }
};

pub struct Sort {
  manager: RcCell<ManagerCore>,
  index  : SlotIndex,
}

/// Generates `is_<kind>()` for each sort kind, e.g. `is_bit_vector()` for `BITVECTOR_SORT`.
macro_rules! sort_kind_predicates {
  ($($kind:ident),* $(,)?) => {
    paste! {
      $(
        #[inline(always)]
        pub fn [<is_ $kind:snake>](&self) -> bool {
          self.kind() == Kind::[<$kind Sort>]
        }
      )*
    }
  };
}

impl Sort {
  /// Wraps a share the caller already holds on `index`.
  pub(crate) fn from_raw(manager: RcCell<ManagerCore>, index: SlotIndex) -> Sort {
    Sort { manager, index }
  }

  /// Takes a new share on `index` and wraps it. The core must not be borrowed.
  pub(crate) fn share(manager: &RcCell<ManagerCore>, index: SlotIndex) -> Sort {
    manager.borrow_mut().acquire_sort(index);
    Sort::from_raw(manager.clone(), index)
  }

  fn share_all(&self, indices: Vec<SlotIndex>) -> Vec<Sort> {
    indices.into_iter().map(|index| Sort::share(&self.manager, index)).collect()
  }

  /// The sort index, checked to belong to `manager`.
  pub(crate) fn index_in(&self, manager: &RcCell<ManagerCore>) -> ExprResult<SlotIndex> {
    if RcCell::ptr_eq(&self.manager, manager) {
      Ok(self.index)
    } else {
      Err(ExprError::ForeignManager)
    }
  }

  /// Applies `f` to the sort's key if the sort has kind `required`.
  fn project<R>(&self, required: Kind, f: impl FnOnce(&ManagerCore, &SortKey) -> R) -> ExprResult<R> {
    let core = self.manager.borrow();
    let key  = core.sort_key(self.index);
    if key.kind != required {
      return Err(ExprError::WrongSortKind { expected: required.name(), actual: key.kind });
    }
    Ok(f(&core, key))
  }

  // region Identity and kind

  pub fn kind(&self) -> Kind {
    self.manager.borrow().sort_kind(self.index)
  }

  /// The creation-order id of the sort.
  pub fn id(&self) -> u64 {
    self.manager.borrow().sorts.id(self.index)
  }

  pub fn manager(&self) -> ExprManager {
    ExprManager::from_core(self.manager.clone())
  }

  sort_kind_predicates!(
    Boolean,
    Integer,
    Real,
    String,
    RoundingMode,
    BitVector,
    FloatingPoint,
    Array,
    Set,
    Tuple,
    Function,
    Datatype,
    SortConstructor,
    Uninterpreted,
    Param,
  );

  /// Can a term have this sort? Function and sort-constructor sorts are not first-class.
  pub fn is_first_class(&self) -> bool {
    self.manager.borrow().sort_key(self.index).is_first_class()
  }

  pub fn is_parametric_datatype(&self) -> bool {
    self.project(Kind::DatatypeSort, |_, key| !key.children.is_empty()).unwrap_or(false)
  }

  // endregion Identity and kind

  // region Bit-vectors and floating-point

  pub fn bv_size(&self) -> ExprResult<u32> {
    self.project(Kind::BitVectorSort, |_, key| match key.payload {
      SortPayload::Width(width) => width,
      _ => unreachable!("a BITVECTOR_SORT key always carries its width"),
    })
  }

  fn fp_sizes(&self) -> ExprResult<(u32, u32)> {
    self.project(Kind::FloatingPointSort, |_, key| match key.payload {
      SortPayload::FloatingPoint { exponent, significand } => (exponent, significand),
      _ => unreachable!("a FLOATINGPOINT_SORT key always carries its widths"),
    })
  }

  pub fn fp_exponent_size(&self) -> ExprResult<u32> {
    self.fp_sizes().map(|(exponent, _)| exponent)
  }

  pub fn fp_significand_size(&self) -> ExprResult<u32> {
    self.fp_sizes().map(|(_, significand)| significand)
  }

  // endregion

  // region Arrays, sets, tuples

  pub fn array_index_sort(&self) -> ExprResult<Sort> {
    let index = self.project(Kind::ArraySort, |_, key| key.children[0])?;
    Ok(Sort::share(&self.manager, index))
  }

  pub fn array_element_sort(&self) -> ExprResult<Sort> {
    let element = self.project(Kind::ArraySort, |_, key| key.children[1])?;
    Ok(Sort::share(&self.manager, element))
  }

  pub fn set_element_sort(&self) -> ExprResult<Sort> {
    let element = self.project(Kind::SetSort, |_, key| key.children[0])?;
    Ok(Sort::share(&self.manager, element))
  }

  pub fn tuple_length(&self) -> ExprResult<usize> {
    self.project(Kind::TupleSort, |_, key| key.children.len())
  }

  pub fn tuple_sorts(&self) -> ExprResult<Vec<Sort>> {
    let components = self.project(Kind::TupleSort, |_, key| key.children.clone())?;
    Ok(self.share_all(components))
  }

  // endregion

  // region Functions

  pub fn function_arity(&self) -> ExprResult<usize> {
    self.project(Kind::FunctionSort, |_, key| key.children.len() - 1)
  }

  pub fn function_domain_sorts(&self) -> ExprResult<Vec<Sort>> {
    let domains = self.project(Kind::FunctionSort, |_, key| key.children[..key.children.len() - 1].to_vec())?;
    Ok(self.share_all(domains))
  }

  pub fn function_codomain_sort(&self) -> ExprResult<Sort> {
    let codomain = self.project(Kind::FunctionSort, |_, key| key.children[key.children.len() - 1])?;
    Ok(Sort::share(&self.manager, codomain))
  }

  // endregion

  // region Named sorts

  fn named(&self, required: Kind) -> ExprResult<IString> {
    self.project(required, |_, key| match key.name() {
      Some(name) => name.clone(),
      None => unreachable!("a {} key always carries its name", required),
    })
  }

  pub fn uninterpreted_sort_name(&self) -> ExprResult<IString> {
    self.named(Kind::UninterpretedSort)
  }

  pub fn is_uninterpreted_sort_parameterized(&self) -> ExprResult<bool> {
    self.project(Kind::UninterpretedSort, |_, key| !key.children.is_empty())
  }

  pub fn uninterpreted_sort_param_sorts(&self) -> ExprResult<Vec<Sort>> {
    let params = self.project(Kind::UninterpretedSort, |_, key| key.children.clone())?;
    Ok(self.share_all(params))
  }

  pub fn sort_constructor_name(&self) -> ExprResult<IString> {
    self.named(Kind::SortConstructorSort)
  }

  pub fn sort_constructor_arity(&self) -> ExprResult<usize> {
    self.project(Kind::SortConstructorSort, |_, key| match key.payload {
      SortPayload::SortConstructor { arity, .. } => arity,
      _ => unreachable!("a SORT_CONSTRUCTOR_SORT key always carries its arity"),
    })
  }

  /// The name of a `PARAM_SORT` placeholder.
  pub fn param_sort_name(&self) -> ExprResult<IString> {
    self.named(Kind::ParamSort)
  }

  // endregion

  // region Datatypes

  pub fn datatype(&self) -> ExprResult<Datatype> {
    let index = self.project(Kind::DatatypeSort, |core, _| core.datatype_index(self.index))?
                    .expect("a DATATYPE_SORT key always carries its datatype");
    Ok(Datatype::new(self.manager.clone(), index))
  }

  /// The number of free parameters. Zero for a non-parametric or fully instantiated datatype.
  pub fn datatype_arity(&self) -> ExprResult<usize> {
    self.project(Kind::DatatypeSort, |_, key| key.children.len())
  }

  /// The free parameters. Empty for a non-parametric or fully instantiated datatype.
  pub fn datatype_param_sorts(&self) -> ExprResult<Vec<Sort>> {
    let params = self.project(Kind::DatatypeSort, |_, key| key.children.clone())?;
    Ok(self.share_all(params))
  }

  /// Substitutes `arguments` for the parameters of a parametric datatype. Repeating an instantiation returns the
  /// same sort.
  pub fn instantiate(&self, arguments: &[Sort]) -> ExprResult<Sort> {
    let arguments = arguments.iter()
                             .map(|argument| argument.index_in(&self.manager))
                             .collect::<ExprResult<Vec<_>>>();
    // A kind mismatch on `self` takes precedence over foreign arguments.
    let kind = self.kind();
    if kind != Kind::DatatypeSort {
      return Err(ExprError::WrongSortKind { expected: "DATATYPE_SORT", actual: kind });
    }

    let instance = self.manager.borrow_mut().instantiate(self.index, &arguments?)?;
    Ok(Sort::from_raw(self.manager.clone(), instance))
  }

  // endregion Datatypes
}

impl Formattable for Sort {
  fn repr(&self, style: FormatStyle) -> String {
    let core = self.manager.borrow();
    match style {
      FormatStyle::Debug => format!("{}#{}", sort_repr(&core, self.index), core.sorts.id(self.index)),
      _ => sort_repr(&core, self.index),
    }
  }
}

impl Display for Sort {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Default))
  }
}

impl Debug for Sort {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Debug))
  }
}

impl Clone for Sort {
  fn clone(&self) -> Self {
    Sort::share(&self.manager, self.index)
  }
}

impl Drop for Sort {
  fn drop(&mut self) {
    self.manager.borrow_mut().release_sort(self.index);
  }
}

impl PartialEq for Sort {
  fn eq(&self, other: &Self) -> bool {
    self.index == other.index && RcCell::ptr_eq(&self.manager, &other.manager)
  }
}

impl Eq for Sort {}

/// Creation order within one manager, `None` across managers.
impl PartialOrd for Sort {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    if !RcCell::ptr_eq(&self.manager, &other.manager) {
      return None;
    }
    let core = self.manager.borrow();
    Some(core.sorts.id(self.index).cmp(&core.sorts.id(other.index)))
  }
}

impl Hash for Sort {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.index.hash(state);
  }
}
