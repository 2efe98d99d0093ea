/*!

Datatype declarations and the read-only view of a declared datatype.

A declaration is assembled outside the manager and handed to `ExprManager::mk_datatype_sort`, which validates it:

 - there is at least one constructor, and constructor names are distinct;
 - selector names are distinct within a constructor;
 - the parameters are distinct `PARAM_SORT`s, and every `PARAM_SORT` a selector mentions is one of them;
 - at least one constructor does not refer back to the datatype, so the datatype has finite values.

```rust
use smtexpr::api::{ConstructorDecl, DatatypeDecl, ExprManager, SelectorRange};

let em = ExprManager::new();
let t  = em.mk_param_sort("T");

let mut decl = DatatypeDecl::parametric("paramlist", vec![t.clone()]);
decl.add_constructor(
  ConstructorDecl::new("cons")
      .with_selector("head", SelectorRange::Sort(t))
      .with_selector("tail", SelectorRange::SelfSort)
);
decl.add_constructor(ConstructorDecl::new("nil"));

let paramlist = em.mk_datatype_sort(&decl).unwrap();
let int_list  = paramlist.instantiate(&[em.integer_sort()]).unwrap();
let head      = int_list.datatype().unwrap().constructor("cons").unwrap().selector("head").unwrap();
assert_eq!(head.range(), em.integer_sort());
```

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::{IString, RcCell},
  api::sort::Sort,
  core::{
    sort::{ConstructorDef, DatatypeDef, DatatypeIndex, RangeDef},
    ManagerCore
  }
};

// region Declarations

/// The range of a selector: an existing sort, or the datatype being declared.
pub enum SelectorRange {
  Sort(Sort),
  SelfSort,
}

pub struct ConstructorDecl {
  pub(crate) name     : IString,
  pub(crate) selectors: Vec<(IString, SelectorRange)>,
}

impl ConstructorDecl {
  pub fn new(name: &str) -> Self {
    ConstructorDecl {
      name     : IString::from(name),
      selectors: Vec::new(),
    }
  }

  pub fn add_selector(&mut self, name: &str, range: SelectorRange) {
    self.selectors.push((IString::from(name), range));
  }

  pub fn with_selector(mut self, name: &str, range: SelectorRange) -> Self {
    self.add_selector(name, range);
    self
  }
}

pub struct DatatypeDecl {
  pub(crate) name        : IString,
  pub(crate) params      : Vec<Sort>,
  pub(crate) constructors: Vec<ConstructorDecl>,
}

impl DatatypeDecl {
  pub fn new(name: &str) -> Self {
    DatatypeDecl::parametric(name, vec![])
  }

  /// A datatype over the given `PARAM_SORT` placeholders.
  pub fn parametric(name: &str, params: Vec<Sort>) -> Self {
    DatatypeDecl {
      name        : IString::from(name),
      params,
      constructors: Vec::new(),
    }
  }

  pub fn add_constructor(&mut self, constructor: ConstructorDecl) {
    self.constructors.push(constructor);
  }
}

// endregion Declarations

// region Views

/// A declared datatype. Datatypes live as long as their manager.
#[derive(Clone)]
pub struct Datatype {
  manager: RcCell<ManagerCore>,
  index  : DatatypeIndex,
}

impl Datatype {
  pub(crate) fn new(manager: RcCell<ManagerCore>, index: DatatypeIndex) -> Self {
    Datatype { manager, index }
  }

  fn with_definition<R>(&self, f: impl FnOnce(&DatatypeDef) -> R) -> R {
    let core = self.manager.borrow();
    f(core.datatype(self.index))
  }

  pub fn name(&self) -> IString {
    self.with_definition(|definition| definition.name.clone())
  }

  /// The sort of this datatype. For an instance, the instantiated sort.
  pub fn sort(&self) -> Sort {
    let sort = self.with_definition(|definition| definition.sort);
    Sort::share(&self.manager, sort)
  }

  pub fn is_parametric(&self) -> bool {
    self.with_definition(|definition| definition.is_parametric())
  }

  /// Was this datatype produced by `Sort::instantiate`?
  pub fn is_instance(&self) -> bool {
    self.with_definition(|definition| definition.instance_of.is_some())
  }

  pub fn param_sorts(&self) -> Vec<Sort> {
    let params = self.with_definition(|definition| definition.params.clone());
    params.into_iter().map(|param| Sort::share(&self.manager, param)).collect()
  }

  pub fn num_constructors(&self) -> usize {
    self.with_definition(|definition| definition.constructors.len())
  }

  pub fn constructors(&self) -> Vec<DatatypeConstructor> {
    (0..self.num_constructors())
        .map(|position| DatatypeConstructor { datatype: self.clone(), position })
        .collect()
  }

  pub fn constructor(&self, name: &str) -> Option<DatatypeConstructor> {
    let position = self.with_definition(|definition| {
      definition.constructors.iter().position(|constructor| &*constructor.name == name)
    })?;
    Some(DatatypeConstructor { datatype: self.clone(), position })
  }
}

impl PartialEq for Datatype {
  fn eq(&self, other: &Self) -> bool {
    self.index == other.index && RcCell::ptr_eq(&self.manager, &other.manager)
  }
}

impl Display for Datatype {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.sort())
  }
}

#[derive(Clone)]
pub struct DatatypeConstructor {
  datatype: Datatype,
  position: usize,
}

impl DatatypeConstructor {
  fn with_definition<R>(&self, f: impl FnOnce(&ConstructorDef) -> R) -> R {
    self.datatype.with_definition(|definition| f(&definition.constructors[self.position]))
  }

  pub fn datatype(&self) -> &Datatype {
    &self.datatype
  }

  pub fn name(&self) -> IString {
    self.with_definition(|constructor| constructor.name.clone())
  }

  /// Does some selector of this constructor refer back to the datatype?
  pub fn is_recursive(&self) -> bool {
    self.with_definition(|constructor| constructor.is_recursive())
  }

  pub fn num_selectors(&self) -> usize {
    self.with_definition(|constructor| constructor.selectors.len())
  }

  pub fn selectors(&self) -> Vec<DatatypeSelector> {
    (0..self.num_selectors())
        .map(|position| DatatypeSelector { constructor: self.clone(), position })
        .collect()
  }

  pub fn selector(&self, name: &str) -> Option<DatatypeSelector> {
    let position = self.with_definition(|constructor| {
      constructor.selectors.iter().position(|selector| &*selector.name == name)
    })?;
    Some(DatatypeSelector { constructor: self.clone(), position })
  }
}

#[derive(Clone)]
pub struct DatatypeSelector {
  constructor: DatatypeConstructor,
  position   : usize,
}

impl DatatypeSelector {
  pub fn constructor(&self) -> &DatatypeConstructor {
    &self.constructor
  }

  pub fn name(&self) -> IString {
    self.constructor.with_definition(|constructor| constructor.selectors[self.position].name.clone())
  }

  /// The sort this selector returns. A self-referential selector returns the datatype's own sort.
  pub fn range(&self) -> Sort {
    let range = self.constructor.with_definition(|constructor| constructor.selectors[self.position].range);
    match range {
      RangeDef::Sort(sort) => Sort::share(&self.constructor.datatype.manager, sort),
      RangeDef::SelfSort   => self.constructor.datatype.sort(),
    }
  }
}

// endregion Views
