/*!

The mutable state behind an `ExprManager`: the node table, the sort table, and the datatype definitions. Public handles
share one `ManagerCore` through an `RcCell`.

Everything here works on raw `SlotIndex` values. A function documented as returning a share hands the caller one
reference on the returned entry, which the caller must eventually give back with `release_node` or `release_sort`.
Arguments are borrowed: the caller keeps whatever shares it held on them.

Handle destructors call back into the core, so no handle may be dropped while the core is borrowed. The API layer
converts indices into handles only after releasing its borrow.

*/

use std::sync::atomic::{AtomicU32, Ordering};

use crate::{
  abstractions::{HashMap, IString},
  api::{
    Arity,
    constant::Constant,
    error::{ExprError, ExprResult},
    kind::{Kind, OperatorSpec},
    ManagerOptions
  },
  core::{
    allocator::SlotIndex,
    node::{NodeAttribute, NodeKey, NodePayload, NodeTable},
    sort::{
      ConstructorDef,
      DatatypeDef,
      DatatypeIndex,
      RangeDef,
      SelectorDef,
      SortKey,
      SortPayload,
      SortTable
    }
  },
  log::{debug, trace}
};

static NEXT_MANAGER_ID: AtomicU32 = AtomicU32::new(1);

const BUILTIN_SORT_KINDS: [Kind; 5] = [
  Kind::BooleanSort,
  Kind::IntegerSort,
  Kind::RealSort,
  Kind::StringSort,
  Kind::RoundingModeSort,
];

pub(crate) struct ManagerCore {
  pub id        : u32,
  pub nodes     : NodeTable,
  pub sorts     : SortTable,
  pub datatypes : Vec<DatatypeDef>,
  /// Memoized instances, keyed by generic datatype and actual parameters.
  instantiations: HashMap<(DatatypeIndex, Vec<SlotIndex>), DatatypeIndex>,
  /// Makes every variable distinct.
  next_serial   : u64,
  /// Shares on the builtin sorts, which live as long as the manager.
  builtins      : Vec<SlotIndex>,
}

impl ManagerCore {
  pub fn new(options: &ManagerOptions) -> Self {
    let id = NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed);

    let mut core = ManagerCore {
      id,
      nodes         : NodeTable::with_capacity(options.node_capacity),
      sorts         : SortTable::with_capacity(options.sort_capacity),
      datatypes     : Vec::new(),
      instantiations: HashMap::new(),
      next_serial   : 0,
      builtins      : Vec::with_capacity(BUILTIN_SORT_KINDS.len()),
    };
    for kind in BUILTIN_SORT_KINDS {
      let sort = core.intern_sort(SortKey::builtin(kind));
      core.builtins.push(sort);
    }

    debug!(2, "created expression manager {}", id);
    core
  }

  // region Shares

  #[inline(always)]
  pub fn acquire_node(&mut self, node: SlotIndex) {
    self.nodes.acquire(node);
  }

  /// Gives up one share on `node`. Evicted nodes give up their share on their sort.
  pub fn release_node(&mut self, node: SlotIndex) {
    let evicted = self.nodes.release(node);
    if evicted.len() > 1 {
      trace!(5, "manager {} evicted {} nodes", self.id, evicted.len());
    }
    for entry in evicted {
      if let Some(sort) = entry.attribute.sort {
        self.release_sort(sort);
      }
    }
  }

  #[inline(always)]
  pub fn acquire_sort(&mut self, sort: SlotIndex) {
    self.sorts.acquire(sort);
  }

  pub fn release_sort(&mut self, sort: SlotIndex) {
    let evicted = self.sorts.release(sort);
    if evicted.len() > 1 {
      trace!(5, "manager {} evicted {} sorts", self.id, evicted.len());
    }
  }

  // endregion Shares

  // region Queries

  #[inline(always)]
  pub fn node_key(&self, node: SlotIndex) -> &NodeKey {
    self.nodes.key(node)
  }

  #[inline(always)]
  pub fn node_sort(&self, node: SlotIndex) -> Option<SlotIndex> {
    self.nodes.attribute(node).sort
  }

  #[inline(always)]
  pub fn sort_key(&self, sort: SlotIndex) -> &SortKey {
    self.sorts.key(sort)
  }

  #[inline(always)]
  pub fn sort_kind(&self, sort: SlotIndex) -> Kind {
    self.sorts.key(sort).kind
  }

  /// `Some(true)` if the node is known to be boolean, `None` if its sort is not known.
  pub fn is_boolean_node(&self, node: SlotIndex) -> Option<bool> {
    self.node_sort(node).map(|sort| self.sort_kind(sort) == Kind::BooleanSort)
  }

  pub fn datatype_index(&self, sort: SlotIndex) -> Option<DatatypeIndex> {
    match self.sorts.key(sort).payload {
      SortPayload::Datatype(index) => Some(index),
      _ => None,
    }
  }

  #[inline(always)]
  pub fn datatype(&self, index: DatatypeIndex) -> &DatatypeDef {
    &self.datatypes[index.idx()]
  }

  // endregion Queries

  // region Sort factories

  /// Returns a share on the canonical sort for `key`.
  fn intern_sort(&mut self, key: SortKey) -> SlotIndex {
    self.sorts.intern(key, || ()).0
  }

  /// Returns a share on one of the builtin sorts.
  pub fn mk_builtin_sort(&mut self, kind: Kind) -> SlotIndex {
    debug_assert!(BUILTIN_SORT_KINDS.contains(&kind));
    self.intern_sort(SortKey::builtin(kind))
  }

  fn check_first_class(&self, sort: SlotIndex, role: &str) -> ExprResult<()> {
    let key = self.sorts.key(sort);
    if key.is_first_class() {
      Ok(())
    } else {
      Err(ExprError::MalformedSort(format!("{} cannot be a sort of kind {}", role, key.kind)))
    }
  }

  pub fn mk_bit_vector_sort(&mut self, width: u32) -> ExprResult<SlotIndex> {
    if width == 0 {
      return Err(ExprError::MalformedSort("bit-vector width must be positive".to_string()));
    }
    Ok(self.intern_sort(SortKey::new(Kind::BitVectorSort, vec![], SortPayload::Width(width))))
  }

  pub fn mk_floating_point_sort(&mut self, exponent: u32, significand: u32) -> ExprResult<SlotIndex> {
    if exponent == 0 || significand == 0 {
      return Err(ExprError::MalformedSort(format!(
        "floating-point widths must be positive, got exponent {} and significand {}", exponent, significand
      )));
    }
    let payload = SortPayload::FloatingPoint { exponent, significand };
    Ok(self.intern_sort(SortKey::new(Kind::FloatingPointSort, vec![], payload)))
  }

  pub fn mk_array_sort(&mut self, index: SlotIndex, element: SlotIndex) -> ExprResult<SlotIndex> {
    self.check_first_class(index, "an array index")?;
    self.check_first_class(element, "an array element")?;
    Ok(self.intern_sort(SortKey::new(Kind::ArraySort, vec![index, element], SortPayload::None)))
  }

  pub fn mk_set_sort(&mut self, element: SlotIndex) -> ExprResult<SlotIndex> {
    self.check_first_class(element, "a set element")?;
    Ok(self.intern_sort(SortKey::new(Kind::SetSort, vec![element], SortPayload::None)))
  }

  pub fn mk_tuple_sort(&mut self, components: &[SlotIndex]) -> ExprResult<SlotIndex> {
    if components.is_empty() {
      return Err(ExprError::ArityMismatch {
        what    : Kind::TupleSort.name(),
        expected: Kind::TupleSort.arity(),
        actual  : 0,
      });
    }
    for &component in components {
      self.check_first_class(component, "a tuple component")?;
    }
    Ok(self.intern_sort(SortKey::new(Kind::TupleSort, components.to_vec(), SortPayload::None)))
  }

  pub fn mk_function_sort(&mut self, domains: &[SlotIndex], codomain: SlotIndex) -> ExprResult<SlotIndex> {
    if domains.is_empty() {
      return Err(ExprError::ArityMismatch {
        what    : Kind::FunctionSort.name(),
        expected: Arity::Variadic(1),
        actual  : 0,
      });
    }
    for &domain in domains {
      self.check_first_class(domain, "a function argument")?;
    }
    self.check_first_class(codomain, "a function result")?;

    let mut children = domains.to_vec();
    children.push(codomain);
    Ok(self.intern_sort(SortKey::new(Kind::FunctionSort, children, SortPayload::None)))
  }

  pub fn mk_uninterpreted_sort(&mut self, name: IString, params: &[SlotIndex]) -> ExprResult<SlotIndex> {
    for &param in params {
      self.check_first_class(param, "an uninterpreted sort parameter")?;
    }
    let key = SortKey::new(Kind::UninterpretedSort, params.to_vec(), SortPayload::Name(name));
    Ok(self.intern_sort(key))
  }

  pub fn mk_sort_constructor_sort(&mut self, name: IString, arity: usize) -> SlotIndex {
    let key = SortKey::new(Kind::SortConstructorSort, vec![], SortPayload::SortConstructor { name, arity });
    self.intern_sort(key)
  }

  pub fn mk_param_sort(&mut self, name: IString) -> SlotIndex {
    self.intern_sort(SortKey::new(Kind::ParamSort, vec![], SortPayload::Name(name)))
  }

  // endregion Sort factories

  // region Datatypes

  /// Collects the `PARAM_SORT`s occurring in `sort`, in first-occurrence order.
  fn collect_params(&self, sort: SlotIndex, found: &mut Vec<SlotIndex>) {
    let mut worklist = vec![sort];
    while let Some(current) = worklist.pop() {
      let key = self.sorts.key(current);
      if key.kind == Kind::ParamSort {
        if !found.contains(&current) {
          found.push(current);
        }
        continue;
      }
      worklist.extend(key.children.iter().rev());
      if let SortPayload::Datatype(index) = key.payload {
        if let Some((_, arguments)) = &self.datatype(index).instance_of {
          worklist.extend(arguments.iter().rev());
        }
      }
    }
  }

  /// Declares a new datatype and returns a share on its sort. Each call declares a distinct datatype, even for a
  /// repeated name.
  pub fn mk_datatype_sort(
    &mut self,
    name        : IString,
    params      : Vec<SlotIndex>,
    constructors: Vec<ConstructorDef>,
  ) -> ExprResult<SlotIndex> {
    let malformed = |message: String| Err(ExprError::MalformedSort(format!("datatype {}: {}", name, message)));

    if constructors.is_empty() {
      return malformed("a datatype needs at least one constructor".to_string());
    }

    for (position, &param) in params.iter().enumerate() {
      let kind = self.sort_kind(param);
      if kind != Kind::ParamSort {
        return malformed(format!("parameter {} is a sort of kind {}, not PARAM_SORT", position, kind));
      }
      if params[..position].contains(&param) {
        return malformed(format!("parameter {} is declared twice", self.sort_display_name(param)));
      }
    }

    for (position, constructor) in constructors.iter().enumerate() {
      if constructors[..position].iter().any(|other| other.name == constructor.name) {
        return malformed(format!("constructor {} is declared twice", constructor.name));
      }

      for (selector_position, selector) in constructor.selectors.iter().enumerate() {
        if constructor.selectors[..selector_position].iter().any(|other| other.name == selector.name) {
          return malformed(format!(
            "selector {} is declared twice in constructor {}", selector.name, constructor.name
          ));
        }

        let RangeDef::Sort(range) = selector.range else { continue; };
        self.check_first_class(range, "a selector range")?;

        let mut free = Vec::new();
        self.collect_params(range, &mut free);
        if let Some(&undeclared) = free.iter().find(|param| !params.contains(param)) {
          return malformed(format!(
            "selector {} uses the undeclared parameter {}", selector.name, self.sort_display_name(undeclared)
          ));
        }
      }
    }

    if constructors.iter().all(ConstructorDef::is_recursive) {
      return malformed("every constructor is recursive, so the datatype has no finite values".to_string());
    }

    let index = DatatypeIndex(self.datatypes.len());
    let sort  = self.intern_sort(SortKey::new(Kind::DatatypeSort, params.clone(), SortPayload::Datatype(index)));
    let definition = DatatypeDef { name, params, constructors, sort, instance_of: None };
    for held in definition.held_sorts().collect::<Vec<_>>() {
      self.sorts.acquire(held);
    }

    debug!(
      3,
      "manager {} declared datatype {} with {} constructor(s) and {} parameter(s)",
      self.id,
      definition.name,
      definition.constructors.len(),
      definition.params.len()
    );
    self.datatypes.push(definition);

    // The definition keeps its own share on `sort`. This one is the caller's.
    self.sorts.acquire(sort);
    Ok(sort)
  }

  /// Returns a share on the fully applied instance of the parametric datatype `sort`.
  pub fn instantiate(&mut self, sort: SlotIndex, arguments: &[SlotIndex]) -> ExprResult<SlotIndex> {
    let key = self.sorts.key(sort);
    if key.kind != Kind::DatatypeSort {
      return Err(ExprError::WrongSortKind { expected: "DATATYPE_SORT", actual: key.kind });
    }
    if key.children.is_empty() {
      return Err(ExprError::WrongSortKind { expected: "parametric DATATYPE_SORT", actual: key.kind });
    }
    if key.children.len() != arguments.len() {
      return Err(ExprError::ArityMismatch {
        what    : "instantiate",
        expected: Arity::Value(key.children.len()),
        actual  : arguments.len(),
      });
    }
    for &argument in arguments {
      self.check_first_class(argument, "a datatype parameter")?;
    }

    let SortPayload::Datatype(generic) = key.payload else {
      unreachable!("a DATATYPE_SORT key always carries its datatype");
    };
    Ok(self.instantiate_datatype(generic, arguments.to_vec()))
  }

  /// Returns a share on the instance of `generic` at `arguments`, creating it on first use. The instance has no
  /// parameters of its own, even when an argument is itself a parameter sort.
  fn instantiate_datatype(&mut self, generic: DatatypeIndex, arguments: Vec<SlotIndex>) -> SlotIndex {
    let memo_key = (generic, arguments);
    if let Some(&instance) = self.instantiations.get(&memo_key) {
      let sort = self.datatype(instance).sort;
      self.sorts.acquire(sort);
      return sort;
    }
    let (generic, arguments) = memo_key;

    let definition   = self.datatype(generic);
    let name         = definition.name.clone();
    let substitution = definition.params.iter().copied().zip(arguments.iter().copied()).collect::<HashMap<_, _>>();
    let generic_constructors = definition.constructors.clone();

    // Substitution may instantiate other datatypes, so the new index is only fixed afterward.
    let constructors = generic_constructors
        .into_iter()
        .map(|constructor| ConstructorDef {
          name     : constructor.name,
          selectors: constructor.selectors
                                .into_iter()
                                .map(|selector| SelectorDef {
                                  name : selector.name,
                                  range: match selector.range {
                                    RangeDef::Sort(range) => RangeDef::Sort(self.substitute(range, &substitution)),
                                    RangeDef::SelfSort    => RangeDef::SelfSort,
                                  },
                                })
                                .collect(),
        })
        .collect::<Vec<_>>();

    let index = DatatypeIndex(self.datatypes.len());
    let sort  = self.intern_sort(SortKey::new(Kind::DatatypeSort, vec![], SortPayload::Datatype(index)));
    for &argument in &arguments {
      self.sorts.acquire(argument);
    }

    debug!(3, "manager {} instantiated datatype {} as {}", self.id, name, index);
    self.datatypes.push(DatatypeDef {
      name,
      params     : vec![],
      constructors,
      sort,
      instance_of: Some((generic, arguments.clone())),
    });
    self.instantiations.insert((generic, arguments), index);

    self.sorts.acquire(sort);
    sort
  }

  /// Returns a share on `sort` with each parameter replaced according to `substitution`.
  fn substitute(&mut self, sort: SlotIndex, substitution: &HashMap<SlotIndex, SlotIndex>) -> SlotIndex {
    let key = self.sorts.key(sort).clone();

    match (key.kind, &key.payload) {

      (Kind::ParamSort, _) => {
        let result = substitution.get(&sort).copied().unwrap_or(sort);
        self.sorts.acquire(result);
        result
      }

      (Kind::DatatypeSort, &SortPayload::Datatype(index)) => {
        let (generic, arguments) = match &self.datatype(index).instance_of {
          Some((generic, arguments)) => (*generic, arguments.clone()),
          None if key.children.is_empty() => {
            self.sorts.acquire(sort);
            return sort;
          }
          None => (index, key.children.clone()),
        };

        let substituted = arguments.iter().map(|&argument| self.substitute(argument, substitution)).collect::<Vec<_>>();
        let result      = self.instantiate_datatype(generic, substituted.clone());
        for argument in substituted {
          self.release_sort(argument);
        }
        result
      }

      _ if key.children.is_empty() => {
        self.sorts.acquire(sort);
        sort
      }

      _ => {
        let children = key.children.iter().map(|&child| self.substitute(child, substitution)).collect::<Vec<_>>();
        let result   = self.intern_sort(SortKey::new(key.kind, children.clone(), key.payload.clone()));
        for child in children {
          self.release_sort(child);
        }
        result
      }

    }
  }

  /// The name of a named sort, for messages.
  fn sort_display_name(&self, sort: SlotIndex) -> String {
    match self.sorts.key(sort).name() {
      Some(name) => name.to_string(),
      None => self.sorts.key(sort).kind.to_string(),
    }
  }

  // endregion Datatypes

  // region Node factories

  /// Returns a share on the canonical node for `key`, inferring the sort of a new node.
  fn intern_node(&mut self, key: NodeKey) -> SlotIndex {
    if let Some(node) = self.nodes.lookup(&key) {
      self.nodes.acquire(node);
      return node;
    }

    let sort = self.infer_sort(&key);
    self.nodes.intern(key, || NodeAttribute { sort }).0
  }

  /// Returns a share on the sort of a node with this key, if it can be determined locally.
  fn infer_sort(&mut self, key: &NodeKey) -> Option<SlotIndex> {
    if let NodePayload::Constant(constant) = &key.payload {
      return match constant {
        Constant::Boolean(_)      => Some(self.mk_builtin_sort(Kind::BooleanSort)),
        Constant::Rational(value) if value.is_integer() => Some(self.mk_builtin_sort(Kind::IntegerSort)),
        Constant::Rational(_)     => Some(self.mk_builtin_sort(Kind::RealSort)),
        Constant::String(_)       => Some(self.mk_builtin_sort(Kind::StringSort)),
        Constant::RoundingMode(_) => Some(self.mk_builtin_sort(Kind::RoundingModeSort)),
        Constant::BitVector(value) => {
          let key = SortKey::new(Kind::BitVectorSort, vec![], SortPayload::Width(value.width()));
          Some(self.intern_sort(key))
        }
        Constant::FloatingPoint(value) => {
          let payload = SortPayload::FloatingPoint {
            exponent   : value.exponent_width(),
            significand: value.significand_width(),
          };
          Some(self.intern_sort(SortKey::new(Kind::FloatingPointSort, vec![], payload)))
        }
        // Operator payloads are not terms with a sort.
        _ => None,
      };
    }

    if key.kind.is_boolean_valued() {
      return Some(self.mk_builtin_sort(Kind::BooleanSort));
    }

    let inferred = match key.kind {
      Kind::Ite => {
        let then_sort = self.node_sort(key.children[1]);
        let else_sort = self.node_sort(key.children[2]);
        then_sort.filter(|_| then_sort == else_sort)
      }

      Kind::ApplyUf => {
        self.node_sort(key.children[0])
            .map(|sort| self.sorts.key(sort))
            .filter(|sort_key| sort_key.kind == Kind::FunctionSort)
            .and_then(|sort_key| sort_key.children.last().copied())
      }

      _ => None,
    };

    if let Some(sort) = inferred {
      self.sorts.acquire(sort);
    }
    inferred
  }

  /// Returns a share on a fresh variable. Two calls never return the same node.
  pub fn mk_variable(&mut self, kind: Kind, name: IString, sort: SlotIndex) -> SlotIndex {
    debug_assert!(kind.is_variable_kind());
    let serial = self.next_serial;
    self.next_serial += 1;

    self.sorts.acquire(sort);
    let key = NodeKey { kind, children: vec![], payload: NodePayload::Symbol { name, serial } };
    self.nodes.intern(key, || NodeAttribute { sort: Some(sort) }).0
  }

  pub fn mk_constant(&mut self, constant: Constant) -> SlotIndex {
    self.intern_node(NodeKey::constant(constant))
  }

  pub fn mk_expr(&mut self, kind: Kind, children: Vec<SlotIndex>) -> ExprResult<SlotIndex> {
    if !kind.is_term_kind() {
      return Err(ExprError::MalformedTerm(format!("{} is a sort kind, not a term kind", kind)));
    }
    if kind.is_constant_kind() {
      return Err(ExprError::MalformedTerm(format!("{} nodes are built from a constant value", kind)));
    }
    if kind.is_variable_kind() {
      return Err(ExprError::MalformedTerm(format!("{} nodes are built with a name and a sort", kind)));
    }
    if kind.is_parameterized() {
      return Err(ExprError::MalformedTerm(format!("{} requires an operator", kind)));
    }

    self.check_arguments(kind, &children)?;
    Ok(self.intern_node(NodeKey::new(kind, children)))
  }

  pub fn mk_expr_with_operator(
    &mut self,
    kind    : Kind,
    operator: SlotIndex,
    children: &[SlotIndex],
  ) -> ExprResult<SlotIndex> {
    let operator_kind = self.nodes.key(operator).kind;

    match kind.operator() {

      OperatorSpec::None => {
        return Err(ExprError::MalformedTerm(format!("{} does not take an operator", kind)));
      }

      OperatorSpec::Kind(required) if required != operator_kind => {
        return Err(ExprError::WrongTermKind { expected: required.name(), actual: operator_kind });
      }

      OperatorSpec::Kind(_) => { /* pass */ }

      OperatorSpec::AnyTerm => {
        if let Some(sort) = self.node_sort(operator) {
          let sort_key = self.sorts.key(sort);
          if sort_key.kind != Kind::FunctionSort {
            return Err(ExprError::WrongSortKind { expected: "FUNCTION_SORT", actual: sort_key.kind });
          }
          let function_arity = sort_key.children.len() - 1;
          if function_arity != children.len() {
            return Err(ExprError::ArityMismatch {
              what    : kind.name(),
              expected: Arity::Value(function_arity),
              actual  : children.len(),
            });
          }
        }
      }

    }

    self.check_arguments(kind, children)?;

    let mut all_children = Vec::with_capacity(children.len() + 1);
    all_children.push(operator);
    all_children.extend_from_slice(children);
    Ok(self.intern_node(NodeKey::new(kind, all_children)))
  }

  /// Checks the argument count and the argument shapes that do not need type inference.
  fn check_arguments(&self, kind: Kind, arguments: &[SlotIndex]) -> ExprResult<()> {
    if !kind.arity().admits(arguments.len()) {
      return Err(ExprError::ArityMismatch { what: kind.name(), expected: kind.arity(), actual: arguments.len() });
    }

    let not_boolean = |position: usize| {
      Err(ExprError::MalformedTerm(format!("argument {} of {} is not boolean", position, kind)))
    };

    match kind {

      Kind::Not | Kind::And | Kind::Or | Kind::Xor | Kind::Iff | Kind::Implies => {
        if let Some(position) = arguments.iter().position(|&node| self.is_boolean_node(node) == Some(false)) {
          return not_boolean(position);
        }
      }

      Kind::Ite => {
        if self.is_boolean_node(arguments[0]) == Some(false) {
          return not_boolean(0);
        }
      }

      Kind::BoundVarList => {
        if let Some(&node) = arguments.iter().find(|&&node| self.nodes.key(node).kind != Kind::BoundVariable) {
          return Err(ExprError::WrongTermKind { expected: "BOUND_VARIABLE", actual: self.nodes.key(node).kind });
        }
      }

      Kind::Forall | Kind::Exists => {
        let list_kind = self.nodes.key(arguments[0]).kind;
        if list_kind != Kind::BoundVarList {
          return Err(ExprError::WrongTermKind { expected: "BOUND_VAR_LIST", actual: list_kind });
        }
        if self.is_boolean_node(arguments[1]) == Some(false) {
          return not_boolean(1);
        }
      }

      _ => { /* pass */ }

    }

    Ok(())
  }

  /// Records the sort computed by an external type checker.
  pub fn assign_type(&mut self, node: SlotIndex, sort: SlotIndex) -> ExprResult<()> {
    match self.node_sort(node) {
      Some(existing) if existing == sort => Ok(()),
      Some(_) => Err(ExprError::MalformedTerm(format!(
        "a {} node already has a different sort", self.nodes.key(node).kind
      ))),
      None => {
        self.sorts.acquire(sort);
        self.nodes.attribute_mut(node).sort = Some(sort);
        Ok(())
      }
    }
  }

  // endregion Node factories
}

impl Drop for ManagerCore {
  fn drop(&mut self) {
    debug!(
      2,
      "tearing down expression manager {} with {} nodes, {} sorts, and {} datatypes",
      self.id,
      self.nodes.len(),
      self.sorts.len(),
      self.datatypes.len()
    );

    let node_statistics = self.nodes.statistics();
    let sort_statistics = self.sorts.statistics();
    trace!(4, "manager {} node table: {}", self.id, node_statistics);
    trace!(4, "manager {} sort table: {}", self.id, sort_statistics);

    #[cfg(feature = "store_debug")]
    {
      eprintln!("manager {} node table: {}", self.id, node_statistics);
      eprintln!("manager {} sort table: {}", self.id, sort_statistics);
    }
  }
}
