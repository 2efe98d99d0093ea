/*!

Scenario tests for the public surface: canonicalization, ordering, kind-checked accessors, datatypes, and handle
lifetimes.

*/

use std::cmp::Ordering;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;

type Accessor = fn(&Sort) -> ExprResult<()>;

fn boolean_var(em: &ExprManager, name: &str) -> BoolExpr {
  BoolExpr::new(&em.mk_var(name, &em.boolean_sort()).unwrap()).unwrap()
}

/// `list = cons(head: Int, tail: list) | nil`
fn int_list(em: &ExprManager) -> Sort {
  let mut declaration = DatatypeDecl::new("list");
  declaration.add_constructor(
    ConstructorDecl::new("cons")
        .with_selector("head", SelectorRange::Sort(em.integer_sort()))
        .with_selector("tail", SelectorRange::SelfSort)
  );
  declaration.add_constructor(ConstructorDecl::new("nil"));
  em.mk_datatype_sort(&declaration).unwrap()
}

/// `paramlist<T> = cons(head: T, tail: paramlist<T>) | nil`
fn param_list(em: &ExprManager) -> Sort {
  let t = em.mk_param_sort("T");
  let mut declaration = DatatypeDecl::parametric("paramlist", vec![t.clone()]);
  declaration.add_constructor(
    ConstructorDecl::new("cons")
        .with_selector("head", SelectorRange::Sort(t))
        .with_selector("tail", SelectorRange::SelfSort)
  );
  declaration.add_constructor(ConstructorDecl::new("nil"));
  em.mk_datatype_sort(&declaration).unwrap()
}

/// One sort of every sort kind.
fn sample_sorts(em: &ExprManager) -> Vec<Sort> {
  let int = em.integer_sort();
  vec![
    em.boolean_sort(),
    int.clone(),
    em.real_sort(),
    em.string_sort(),
    em.rounding_mode_sort(),
    em.mk_bit_vector_sort(32).unwrap(),
    em.mk_floating_point_sort(8, 24).unwrap(),
    em.mk_array_sort(&int, &em.real_sort()).unwrap(),
    em.mk_set_sort(&int).unwrap(),
    em.mk_tuple_sort(&[int.clone(), em.boolean_sort()]).unwrap(),
    em.mk_function_sort(&[em.mk_uninterpreted_sort("u", &[]).unwrap()], &int).unwrap(),
    int_list(em),
    em.mk_sort_constructor_sort("s", 2),
    em.mk_uninterpreted_sort("u", &[]).unwrap(),
    em.mk_param_sort("T"),
  ]
}

// region Sorts

#[test]
fn every_accessor_rejects_every_other_sort_kind() {
  let em = ExprManager::new();
  let accessors: Vec<(&str, Kind, Accessor)> = vec![
    ("bv_size", Kind::BitVectorSort, (|s: &Sort| s.bv_size().map(|_| ())) as Accessor),
    ("fp_exponent_size", Kind::FloatingPointSort, (|s: &Sort| s.fp_exponent_size().map(|_| ())) as Accessor),
    ("fp_significand_size", Kind::FloatingPointSort, (|s: &Sort| s.fp_significand_size().map(|_| ())) as Accessor),
    ("array_index_sort", Kind::ArraySort, (|s: &Sort| s.array_index_sort().map(|_| ())) as Accessor),
    ("array_element_sort", Kind::ArraySort, (|s: &Sort| s.array_element_sort().map(|_| ())) as Accessor),
    ("set_element_sort", Kind::SetSort, (|s: &Sort| s.set_element_sort().map(|_| ())) as Accessor),
    ("tuple_length", Kind::TupleSort, (|s: &Sort| s.tuple_length().map(|_| ())) as Accessor),
    ("tuple_sorts", Kind::TupleSort, (|s: &Sort| s.tuple_sorts().map(|_| ())) as Accessor),
    ("function_arity", Kind::FunctionSort, (|s: &Sort| s.function_arity().map(|_| ())) as Accessor),
    ("function_domain_sorts", Kind::FunctionSort, (|s: &Sort| s.function_domain_sorts().map(|_| ())) as Accessor),
    ("function_codomain_sort", Kind::FunctionSort, (|s: &Sort| s.function_codomain_sort().map(|_| ())) as Accessor),
    ("uninterpreted_sort_name", Kind::UninterpretedSort, (|s: &Sort| s.uninterpreted_sort_name().map(|_| ())) as Accessor),
    (
      "is_uninterpreted_sort_parameterized",
      Kind::UninterpretedSort,
      (|s: &Sort| s.is_uninterpreted_sort_parameterized().map(|_| ())) as Accessor
    ),
    (
      "uninterpreted_sort_param_sorts",
      Kind::UninterpretedSort,
      (|s: &Sort| s.uninterpreted_sort_param_sorts().map(|_| ())) as Accessor
    ),
    ("sort_constructor_name", Kind::SortConstructorSort, (|s: &Sort| s.sort_constructor_name().map(|_| ())) as Accessor),
    ("sort_constructor_arity", Kind::SortConstructorSort, (|s: &Sort| s.sort_constructor_arity().map(|_| ())) as Accessor),
    ("param_sort_name", Kind::ParamSort, (|s: &Sort| s.param_sort_name().map(|_| ())) as Accessor),
    ("datatype", Kind::DatatypeSort, (|s: &Sort| s.datatype().map(|_| ())) as Accessor),
    ("datatype_arity", Kind::DatatypeSort, (|s: &Sort| s.datatype_arity().map(|_| ())) as Accessor),
    ("datatype_param_sorts", Kind::DatatypeSort, (|s: &Sort| s.datatype_param_sorts().map(|_| ())) as Accessor),
  ];

  for sort in sample_sorts(&em) {
    for (name, required, accessor) in &accessors {
      let result = accessor(&sort);
      if sort.kind() == *required {
        assert!(result.is_ok(), "{} failed on {}", name, sort);
      } else {
        match result {
          Err(ExprError::WrongSortKind { expected, actual }) => {
            assert_eq!(expected, required.name());
            assert_eq!(actual, sort.kind());
          }
          other => panic!("{} on {} gave {:?}", name, sort, other.map(|_| ())),
        }
      }
    }
  }
}

#[test]
fn accessors_report_components() {
  let em   = ExprManager::new();
  let int  = em.integer_sort();
  let real = em.real_sort();

  let bv32 = em.mk_bit_vector_sort(32).unwrap();
  assert_eq!(bv32.bv_size().unwrap(), 32);

  let fp = em.mk_floating_point_sort(8, 24).unwrap();
  assert_eq!(fp.fp_exponent_size().unwrap(), 8);
  assert_eq!(fp.fp_significand_size().unwrap(), 24);

  let array = em.mk_array_sort(&int, &real).unwrap();
  assert_eq!(array.array_index_sort().unwrap(), int);
  assert_eq!(array.array_element_sort().unwrap(), real);

  let set = em.mk_set_sort(&bv32).unwrap();
  assert_eq!(set.set_element_sort().unwrap(), bv32);

  let tuple = em.mk_tuple_sort(&[int.clone(), int.clone(), real.clone()]).unwrap();
  assert_eq!(tuple.tuple_length().unwrap(), 3);
  assert_eq!(tuple.tuple_sorts().unwrap(), vec![int.clone(), int.clone(), real.clone()]);

  let u        = em.mk_uninterpreted_sort("u", &[]).unwrap();
  let function = em.mk_function_sort(&[u.clone(), int.clone()], &real).unwrap();
  assert_eq!(function.function_arity().unwrap(), 2);
  assert_eq!(function.function_domain_sorts().unwrap(), vec![u.clone(), int.clone()]);
  assert_eq!(function.function_codomain_sort().unwrap(), real);

  assert_eq!(&*u.uninterpreted_sort_name().unwrap(), "u");
  assert!(!u.is_uninterpreted_sort_parameterized().unwrap());
  assert!(u.uninterpreted_sort_param_sorts().unwrap().is_empty());

  let applied = em.mk_uninterpreted_sort("box", &[int.clone()]).unwrap();
  assert!(applied.is_uninterpreted_sort_parameterized().unwrap());
  assert_eq!(applied.uninterpreted_sort_param_sorts().unwrap(), vec![int.clone()]);

  let constructor = em.mk_sort_constructor_sort("s", 2);
  assert_eq!(&*constructor.sort_constructor_name().unwrap(), "s");
  assert_eq!(constructor.sort_constructor_arity().unwrap(), 2);

  assert_eq!(&*em.mk_param_sort("T").param_sort_name().unwrap(), "T");
}

#[test]
fn bit_vector_floating_point_and_tuple_sorts() {
  let em  = ExprManager::new();
  let int = em.integer_sort();

  let bv32 = em.mk_bit_vector_sort(32).unwrap();
  assert_eq!(bv32.bv_size().unwrap(), 32);
  assert!(matches!(bv32.array_index_sort(), Err(ExprError::WrongSortKind { .. })));
  assert!(matches!(bv32.tuple_length(), Err(ExprError::WrongSortKind { .. })));

  let fp = em.mk_floating_point_sort(4, 8).unwrap();
  assert_eq!(fp.fp_exponent_size().unwrap(), 4);
  assert_eq!(fp.fp_significand_size().unwrap(), 8);

  let pair = em.mk_tuple_sort(&[int.clone(), int.clone()]).unwrap();
  assert_eq!(pair.tuple_length().unwrap(), 2);
  assert_eq!(pair.tuple_sorts().unwrap(), vec![int.clone(), int]);
}

#[test]
fn sorts_are_canonical_within_a_manager() {
  let em  = ExprManager::new();
  let int = em.integer_sort();

  assert_eq!(em.mk_bit_vector_sort(8).unwrap(), em.mk_bit_vector_sort(8).unwrap());
  assert_ne!(em.mk_bit_vector_sort(8).unwrap(), em.mk_bit_vector_sort(16).unwrap());
  assert_eq!(em.mk_array_sort(&int, &int).unwrap(), em.mk_array_sort(&int, &int).unwrap());
  assert_eq!(em.mk_uninterpreted_sort("u", &[]).unwrap(), em.mk_uninterpreted_sort("u", &[]).unwrap());
  assert_eq!(em.mk_param_sort("T"), em.mk_param_sort("T"));

  // Datatype declarations are never merged.
  assert_ne!(int_list(&em), int_list(&em));

  let other = ExprManager::new();
  assert_ne!(em.integer_sort(), other.integer_sort());
  assert_eq!(em.integer_sort().partial_cmp(&other.integer_sort()), None);
  assert!(matches!(em.mk_set_sort(&other.integer_sort()), Err(ExprError::ForeignManager)));
}

#[test]
fn sort_predicates_follow_kind() {
  let em = ExprManager::new();
  for sort in sample_sorts(&em) {
    let predicates = [
      (sort.is_boolean(), Kind::BooleanSort),
      (sort.is_integer(), Kind::IntegerSort),
      (sort.is_bit_vector(), Kind::BitVectorSort),
      (sort.is_array(), Kind::ArraySort),
      (sort.is_function(), Kind::FunctionSort),
      (sort.is_datatype(), Kind::DatatypeSort),
      (sort.is_param(), Kind::ParamSort),
    ];
    for (holds, kind) in predicates {
      assert_eq!(holds, sort.kind() == kind, "{} against {}", sort, kind);
    }
    assert_eq!(
      sort.is_first_class(),
      !matches!(sort.kind(), Kind::FunctionSort | Kind::SortConstructorSort)
    );
  }
}

#[test]
fn malformed_sorts_are_rejected() {
  let em       = ExprManager::new();
  let int      = em.integer_sort();
  let function = em.mk_function_sort(&[int.clone()], &int).unwrap();

  assert!(matches!(em.mk_bit_vector_sort(0), Err(ExprError::MalformedSort(_))));
  assert!(matches!(em.mk_floating_point_sort(0, 24), Err(ExprError::MalformedSort(_))));
  assert!(matches!(em.mk_array_sort(&function, &int), Err(ExprError::MalformedSort(_))));
  assert!(matches!(em.mk_function_sort(&[int.clone()], &function), Err(ExprError::MalformedSort(_))));
  assert!(matches!(em.mk_tuple_sort(&[]), Err(ExprError::ArityMismatch { actual: 0, .. })));
  assert!(matches!(em.mk_function_sort(&[], &int), Err(ExprError::ArityMismatch { actual: 0, .. })));
}

#[test]
fn sorts_display_in_smt_lib_syntax() {
  let em   = ExprManager::new();
  let int  = em.integer_sort();
  let bool = em.boolean_sort();

  assert_eq!(int.to_string(), "Int");
  assert_eq!(em.mk_bit_vector_sort(32).unwrap().to_string(), "(_ BitVec 32)");
  assert_eq!(em.mk_floating_point_sort(8, 24).unwrap().to_string(), "(_ FloatingPoint 8 24)");
  assert_eq!(em.mk_array_sort(&int, &bool).unwrap().to_string(), "(Array Int Bool)");
  assert_eq!(em.mk_function_sort(&[int.clone(), int.clone()], &bool).unwrap().to_string(), "(-> Int Int Bool)");
  assert_eq!(em.mk_uninterpreted_sort("u", &[]).unwrap().to_string(), "u");

  let instance = param_list(&em).instantiate(&[int]).unwrap();
  assert_eq!(instance.to_string(), "(paramlist Int)");
}

// endregion Sorts

// region Datatypes

#[test]
fn non_parametric_datatype_cannot_be_instantiated() {
  let em   = ExprManager::new();
  let list = int_list(&em);

  assert!(list.is_datatype());
  assert!(!list.is_parametric_datatype());
  assert_eq!(list.datatype_arity().unwrap(), 0);
  assert!(list.datatype_param_sorts().unwrap().is_empty());
  assert!(matches!(
    list.instantiate(&[em.integer_sort()]),
    Err(ExprError::WrongSortKind { actual: Kind::DatatypeSort, .. })
  ));

  let bv32 = em.mk_bit_vector_sort(32).unwrap();
  assert!(matches!(
    bv32.instantiate(&[em.integer_sort()]),
    Err(ExprError::WrongSortKind { actual: Kind::BitVectorSort, .. })
  ));
}

#[test]
fn parametric_datatype_instantiates() {
  let em      = ExprManager::new();
  let int     = em.integer_sort();
  let generic = param_list(&em);

  assert!(generic.is_parametric_datatype());
  assert_eq!(generic.datatype_arity().unwrap(), 1);
  assert_eq!(generic.datatype_param_sorts().unwrap(), vec![em.mk_param_sort("T")]);

  let instance = generic.instantiate(&[int.clone()]).unwrap();
  assert!(instance.is_datatype());
  assert!(instance.datatype_param_sorts().unwrap().is_empty());

  let datatype = instance.datatype().unwrap();
  assert!(datatype.is_instance());
  assert_eq!(datatype.num_constructors(), 2);

  let cons = datatype.constructor("cons").unwrap();
  assert!(cons.is_recursive());
  assert_eq!(cons.selector("head").unwrap().range(), int);
  assert_eq!(cons.selector("tail").unwrap().range(), instance);
  assert_eq!(datatype.constructor("nil").unwrap().num_selectors(), 0);
  assert!(datatype.constructor("snoc").is_none());

  assert!(matches!(
    generic.instantiate(&[int.clone(), int.clone()]),
    Err(ExprError::ArityMismatch { actual: 2, .. })
  ));
}

#[test]
fn instantiation_is_memoized() {
  let em      = ExprManager::new();
  let generic = param_list(&em);
  let before  = em.datatype_count();

  let first  = generic.instantiate(&[em.integer_sort()]).unwrap();
  let second = generic.instantiate(&[em.integer_sort()]).unwrap();
  assert_eq!(first, second);
  assert_eq!(em.datatype_count(), before + 1);

  let real = generic.instantiate(&[em.real_sort()]).unwrap();
  assert_ne!(first, real);
  assert_eq!(em.datatype_count(), before + 2);

  // Even its own parameter gives a fully applied instance, distinct from the generic datatype.
  let own = generic.instantiate(&[em.mk_param_sort("T")]).unwrap();
  assert_ne!(own, generic);
  assert_eq!(own.datatype_arity().unwrap(), 0);
  assert!(own.datatype_param_sorts().unwrap().is_empty());
  assert_eq!(generic.datatype_arity().unwrap(), 1);
}

#[test]
fn nested_instances_are_substituted() {
  let em  = ExprManager::new();
  let int = em.integer_sort();

  let u = em.mk_param_sort("U");
  let mut box_declaration = DatatypeDecl::parametric("box", vec![u.clone()]);
  box_declaration.add_constructor(ConstructorDecl::new("mk_box").with_selector("content", SelectorRange::Sort(u)));
  let box_sort = em.mk_datatype_sort(&box_declaration).unwrap();

  let t = em.mk_param_sort("T");
  let mut wrapper_declaration = DatatypeDecl::parametric("wrapper", vec![t.clone()]);
  let box_of_t = box_sort.instantiate(&[t]).unwrap();
  assert_eq!(box_of_t.datatype_arity().unwrap(), 0);
  wrapper_declaration.add_constructor(
    ConstructorDecl::new("wrap").with_selector("inner", SelectorRange::Sort(box_of_t))
  );
  wrapper_declaration.add_constructor(ConstructorDecl::new("empty"));
  let wrapper = em.mk_datatype_sort(&wrapper_declaration).unwrap();

  let instance = wrapper.instantiate(&[int.clone()]).unwrap();
  let inner    = instance.datatype().unwrap().constructor("wrap").unwrap().selector("inner").unwrap().range();
  assert_eq!(inner, box_sort.instantiate(&[int]).unwrap());
}

#[test]
fn malformed_datatypes_are_rejected() {
  let em  = ExprManager::new();
  let int = em.integer_sort();

  let empty = DatatypeDecl::new("empty");
  assert!(matches!(em.mk_datatype_sort(&empty), Err(ExprError::MalformedSort(_))));

  let mut duplicate = DatatypeDecl::new("duplicate");
  duplicate.add_constructor(ConstructorDecl::new("c"));
  duplicate.add_constructor(ConstructorDecl::new("c"));
  assert!(matches!(em.mk_datatype_sort(&duplicate), Err(ExprError::MalformedSort(_))));

  let mut repeated_selector = DatatypeDecl::new("pair");
  repeated_selector.add_constructor(
    ConstructorDecl::new("mk_pair")
        .with_selector("x", SelectorRange::Sort(int.clone()))
        .with_selector("x", SelectorRange::Sort(int.clone()))
  );
  assert!(matches!(em.mk_datatype_sort(&repeated_selector), Err(ExprError::MalformedSort(_))));

  let mut not_a_param = DatatypeDecl::parametric("bad", vec![int.clone()]);
  not_a_param.add_constructor(ConstructorDecl::new("c"));
  assert!(matches!(em.mk_datatype_sort(&not_a_param), Err(ExprError::MalformedSort(_))));

  let mut undeclared = DatatypeDecl::new("undeclared");
  undeclared.add_constructor(ConstructorDecl::new("c").with_selector("v", SelectorRange::Sort(em.mk_param_sort("T"))));
  assert!(matches!(em.mk_datatype_sort(&undeclared), Err(ExprError::MalformedSort(_))));

  let mut infinite = DatatypeDecl::new("stream");
  infinite.add_constructor(
    ConstructorDecl::new("next")
        .with_selector("value", SelectorRange::Sort(int.clone()))
        .with_selector("rest", SelectorRange::SelfSort)
  );
  assert!(matches!(em.mk_datatype_sort(&infinite), Err(ExprError::MalformedSort(_))));

  let function = em.mk_function_sort(&[int.clone()], &int).unwrap();
  let mut higher_order = DatatypeDecl::new("closure");
  higher_order.add_constructor(ConstructorDecl::new("c").with_selector("f", SelectorRange::Sort(function)));
  assert!(matches!(em.mk_datatype_sort(&higher_order), Err(ExprError::MalformedSort(_))));
}

// endregion Datatypes

// region Terms

#[test]
fn terms_are_canonical_within_a_manager() {
  let em = ExprManager::new();
  let x  = em.mk_var("x", &em.integer_sort()).unwrap();
  let y  = em.mk_var("y", &em.integer_sort()).unwrap();

  let first  = em.mk_expr(Kind::Plus, &[x.clone(), y.clone()]).unwrap();
  let second = em.mk_expr(Kind::Plus, &[x.clone(), y.clone()]).unwrap();
  assert_eq!(first, second);
  assert_eq!(first.id().unwrap(), second.id().unwrap());
  assert_ne!(first, em.mk_expr(Kind::Plus, &[y.clone(), x.clone()]).unwrap());

  assert_eq!(em.mk_integer(3), em.mk_integer(3));

  // Variables are distinct even with equal names.
  let also_x = em.mk_var("x", &em.integer_sort()).unwrap();
  assert_ne!(x, also_x);
  assert_eq!(x.to_string(), also_x.to_string());
}

#[test]
fn terms_from_different_managers_never_compare_equal() {
  let em    = ExprManager::new();
  let other = ExprManager::new();

  let here  = em.mk_true();
  let there = other.mk_true();
  assert_ne!(here, there);
  assert!(matches!(here.compare(&there), Err(ExprError::ForeignManager)));
  assert_eq!(here.partial_cmp(&there), None);
  assert!(matches!(em.mk_expr(Kind::Not, &[there.into_expr()]), Err(ExprError::ForeignManager)));
}

#[test]
fn ordering_follows_creation() {
  let em     = ExprManager::new();
  let first  = em.mk_integer(1);
  let second = em.mk_integer(2);
  let sum    = em.mk_expr(Kind::Plus, &[first.clone(), second.clone()]).unwrap();

  assert_eq!(first.compare(&second).unwrap(), Ordering::Less);
  assert_eq!(sum.compare(&first).unwrap(), Ordering::Greater);
  assert_eq!(sum.compare(&sum).unwrap(), Ordering::Equal);
  assert!(first < second);

  let null = Expr::null();
  assert_eq!(null.compare(&first).unwrap(), Ordering::Less);
  assert_eq!(first.compare(&null).unwrap(), Ordering::Greater);
  assert_eq!(null.compare(&Expr::default()).unwrap(), Ordering::Equal);
}

#[test]
fn null_expression_queries() {
  let null = Expr::null();
  assert!(null.is_null());
  assert!(matches!(null.kind(), Err(ExprError::NullExpression)));
  assert!(matches!(null.num_children(), Err(ExprError::NullExpression)));
  assert!(matches!(null.sort(), Err(ExprError::NullExpression)));
  assert!(matches!(null.manager(), Err(ExprError::NullExpression)));
  assert!(!null.has_operator());
  assert!(!null.is_const());
  assert_eq!(null.dag_size(), 0);
  assert_eq!(null.to_string(), "null");
  assert_eq!(null, Expr::default());
}

#[test]
fn structure_queries() {
  let em  = ExprManager::new();
  let p   = boolean_var(&em, "p");
  let q   = boolean_var(&em, "q");
  let not = p.not_expr().unwrap();
  let and = em.mk_expr(Kind::And, &[p.as_expr().clone(), not.as_expr().clone(), q.as_expr().clone()]).unwrap();

  assert_eq!(and.kind().unwrap(), Kind::And);
  assert_eq!(and.num_children().unwrap(), 3);
  assert_eq!(and.child(1).unwrap(), *not);
  assert_eq!(and.children().unwrap(), vec![p.as_expr().clone(), not.as_expr().clone(), q.as_expr().clone()]);
  assert!(matches!(and.child(3), Err(ExprError::ArityMismatch { actual: 3, .. })));

  // p is shared between the conjunct and the negation.
  assert_eq!(and.dag_size(), 4);
  assert!(!and.is_atomic());
  assert!(p.is_atomic());
  assert_eq!(&*p.name().unwrap(), "p");
  assert!(matches!(and.name(), Err(ExprError::WrongTermKind { actual: Kind::And, .. })));
}

#[test]
fn constants_carry_typed_payloads() {
  let em = ExprManager::new();

  let seven = em.mk_integer(7);
  assert!(seven.is_const());
  assert_eq!(seven.kind().unwrap(), Kind::ConstRational);
  assert_eq!(seven.constant::<Rational>().unwrap(), Rational::from_integer(7));
  assert!(seven.sort().unwrap().unwrap().is_integer());

  let half = em.mk_rational(-2, 4).unwrap();
  assert!(half.sort().unwrap().unwrap().is_real());
  assert_eq!(half.to_string(), "(- (/ 1 2))");
  assert!(matches!(em.mk_rational(1, 0), Err(ExprError::MalformedTerm(_))));

  let bits = em.mk_bit_vector(4, 0b1010).unwrap();
  assert_eq!(bits.to_string(), "#b1010");
  assert_eq!(bits.sort().unwrap().unwrap().bv_size().unwrap(), 4);
  assert!(matches!(
    bits.constant::<bool>(),
    Err(ExprError::WrongConstType { kind: Kind::ConstBitVector, requested: PayloadType::Boolean })
  ));
  assert!(matches!(em.mk_bit_vector(0, 0), Err(ExprError::MalformedTerm(_))));

  let text = em.mk_string("say \"hi\"");
  assert_eq!(text.to_string(), "\"say \"\"hi\"\"\"");
  assert!(text.sort().unwrap().unwrap().is_string());

  let x   = em.mk_var("x", &em.integer_sort()).unwrap();
  let sum = em.mk_expr(Kind::Plus, &[x.clone(), seven]).unwrap();
  assert!(matches!(sum.constant::<Rational>(), Err(ExprError::WrongConstType { kind: Kind::Plus, .. })));
}

#[test]
fn mk_expr_validates_kind_and_arity() {
  let em = ExprManager::new();
  let p  = boolean_var(&em, "p").into_expr();
  let q  = boolean_var(&em, "q").into_expr();
  let x  = em.mk_var("x", &em.integer_sort()).unwrap();

  assert!(matches!(em.mk_expr(Kind::Not, &[p.clone(), q.clone()]), Err(ExprError::ArityMismatch { actual: 2, .. })));
  assert!(matches!(em.mk_expr(Kind::And, &[p.clone()]), Err(ExprError::ArityMismatch { actual: 1, .. })));
  assert!(matches!(em.mk_expr(Kind::And, &[p.clone(), x.clone()]), Err(ExprError::MalformedTerm(_))));
  assert!(matches!(em.mk_expr(Kind::IntegerSort, &[]), Err(ExprError::MalformedTerm(_))));
  assert!(matches!(em.mk_expr(Kind::ConstBoolean, &[]), Err(ExprError::MalformedTerm(_))));
  assert!(matches!(em.mk_expr(Kind::Variable, &[]), Err(ExprError::MalformedTerm(_))));
  assert!(matches!(em.mk_expr(Kind::BitVectorExtract, &[x.clone()]), Err(ExprError::MalformedTerm(_))));
  assert!(matches!(em.mk_expr(Kind::Not, &[p.clone(), Expr::null()]), Err(ExprError::NullExpression)));

  let equal = em.mk_expr(Kind::Equal, &[x.clone(), x.clone()]).unwrap();
  assert!(equal.sort().unwrap().unwrap().is_boolean());
}

#[test]
fn quantifiers_bind_bound_variables() {
  let em = ExprManager::new();
  let b  = em.mk_bound_var("b", &em.integer_sort()).unwrap();
  let x  = em.mk_var("x", &em.integer_sort()).unwrap();

  let list = em.mk_expr(Kind::BoundVarList, &[b.clone()]).unwrap();
  let body = em.mk_expr(Kind::Equal, &[b.clone(), x.clone()]).unwrap();
  let all  = em.mk_expr(Kind::Forall, &[list.clone(), body.clone()]).unwrap();
  assert_eq!(all.to_string(), "(forall ((b Int)) (= b x))");
  assert!(BoolExpr::new(&all).is_ok());

  assert!(matches!(
    em.mk_expr(Kind::BoundVarList, &[x.clone()]),
    Err(ExprError::WrongTermKind { actual: Kind::Variable, .. })
  ));
  assert!(matches!(
    em.mk_expr(Kind::Exists, &[body.clone(), body]),
    Err(ExprError::WrongTermKind { actual: Kind::Equal, .. })
  ));
  assert!(matches!(em.mk_expr(Kind::Forall, &[list, x]), Err(ExprError::MalformedTerm(_))));
}

#[test]
fn parameterized_kinds_take_an_operator() {
  let em  = ExprManager::new();
  let bv8 = em.mk_bit_vector_sort(8).unwrap();
  let x   = em.mk_var("x", &bv8).unwrap();

  let extract_op = em.mk_const(BitVectorExtract::new(3, 0).unwrap());
  let extract    = em.mk_expr_with_operator(Kind::BitVectorExtract, &extract_op, &[x.clone()]).unwrap();
  assert!(extract.has_operator());
  assert_eq!(extract.operator().unwrap(), extract_op);
  assert_eq!(extract.num_children().unwrap(), 1);
  assert_eq!(extract.child(0).unwrap(), x);
  assert_eq!(extract.to_string(), "((_ extract 3 0) x)");
  assert_eq!(extract.constant::<BitVectorExtract>().ok(), None);
  assert_eq!(extract_op.constant::<BitVectorExtract>().unwrap(), BitVectorExtract::new(3, 0).unwrap());

  let zero_extend = em.mk_const(BitVectorZeroExtend(4));
  assert!(matches!(
    em.mk_expr_with_operator(Kind::BitVectorExtract, &zero_extend, &[x.clone()]),
    Err(ExprError::WrongTermKind { actual: Kind::BitVectorZeroExtendOp, .. })
  ));
  assert!(matches!(
    em.mk_expr_with_operator(Kind::Not, &extract_op, &[x.clone()]),
    Err(ExprError::MalformedTerm(_))
  ));

  let not = em.mk_expr(Kind::Not, &[em.mk_true().into_expr()]).unwrap();
  assert!(!not.has_operator());
  assert!(matches!(not.operator(), Err(ExprError::WrongTermKind { actual: Kind::Not, .. })));
}

#[test]
fn uninterpreted_application_takes_the_codomain() {
  let em   = ExprManager::new();
  let int  = em.integer_sort();
  let f    = em.mk_var("f", &em.mk_function_sort(&[int.clone(), int.clone()], &em.boolean_sort()).unwrap()).unwrap();
  let a    = em.mk_var("a", &int).unwrap();
  let b    = em.mk_var("b", &int).unwrap();

  let application = em.mk_expr_with_operator(Kind::ApplyUf, &f, &[a.clone(), b.clone()]).unwrap();
  assert_eq!(application.to_string(), "(f a b)");
  assert_eq!(application.operator().unwrap(), f);
  assert!(BoolExpr::new(&application).is_ok());

  assert!(matches!(
    em.mk_expr_with_operator(Kind::ApplyUf, &f, &[a.clone()]),
    Err(ExprError::ArityMismatch { actual: 1, .. })
  ));
  assert!(matches!(
    em.mk_expr_with_operator(Kind::ApplyUf, &a, &[b]),
    Err(ExprError::WrongSortKind { actual: Kind::IntegerSort, .. })
  ));
}

#[test]
fn ite_takes_the_common_branch_sort() {
  let em   = ExprManager::new();
  let c    = boolean_var(&em, "c");
  let x    = em.mk_var("x", &em.integer_sort()).unwrap();
  let y    = em.mk_var("y", &em.integer_sort()).unwrap();
  let r    = em.mk_var("r", &em.real_sort()).unwrap();

  let choice = c.ite_term(&x, &y).unwrap();
  assert_eq!(choice.kind().unwrap(), Kind::Ite);
  assert_eq!(choice.sort().unwrap(), Some(em.integer_sort()));

  let mixed = c.ite_term(&x, &r).unwrap();
  assert_eq!(mixed.sort().unwrap(), None);

  let boolean = c.ite_expr(&em.mk_true(), &em.mk_false()).unwrap();
  assert!(boolean.sort().unwrap().unwrap().is_boolean());

  assert!(matches!(em.mk_expr(Kind::Ite, &[x.clone(), x, y]), Err(ExprError::MalformedTerm(_))));
}

#[test]
fn assign_type_records_a_sort_once() {
  let em  = ExprManager::new();
  let x   = em.mk_var("x", &em.integer_sort()).unwrap();
  let sum = em.mk_expr(Kind::Plus, &[x.clone(), x]).unwrap();
  assert_eq!(sum.sort().unwrap(), None);

  em.assign_type(&sum, &em.integer_sort()).unwrap();
  assert_eq!(sum.sort().unwrap(), Some(em.integer_sort()));
  em.assign_type(&sum, &em.integer_sort()).unwrap();
  assert!(matches!(em.assign_type(&sum, &em.real_sort()), Err(ExprError::MalformedTerm(_))));
}

#[test]
fn variables_need_a_first_class_sort() {
  let em       = ExprManager::new();
  let int      = em.integer_sort();
  let function = em.mk_function_sort(&[int.clone()], &int).unwrap();
  let other    = ExprManager::new();

  assert!(em.mk_var("f", &function).is_ok());
  assert!(matches!(em.mk_var("s", &em.mk_sort_constructor_sort("s", 1)), Err(ExprError::MalformedTerm(_))));
  assert!(matches!(em.mk_var("x", &other.integer_sort()), Err(ExprError::ForeignManager)));
}

// endregion Terms

// region Booleans

#[test]
fn connectives_build_boolean_terms() {
  let em = ExprManager::new();
  let p  = boolean_var(&em, "p");
  let q  = boolean_var(&em, "q");

  let cases = [
    (p.not_expr().unwrap(), Kind::Not, "(not p)"),
    (p.and_expr(&q).unwrap(), Kind::And, "(and p q)"),
    (p.or_expr(&q).unwrap(), Kind::Or, "(or p q)"),
    (p.xor_expr(&q).unwrap(), Kind::Xor, "(xor p q)"),
    (p.iff_expr(&q).unwrap(), Kind::Iff, "(= p q)"),
    (p.imp_expr(&q).unwrap(), Kind::Implies, "(=> p q)"),
    (p.ite_expr(&q, &p).unwrap(), Kind::Ite, "(ite p q p)"),
  ];
  for (expr, kind, text) in cases {
    assert_eq!(expr.kind().unwrap(), kind);
    assert_eq!(expr.to_string(), text);
    assert!(expr.sort().unwrap().unwrap().is_boolean());
  }

  assert_eq!(p.and_expr(&q).unwrap(), p.and_expr(&q).unwrap());
  assert_eq!(em.mk_true().to_string(), "true");
}

#[test]
fn narrowing_checks_the_sort() {
  let em = ExprManager::new();
  let x  = em.mk_var("x", &em.integer_sort()).unwrap();

  assert!(matches!(
    BoolExpr::new(&x),
    Err(ExprError::WrongSortKind { expected: "BOOLEAN_SORT", actual: Kind::IntegerSort })
  ));

  let untyped = em.mk_expr(Kind::Plus, &[x.clone(), x.clone()]).unwrap();
  assert!(matches!(BoolExpr::new(&untyped), Err(ExprError::MalformedTerm(_))));
  assert!(matches!(BoolExpr::new(&Expr::null()), Err(ExprError::NullExpression)));

  let comparison = em.mk_expr(Kind::Lt, &[x.clone(), x]).unwrap();
  let narrowed   = BoolExpr::try_from(comparison.clone()).unwrap();
  assert_eq!(Expr::from(narrowed), comparison);
}

// endregion Booleans

// region Configuration

#[test]
fn options_only_presize_the_tables() {
  let defaults = ManagerOptions::default();
  assert_eq!(defaults.node_capacity, 1024);
  assert_eq!(defaults.sort_capacity, 64);

  let tiny = ExprManager::with_options(ManagerOptions { node_capacity: 0, sort_capacity: 1 });
  let roomy = ExprManager::new();

  for em in [&tiny, &roomy] {
    let int       = em.integer_sort();
    let array     = em.mk_array_sort(&int, &em.boolean_sort()).unwrap();
    let variables = (0..100).map(|i| em.mk_var(&format!("x{}", i), &int).unwrap()).collect::<Vec<_>>();
    let sum       = em.mk_expr(Kind::Plus, &variables).unwrap();

    assert_eq!(em.node_count(), 101);
    assert_eq!(sum.num_children().unwrap(), 100);
    assert_eq!(array.to_string(), "(Array Int Bool)");
  }
  assert_eq!(tiny.sort_count(), roomy.sort_count());
}

// endregion Configuration

// region Lifetimes

#[test]
fn dropping_handles_evicts_nodes_and_sorts() {
  let em          = ExprManager::new();
  let base_sorts  = em.sort_count();
  assert_eq!(em.node_count(), 0);

  {
    let bits = em.mk_bit_vector(8, 3).unwrap();
    assert_eq!(em.node_count(), 1);
    assert_eq!(em.sort_count(), base_sorts + 1);
    drop(bits);
  }
  assert_eq!(em.node_count(), 0);
  assert_eq!(em.sort_count(), base_sorts);

  let p = boolean_var(&em, "p");
  let q = boolean_var(&em, "q");
  let formula = p.and_expr(&q).unwrap().or_expr(&p).unwrap();
  assert_eq!(em.node_count(), 4);

  // The parent keeps its children alive.
  drop(p);
  drop(q);
  assert_eq!(em.node_count(), 4);

  drop(formula);
  assert_eq!(em.node_count(), 0);
}

#[test]
fn handles_outlive_their_manager_value() {
  let x = {
    let em = ExprManager::new();
    em.mk_var("x", &em.integer_sort()).unwrap()
  };
  let em = x.manager().unwrap();
  assert_eq!(em.node_count(), 1);
  assert!(x.sort().unwrap().unwrap().is_integer());
}

#[test]
fn assignment_moves_a_handle_between_managers() {
  let first  = ExprManager::new();
  let second = ExprManager::new();

  let mut expr = first.mk_integer(1);
  let other    = second.mk_integer(1);
  assert_eq!(expr.manager().unwrap(), first);

  expr = other.clone();
  assert_eq!(expr.manager().unwrap(), second);
  assert_eq!(expr, other);
  assert_eq!(first.node_count(), 0);
  assert_eq!(second.node_count(), 1);
}

#[test]
fn random_formulas_are_acyclic_and_reclaimed() {
  let em       = ExprManager::new();
  let mut rng  = StdRng::seed_from_u64(17);
  let mut pool = (0..4).map(|i| boolean_var(&em, &format!("v{}", i))).collect::<Vec<_>>();

  for _ in 0..200 {
    let left  = pool[rng.gen_range(0..pool.len())].clone();
    let right = pool[rng.gen_range(0..pool.len())].clone();
    let built = match rng.gen_range(0..3) {
      0 => left.not_expr(),
      1 => left.and_expr(&right),
      _ => left.or_expr(&right),
    };
    pool.push(built.unwrap());
  }

  for expr in &pool {
    let id = expr.id().unwrap();
    for child in expr.children().unwrap() {
      assert!(child.id().unwrap() < id);
    }
  }

  drop(pool);
  assert_eq!(em.node_count(), 0);
}

// endregion Lifetimes

// region Output

#[test]
fn print_ast_draws_a_tree() {
  let em      = ExprManager::new();
  let p       = boolean_var(&em, "p");
  let q       = boolean_var(&em, "q");
  let formula = p.and_expr(&q.not_expr().unwrap()).unwrap();

  let mut out = Vec::new();
  formula.print_ast(&mut out, 0).unwrap();
  assert_eq!(String::from_utf8(out).unwrap(), "AND\n ├──p\n ╰──NOT\n     ╰──q\n");

  let mut out = Vec::new();
  formula.to_stream(&mut out).unwrap();
  assert_eq!(String::from_utf8(out).unwrap(), "(and p (not q))");
}

#[test]
fn deep_terms_print_without_recursion() {
  let em      = ExprManager::new();
  let depth   = 200_000;
  let mut formula = boolean_var(&em, "p");
  for _ in 0..depth {
    formula = formula.not_expr().unwrap();
  }

  let text = formula.to_string();
  assert_eq!(text.len(), depth * "(not )".len() + 1);
  assert!(text.starts_with("(not (not (not "));
  assert!(text.ends_with(" p))))"));

  let mut shallow = boolean_var(&em, "q");
  for _ in 0..1_000 {
    shallow = shallow.not_expr().unwrap();
  }
  let mut out = Vec::new();
  shallow.print_ast(&mut out, 0).unwrap();
  let tree  = String::from_utf8(out).unwrap();
  let lines = tree.lines().collect::<Vec<_>>();
  assert_eq!(lines.len(), 1_002);
  assert_eq!(lines[0], "NOT");
  assert_eq!(lines[1], " ╰──NOT");
  assert_eq!(lines[1_001], format!("{}╰──q", " ".repeat(1 + 4 * 999)));
}

#[test]
fn wide_terms_report_exact_counts() {
  let em       = ExprManager::new();
  let p        = boolean_var(&em, "p").into_expr();
  let width    = 70_000;
  let children = vec![p; width];
  let wide     = em.mk_expr(Kind::And, &children).unwrap();

  assert_eq!(wide.num_children().unwrap(), width);
  assert!(matches!(
    wide.child(width),
    Err(ExprError::ArityMismatch { expected: Arity::Value(70_000), actual: 70_000, .. })
  ));
}

#[test]
fn format_styles() {
  let em      = ExprManager::new();
  let p       = boolean_var(&em, "p");
  let q       = boolean_var(&em, "q");
  let formula = p.or_expr(&q).unwrap();

  assert_eq!(formula.repr(FormatStyle::Default), "(or p q)");
  assert_eq!(formula.repr(FormatStyle::Simple), "OR(p, q)");

  let debug = format!("{:?}", formula);
  assert!(debug.starts_with("(or p#"));
  assert!(debug.ends_with(&format!("#{}", formula.id().unwrap())));
}

// endregion Output
