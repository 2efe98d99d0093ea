use std::error::Error;

use smtexpr::{
  api::{
    BoolExpr,
    ConstructorDecl,
    DatatypeDecl,
    ExprManager,
    Kind,
    SelectorRange
  },
  log::{info, set_global_logging_threshold}
};

fn main() -> Result<(), Box<dyn Error>> {
  set_global_logging_threshold(3);

  let em   = ExprManager::new();
  let int  = em.integer_sort();
  let bv32 = em.mk_bit_vector_sort(32)?;
  let memory = em.mk_array_sort(&bv32, &bv32)?;

  println!("{} has {}-bit indices.", memory, memory.array_index_sort()?.bv_size()?);

  // paramlist<T> = cons(head: T, tail: paramlist<T>) | nil
  let t = em.mk_param_sort("T");
  let mut declaration = DatatypeDecl::parametric("paramlist", vec![t.clone()]);
  declaration.add_constructor(
    ConstructorDecl::new("cons")
        .with_selector("head", SelectorRange::Sort(t))
        .with_selector("tail", SelectorRange::SelfSort)
  );
  declaration.add_constructor(ConstructorDecl::new("nil"));
  let generic = em.mk_datatype_sort(&declaration)?;
  let ints    = generic.instantiate(&[int.clone()])?;

  for constructor in ints.datatype()?.constructors() {
    for selector in constructor.selectors() {
      println!("{}.{} : {}", constructor.name(), selector.name(), selector.range());
    }
  }

  // Asking a datatype for its bit width is a kind error, not a crash.
  if let Err(error) = ints.bv_size() {
    println!("{}", error);
  }

  let x = em.mk_var("x", &int)?;
  let y = em.mk_var("y", &int)?;
  let sum     = em.mk_expr(Kind::Plus, &[x.clone(), y.clone()])?;
  let bounded = BoolExpr::new(&em.mk_expr(Kind::Lt, &[sum, em.mk_integer(10)])?)?;
  let ordered = BoolExpr::new(&em.mk_expr(Kind::Leq, &[x, y])?)?;
  let formula = bounded.and_expr(&ordered)?.not_expr()?;

  println!("{}", formula);
  formula.print_ast(&mut std::io::stdout(), 2)?;

  info!(
    1,
    "{} nodes, {} sorts, {} datatypes",
    em.node_count(),
    em.sort_count(),
    em.datatype_count()
  );
  Ok(())
}
