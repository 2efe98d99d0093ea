/*!

Hash-consed terms and sorts for an SMT solver.

Every term is a node in a DAG owned by an `ExprManager`. Structurally identical terms built by one manager are the
same node, so equality is a pointer comparison and subterms are shared. Nodes are reference counted through their
handles and freed as soon as the last handle or parent lets go. Every term and sort also has a `Kind`, and every
kind-specific query is checked against it.

```rust
use smtexpr::api::{BoolExpr, ExprManager, Kind};

let em = ExprManager::new();
let p  = BoolExpr::new(&em.mk_var("p", &em.boolean_sort()).unwrap()).unwrap();
let q  = BoolExpr::new(&em.mk_var("q", &em.boolean_sort()).unwrap()).unwrap();

let formula = p.and_expr(&q).unwrap().imp_expr(&p).unwrap();
assert_eq!(formula.kind().unwrap(), Kind::Implies);
assert_eq!(formula.to_string(), "(=> (and p q) p)");
```

*/

pub mod api;
pub mod abstractions;
mod core;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{
  log,
  IString
};
