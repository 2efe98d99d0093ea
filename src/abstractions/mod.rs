/*!

Types/type aliases that abstract over the implementing backing type.

A motivating example is the `RcCell` type, a reference-counting smart pointer that provides run-time checked mutable
access to its contents. The expression manager's state lives in an `RcCell`, and every `Expr` and `Sort` handle holds
a clone of it. A number of external crates could provide this functionality. This module redirects to whatever chosen
implementation we want.

*/

mod nat_set;
mod rccell;
mod string_join;

// Logging
pub mod log;

// A set of natural numbers
pub use nat_set::NatSet;

// Reference counted pointers with mutable state.
pub use rccell::RcCell;

// Interned string.
pub use string_cache::DefaultAtom as IString;

// Join sequences with a separator
pub use string_join::{join_iter, join_string};

// Hash maps used by the hash-consing tables.
pub use std::collections::HashMap;
