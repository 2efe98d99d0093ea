/*!

Sorts as the manager stores them: structural keys in a hash-consing table, plus datatype definitions, which are not
structural and are referenced from a `DATATYPE_SORT` key by index.

*/

mod datatype_def;
mod sort_key;

pub(crate) use datatype_def::{ConstructorDef, DatatypeDef, DatatypeIndex, RangeDef, SelectorDef};
pub(crate) use sort_key::{SortKey, SortPayload, SortTable};
