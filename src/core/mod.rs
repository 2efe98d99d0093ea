/*!

The internals behind the public handles. The manager's state is two hash-consing tables, one of term nodes and one of
sorts, plus the datatype definitions that `DATATYPE_SORT` entries refer to.

|                 | table entry key                      | entry attribute       | shares held by an entry  |
|:----------------|:-------------------------------------|:----------------------|:-------------------------|
| term node       | kind, children, payload              | sort, once known      | children, sort           |
| sort            | kind, component sorts, payload       | none                  | component sorts          |
| datatype        | (not hash-consed, indexed by number) | n/a                   | selector ranges, own sort|

Handles in the `api` module own one share each. Nothing here is reachable from outside the crate.

*/

pub(crate) mod allocator;
pub(crate) mod format;
pub(crate) mod manager_core;
pub(crate) mod node;
pub(crate) mod sort;

pub(crate) use manager_core::ManagerCore;
