/*!
Storage for canonical, reference counted entries. This is two layers:

 1. An `Arena` of slots addressed by `SlotIndex`, with a free list for reuse and a creation-order id per allocation.
 2. A `HashConsTable` over the arena, mapping each structural key to its unique live slot and tracking share counts.

The expression manager keeps one table of term nodes and one table of sorts. Entries are evicted as soon as their
last share is released; there is no separate collection phase.

*/
mod arena;
mod hash_cons;


pub use arena::SlotIndex;
pub(crate) use hash_cons::{HashConsTable, Interned};
