//! A heap-file layer for a disk-backed storage engine: an on-disk file of
//! pages presented as an unordered collection of variable-length records,
//! with random lookup by record identifier, filtered sequential scans with
//! mark/reset, and append-only insertion. Transactions, durability beyond
//! write-back, recovery, indexing, and schema management are out of scope;
//! this crate assumes an external buffer manager and file manager, which it
//! implements directly (see `buffer` and `disk`) rather than leaving as
//! collaborator interfaces, since no other consumer of this workspace needs
//! them independently.

pub mod buffer;
pub mod common;
pub mod disk;
pub mod heap;
pub mod logging;
pub mod page;

#[cfg(test)]
pub mod testing;

pub use crate::common::config::PageId;
pub use crate::common::error::HeapFileError;
pub use crate::common::rid::Rid;
pub use crate::heap::handle::create;
pub use crate::heap::handle::destroy;
pub use crate::heap::handle::HeapFile;
pub use crate::heap::insert::HeapInsert;
pub use crate::heap::predicate::Op;
pub use crate::heap::predicate::ValueType;
pub use crate::heap::scan::HeapScan;
