// Heap-file layer configuration.

use std::sync::atomic::AtomicI32;

pub const INVALID_PAGE_ID: i32 = -1; // Represents an invalid page ID.
pub const SENTINEL_END: i32 = -1; // Marks the tail of a page chain's `next_page` link.
pub const HEADER_PAGE_ID: i32 = 0; // Every heap file's header page is the first page its disk manager allocates.
pub const PAGE_SIZE: usize = 4096; // Size of a page in bytes, on disk and in a buffer frame.
pub const CHECKSUM_SIZE: usize = 8; // Leading bytes of every page reserved for the disk manager's checksum.

// Overhead that must fit on an otherwise-empty data page before a single byte of
// record payload does: the checksum prefix, the table page's fixed header, and
// one slot directory entry (see page::table_page).
pub const PAGE_FIXED_OVERHEAD: usize = CHECKSUM_SIZE + 16 + 8;

pub const DEFAULT_POOL_SIZE: usize = 32;

pub type PageId = i32;
pub type AtomicPageId = AtomicI32;
