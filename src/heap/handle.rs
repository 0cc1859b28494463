// Heap-file lifecycle and handle: the free functions `create`/`destroy` that
// initialize or remove an on-disk file, and the `HeapFile` handle that opens
// an existing file, services point lookups, and guarantees pin cleanup on
// teardown. `HeapScan` and `HeapInsert` (see scan.rs/insert.rs) are facades
// that borrow a `HeapFile` and add filtered-scan and append-only-insert
// behavior on top of its cursor, per the composition-over-inheritance
// redesign this layer adopts.

use crate::buffer::buffer_pool_manager::DefaultBufferPoolManager;
use crate::common::config::DEFAULT_POOL_SIZE;
use crate::common::config::HEADER_PAGE_ID;
use crate::common::config::INVALID_PAGE_ID;
use crate::common::config::PageId;
use crate::common::error::HeapFileError;
use crate::common::rid::Rid;
use crate::logging::error_logging::ErrorLogging;
use crate::page::header_page;
use crate::page::page::Page;
use crate::page::raw_page::RawPage;
use crate::page::table_page;
use log::info;
use std::path::Path;

pub type Bpm = DefaultBufferPoolManager<RawPage>;

// Creates a new heap file named `name` with one empty data page linked from
// its header. Fails with `HeapFileError::FileExists` if the file already
// exists.
pub fn create(name: &str) -> Result<(), HeapFileError> {
  info!("Create heap file; name = {}", name);
  if Path::new(name).exists() {
    return Err(HeapFileError::FileExists);
  }
  let mut bpm = Bpm::new(DEFAULT_POOL_SIZE, name).map_err(HeapFileError::Io)?;

  let header_page_id = bpm.new_page().map_err(HeapFileError::Io)?.page_id();
  let data_page_id = {
    let data_page = bpm.new_page().map_err(HeapFileError::Io)?;
    let id = data_page.page_id();
    table_page::init(data_page.data_mut(), id);
    id
  };

  {
    let header = bpm.get_page_mut(header_page_id).map_err(HeapFileError::Io)?;
    header_page::init(header.data_mut(), name);
    header_page::set_first_page(header.data_mut(), data_page_id);
    header_page::set_last_page(header.data_mut(), data_page_id);
    header_page::set_page_count(header.data_mut(), 1);
    header_page::set_rec_count(header.data_mut(), 0);
  }

  bpm.unpin_page(header_page_id, /*is_dirty=*/ true).map_err(HeapFileError::Io)?;
  bpm.unpin_page(data_page_id, /*is_dirty=*/ true).map_err(HeapFileError::Io)?;
  Ok(())
}

// Removes a heap file from disk. Delegates to the file system; returns its
// status.
pub fn destroy(name: &str) -> Result<(), HeapFileError> {
  info!("Destroy heap file; name = {}", name);
  std::fs::remove_file(name).map_err(HeapFileError::Io)
}

// Opens an existing heap file: the header page, the at-most-one pinned data
// page cursor, and the most recently accessed record identifier. See §3 of
// the component design for the invariants this type upholds.
pub struct HeapFile {
  bpm: Bpm,
  closed: bool,
  hdr_dirty: bool,
  cur_page_no: PageId,
  cur_dirty: bool,
  cur_rec: Rid,
}

impl Drop for HeapFile {
  fn drop(&mut self) {
    // Unable to surface teardown errors to a caller from a destructor.
    self.close_mut().log();
  }
}

impl HeapFile {
  // Opens an existing heap file, pinning its header page for the lifetime
  // of the handle. The cursor starts absent; `curRec` is null.
  pub fn open(name: &str) -> Result<Self, HeapFileError> {
    info!("Open heap file; name = {}", name);
    let mut bpm = Bpm::new(DEFAULT_POOL_SIZE, name).map_err(HeapFileError::Io)?;
    bpm.fetch_page(HEADER_PAGE_ID).map_err(HeapFileError::Io)?;
    Ok(HeapFile {
      bpm,
      closed: false,
      hdr_dirty: false,
      cur_page_no: INVALID_PAGE_ID,
      cur_dirty: false,
      cur_rec: Rid::null(),
    })
  }

  pub fn rec_count(&self) -> u32 {
    header_page::rec_count(self.header().data())
  }

  // Point lookup by record identifier: reposition the cursor onto the
  // rid's page (pinning/unpinning as needed per §4.3), then read its slot.
  pub fn get_record(&mut self, rid: Rid) -> Result<Vec<u8>, HeapFileError> {
    self.reposition_cursor(rid.page_id())?;
    let record = table_page::get_record(self.cursor_page().data(), rid.slot_num())?;
    self.cur_rec = rid;
    Ok(record)
  }

  // Explicit, fallible teardown. Equivalent to letting the handle drop,
  // except the error (if any) is surfaced to the caller instead of only
  // logged. Idempotent, like the drop path it shares.
  pub fn close(mut self) -> Result<(), HeapFileError> {
    self.close_mut()
  }

  fn close_mut(&mut self) -> Result<(), HeapFileError> {
    if self.closed {
      return Ok(());
    }
    self.closed = true;
    let mut result = Ok(());
    if self.cur_page_no != INVALID_PAGE_ID {
      if let Err(e) = self.bpm.unpin_page(self.cur_page_no, self.cur_dirty) {
        result = Err(HeapFileError::Io(e));
      }
      self.cur_page_no = INVALID_PAGE_ID;
      self.cur_rec = Rid::null();
    }
    if let Err(e) = self.bpm.unpin_page(HEADER_PAGE_ID, self.hdr_dirty) {
      if result.is_ok() {
        result = Err(HeapFileError::Io(e));
      }
    }
    result
  }

  fn header(&self) -> &RawPage {
    self.bpm.get_page(HEADER_PAGE_ID)
        .expect("header page stays pinned for the handle's lifetime")
  }

  fn header_mut(&mut self) -> &mut RawPage {
    self.bpm.get_page_mut(HEADER_PAGE_ID)
        .expect("header page stays pinned for the handle's lifetime")
  }

  fn cursor_page(&self) -> &RawPage {
    self.bpm.get_page(self.cur_page_no)
        .expect("cursor page must be pinned before it is read")
  }

  // Repositions the cursor onto `page_id`, pinning it if needed and
  // unpinning the previous cursor page (with its dirty flag) if it named a
  // different page. A no-op if already positioned there.
  fn reposition_cursor(&mut self, page_id: PageId) -> Result<(), HeapFileError> {
    if self.cur_page_no == page_id {
      return Ok(());
    }
    if self.cur_page_no != INVALID_PAGE_ID {
      self.bpm.unpin_page(self.cur_page_no, self.cur_dirty).map_err(HeapFileError::Io)?;
    }
    self.bpm.fetch_page(page_id).map_err(HeapFileError::Io)?;
    self.cur_page_no = page_id;
    self.cur_dirty = false;
    Ok(())
  }

  // --- pub(crate) surface for the HeapScan/HeapInsert facades ---

  pub(crate) fn cur_page_no(&self) -> PageId {
    self.cur_page_no
  }

  pub(crate) fn cur_dirty(&self) -> bool {
    self.cur_dirty
  }

  pub(crate) fn set_cur_dirty(&mut self, dirty: bool) {
    self.cur_dirty = dirty;
  }

  pub(crate) fn cur_rec(&self) -> Rid {
    self.cur_rec
  }

  pub(crate) fn set_cur_rec(&mut self, rid: Rid) {
    self.cur_rec = rid;
  }

  pub(crate) fn cursor_data(&self) -> &[u8; crate::common::config::PAGE_SIZE] {
    self.cursor_page().data()
  }

  pub(crate) fn cursor_data_mut(&mut self) -> &mut [u8; crate::common::config::PAGE_SIZE] {
    self.bpm.get_page_mut(self.cur_page_no)
        .expect("cursor page must be pinned before it is written")
        .data_mut()
  }

  // Positions the cursor on `page_id` (same pin/unpin discipline as
  // `reposition_cursor`), clearing `curRec`. Used when a scan/insert moves
  // to a fresh page.
  pub(crate) fn reposition(&mut self, page_id: PageId) -> Result<(), HeapFileError> {
    self.reposition_cursor(page_id)?;
    self.cur_rec = Rid::null();
    Ok(())
  }

  // Unpins and clears the cursor without repositioning. Idempotent. Used
  // by `endScan`.
  pub(crate) fn release_cursor(&mut self) -> Result<(), HeapFileError> {
    if self.cur_page_no != INVALID_PAGE_ID {
      self.bpm.unpin_page(self.cur_page_no, self.cur_dirty).map_err(HeapFileError::Io)?;
      self.cur_page_no = INVALID_PAGE_ID;
      self.cur_rec = Rid::null();
    }
    Ok(())
  }

  pub(crate) fn header_first_page(&self) -> PageId {
    header_page::first_page(self.header().data())
  }

  pub(crate) fn header_last_page(&self) -> PageId {
    header_page::last_page(self.header().data())
  }

  pub(crate) fn set_header_last_page(&mut self, page_id: PageId) {
    header_page::set_last_page(self.header_mut().data_mut(), page_id);
    self.hdr_dirty = true;
  }

  pub(crate) fn increment_page_count(&mut self) {
    let count = header_page::page_count(self.header().data());
    header_page::set_page_count(self.header_mut().data_mut(), count + 1);
    self.hdr_dirty = true;
  }

  pub(crate) fn increment_rec_count(&mut self) {
    let count = header_page::rec_count(self.header().data());
    header_page::set_rec_count(self.header_mut().data_mut(), count + 1);
    self.hdr_dirty = true;
  }

  pub(crate) fn decrement_rec_count(&mut self) {
    let count = header_page::rec_count(self.header().data());
    header_page::set_rec_count(self.header_mut().data_mut(), count.saturating_sub(1));
    self.hdr_dirty = true;
  }

  // Allocates and initializes a fresh data page via the buffer pool,
  // returning its page id. The page is left pinned; callers are
  // responsible for unpinning it (directly, or by handing it to the
  // cursor via `adopt_pinned_cursor`).
  pub(crate) fn allocate_data_page(&mut self) -> Result<PageId, HeapFileError> {
    let page = self.bpm.new_page().map_err(HeapFileError::Io)?;
    let page_id = page.page_id();
    table_page::init(page.data_mut(), page_id);
    Ok(page_id)
  }

  // Attaches `page_id` as the cursor without pinning it: the caller must
  // already hold the single pin on it (e.g. from `allocate_data_page`).
  // Unlike `reposition`, this never touches the buffer pool's pin count,
  // since doing so here would double-pin a page the caller just allocated.
  pub(crate) fn adopt_pinned_cursor(&mut self, page_id: PageId) {
    self.cur_page_no = page_id;
    self.cur_dirty = false;
    self.cur_rec = Rid::null();
  }

  pub(crate) fn unpin(&mut self, page_id: PageId, dirty: bool) -> Result<(), HeapFileError> {
    self.bpm.unpin_page(page_id, dirty).map_err(HeapFileError::Io)
  }

  pub(crate) fn page_data(&self, page_id: PageId) -> &[u8; crate::common::config::PAGE_SIZE] {
    self.bpm.get_page(page_id)
        .expect("page must be pinned before it is read")
        .data()
  }

  pub(crate) fn page_data_mut(&mut self, page_id: PageId) -> &mut [u8; crate::common::config::PAGE_SIZE] {
    self.bpm.get_page_mut(page_id)
        .expect("page must be pinned before it is written")
        .data_mut()
  }
}
