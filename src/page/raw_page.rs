// A single concrete frame type for the buffer pool. Unlike a schema's catalog
// page and its data pages, a heap file's header page and data pages share one
// buffer pool, so they share one frame type: `RawPage` is an undifferentiated
// byte array plus bookkeeping, and `table_page`/`header_page` interpret its
// bytes according to the layout that belongs on a given page.

use crate::common::config::PageId;
use crate::common::config::INVALID_PAGE_ID;
use crate::common::config::PAGE_SIZE;
use crate::common::newable::Newable;
use crate::page::page::Page;

pub struct RawPage {
  data: [u8; PAGE_SIZE],
  page_id: PageId,
  pin_count: i32,
  is_dirty: bool,
}

impl Clone for RawPage {
  fn clone(&self) -> Self {
    RawPage {
      data: self.data,
      page_id: self.page_id,
      pin_count: self.pin_count,
      is_dirty: self.is_dirty,
    }
  }
}

impl Newable for RawPage {
  fn new() -> Self {
    RawPage {
      data: [0; PAGE_SIZE],
      page_id: INVALID_PAGE_ID,
      pin_count: 0,
      is_dirty: false,
    }
  }
}

impl Page for RawPage {
  fn data(&self) -> &[u8; PAGE_SIZE] {
    &self.data
  }

  fn data_mut(&mut self) -> &mut [u8; PAGE_SIZE] {
    &mut self.data
  }

  fn page_id(&self) -> PageId {
    self.page_id
  }

  fn page_id_mut(&mut self) -> &mut PageId {
    &mut self.page_id
  }

  fn pin_count(&self) -> i32 {
    self.pin_count
  }

  fn pin_count_mut(&mut self) -> &mut i32 {
    &mut self.pin_count
  }

  fn is_dirty(&self) -> bool {
    self.is_dirty
  }

  fn is_dirty_mut(&mut self) -> &mut bool {
    &mut self.is_dirty
  }
}
