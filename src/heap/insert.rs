// Insert view: a facade borrowing a `HeapFile` that appends records,
// extending the file's page chain when the tail page is full. Always
// targets the tail page; never searches earlier pages for free space
// (O(1) amortized insertion, at the cost of fragmentation from deleted
// slots on earlier pages — see the component design's Design decision).

use crate::common::config::INVALID_PAGE_ID;
use crate::common::config::PAGE_FIXED_OVERHEAD;
use crate::common::config::PAGE_SIZE;
use crate::common::error::HeapFileError;
use crate::common::rid::Rid;
use crate::heap::handle::HeapFile;
use crate::page::table_page;

pub struct HeapInsert<'a> {
  file: &'a mut HeapFile,
}

impl<'a> HeapInsert<'a> {
  pub fn new(file: &'a mut HeapFile) -> Self {
    HeapInsert { file }
  }

  // Appends `record` to the tail page, extending the chain if the tail is
  // full. Fails with `InvalidRecLen` if the record could never fit on any
  // page, regardless of its current occupancy.
  pub fn insert_record(&mut self, record: &[u8]) -> Result<Rid, HeapFileError> {
    if record.len() > PAGE_SIZE - PAGE_FIXED_OVERHEAD {
      return Err(HeapFileError::InvalidRecLen);
    }

    if self.file.cur_page_no() == INVALID_PAGE_ID {
      let last_page = self.file.header_last_page();
      self.file.reposition(last_page)?;
    }

    let slot_num = match table_page::insert_record(self.file.cursor_data_mut(), record) {
      Ok(slot_num) => slot_num,
      Err(HeapFileError::NoSpace) => self.extend_and_insert(record)?,
      Err(e) => return Err(e),
    };

    self.file.increment_rec_count();
    self.file.set_cur_dirty(true);
    let rid = Rid::new(self.file.cur_page_no(), slot_num);
    self.file.set_cur_rec(rid);
    Ok(rid)
  }

  // Handles the `NoSpace` case: unpin the full tail, allocate and link a
  // new tail page, then retry the insertion (guaranteed to succeed, since
  // the record already passed the fixed-size precondition).
  fn extend_and_insert(&mut self, record: &[u8]) -> Result<usize, HeapFileError> {
    let old_tail = self.file.cur_page_no();
    self.file.release_cursor()?;

    let new_page_id = self.file.allocate_data_page()?;

    self.file.reposition(old_tail)?;
    table_page::set_next_page_id(self.file.cursor_data_mut(), new_page_id);
    self.file.set_cur_dirty(true);
    self.file.release_cursor()?;

    self.file.set_header_last_page(new_page_id);
    self.file.increment_page_count();

    self.file.adopt_pinned_cursor(new_page_id);
    table_page::insert_record(self.file.cursor_data_mut(), record)
  }
}
