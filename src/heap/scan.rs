// Filtered scan view: a facade borrowing a `HeapFile` that advances through
// pages and records, applying an optional typed predicate, with mark/reset
// and in-place delete.

use crate::common::config::PageId;
use crate::common::config::INVALID_PAGE_ID;
use crate::common::config::SENTINEL_END;
use crate::common::error::HeapFileError;
use crate::common::rid::Rid;
use crate::heap::handle::HeapFile;
use crate::heap::predicate::Op;
use crate::heap::predicate::Predicate;
use crate::heap::predicate::ValueType;
use crate::logging::error_logging::ErrorLogging;
use crate::page::table_page;

pub struct HeapScan<'a> {
  file: &'a mut HeapFile,
  predicate: Option<Predicate>,
  marked_page_no: PageId,
  marked_rec: Rid,
}

impl<'a> Drop for HeapScan<'a> {
  fn drop(&mut self) {
    self.end_scan().log();
  }
}

impl<'a> HeapScan<'a> {
  pub fn new(file: &'a mut HeapFile) -> Self {
    // A prior |get_record| on this handle may have left the shared cursor
    // parked mid-file; release it so the scan always starts at firstPage.
    file.release_cursor().log();
    HeapScan {
      file,
      predicate: None,
      marked_page_no: INVALID_PAGE_ID,
      marked_rec: Rid::null(),
    }
  }

  // Configures the scan's predicate. `filter == None` clears it, so the
  // scan yields every record; otherwise validates the parameters, failing
  // with `BadScanParm` on an invalid combination (see `Predicate::new`).
  pub fn start_scan(&mut self,
                    offset: usize,
                    length: usize,
                    value_type: ValueType,
                    filter: Option<&[u8]>,
                    op: Op) -> Result<(), HeapFileError> {
    self.predicate = match filter {
      None => None,
      Some(bytes) => Some(Predicate::new(offset, length, value_type, bytes, op)?),
    };
    Ok(())
  }

  // Advances to the next record satisfying the predicate (or the next
  // record at all, if unfiltered), forward-only and resumable from
  // `curRec`. The sentinel end-of-chain check happens before any attempt
  // to pin a next page, so a tail page's `SENTINEL_END` never causes a
  // spurious pin of an invalid page id.
  pub fn scan_next(&mut self) -> Result<Rid, HeapFileError> {
    loop {
      if self.file.cur_page_no() == INVALID_PAGE_ID {
        let first_page = self.file.header_first_page();
        self.file.reposition(first_page)?;
      }

      let candidate = if self.file.cur_rec().is_null() {
        table_page::first_record(self.file.cursor_data())
      } else {
        table_page::next_record(self.file.cursor_data(), self.file.cur_rec().slot_num())
      };

      match candidate {
        Ok(slot_num) => {
          let rid = Rid::new(self.file.cur_page_no(), slot_num);
          let is_match = match &self.predicate {
            None => true,
            Some(predicate) => {
              let record = table_page::get_record(self.file.cursor_data(), slot_num)?;
              predicate.matches(&record)
            }
          };
          self.file.set_cur_rec(rid);
          if is_match {
            return Ok(rid);
          }
        }
        Err(_) => {
          let next_page = table_page::next_page_id(self.file.cursor_data());
          if next_page == SENTINEL_END {
            self.file.set_cur_rec(Rid::null());
            return Err(HeapFileError::FileEof);
          }
          self.file.reposition(next_page)?;
        }
      }
    }
  }

  // Returns the record currently identified by `curRec`, leaving the
  // cursor page pinned.
  pub fn get_record(&self) -> Result<Vec<u8>, HeapFileError> {
    let rid = self.file.cur_rec();
    if rid.is_null() {
      return Err(HeapFileError::NoRecords);
    }
    table_page::get_record(self.file.cursor_data(), rid.slot_num())
  }

  // Deletes `curRec` from the cursor page; the slot identifier is never
  // reused for a different record.
  pub fn delete_record(&mut self) -> Result<(), HeapFileError> {
    let rid = self.file.cur_rec();
    if rid.is_null() {
      return Err(HeapFileError::NoRecords);
    }
    table_page::delete_record(self.file.cursor_data_mut(), rid.slot_num())?;
    self.file.set_cur_dirty(true);
    self.file.decrement_rec_count();
    Ok(())
  }

  // Flips the cursor's dirty flag, for callers that mutate record bytes
  // through a pointer obtained from `get_record`.
  pub fn mark_dirty(&mut self) {
    self.file.set_cur_dirty(true);
  }

  pub fn mark_scan(&mut self) {
    self.marked_page_no = self.file.cur_page_no();
    self.marked_rec = self.file.cur_rec();
  }

  // Restores the mark snapshot. If it names a different page, the current
  // cursor is unpinned (respecting its dirty flag) and the marked page
  // re-pinned, clean. This layer adopts the behavior that `curDirty` is
  // not preserved across a reset: a reset cleans the page's dirty tag,
  // trusting that prior modifications already folded into the buffer
  // manager's state via the unpin. Callers must `mark_dirty` again after
  // a reset if they resume mutating.
  pub fn reset_scan(&mut self) -> Result<(), HeapFileError> {
    if self.marked_page_no != self.file.cur_page_no() {
      self.file.reposition(self.marked_page_no)?;
    }
    self.file.set_cur_rec(self.marked_rec);
    Ok(())
  }

  // Unpins the cursor page if present and clears cursor state. Idempotent.
  pub fn end_scan(&mut self) -> Result<(), HeapFileError> {
    self.file.release_cursor()
  }
}
