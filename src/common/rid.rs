use crate::common::config::PageId;
use crate::common::config::INVALID_PAGE_ID;
use std::fmt;

// Record identifier: stable for a record's lifetime, never reused after the
// slot it names is deleted.
#[derive(Copy, Clone, Debug, Hash)]
pub struct Rid {
  page_id: PageId,
  slot_num: usize,
}

impl Rid {
  pub fn new(page_id: PageId, slot_num: usize) -> Self {
    Rid { page_id, slot_num }
  }

  // The distinguished "no record" identifier: a cursor positioned before the
  // first record of a page carries this as its `cur_rec`.
  pub fn null() -> Self {
    Rid { page_id: INVALID_PAGE_ID, slot_num: 0 }
  }

  pub fn is_null(&self) -> bool {
    self.page_id == INVALID_PAGE_ID
  }

  pub fn page_id(&self) -> PageId {
    self.page_id
  }

  pub fn slot_num(&self) -> usize {
    self.slot_num
  }
}

impl Default for Rid {
  fn default() -> Self {
    Rid::null()
  }
}

impl PartialEq for Rid {
  fn eq(&self, other: &Self) -> bool {
    self.page_id == other.page_id && self.slot_num == other.slot_num
  }
}

impl Eq for Rid {}

impl fmt::Display for Rid {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Rid[page_id: {}, slot_num: {}]", self.page_id, self.slot_num)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn null_rid_is_null() {
    assert!(Rid::null().is_null());
    assert!(Rid::default().is_null());
    assert!(!Rid::new(0, 0).is_null());
  }

  #[test]
  fn equality_compares_both_fields() {
    assert_eq!(Rid::new(1, 2), Rid::new(1, 2));
    assert_ne!(Rid::new(1, 2), Rid::new(1, 3));
    assert_ne!(Rid::new(1, 2), Rid::new(2, 2));
  }
}
