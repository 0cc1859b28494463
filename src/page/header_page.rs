// File-level header page layout, operating directly on a page frame's raw
// byte array (see table_page for why this is a free-function module rather
// than a Page-trait-implementing struct).
//
// Format (size in byte), starting after the disk manager's 8-byte checksum:
//  ---------------------------------------------------------------------
// | FileName (32) | FirstPage (4) | LastPage (4) | PageCnt (4) | RecCnt (4) |
//  ---------------------------------------------------------------------

use crate::common::config::PageId;
use crate::common::config::PAGE_SIZE;
use crate::common::config::CHECKSUM_SIZE;
use crate::common::config::INVALID_PAGE_ID;
use crate::common::reinterpret;

const FILE_NAME_OFFSET: usize = CHECKSUM_SIZE;
const FILE_NAME_SIZE: usize = 32;
const FIRST_PAGE_OFFSET: usize = FILE_NAME_OFFSET + FILE_NAME_SIZE;
const LAST_PAGE_OFFSET: usize = FIRST_PAGE_OFFSET + 4;
const PAGE_COUNT_OFFSET: usize = LAST_PAGE_OFFSET + 4;
const REC_COUNT_OFFSET: usize = PAGE_COUNT_OFFSET + 4;

pub fn init(data: &mut [u8; PAGE_SIZE], file_name: &str) {
  reinterpret::write_str(&mut data[FILE_NAME_OFFSET..(FILE_NAME_OFFSET + FILE_NAME_SIZE)], file_name);
  reinterpret::write_i32(&mut data[FIRST_PAGE_OFFSET..], INVALID_PAGE_ID);
  reinterpret::write_i32(&mut data[LAST_PAGE_OFFSET..], INVALID_PAGE_ID);
  reinterpret::write_u32(&mut data[PAGE_COUNT_OFFSET..], 0);
  reinterpret::write_u32(&mut data[REC_COUNT_OFFSET..], 0);
}

pub fn file_name(data: &[u8; PAGE_SIZE]) -> &str {
  reinterpret::read_str(&data[FILE_NAME_OFFSET..(FILE_NAME_OFFSET + FILE_NAME_SIZE)])
}

pub fn first_page(data: &[u8; PAGE_SIZE]) -> PageId {
  reinterpret::read_i32(&data[FIRST_PAGE_OFFSET..])
}

pub fn set_first_page(data: &mut [u8; PAGE_SIZE], page_id: PageId) {
  reinterpret::write_i32(&mut data[FIRST_PAGE_OFFSET..], page_id);
}

pub fn last_page(data: &[u8; PAGE_SIZE]) -> PageId {
  reinterpret::read_i32(&data[LAST_PAGE_OFFSET..])
}

pub fn set_last_page(data: &mut [u8; PAGE_SIZE], page_id: PageId) {
  reinterpret::write_i32(&mut data[LAST_PAGE_OFFSET..], page_id);
}

pub fn page_count(data: &[u8; PAGE_SIZE]) -> u32 {
  reinterpret::read_u32(&data[PAGE_COUNT_OFFSET..])
}

pub fn set_page_count(data: &mut [u8; PAGE_SIZE], count: u32) {
  reinterpret::write_u32(&mut data[PAGE_COUNT_OFFSET..], count);
}

pub fn rec_count(data: &[u8; PAGE_SIZE]) -> u32 {
  reinterpret::read_u32(&data[REC_COUNT_OFFSET..])
}

pub fn set_rec_count(data: &mut [u8; PAGE_SIZE], count: u32) {
  reinterpret::write_u32(&mut data[REC_COUNT_OFFSET..], count);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::common::config::PAGE_SIZE;

  #[test]
  fn init_and_accessors_round_trip() {
    let mut data = [0u8; PAGE_SIZE];
    init(&mut data, "t1");
    assert_eq!("t1", file_name(&data));
    assert_eq!(INVALID_PAGE_ID, first_page(&data));
    assert_eq!(INVALID_PAGE_ID, last_page(&data));
    assert_eq!(0, page_count(&data));
    assert_eq!(0, rec_count(&data));

    set_first_page(&mut data, 1);
    set_last_page(&mut data, 1);
    set_page_count(&mut data, 1);
    set_rec_count(&mut data, 3);
    assert_eq!(1, first_page(&data));
    assert_eq!(1, last_page(&data));
    assert_eq!(1, page_count(&data));
    assert_eq!(3, rec_count(&data));
  }
}
