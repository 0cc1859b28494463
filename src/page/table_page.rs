// Slotted data-page layout, operating directly on a page frame's raw byte
// array rather than on a page-trait-implementing struct: a heap file's
// header page and data pages share one buffer pool and one frame type
// (`RawPage`), so the layout lives in free functions instead.
//
// Format (size in byte), starting after the disk manager's 8-byte checksum:
//  ---------------------------------------------------------------------
// | PageId (4) | NextPageId (4) | FreeSpaceOffset (4) | SlotCount (4)   |
//  ---------------------------------------------------------------------
//  --------------------------------------------------------
// | Slot_1 offset (4) | Slot_1 length (4) | Slot_2 ... |
//  --------------------------------------------------------
// Tuple bytes are packed backward from the end of the page. A slot whose
// length field equals `TOMBSTONE` has been deleted; its directory entry is
// never reused and its identifier is never reassigned.

use crate::common::config::CHECKSUM_SIZE;
use crate::common::config::PageId;
use crate::common::config::PAGE_SIZE;
use crate::common::config::SENTINEL_END;
use crate::common::error::HeapFileError;
use crate::common::reinterpret;

const HEADER_START: usize = CHECKSUM_SIZE;
const PAGE_ID_OFFSET: usize = HEADER_START;
const NEXT_PAGE_ID_OFFSET: usize = HEADER_START + 4;
const FREE_SPACE_OFFSET_OFFSET: usize = HEADER_START + 8;
const SLOT_COUNT_OFFSET: usize = HEADER_START + 12;
const SLOT_DIR_START: usize = HEADER_START + 16;
const SLOT_SIZE: usize = 8;

pub const TOMBSTONE: u32 = u32::MAX;

// Initializes an empty page: no slots, free space spanning the whole page,
// chain terminated.
pub fn init(data: &mut [u8; PAGE_SIZE], page_id: PageId) {
  reinterpret::write_i32(&mut data[PAGE_ID_OFFSET..], page_id);
  reinterpret::write_i32(&mut data[NEXT_PAGE_ID_OFFSET..], SENTINEL_END);
  reinterpret::write_u32(&mut data[FREE_SPACE_OFFSET_OFFSET..], PAGE_SIZE as u32);
  reinterpret::write_u32(&mut data[SLOT_COUNT_OFFSET..], 0);
}

pub fn page_id(data: &[u8; PAGE_SIZE]) -> PageId {
  reinterpret::read_i32(&data[PAGE_ID_OFFSET..])
}

pub fn next_page_id(data: &[u8; PAGE_SIZE]) -> PageId {
  reinterpret::read_i32(&data[NEXT_PAGE_ID_OFFSET..])
}

pub fn set_next_page_id(data: &mut [u8; PAGE_SIZE], next_page_id: PageId) {
  reinterpret::write_i32(&mut data[NEXT_PAGE_ID_OFFSET..], next_page_id);
}

pub fn slot_count(data: &[u8; PAGE_SIZE]) -> usize {
  reinterpret::read_u32(&data[SLOT_COUNT_OFFSET..]) as usize
}

fn free_space_offset(data: &[u8; PAGE_SIZE]) -> usize {
  reinterpret::read_u32(&data[FREE_SPACE_OFFSET_OFFSET..]) as usize
}

fn slot_offset(slot_num: usize) -> usize {
  SLOT_DIR_START + slot_num * SLOT_SIZE
}

fn read_slot(data: &[u8; PAGE_SIZE], slot_num: usize) -> (u32, u32) {
  let off = slot_offset(slot_num);
  (reinterpret::read_u32(&data[off..]), reinterpret::read_u32(&data[(off + 4)..]))
}

fn write_slot(data: &mut [u8; PAGE_SIZE], slot_num: usize, record_offset: u32, record_len: u32) {
  let off = slot_offset(slot_num);
  reinterpret::write_u32(&mut data[off..], record_offset);
  reinterpret::write_u32(&mut data[(off + 4)..], record_len);
}

// Inserts `payload` into the first available space at the tail of the free
// region, appending a new slot directory entry. Never reuses a tombstoned
// slot's directory entry; there is no compaction in this layer.
pub fn insert_record(data: &mut [u8; PAGE_SIZE], payload: &[u8]) -> Result<usize, HeapFileError> {
  let count = slot_count(data);
  let dir_end = slot_offset(count);
  let free_end = free_space_offset(data);
  let needed = payload.len() + SLOT_SIZE;
  if dir_end + needed > free_end {
    return Err(HeapFileError::NoSpace);
  }
  let record_offset = free_end - payload.len();
  data[record_offset..(record_offset + payload.len())].copy_from_slice(payload);
  write_slot(data, count, record_offset as u32, payload.len() as u32);
  reinterpret::write_u32(&mut data[FREE_SPACE_OFFSET_OFFSET..], record_offset as u32);
  reinterpret::write_u32(&mut data[SLOT_COUNT_OFFSET..], (count + 1) as u32);
  Ok(count)
}

pub fn get_record(data: &[u8; PAGE_SIZE], slot_num: usize) -> Result<Vec<u8>, HeapFileError> {
  if slot_num >= slot_count(data) {
    return Err(HeapFileError::InvalidSlotNo);
  }
  let (record_offset, record_len) = read_slot(data, slot_num);
  if record_len == TOMBSTONE {
    return Err(HeapFileError::InvalidSlotNo);
  }
  let record_offset = record_offset as usize;
  let record_len = record_len as usize;
  Ok(data[record_offset..(record_offset + record_len)].to_vec())
}

pub fn delete_record(data: &mut [u8; PAGE_SIZE], slot_num: usize) -> Result<(), HeapFileError> {
  if slot_num >= slot_count(data) {
    return Err(HeapFileError::InvalidSlotNo);
  }
  let (record_offset, record_len) = read_slot(data, slot_num);
  if record_len == TOMBSTONE {
    return Err(HeapFileError::InvalidSlotNo);
  }
  write_slot(data, slot_num, record_offset, TOMBSTONE);
  Ok(())
}

pub fn first_record(data: &[u8; PAGE_SIZE]) -> Result<usize, HeapFileError> {
  for slot_num in 0..slot_count(data) {
    let (_, record_len) = read_slot(data, slot_num);
    if record_len != TOMBSTONE {
      return Ok(slot_num);
    }
  }
  Err(HeapFileError::NoRecords)
}

pub fn next_record(data: &[u8; PAGE_SIZE], prev: usize) -> Result<usize, HeapFileError> {
  let count = slot_count(data);
  let mut slot_num = prev + 1;
  while slot_num < count {
    let (_, record_len) = read_slot(data, slot_num);
    if record_len != TOMBSTONE {
      return Ok(slot_num);
    }
    slot_num += 1;
  }
  Err(HeapFileError::EndOfPage)
}
