// Disk manager takes care of the allocation and deallocation of pages within a
// heap file. It also performs read and write of pages to and from disk, and
// provides a logical file layer within the context of the storage engine.

use crate::common::config::AtomicPageId;
use crate::common::config::PAGE_SIZE;
use crate::common::config::PageId;
use crate::common::error::*;
use crate::common::reinterpret;
use log::debug;
use std::collections::hash_map::DefaultHasher;
use std::fs::File;
use std::fs::OpenOptions;
use std::hash::Hash;
use std::hash::Hasher;
use std::io::Error;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::sync::atomic::Ordering;

// TODO: DiskManager does not support creating directories, i.e. the
// |db_file| being passed to |DiskManager::new| has to be under an existing
// directory.

pub struct DiskManager {
  db_io: File,
  next_page_id: AtomicPageId,
}

impl DiskManager {
  // Reopening an existing file must resume page-id allocation where the
  // file left off, rather than from 0, since a file's page count is
  // otherwise tracked only by its header page, which the disk manager
  // doesn't interpret.
  pub fn new(db_file: &str) -> std::io::Result<Self> {
    let db_io = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(db_file)?;
    let next_page_id = (db_io.metadata()?.len() as usize / PAGE_SIZE) as PageId;
    Ok(DiskManager {
      db_io,
      next_page_id: AtomicPageId::new(next_page_id),
    })
  }

  // Writes data to page with the specified page ID on disk.
  // The caller needs to ensure that page_id >= 0 and is valid.
  pub fn write_page(&mut self,
                    page_id: PageId,
                    data: &mut [u8]) -> std::io::Result<()> {
    let offset = (page_id as usize) * PAGE_SIZE;
    self.db_io.seek(SeekFrom::Start(offset as u64))?;
    update_checksum(data);
    Self::write_inl(&mut self.db_io, data, PAGE_SIZE)?;
    self.db_io.sync_data()?;
    Ok(())
  }

  // Reads data from page with the specified page ID on disk.
  // The caller needs to ensure that page_id >= 0 and is valid.
  pub fn read_page(&mut self,
                   page_id: PageId,
                   data: &mut [u8]) -> std::io::Result<()> {
    let offset = (page_id as usize) * PAGE_SIZE;
    self.db_io.seek(SeekFrom::Start(offset as u64))?;
    Self::read_inl(&mut self.db_io, data, PAGE_SIZE)?;
    validate_checksum(data)?;
    Ok(())
  }

  pub fn allocate_page(&mut self) -> PageId {
    self.next_page_id.fetch_add(1, Ordering::SeqCst)
  }

  // Free-space reclamation across pages is out of scope for the heap-file
  // layer; kept on the trait surface for a future layer to hook.
  pub fn deallocate_page(&mut self, _page_id: PageId) {}

  fn write_inl(file: &mut File,
               data: &[u8],
               size: usize) -> std::io::Result<()> {
    let mut pos = 0;
    while pos < size {
      let bytes_written = file.write(&data[pos..size])?;
      if bytes_written == 0 {
        return Err(Error::new(ErrorKind::WriteZero,
                              "I/O error: wrote 0 byte"));
      }
      pos += bytes_written;
    }
    Ok(())
  }

  fn read_inl(file: &mut File,
              data: &mut [u8],
              size: usize) -> std::io::Result<()> {
    let mut pos = 0;
    while pos < size {
      let bytes_read = file.read(&mut data[pos..size])?;
      if bytes_read == 0 {
        return Err(Error::new(ErrorKind::UnexpectedEof,
                              "I/O error: read 0 byte"));
      }
      pos += bytes_read;
      debug!("Read {} bytes, {} total", bytes_read, pos);
    }
    Ok(())
  }
}

fn update_checksum(data: &mut [u8]) {
  reinterpret::write_u64(data, compute_checksum(&data[8..]));
}

fn validate_checksum(data: &[u8]) -> std::io::Result<()> {
  match reinterpret::read_u64(data) == compute_checksum(&data[8..]) {
    true => Ok(()),
    false => Err(invalid_data("Page corrupted")),
  }
}

fn compute_checksum(data: &[u8]) -> u64 {
  let mut hasher = DefaultHasher::new();
  data.hash(&mut hasher);
  hasher.finish()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::file_deleter::FileDeleter;

  #[test]
  fn disk_manager() {
    let mut file_deleter = FileDeleter::new();

    let file_path = "/tmp/heapfile_disk_manager.testfile";
    file_deleter.push(file_path);
    let result = DiskManager::new(file_path);
    assert!(result.is_ok(), "Failed to create DiskManager");

    let mut disk_mgr = result.unwrap();
    let page_id = disk_mgr.allocate_page();
    assert_eq!(0, page_id);

    let mut data = vec![0u8; PAGE_SIZE];
    let mut buffer = vec![0u8; PAGE_SIZE];
    for (i, byte) in data.iter_mut().enumerate().skip(8) {
      *byte = (i % 26 + 97) as u8;
    }

    assert!(disk_mgr.write_page(page_id, &mut data).is_ok());
    assert!(disk_mgr.read_page(page_id, &mut buffer).is_ok());
    assert_eq!(data[8..], buffer[8..], "Data read differs from data written");
    assert_eq!(
      reinterpret::read_u64(&buffer[0..8]),
      compute_checksum(&data[8..]),
      "Checksum set incorrectly"
    );
  }

  #[test]
  fn corrupted_page_fails_checksum() {
    let mut file_deleter = FileDeleter::new();

    let file_path = "/tmp/heapfile_disk_manager_corrupt.testfile";
    file_deleter.push(file_path);
    let mut disk_mgr = DiskManager::new(file_path).unwrap();

    let page_id = disk_mgr.allocate_page();
    let mut data = vec![0u8; PAGE_SIZE];
    data[100] = 42;
    assert!(disk_mgr.write_page(page_id, &mut data).is_ok());

    // Corrupt a byte directly on disk, bypassing the disk manager.
    {
      let mut raw = OpenOptions::new().write(true).open(file_path).unwrap();
      raw.seek(SeekFrom::Start(100)).unwrap();
      raw.write_all(&[7]).unwrap();
    }

    let mut buffer = vec![0u8; PAGE_SIZE];
    assert!(disk_mgr.read_page(page_id, &mut buffer).is_err());
  }

  #[test]
  fn reopen_resumes_page_allocation() {
    let mut file_deleter = FileDeleter::new();

    let file_path = "/tmp/heapfile_disk_manager_resume.testfile";
    file_deleter.push(file_path);
    {
      let mut disk_mgr = DiskManager::new(file_path).unwrap();
      let mut data = vec![0u8; PAGE_SIZE];
      let first = disk_mgr.allocate_page();
      assert!(disk_mgr.write_page(first, &mut data).is_ok());
      let second = disk_mgr.allocate_page();
      assert!(disk_mgr.write_page(second, &mut data).is_ok());
    }
    // Reopening the same file must not hand out page 0 or 1 again: both were
    // written to disk, so the file's length reflects both.
    let mut disk_mgr = DiskManager::new(file_path).unwrap();
    assert_eq!(2, disk_mgr.allocate_page());
  }

  #[test]
  fn allocate_page_is_monotonic() {
    let mut file_deleter = FileDeleter::new();

    let file_path = "/tmp/heapfile_disk_manager_alloc.testfile";
    file_deleter.push(file_path);
    let mut disk_mgr = DiskManager::new(file_path).unwrap();

    assert_eq!(0, disk_mgr.allocate_page());
    assert_eq!(1, disk_mgr.allocate_page());
    assert_eq!(2, disk_mgr.allocate_page());
  }
}
