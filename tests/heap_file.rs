// End-to-end scenarios over the public heap-file API: create/insert/lookup,
// page spill, filtered scans, mark/reset, delete+recount, plus ambient
// coverage (checksum corruption, FILEEXISTS, idempotent close).

use heapfile::HeapFile;
use heapfile::HeapFileError;
use heapfile::HeapInsert;
use heapfile::HeapScan;
use heapfile::Op;
use heapfile::ValueType;
use tempfile::TempDir;

// Each test gets its own temp directory so a heap file's path never collides
// across test runs; the directory (and the heap file inside it) is removed
// when `TempFile` drops.
struct TempFile {
  _dir: TempDir,
  path: String,
}

impl TempFile {
  fn new(name: &str) -> Self {
    let dir = TempDir::new().expect("failed to create temp directory");
    let path = dir.path().join(format!("{}.heap", name)).to_str().unwrap().to_string();
    TempFile { _dir: dir, path }
  }

  fn path(&self) -> &str {
    &self.path
  }
}

#[test]
fn s1_create_insert_lookup() {
  let tmp = TempFile::new("s1");
  assert!(heapfile::create(tmp.path()).is_ok());

  let (r1, r2, r3) = {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut insert = HeapInsert::new(&mut file);
    let r1 = insert.insert_record(b"A").unwrap();
    let r2 = insert.insert_record(b"BB").unwrap();
    let r3 = insert.insert_record(b"CCC").unwrap();
    (r1, r2, r3)
  };

  let mut file = HeapFile::open(tmp.path()).unwrap();
  assert_eq!(3, file.rec_count());
  assert_eq!(b"BB".to_vec(), file.get_record(r2).unwrap());

  let mut scan = HeapScan::new(&mut file);
  assert_eq!(r1, scan.scan_next().unwrap());
  assert_eq!(r2, scan.scan_next().unwrap());
  assert_eq!(r3, scan.scan_next().unwrap());
  assert!(matches!(scan.scan_next(), Err(HeapFileError::FileEof)));
}

#[test]
fn s2_page_spill() {
  let tmp = TempFile::new("s2");
  assert!(heapfile::create(tmp.path()).is_ok());

  // Sized so exactly 10 records fit per page.
  let payload_len = (heapfile::common::config::PAGE_SIZE
      - heapfile::common::config::PAGE_FIXED_OVERHEAD) / 10 - 8;
  let payload = vec![9u8; payload_len];

  {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut insert = HeapInsert::new(&mut file);
    for _ in 0..25 {
      assert!(insert.insert_record(&payload).is_ok());
    }
  }

  let mut file = HeapFile::open(tmp.path()).unwrap();
  assert_eq!(25, file.rec_count());
  assert_ne!(file.header_first_page(), file.header_last_page());

  let mut scan = HeapScan::new(&mut file);
  let mut count = 0;
  loop {
    match scan.scan_next() {
      Ok(_) => count += 1,
      Err(HeapFileError::FileEof) => break,
      Err(e) => panic!("unexpected error: {:?}", e),
    }
  }
  assert_eq!(25, count);
}

#[test]
fn s3_filtered_scan_integer_eq() {
  let tmp = TempFile::new("s3");
  assert!(heapfile::create(tmp.path()).is_ok());

  let mut rids = Vec::new();
  {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut insert = HeapInsert::new(&mut file);
    for v in [1i32, 2, 3, 2, 5] {
      rids.push(insert.insert_record(&v.to_le_bytes()).unwrap());
    }
  }

  let mut file = HeapFile::open(tmp.path()).unwrap();
  let mut scan = HeapScan::new(&mut file);
  scan.start_scan(0, 4, ValueType::Integer, Some(&2i32.to_le_bytes()), Op::Eq).unwrap();
  assert_eq!(rids[1], scan.scan_next().unwrap());
  assert_eq!(rids[3], scan.scan_next().unwrap());
  assert!(matches!(scan.scan_next(), Err(HeapFileError::FileEof)));
}

#[test]
fn s4_filtered_scan_string_lt() {
  let tmp = TempFile::new("s4");
  assert!(heapfile::create(tmp.path()).is_ok());

  let mut rids = Vec::new();
  {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut insert = HeapInsert::new(&mut file);
    for word in ["....apple", "....banana", "....cherry"] {
      rids.push(insert.insert_record(word.as_bytes()).unwrap());
    }
  }

  let mut file = HeapFile::open(tmp.path()).unwrap();
  let mut scan = HeapScan::new(&mut file);
  scan.start_scan(4, 1, ValueType::String, Some(b"c"), Op::Lt).unwrap();
  assert_eq!(rids[0], scan.scan_next().unwrap());
  assert_eq!(rids[1], scan.scan_next().unwrap());
  assert!(matches!(scan.scan_next(), Err(HeapFileError::FileEof)));
}

#[test]
fn s5_mark_and_reset() {
  let tmp = TempFile::new("s5");
  assert!(heapfile::create(tmp.path()).is_ok());

  {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut insert = HeapInsert::new(&mut file);
    insert.insert_record(b"r1").unwrap();
    insert.insert_record(b"r2").unwrap();
    insert.insert_record(b"r3").unwrap();
  }

  let mut file = HeapFile::open(tmp.path()).unwrap();
  let mut scan = HeapScan::new(&mut file);
  let r1 = scan.scan_next().unwrap();
  scan.mark_scan();
  let r2 = scan.scan_next().unwrap();
  let r3 = scan.scan_next().unwrap();
  assert_ne!(r1, r2);
  assert_ne!(r2, r3);

  assert!(scan.reset_scan().is_ok());
  assert_eq!(r2, scan.scan_next().unwrap());
}

#[test]
fn s6_delete_and_recount() {
  let tmp = TempFile::new("s6");
  assert!(heapfile::create(tmp.path()).is_ok());

  let (r1, r2, r3) = {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut insert = HeapInsert::new(&mut file);
    let r1 = insert.insert_record(b"A").unwrap();
    let r2 = insert.insert_record(b"BB").unwrap();
    let r3 = insert.insert_record(b"CCC").unwrap();
    (r1, r2, r3)
  };

  {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut scan = HeapScan::new(&mut file);
    assert_eq!(r1, scan.scan_next().unwrap());
    assert_eq!(r2, scan.scan_next().unwrap());
    assert!(scan.delete_record().is_ok());
  }

  let mut file = HeapFile::open(tmp.path()).unwrap();
  assert_eq!(2, file.rec_count());
  assert!(matches!(file.get_record(r2), Err(HeapFileError::InvalidSlotNo)));

  let mut scan = HeapScan::new(&mut file);
  assert_eq!(r1, scan.scan_next().unwrap());
  assert_eq!(r3, scan.scan_next().unwrap());
  assert!(matches!(scan.scan_next(), Err(HeapFileError::FileEof)));
}

#[test]
fn create_on_existing_file_fails() {
  let tmp = TempFile::new("exists");
  assert!(heapfile::create(tmp.path()).is_ok());
  assert!(matches!(heapfile::create(tmp.path()), Err(HeapFileError::FileExists)));
}

#[test]
fn create_destroy_is_identity_on_filesystem_state() {
  let tmp = TempFile::new("create_destroy");
  assert!(heapfile::create(tmp.path()).is_ok());
  assert!(std::path::Path::new(tmp.path()).exists());
  assert!(heapfile::destroy(tmp.path()).is_ok());
  assert!(!std::path::Path::new(tmp.path()).exists());
}

#[test]
fn open_close_preserves_counts() {
  let tmp = TempFile::new("open_close");
  assert!(heapfile::create(tmp.path()).is_ok());
  {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut insert = HeapInsert::new(&mut file);
    insert.insert_record(b"A").unwrap();
    insert.insert_record(b"B").unwrap();
  }

  let file = HeapFile::open(tmp.path()).unwrap();
  let first_page = file.header_first_page();
  let last_page = file.header_last_page();
  let rec_count = file.rec_count();
  assert!(file.close().is_ok());

  let file = HeapFile::open(tmp.path()).unwrap();
  assert_eq!(first_page, file.header_first_page());
  assert_eq!(last_page, file.header_last_page());
  assert_eq!(rec_count, file.rec_count());
}

#[test]
fn end_scan_is_idempotent() {
  let tmp = TempFile::new("end_scan_idempotent");
  assert!(heapfile::create(tmp.path()).is_ok());
  {
    let mut file = HeapFile::open(tmp.path()).unwrap();
    let mut insert = HeapInsert::new(&mut file);
    insert.insert_record(b"A").unwrap();
  }

  let mut file = HeapFile::open(tmp.path()).unwrap();
  let mut scan = HeapScan::new(&mut file);
  assert!(scan.scan_next().is_ok());
  assert!(scan.end_scan().is_ok());
  assert!(scan.end_scan().is_ok());
}

#[test]
fn insert_boundary_record_length() {
  let tmp = TempFile::new("boundary_len");
  assert!(heapfile::create(tmp.path()).is_ok());

  let mut file = HeapFile::open(tmp.path()).unwrap();
  let mut insert = HeapInsert::new(&mut file);
  let max_len = heapfile::common::config::PAGE_SIZE
      - heapfile::common::config::PAGE_FIXED_OVERHEAD;
  assert!(insert.insert_record(&vec![0u8; max_len]).is_ok());
}

#[test]
fn insert_one_byte_over_boundary_fails() {
  let tmp = TempFile::new("over_boundary_len");
  assert!(heapfile::create(tmp.path()).is_ok());

  let mut file = HeapFile::open(tmp.path()).unwrap();
  let mut insert = HeapInsert::new(&mut file);
  let over_len = heapfile::common::config::PAGE_SIZE
      - heapfile::common::config::PAGE_FIXED_OVERHEAD + 1;
  assert!(matches!(insert.insert_record(&vec![0u8; over_len]), Err(HeapFileError::InvalidRecLen)));
}
