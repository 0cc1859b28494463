// Little-endian byte <-> integer/string conversions shared by every page
// layout. Kept as safe array copies rather than pointer-cast reinterprets:
// the slices handed out by a page are not guaranteed to be aligned for a
// `u32`/`u64` access, so a cast would be undefined behavior on strict-
// alignment targets.

pub fn read_u32(data: &[u8]) -> u32 {
  let mut buf = [0u8; 4];
  buf.copy_from_slice(&data[0..4]);
  u32::from_le_bytes(buf)
}

pub fn write_u32(data: &mut [u8], num: u32) {
  data[0..4].copy_from_slice(&num.to_le_bytes());
}

pub fn read_u64(data: &[u8]) -> u64 {
  let mut buf = [0u8; 8];
  buf.copy_from_slice(&data[0..8]);
  u64::from_le_bytes(buf)
}

pub fn write_u64(data: &mut [u8], num: u64) {
  data[0..8].copy_from_slice(&num.to_le_bytes());
}

pub fn read_i32(data: &[u8]) -> i32 {
  let mut buf = [0u8; 4];
  buf.copy_from_slice(&data[0..4]);
  i32::from_le_bytes(buf)
}

pub fn write_i32(data: &mut [u8], num: i32) {
  data[0..4].copy_from_slice(&num.to_le_bytes());
}

pub fn read_f32(data: &[u8]) -> f32 {
  let mut buf = [0u8; 4];
  buf.copy_from_slice(&data[0..4]);
  f32::from_le_bytes(buf)
}

pub fn write_f32(data: &mut [u8], num: f32) {
  data[0..4].copy_from_slice(&num.to_le_bytes());
}

pub fn read_str(data: &[u8]) -> &str {
  let mut len = 0;
  for v in data.iter() {
    if *v == 0 {
      break;
    }
    len += 1;
  }
  std::str::from_utf8(&data[0..len]).unwrap_or("")
}

pub fn write_str(data: &mut [u8], name: &str) {
  for (src, dst) in name.as_bytes().iter().zip(data.iter_mut()) {
    *dst = *src;
  }
  if name.len() < data.len() {
    data[name.len()] = 0;
  }
}
