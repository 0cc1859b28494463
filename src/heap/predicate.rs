// Typed predicate applied byte-wise to record payloads during a filtered
// scan. Comparisons use the sign convention "attribute minus filter": the
// record's bytes are the left-hand side.

use crate::common::error::HeapFileError;
use crate::common::reinterpret;
use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueType {
  Integer,
  Float,
  String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
  Lt,
  Lte,
  Eq,
  Gte,
  Gt,
  Ne,
}

pub struct Predicate {
  offset: usize,
  length: usize,
  value_type: ValueType,
  filter: Vec<u8>,
  op: Op,
}

impl Predicate {
  pub fn new(offset: usize,
             length: usize,
             value_type: ValueType,
             filter: &[u8],
             op: Op) -> Result<Self, HeapFileError> {
    if length == 0 || filter.len() != length {
      return Err(HeapFileError::BadScanParm);
    }
    match value_type {
      ValueType::Integer if length != 4 => return Err(HeapFileError::BadScanParm),
      ValueType::Float if length != 4 => return Err(HeapFileError::BadScanParm),
      _ => (),
    }
    Ok(Predicate { offset, length, value_type, filter: filter.to_vec(), op })
  }

  // Returns true iff |record| satisfies this predicate. The attribute must
  // fit entirely within the record; a short record never matches.
  pub fn matches(&self, record: &[u8]) -> bool {
    if self.offset + self.length > record.len() {
      return false;
    }
    let attr = &record[self.offset..(self.offset + self.length)];
    match self.value_type {
      ValueType::Integer => {
        let a = reinterpret::read_i32(attr);
        let b = reinterpret::read_i32(&self.filter);
        Self::apply_ordering(self.op, a.cmp(&b))
      }
      ValueType::String => Self::apply_ordering(self.op, attr.cmp(&self.filter[..])),
      ValueType::Float => {
        let diff = reinterpret::read_f32(attr) - reinterpret::read_f32(&self.filter);
        Self::apply_diff(self.op, diff)
      }
    }
  }

  fn apply_ordering(op: Op, ordering: Ordering) -> bool {
    match op {
      Op::Lt => ordering == Ordering::Less,
      Op::Lte => ordering != Ordering::Greater,
      Op::Eq => ordering == Ordering::Equal,
      Op::Gte => ordering != Ordering::Less,
      Op::Gt => ordering == Ordering::Greater,
      Op::Ne => ordering != Ordering::Equal,
    }
  }

  // Float comparison uses a raw subtraction (not `Ordering`) so NaN
  // propagates per IEEE754 instead of being special-cased.
  fn apply_diff(op: Op, diff: f32) -> bool {
    match op {
      Op::Lt => diff < 0.0,
      Op::Lte => diff <= 0.0,
      Op::Eq => diff == 0.0,
      Op::Gte => diff >= 0.0,
      Op::Gt => diff > 0.0,
      Op::Ne => diff != 0.0,
    }
  }
}
