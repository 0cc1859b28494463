// Default-construction for types whose instances get pre-allocated in bulk
// (buffer pool frames, replacer state), kept distinct from `std::default::Default`
// so the buffer pool manager's trait bounds stay explicit about what they need.
pub trait Newable {
  fn new() -> Self;
}
