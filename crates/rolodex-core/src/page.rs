//! One page of a paginated result.

/// A slice of a larger result set plus the numbers needed to describe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
  pub items: Vec<T>,
  /// Total number of matching rows across all pages.
  pub total: u64,
  /// Zero-based index of this page.
  pub page:  u32,
  pub size:  u32,
}

impl<T> Page<T> {
  /// `ceil(total / size)`, or 0 when there is nothing to page through.
  pub fn total_pages(&self) -> u64 {
    if self.size == 0 {
      return 0;
    }
    self.total.div_ceil(u64::from(self.size))
  }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items: self.items.into_iter().map(f).collect(),
      total: self.total,
      page:  self.page,
      size:  self.size,
    }
  }
}
