use super::CircleIndex;

/// Hands out circle indices in creation order.
///
/// The counter only moves forward: indices stay unique even if circles are
/// removed or the session is reset, so stale references can never alias a
/// newer circle.
#[derive(Debug, Clone, Default)]
pub struct IndexAllocator {
    next: u64,
}

impl IndexAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_index(&mut self) -> CircleIndex {
        let index = CircleIndex(self.next);
        self.next += 1;
        index
    }

    /// Number of indices handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
