//! Numeric command keys.

/// Hands out command keys in discovery order.
///
/// One allocator lives for the whole run; it is never reset, and its final
/// value is the number of commands generated.
#[derive(Debug, Clone, Default)]
pub struct KeyAllocator {
    next: u32,
}

impl KeyAllocator {
    pub fn new(seed: u32) -> Self {
        Self { next: seed }
    }

    /// Return the current key and move past it.
    pub fn next_key(&mut self) -> u32 {
        let key = self.next;
        self.next += 1;
        key
    }

    /// The key the next call to [`next_key`](Self::next_key) would return.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_sequential() {
        let mut keys = KeyAllocator::new(0);
        assert_eq!(keys.next_key(), 0);
        assert_eq!(keys.next_key(), 1);
        assert_eq!(keys.next_key(), 2);
        assert_eq!(keys.peek(), 3);
    }

    #[test]
    fn test_seed() {
        let mut keys = KeyAllocator::new(10);
        assert_eq!(keys.peek(), 10);
        assert_eq!(keys.next_key(), 10);
        assert_eq!(keys.peek(), 11);
    }
}
