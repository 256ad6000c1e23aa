//! Label suffix allocation
//!
//! Comparison instructions and call sites need jump labels that never
//! collide anywhere in the assembled program, including across translation
//! units. One allocator instance is owned by the program assembler and
//! threaded by mutable reference through every lowering call; it is never
//! reset between units.

/// Strictly increasing suffix source for generated labels
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: u32,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next suffix. Two calls never return the same value.
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_are_strictly_increasing() {
        let mut labels = LabelAllocator::new();
        let a = labels.next();
        let b = labels.next();
        let c = labels.next();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_starts_at_zero() {
        let mut labels = LabelAllocator::new();
        assert_eq!(labels.next(), 0);
    }
}
