use std::collections::VecDeque;

/// Stack of color tokens not held by any participant
///
/// Joins take from the back, returned colors go to the front, so a color
/// released by a leaving player is the last one to be handed out again.
#[derive(Debug, Clone)]
pub struct ColorPool {
    available: VecDeque<String>,
    palette_size: usize,
}

impl ColorPool {
    pub fn new<I, S>(palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let available: VecDeque<String> = palette.into_iter().map(Into::into).collect();
        let palette_size = available.len();
        Self {
            available,
            palette_size,
        }
    }

    /// Take the next color, None when every color is in use
    pub fn pop(&mut self) -> Option<String> {
        self.available.pop_back()
    }

    /// Return a color to the front of the pool
    pub fn release(&mut self, color: String) {
        self.available.push_front(color);
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Colors currently available, front first
    pub fn available(&self) -> Vec<&str> {
        self.available.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_from_back() {
        let mut pool = ColorPool::new(["c1", "c2", "c3"]);

        assert_eq!(pool.pop().as_deref(), Some("c3"));
        assert_eq!(pool.pop().as_deref(), Some("c2"));
        assert_eq!(pool.available(), vec!["c1"]);
    }

    #[test]
    fn test_release_to_front() {
        let mut pool = ColorPool::new(["c1", "c2", "c3"]);

        let color = pool.pop().unwrap();
        pool.pop().unwrap();
        pool.release(color);

        assert_eq!(pool.available(), vec!["c3", "c1"]);
        assert_eq!(pool.palette_size(), 3);
    }

    #[test]
    fn test_exhausted_pool() {
        let mut pool = ColorPool::new(["only"]);

        assert!(pool.pop().is_some());
        assert!(pool.is_empty());
        assert!(pool.pop().is_none());
    }
}
