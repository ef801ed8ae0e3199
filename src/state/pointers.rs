// Currently pressed pointer ids.
use std::collections::BTreeSet;

#[derive(Default, Debug, Clone)]
pub struct ActivePointers {
    ids: BTreeSet<i32>,
}

impl ActivePointers {
    /// Returns the count after insertion.
    pub fn press(&mut self, id: i32) -> usize {
        self.ids.insert(id);
        self.ids.len()
    }

    /// Returns the count after removal.
    pub fn release(&mut self, id: i32) -> usize {
        self.ids.remove(&id);
        self.ids.len()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The id when exactly one pointer is down.
    pub fn single(&self) -> Option<i32> {
        if self.ids.len() == 1 {
            self.ids.iter().next().copied()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_idempotent() {
        let mut p = ActivePointers::default();
        assert_eq!(p.press(3), 1);
        assert_eq!(p.press(3), 1);
        assert_eq!(p.single(), Some(3));
    }

    #[test]
    fn test_single_only_with_one_pointer() {
        let mut p = ActivePointers::default();
        p.press(1);
        p.press(2);
        assert_eq!(p.single(), None);
        assert_eq!(p.release(1), 1);
        assert_eq!(p.single(), Some(2));
        assert_eq!(p.release(7), 1);
        p.clear();
        assert!(p.is_empty());
    }
}
