use serde::Serialize;

/// Current position inside a diff list
///
/// Every move reports whether the selection changed. Moves clamp at both
/// ends of the list; an empty list never has a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Navigator {
    count: usize,
    selected: Option<usize>,
}

impl Navigator {
    pub fn new(count: usize) -> Self {
        Navigator {
            count,
            selected: None,
        }
    }

    /// Starts over for a freshly computed list
    pub fn reset(&mut self, count: usize) {
        *self = Navigator::new(count);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn move_to(&mut self, selected: Option<usize>) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    fn last_index(&self) -> Option<usize> {
        self.count.checked_sub(1)
    }

    pub fn first(&mut self) -> bool {
        let target = (self.count > 0).then_some(0);
        self.move_to(target)
    }

    pub fn last(&mut self) -> bool {
        let target = self.last_index();
        self.move_to(target)
    }

    pub fn next(&mut self) -> bool {
        let target = match (self.selected, self.last_index()) {
            (_, None) => None,
            (None, Some(_)) => Some(0),
            (Some(current), Some(last)) => Some((current + 1).min(last)),
        };
        self.move_to(target)
    }

    pub fn prev(&mut self) -> bool {
        let target = match self.selected {
            _ if self.count == 0 => None,
            None => Some(0),
            Some(current) => Some(current.saturating_sub(1)),
        };
        self.move_to(target)
    }

    /// Jumps to `index`; out-of-range indices leave the selection alone
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Index `next` would move to, if it would move forward at all
    pub fn next_index(&self) -> Option<usize> {
        let last = self.last_index()?;
        match self.selected {
            None => Some(0),
            Some(current) if current < last => Some(current + 1),
            Some(_) => None,
        }
    }

    /// Index `prev` would move to, if it would move back at all
    pub fn prev_index(&self) -> Option<usize> {
        self.selected
            .filter(|&current| current > 0 && self.count > 0)
            .map(|current| current - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn navigator() -> Navigator {
        Navigator::new(3)
    }

    #[rstest]
    fn next_walks_forward_and_stops_at_the_end(mut navigator: Navigator) {
        assert!(navigator.next());
        assert_eq!(navigator.selected(), Some(0));
        assert!(navigator.next());
        assert!(navigator.next());
        assert_eq!(navigator.selected(), Some(2));
        assert!(!navigator.next());
        assert_eq!(navigator.next_index(), None);
    }

    #[rstest]
    fn prev_from_nothing_selects_the_first(mut navigator: Navigator) {
        assert!(navigator.prev());
        assert_eq!(navigator.selected(), Some(0));
        assert!(!navigator.prev());
        assert_eq!(navigator.prev_index(), None);
    }

    #[rstest]
    fn first_and_last_report_changes(mut navigator: Navigator) {
        assert!(navigator.last());
        assert!(!navigator.last());
        assert_eq!(navigator.prev_index(), Some(1));
        assert!(navigator.first());
        assert_eq!(navigator.next_index(), Some(1));
    }

    #[rstest]
    fn select_ignores_out_of_range(mut navigator: Navigator) {
        assert!(navigator.select(1));
        assert!(!navigator.select(3));
        assert_eq!(navigator.selected(), Some(1));
    }

    #[test]
    fn empty_lists_never_select() {
        let mut navigator = Navigator::new(0);

        assert!(!navigator.first());
        assert!(!navigator.last());
        assert!(!navigator.next());
        assert!(!navigator.prev());
        assert_eq!(navigator.selected(), None);
        assert_eq!(navigator.next_index(), None);
    }
}
