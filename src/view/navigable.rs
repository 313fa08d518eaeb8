//! Shared cursor navigation for selectable tables.

/// Cursor movement for tables with a single selected row.
///
/// Unlike a render-time resolver, every movement is clamped immediately so
/// callers can act on the newly selected row right away.
pub trait NavigableTable {
    fn selected(&self) -> usize;
    fn selected_mut(&mut self) -> &mut usize;
    fn row_count(&self) -> usize;

    fn last_index(&self) -> usize {
        self.row_count().saturating_sub(1)
    }

    fn select_up(&mut self) {
        *self.selected_mut() = self.selected().saturating_sub(1);
    }

    fn select_down(&mut self) {
        let last = self.last_index();
        *self.selected_mut() = self.selected().saturating_add(1).min(last);
    }

    fn page_up(&mut self, n: usize) {
        *self.selected_mut() = self.selected().saturating_sub(n);
    }

    fn page_down(&mut self, n: usize) {
        let last = self.last_index();
        *self.selected_mut() = self.selected().saturating_add(n).min(last);
    }

    fn home(&mut self) {
        *self.selected_mut() = 0;
    }

    fn end(&mut self) {
        *self.selected_mut() = self.last_index();
    }
}
