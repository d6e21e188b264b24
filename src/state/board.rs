//! Kanban board state: columns, cursor and per-column scroll memory

use super::classify::{BoardKind, COLUMN_COUNT};
use super::entity::Entity;
use std::ops::Range;

/// Lines reserved for title, help line, column header and borders
const CHROME_HEIGHT: usize = 10;
/// Smallest body height used for capacity, even on tiny terminals
const MIN_BODY_HEIGHT: usize = 5;

/// A fixed board column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub members: Vec<Entity>,
}

impl Column {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Board state shared by the projects and todos views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(super) kind: BoardKind,
    pub(super) columns: Vec<Column>,
    pub(super) selected_column: usize,
    pub(super) selected_index: usize,
    /// Last vertical position the user chose, reused when changing columns
    pub(super) desired_index: usize,
    pub(super) scroll_offset: Vec<usize>,
    pub(super) desired_scroll_offset: Vec<usize>,
    pub(super) width: u16,
    pub(super) height: u16,
}

impl Board {
    /// Partition entities into columns, keeping arrival order within each
    pub fn new(kind: BoardKind, entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut columns: Vec<Column> = kind
            .column_names()
            .into_iter()
            .map(|name| Column {
                name,
                members: Vec::new(),
            })
            .collect();

        for entity in entities {
            if let Some(column) = entity.column() {
                columns[column].members.push(entity);
            }
        }

        let selected_column = columns.iter().position(|c| !c.is_empty()).unwrap_or(0);

        Self {
            kind,
            columns,
            selected_column,
            selected_index: 0,
            desired_index: 0,
            scroll_offset: vec![0; COLUMN_COUNT],
            desired_scroll_offset: vec![0; COLUMN_COUNT],
            width: 0,
            height: 0,
        }
    }

    pub fn kind(&self) -> BoardKind {
        self.kind
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    #[allow(dead_code)]
    pub fn desired_index(&self) -> usize {
        self.desired_index
    }

    pub fn scroll_offset(&self, column: usize) -> usize {
        self.scroll_offset.get(column).copied().unwrap_or(0)
    }

    #[allow(dead_code)]
    pub fn desired_scroll_offset(&self, column: usize) -> usize {
        self.desired_scroll_offset.get(column).copied().unwrap_or(0)
    }

    #[allow(dead_code)]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Whether no column holds anything
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }

    /// Entity under the cursor
    pub fn selected(&self) -> Option<&Entity> {
        self.columns
            .get(self.selected_column)
            .and_then(|c| c.members.get(self.selected_index))
    }

    /// Number of cards that fit in a column for the current height
    pub fn capacity(&self) -> usize {
        let body = (self.height as usize)
            .saturating_sub(CHROME_HEIGHT)
            .max(MIN_BODY_HEIGHT);
        (body / self.kind.row_height()).max(1)
    }

    /// Indices of the members currently drawn for a column
    pub fn visible_range(&self, column: usize) -> Range<usize> {
        let len = self.columns.get(column).map(Column::len).unwrap_or(0);
        let start = self.scroll_offset(column).min(len);
        let end = (start + self.capacity()).min(len);
        start..end
    }

    /// Record a new viewport. Scroll memory is dropped and the cursor goes
    /// back to the top of the focused column.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll_offset.iter_mut().for_each(|o| *o = 0);
        self.desired_scroll_offset.iter_mut().for_each(|o| *o = 0);
        if !self.columns[self.selected_column].is_empty() {
            self.selected_index = 0;
        }
        self.desired_index = 0;
    }

    pub fn move_up(&mut self) {
        if self.selected_index == 0 || self.current_len() == 0 {
            return;
        }
        self.selected_index -= 1;
        self.desired_index = self.selected_index;
        self.follow_selection();
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 >= self.current_len() {
            return;
        }
        self.selected_index += 1;
        self.desired_index = self.selected_index;
        self.follow_selection();
    }

    /// Focus the nearest non-empty column to the left, if any
    pub fn move_left(&mut self) {
        let target = (0..self.selected_column)
            .rev()
            .find(|&i| !self.columns[i].is_empty());
        if let Some(column) = target {
            self.land_on(column);
        }
    }

    /// Focus the nearest non-empty column to the right, if any
    pub fn move_right(&mut self) {
        let target =
            (self.selected_column + 1..self.columns.len()).find(|&i| !self.columns[i].is_empty());
        if let Some(column) = target {
            self.land_on(column);
        }
    }

    fn current_len(&self) -> usize {
        self.columns[self.selected_column].len()
    }

    fn land_on(&mut self, column: usize) {
        let len = self.columns[column].len();
        self.selected_column = column;
        self.selected_index = self.desired_index.min(len.saturating_sub(1));
        self.scroll_offset[column] =
            self.clamp_scroll(column, self.desired_scroll_offset[column], self.selected_index);
    }

    /// Scroll the focused column just enough to show the cursor and remember it
    pub(super) fn follow_selection(&mut self) {
        let column = self.selected_column;
        let offset = self.clamp_scroll(column, self.scroll_offset[column], self.selected_index);
        self.scroll_offset[column] = offset;
        self.desired_scroll_offset[column] = offset;
    }

    /// Largest valid scroll offset for a column
    pub(super) fn max_scroll(&self, column: usize) -> usize {
        self.columns[column].len().saturating_sub(self.capacity())
    }

    /// Bring `offset` into range and move it the minimum needed so `index`
    /// is inside the window.
    pub(super) fn clamp_scroll(&self, column: usize, offset: usize, index: usize) -> usize {
        let capacity = self.capacity();
        let mut offset = offset.min(self.max_scroll(column));
        if index < offset {
            offset = index;
        } else if index >= offset + capacity {
            offset = index + 1 - capacity;
        }
        offset
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Panics when a board breaks a cursor or scroll invariant
    pub fn assert_invariants(board: &Board) {
        let capacity = board.capacity();
        for (i, column) in board.columns().iter().enumerate() {
            let max = column.len().saturating_sub(capacity);
            assert!(
                board.scroll_offset(i) <= max,
                "column {i} offset {} beyond {max}",
                board.scroll_offset(i)
            );
        }

        if board.is_empty() {
            return;
        }

        let column = board.selected_column();
        let len = board.columns()[column].len();
        assert!(len > 0, "selection rests on empty column {column}");
        assert!(board.selected_index() < len);

        let offset = board.scroll_offset(column);
        assert!(offset <= board.selected_index());
        assert!(board.selected_index() < offset + capacity);
    }
}
