//! Applying API-confirmed entities back onto a board

use super::board::Board;
use super::entity::Entity;

/// Outcome of [`Board::apply_updated`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The entity now sits at `(column, index)` and is selected
    Placed { column: usize, index: usize },
    /// The entity was soft-deleted and left the board
    Removed,
    /// The board never held this entity; the caller should refetch
    Missing,
}

impl Board {
    /// Move an updated entity to the column and position it now belongs to.
    ///
    /// Selection follows the entity. Applying the same value twice leaves the
    /// board as a single application did.
    pub fn apply_updated(&mut self, updated: Entity) -> Reconciled {
        let Some((from_column, from_index)) = self.locate(&updated) else {
            return Reconciled::Missing;
        };
        self.columns[from_column].members.remove(from_index);

        let result = match updated.column() {
            Some(column) => {
                let index = self.insertion_point(column, &updated);
                self.columns[column].members.insert(index, updated);
                self.selected_column = column;
                self.selected_index = index;
                self.desired_index = index;
                self.follow_selection();
                Reconciled::Placed { column, index }
            }
            None => {
                self.repair_selection(from_column, from_index);
                Reconciled::Removed
            }
        };

        self.clamp_unfocused_scroll();
        result
    }

    /// Column and index of the member sharing `entity`'s identity
    pub fn locate(&self, entity: &Entity) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(c, column)| {
            column
                .members
                .iter()
                .position(|m| m.same_identity(entity))
                .map(|i| (c, i))
        })
    }

    fn insertion_point(&self, column: usize, entity: &Entity) -> usize {
        let members = &self.columns[column].members;
        members
            .iter()
            .position(|m| {
                entity.priority() > m.priority()
                    || (entity.priority() == m.priority() && entity.name() < m.name())
            })
            .unwrap_or(members.len())
    }

    /// Keep the cursor on the same member, or a real one, after something
    /// left `from_column` at `from_index`
    fn repair_selection(&mut self, from_column: usize, from_index: usize) {
        if from_column == self.selected_column && from_index < self.selected_index {
            self.selected_index -= 1;
            self.desired_index = self.selected_index;
        }
        if self.is_empty() {
            self.selected_index = 0;
            return;
        }
        if self.columns[self.selected_column].is_empty() {
            self.selected_column = self.columns.iter().position(|c| !c.is_empty()).unwrap_or(0);
            self.selected_index = 0;
        }
        let len = self.columns[self.selected_column].len();
        self.selected_index = self.selected_index.min(len - 1);
        self.follow_selection();
    }

    fn clamp_unfocused_scroll(&mut self) {
        for column in 0..self.columns.len() {
            if column == self.selected_column {
                continue;
            }
            let max = self.max_scroll(column);
            self.scroll_offset[column] = self.scroll_offset[column].min(max);
            self.desired_scroll_offset[column] = self.desired_scroll_offset[column].min(max);
        }
    }
}
