//! Listing table declaration: columns, default sort, filters and actions.

use crate::{
    core::{product::ProductRow, storage::ImageStore},
    entities::product,
};
use sea_orm::{Order, Select};
use std::fmt;

/// How a column's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Thumbnail of a stored image; the cell holds its public URL
    Image,
    /// Plain text
    Text,
}

/// Reads a column's raw value from a listing row.
pub type CellFn = fn(&ProductRow) -> String;

/// One listing column.
#[derive(Clone)]
pub struct TableColumn {
    /// Attribute path, e.g. `amount` or `brand.name`
    pub name: &'static str,
    /// Rendering
    pub kind: ColumnKind,
    /// Text put before the value
    pub prefix: Option<String>,
    /// Text put after the value
    pub suffix: Option<String>,
    value: CellFn,
}

impl fmt::Debug for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .finish_non_exhaustive()
    }
}

impl TableColumn {
    /// An image column.
    #[must_use]
    pub fn image(name: &'static str, value: CellFn) -> Self {
        Self::new(name, ColumnKind::Image, value)
    }

    /// A text column.
    #[must_use]
    pub fn text(name: &'static str, value: CellFn) -> Self {
        Self::new(name, ColumnKind::Text, value)
    }

    const fn new(name: &'static str, kind: ColumnKind, value: CellFn) -> Self {
        Self {
            name,
            kind,
            prefix: None,
            suffix: None,
            value,
        }
    }

    /// Puts `prefix` before every value.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Puts `suffix` after every value.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Header text: the name with its last path segment dropped (`brand.name` → "Brand"),
    /// capitalized with spaces.
    #[must_use]
    pub fn header(&self) -> String {
        let base = self
            .name
            .rsplit_once('.')
            .map_or(self.name, |(relation, _)| relation);
        let spaced = base.replace('_', " ");
        let mut chars = spaced.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Renders this column for one row.
    pub fn render(&self, row: &ProductRow, store: &impl ImageStore) -> String {
        let raw = (self.value)(row);
        let value = match self.kind {
            ColumnKind::Image => store.url(&raw),
            ColumnKind::Text => raw,
        };

        format!(
            "{}{value}{}",
            self.prefix.as_deref().unwrap_or_default(),
            self.suffix.as_deref().unwrap_or_default()
        )
    }
}

/// A named narrowing of the listing query.
#[derive(Clone, Copy)]
pub struct TableFilter {
    /// Identifier shown in the filter UI
    pub name: &'static str,
    /// Adds the filter's conditions to the query
    pub apply: fn(Select<product::Entity>) -> Select<product::Entity>,
}

impl fmt::Debug for TableFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableFilter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Actions the listing can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// Open a create form
    Create,
    /// Open an edit form for one row
    Edit,
    /// Delete one row
    Delete,
    /// Delete all selected rows
    DeleteBulk,
}

impl fmt::Display for TableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::DeleteBulk => "delete bulk",
        })
    }
}

/// Where an action is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionScope {
    /// Above the table, acting on the whole collection
    Header,
    /// On each row
    Row,
    /// On the current selection
    Bulk,
}

/// Sort direction of the default ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first
    Asc,
    /// Largest first
    Desc,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// Complete declaration of a listing table.
#[derive(Debug, Clone)]
pub struct TableSchema {
    columns: Vec<TableColumn>,
    default_sort: (product::Column, SortDirection),
    filters: Vec<TableFilter>,
    header_actions: Vec<TableAction>,
    row_actions: Vec<TableAction>,
    bulk_actions: Vec<TableAction>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            default_sort: (product::Column::Id, SortDirection::Asc),
            filters: Vec::new(),
            header_actions: Vec::new(),
            row_actions: Vec::new(),
            bulk_actions: Vec::new(),
        }
    }
}

impl TableSchema {
    /// An empty table sorted by ID.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the columns, in display order.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = TableColumn>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Sets the ordering used when the user picked none.
    #[must_use]
    pub fn default_sort(mut self, column: product::Column, direction: SortDirection) -> Self {
        self.default_sort = (column, direction);
        self
    }

    /// Sets the available filters.
    #[must_use]
    pub fn filters(mut self, filters: impl IntoIterator<Item = TableFilter>) -> Self {
        self.filters = filters.into_iter().collect();
        self
    }

    /// Sets the actions above the table.
    #[must_use]
    pub fn header_actions(mut self, actions: impl IntoIterator<Item = TableAction>) -> Self {
        self.header_actions = actions.into_iter().collect();
        self
    }

    /// Sets the actions on each row.
    #[must_use]
    pub fn actions(mut self, actions: impl IntoIterator<Item = TableAction>) -> Self {
        self.row_actions = actions.into_iter().collect();
        self
    }

    /// Sets the actions on the selection.
    #[must_use]
    pub fn bulk_actions(mut self, actions: impl IntoIterator<Item = TableAction>) -> Self {
        self.bulk_actions = actions.into_iter().collect();
        self
    }

    /// Columns in display order.
    #[must_use]
    pub fn column_list(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Default ordering as a query order.
    #[must_use]
    pub fn sort(&self) -> (product::Column, Order) {
        (self.default_sort.0, self.default_sort.1.into())
    }

    /// Declared default ordering.
    #[must_use]
    pub const fn sort_declaration(&self) -> (product::Column, SortDirection) {
        self.default_sort
    }

    /// Declared filters.
    #[must_use]
    pub fn filter_list(&self) -> &[TableFilter] {
        &self.filters
    }

    /// Actions offered in `scope`.
    #[must_use]
    pub fn actions_in(&self, scope: ActionScope) -> &[TableAction] {
        match scope {
            ActionScope::Header => &self.header_actions,
            ActionScope::Row => &self.row_actions,
            ActionScope::Bulk => &self.bulk_actions,
        }
    }

    /// Whether `action` is offered in `scope`.
    #[must_use]
    pub fn allows(&self, action: TableAction, scope: ActionScope) -> bool {
        self.actions_in(scope).contains(&action)
    }

    /// Header texts of every column.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(TableColumn::header).collect()
    }

    /// Renders the cells of one row.
    pub fn render_row(&self, row: &ProductRow, store: &impl ImageStore) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.render(row, store))
            .collect()
    }
}
