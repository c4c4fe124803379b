use std::{fs, path::Path};

use engine::{Column, Sort, SortDirection, TableState};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Table preferences remembered between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LocalState {
    pub page_size: Option<usize>,
    pub sort: Option<SavedSort>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedSort {
    /// Column key, as sent by the backend.
    pub column: String,
    pub descending: bool,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn capture(table: &TableState) -> Self {
        Self {
            page_size: Some(table.page_size()),
            sort: table.sort().map(|sort| SavedSort {
                column: sort.column.key().to_string(),
                descending: sort.direction == SortDirection::Desc,
            }),
        }
    }

    /// Sort to restore, ignoring columns that no longer exist.
    pub fn restored_sort(&self) -> Option<Sort> {
        let saved = self.sort.as_ref()?;
        let column = Column::from_key(&saved.column)?;
        let direction = if saved.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Some(Sort { column, direction })
    }
}
