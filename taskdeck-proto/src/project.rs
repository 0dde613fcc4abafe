//! Project types: the grouping entity tasks may point at.

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Color assigned to a project when none is supplied.
pub const DEFAULT_PROJECT_COLOR: &str = "#3B82F6";

/// Identifier of a [`Project`], assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u32);

impl ProjectId {
    /// Wraps a raw numeric id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, colored group of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned identifier, never reused.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Display color, typically a `#RRGGBB` hex string.
    pub color: String,
}

/// Input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Display name (required, non-empty).
    pub name: String,
    /// Display color; [`DEFAULT_PROJECT_COLOR`] when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NewProject {
    /// Creates an input with the given name and color.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Some(color.into()),
        }
    }

    /// Checks the input before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if the name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    /// Resolves the color, falling back to [`DEFAULT_PROJECT_COLOR`].
    #[must_use]
    pub fn color_or_default(&self) -> String {
        match self.color.as_deref() {
            Some(color) if !color.is_empty() => color.to_string(),
            _ => DEFAULT_PROJECT_COLOR.to_string(),
        }
    }

    /// Builds the stored project once an id has been assigned.
    #[must_use]
    pub fn into_project(self, id: ProjectId) -> Project {
        let color = self.color_or_default();
        Project {
            id,
            name: self.name,
            color,
        }
    }
}
