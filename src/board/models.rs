use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::positions::PositionMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    pub name: String,
    pub order: u32,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Pipeline {
    pub fn new(id: impl Into<String>, name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            columns,
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn has_column(&self, column_id: &str) -> bool {
        self.column(column_id).is_some()
    }

    /// The column leads land in when they are added to this pipeline.
    pub fn first_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.order == 0)
    }

    /// Columns in display order. Stable, so stored sequence breaks ties.
    pub fn sorted_columns(&self) -> Vec<&Column> {
        let mut cols: Vec<&Column> = self.columns.iter().collect();
        cols.sort_by_key(|c| c.order);
        cols
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Blue,
    Green,
    Purple,
    Amber,
    Red,
}

impl TagColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }
}

impl FromStr for TagColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "purple" => Ok(Self::Purple),
            "amber" => Ok(Self::Amber),
            "red" => Ok(Self::Red),
            _ => Err(format!("Invalid tag color: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: TagColor,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: TagColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Connected,
    #[default]
    None,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Connected => "connected",
            Self::None => "none",
        }
    }
}

impl FromStr for ConnectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "connected" => Ok(Self::Connected),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid connection status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub connection_status: ConnectionStatus,
    #[serde(default)]
    pub pipeline_positions: PositionMap,
}

impl Lead {
    /// Column this lead occupies in `pipeline_id`, if it is on that board at all.
    pub fn column_in(&self, pipeline_id: &str) -> Option<&str> {
        self.pipeline_positions.get(pipeline_id)
    }

    pub fn is_in(&self, pipeline_id: &str, column_id: &str) -> bool {
        self.column_in(pipeline_id) == Some(column_id)
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}

/// Caller-supplied fields for a new lead. Anything left `None` gets the
/// board default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub connection_status: Option<ConnectionStatus>,
}

impl NewLead {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// What happens to a column's leads when the column is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Drop the leads from this pipeline; they stay on other pipelines.
    Delete,
    /// Relocate the leads to another column of the same pipeline.
    Move { target_column_id: String },
    /// Relocate the leads to a column of another pipeline.
    Add {
        target_pipeline_id: String,
        target_column_id: String,
    },
}

impl DeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Move { .. } => "move",
            Self::Add { .. } => "add",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardFields {
    #[serde(default = "default_true")]
    pub show_job_title: bool,
    #[serde(default = "default_true")]
    pub show_company: bool,
    #[serde(default = "default_true")]
    pub show_connection_status: bool,
    #[serde(default = "default_true")]
    pub show_tags: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CardFields {
    fn default() -> Self {
        Self {
            show_job_title: true,
            show_company: true,
            show_connection_status: true,
            show_tags: true,
        }
    }
}

/// Display settings for lead cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub card_fields: CardFields,
}

// View types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub pipeline_id: String,
    pub pipeline_name: String,
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnView {
    pub column: Column,
    pub leads: Vec<Lead>,
}
