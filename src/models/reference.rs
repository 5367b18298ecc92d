// src/models/reference.rs
//
// Reference data consumed by the match core. Seasons, age groups, match
// types, divisions, teams and rosters are maintained elsewhere; this core
// only reads them.
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Season {
    pub id: Uuid,
    pub name: String,
    pub is_current: bool,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct AgeGroup {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

/// Competition formats a match can be played under. The division rule
/// keys on `League`: league matches must carry a division, nothing else may.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchTypeKind {
    League,
    Cup,
    Friendly,
    Tournament,
}

impl MatchTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTypeKind::League => "league",
            MatchTypeKind::Cup => "cup",
            MatchTypeKind::Friendly => "friendly",
            MatchTypeKind::Tournament => "tournament",
        }
    }

    pub fn requires_division(&self) -> bool {
        matches!(self, MatchTypeKind::League)
    }
}

impl FromStr for MatchTypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "league" => Ok(MatchTypeKind::League),
            "cup" => Ok(MatchTypeKind::Cup),
            "friendly" => Ok(MatchTypeKind::Friendly),
            "tournament" => Ok(MatchTypeKind::Tournament),
            other => Err(format!("unknown match type kind: {}", other)),
        }
    }
}

impl fmt::Display for MatchTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchType {
    pub id: Uuid,
    pub name: String,
    pub kind: MatchTypeKind,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Division {
    pub id: Uuid,
    pub name: String,
    pub age_group_id: Uuid,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub age_group_id: Uuid,
    pub division_id: Option<Uuid>,
    /// Manager of record; the authorization gate compares against this.
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Player {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub shirt_number: Option<i32>,
}
