use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies the real view rendered for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl ViewId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }
}

/// Identifies the skeleton placeholder shown while a route is loading.
/// Placeholders are shaped like their destination view so the layout does
/// not jump when the real content mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderId {
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

/// Static association between a navigation path and what renders for it.
/// The full set of routes is the complete navigation surface; exactly one
/// route is the landing route, which doubles as the fallback for unknown
/// paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub view: ViewId,
    pub placeholder: PlaceholderId,
    pub shows_profile_panel: bool,
    pub is_landing: bool,
}

/// Authenticated identity as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolved session for the current process. `identity = None` is the
/// anonymous session, which is still a fully resolved state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub identity: Option<Identity>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn is_anonymous(&self) -> bool {
        self.identity.is_none()
    }
}

/// Session lifecycle: starts `Unresolved`, becomes `Resolved` exactly once
/// at startup, then again on every provider change notification. Never
/// reverts to `Unresolved`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unresolved,
    Resolved(Session),
}

impl SessionState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Per-route cache state for view-content acquisition. `Ready` is cached
/// for the process lifetime; `Failed` is retryable on the next load call.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewLoadState {
    #[default]
    NotRequested,
    Pending,
    Ready(Arc<ViewBundle>),
    Failed(String),
}

/// Everything a view needs to render, acquired asynchronously per route.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBundle {
    Home(ProfileCard),
    About { visit_count: u64 },
    Skills(Vec<Skill>),
    Projects(Vec<Project>),
    Contact(ContactInfo),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCard {
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub response_time: Option<String>,
}

/// Content-store `projects` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Content-store `skills` row. `level` runs 1..=10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub level: u8,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillBand {
    Basic,
    Intermediate,
    Advanced,
}

impl Skill {
    pub fn band(&self) -> SkillBand {
        match self.level {
            8.. => SkillBand::Advanced,
            6..=7 => SkillBand::Intermediate,
            _ => SkillBand::Basic,
        }
    }
}

/// Append-only `page_visits` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageVisit {
    pub page_name: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub visited_at: DateTime<Utc>,
}

/// Form-relay payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Display language. Orthogonal to routing and loading; affects string
/// lookup only and is kept in memory for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Fr => "FR",
        }
    }
}
