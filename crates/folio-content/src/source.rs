use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;
use folio_core::{ProfileConfig, ViewSource};
use folio_schema::{ContactInfo, ProfileCard, Route, ViewBundle, ViewId};
use uuid::Uuid;

use crate::store::{ContentClient, StoreError};

/// Production view source: assembles each route's bundle from the content
/// store and the owner profile.
///
/// Error policy at this boundary: a transport failure fails the acquisition
/// (the route shows its failure state and can be retried), while a non-2xx
/// answer from a reachable store is logged and the bundle degrades to its
/// empty-data shape.
pub struct ContentSource {
    client: Arc<ContentClient>,
    profile: ProfileConfig,
    user_id: RwLock<Option<Uuid>>,
}

impl ContentSource {
    pub fn new(client: Arc<ContentClient>, profile: ProfileConfig) -> Self {
        Self {
            client,
            profile,
            user_id: RwLock::new(None),
        }
    }

    /// Identity attribution for page-visit rows. Updated by the app on
    /// session changes; `None` records anonymous visits.
    pub fn set_user(&self, user_id: Option<Uuid>) {
        if let Ok(mut guard) = self.user_id.write() {
            *guard = user_id;
        }
    }

    fn user(&self) -> Option<Uuid> {
        self.user_id.read().ok().and_then(|guard| *guard)
    }

    fn profile_card(&self) -> ProfileCard {
        ProfileCard {
            name: self.profile.name.clone(),
            tagline: self.profile.tagline.clone(),
            social: self.profile.social.clone(),
        }
    }

    fn contact_info(&self) -> ContactInfo {
        ContactInfo {
            email: self.profile.email.clone(),
            location: self.profile.location.clone(),
            response_time: self.profile.response_time.clone(),
        }
    }

    async fn about_bundle(&self) -> Result<ViewBundle, StoreError> {
        degrade(
            self.client.record_page_visit("about", self.user()).await,
            "page-visit write",
        )?;
        let visit_count = degrade(
            self.client.count_page_visits("about").await,
            "page-visit count",
        )?;
        Ok(ViewBundle::About { visit_count })
    }
}

/// Keep transport errors fatal to the acquisition; log status errors and
/// substitute the empty value.
fn degrade<T: Default>(result: Result<T, StoreError>, what: &str) -> Result<T, StoreError> {
    match result {
        Ok(value) => Ok(value),
        Err(err @ StoreError::Transport(_)) => Err(err),
        Err(e) => {
            tracing::warn!("{what} failed, degrading to empty: {e}");
            Ok(T::default())
        }
    }
}

#[async_trait]
impl ViewSource for ContentSource {
    async fn acquire(&self, route: Route) -> Result<ViewBundle> {
        let bundle = match route.view {
            ViewId::Home => ViewBundle::Home(self.profile_card()),
            ViewId::About => self.about_bundle().await?,
            ViewId::Skills => {
                let skills = degrade(self.client.list_skills().await, "skills read")?;
                ViewBundle::Skills(skills)
            }
            ViewId::Projects => {
                let projects = degrade(self.client.list_projects().await, "projects read")?;
                ViewBundle::Projects(projects)
            }
            ViewId::Contact => ViewBundle::Contact(self.contact_info()),
        };
        Ok(bundle)
    }
}
