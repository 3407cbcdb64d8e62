//! Profiles service.

use async_trait::async_trait;
use mockall::automock;
use paddock::subscriptions::Subscription;
use tracing::debug;

use crate::{
    database::Db,
    domain::profiles::{
        errors::ProfilesServiceError, records::UserUuid, repository::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn get_subscription(&self, user: UserUuid) -> Result<Subscription, ProfilesServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self.repository.find_profile(&mut tx, user).await?;

        tx.commit().await?;

        match profile {
            Some(profile) => Ok(profile.subscription),
            None => {
                debug!(user = %user, "no profile, treating user as free tier");

                Ok(Subscription::free())
            }
        }
    }
}

#[automock]
#[async_trait]
/// Read-only access to customer profiles.
pub trait ProfilesService: Send + Sync {
    /// Current subscription of a user. Users without a profile are on the free tier.
    async fn get_subscription(&self, user: UserUuid) -> Result<Subscription, ProfilesServiceError>;
}
