//! Profiles Repository

use paddock::subscriptions::{Subscription, Tier};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    columns::try_get_parsed,
    domain::profiles::records::{ProfileRecord, UserUuid},
};

const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_PROFILE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let tier: Tier = try_get_parsed(row, "subscription_tier")?;

        Ok(Self {
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            subscription: Subscription::new(tier, row.try_get("subscription_active")?),
        })
    }
}
