//! Bookings service.

use async_trait::async_trait;
use jiff::{
    Timestamp,
    civil::{Date, Time},
};
use mockall::automock;
use paddock::{
    bookings::{
        BookingPrice, BookingStats, BookingStatus, booking_number, ensure_cancellable,
        price_booking,
    },
    subscriptions::Subscription,
};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        bookings::{
            data::NewBooking,
            errors::BookingsServiceError,
            records::{Availability, BookingRecord, BookingUuid},
            repository::{BookingInsert, PgBookingsRepository},
        },
        catalog::{records::HorseUuid, repository::PgCatalogRepository},
        profiles::records::UserUuid,
    },
    storefront::Storefront,
};

/// Booking numbers tried before a create gives up.
pub const MAX_BOOKING_NUMBER_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PgBookingsService {
    db: Db,
    storefront: Storefront,
    bookings_repository: PgBookingsRepository,
    catalog_repository: PgCatalogRepository,
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: Db, storefront: Storefront) -> Self {
        Self {
            db,
            storefront,
            bookings_repository: PgBookingsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<(), BookingsServiceError> {
    if value.trim().is_empty() {
        Err(BookingsServiceError::MissingField(field))
    } else {
        Ok(())
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    async fn quote(
        &self,
        horse: HorseUuid,
        subscription: Subscription,
        duration_hours: u32,
    ) -> Result<BookingPrice, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let horse = self.catalog_repository.get_horse(&mut tx, horse).await?;

        tx.commit().await?;

        Ok(price_booking(&horse.rates, subscription, duration_hours)?)
    }

    async fn check_availability(
        &self,
        horse: HorseUuid,
        date: Date,
        time: Time,
    ) -> Result<Availability, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.catalog_repository.get_horse(&mut tx, horse).await?;

        let availability = if !record.is_bookable() {
            Availability::HorseUnavailable
        } else if self
            .bookings_repository
            .slot_taken(&mut tx, horse, date, time)
            .await?
        {
            Availability::SlotTaken
        } else {
            Availability::Available
        };

        tx.commit().await?;

        Ok(availability)
    }

    async fn create_booking(
        &self,
        user: UserUuid,
        subscription: Subscription,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError> {
        required("client_name", &booking.client_name)?;
        required("client_phone", &booking.client_phone)?;

        let mut tx = self.db.begin().await?;

        let horse = self
            .catalog_repository
            .get_horse(&mut tx, booking.horse)
            .await?;

        if !horse.is_bookable() {
            return Err(BookingsServiceError::HorseUnavailable);
        }

        let price = price_booking(&horse.rates, subscription, booking.duration_hours)?;

        let today = self.storefront.local_date(Timestamp::now());
        let comment = booking
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|comment| !comment.is_empty());

        let mut created = None;

        for attempt in 1..=MAX_BOOKING_NUMBER_ATTEMPTS {
            let uuid = BookingUuid::new();
            let number = booking_number(uuid.into_uuid(), today);

            created = self
                .bookings_repository
                .create_booking(
                    &mut tx,
                    &BookingInsert {
                        uuid,
                        booking_number: &number,
                        horse: horse.uuid,
                        user,
                        date: booking.date,
                        time: booking.time,
                        price: &price,
                        client_name: booking.client_name.trim(),
                        client_phone: booking.client_phone.trim(),
                        comment,
                        status: BookingStatus::Confirmed,
                    },
                )
                .await?;

            if created.is_some() {
                break;
            }

            warn!(booking_number = %number, attempt, "booking number collision, regenerating");
        }

        let Some(created) = created else {
            return Err(BookingsServiceError::BookingNumberExhausted(
                MAX_BOOKING_NUMBER_ATTEMPTS,
            ));
        };

        tx.commit().await?;

        info!(
            user = %user,
            booking_number = %created.booking_number,
            horse = %created.horse,
            starts_at = %created.starts_at(),
            total = %created.price.total,
            "booking created"
        );

        Ok(created)
    }

    async fn cancel_booking(
        &self,
        user: UserUuid,
        booking: BookingUuid,
        now: Timestamp,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .bookings_repository
            .lock_booking(&mut tx, booking, Some(user))
            .await?;

        let local_now = now.to_zoned(self.storefront.time_zone().clone()).datetime();

        ensure_cancellable(current.status, current.starts_at(), local_now)?;

        let cancelled = self
            .bookings_repository
            .update_booking(&mut tx, booking, BookingStatus::Cancelled, current.is_paid)
            .await?;

        tx.commit().await?;

        info!(
            user = %user,
            booking_number = %cancelled.booking_number,
            "booking cancelled"
        );

        Ok(cancelled)
    }

    async fn list_bookings(&self, user: UserUuid) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.bookings_repository.list_bookings(&mut tx, user).await?;

        tx.commit().await?;

        Ok(bookings)
    }

    async fn booking_stats(&self, user: UserUuid) -> Result<BookingStats, BookingsServiceError> {
        let bookings = self.list_bookings(user).await?;

        BookingStats::collect(
            self.storefront.currency(),
            bookings
                .iter()
                .map(|booking| (booking.status, &booking.price)),
        )
        .map_err(|error| BookingsServiceError::Pricing(error.into()))
    }

    async fn mark_paid(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .bookings_repository
            .lock_booking(&mut tx, booking, None)
            .await?;

        let paid = self
            .bookings_repository
            .update_booking(&mut tx, booking, current.status.after_payment(), true)
            .await?;

        tx.commit().await?;

        Ok(paid)
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Price a booking of `duration_hours` for the subscription, without booking it.
    async fn quote(
        &self,
        horse: HorseUuid,
        subscription: Subscription,
        duration_hours: u32,
    ) -> Result<BookingPrice, BookingsServiceError>;

    /// Whether the horse can be booked at the given start.
    async fn check_availability(
        &self,
        horse: HorseUuid,
        date: Date,
        time: Time,
    ) -> Result<Availability, BookingsServiceError>;

    /// Book a horse. New bookings are confirmed immediately.
    async fn create_booking(
        &self,
        user: UserUuid,
        subscription: Subscription,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Cancel one of the user's bookings, at least three hours before it starts.
    async fn cancel_booking(
        &self,
        user: UserUuid,
        booking: BookingUuid,
        now: Timestamp,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// The user's bookings, latest start first.
    async fn list_bookings(&self, user: UserUuid) -> Result<Vec<BookingRecord>, BookingsServiceError>;

    /// Totals over the user's bookings.
    async fn booking_stats(&self, user: UserUuid) -> Result<BookingStats, BookingsServiceError>;

    /// Record payment; a paid confirmed booking becomes completed.
    async fn mark_paid(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError>;
}
