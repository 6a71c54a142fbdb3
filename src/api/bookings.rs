//! Driver booking operations.

use super::models::{
    Booking, BookingCancelled, BookingCompleted, BookingCreated, BookingExtended,
    BookingHistoryEntry, CreateBookingRequest, DriverStats, ExtendBookingRequest, HistoryFilter,
};
use super::{paths, require, ApiClient, ApiError};

impl ApiClient {
    /// Reserve a slot. When `slot_id` is absent the backend auto-assigns any
    /// available slot in the zone.
    pub async fn create_booking(
        &self,
        req: &CreateBookingRequest,
    ) -> Result<BookingCreated, ApiError> {
        require(self.post(paths::BOOKINGS, req).await?)
    }

    /// The driver's single active booking, or `None` when there is none.
    ///
    /// Only a 404 reads as "no booking"; transport failures and server
    /// errors propagate so an outage is not mistaken for an empty state.
    pub async fn active_booking(&self) -> Result<Option<Booking>, ApiError> {
        self.get(paths::ACTIVE_BOOKING).await
    }

    /// Extend an active booking by `additional_hours`.
    pub async fn extend_booking(
        &self,
        booking_id: i64,
        additional_hours: u32,
    ) -> Result<BookingExtended, ApiError> {
        require(
            self.patch(
                &paths::booking_extend(booking_id),
                &ExtendBookingRequest { additional_hours },
            )
            .await?,
        )
    }

    /// Check out: mark the booking completed and free its slot.
    pub async fn complete_booking(&self, booking_id: i64) -> Result<BookingCompleted, ApiError> {
        require(self.patch_empty(&paths::booking_complete(booking_id)).await?)
    }

    /// Cancel an active booking.
    pub async fn cancel_booking(&self, booking_id: i64) -> Result<BookingCancelled, ApiError> {
        require(self.patch_empty(&paths::booking_cancel(booking_id)).await?)
    }

    /// The driver's booking history, most recent first.
    pub async fn booking_history(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<BookingHistoryEntry>, ApiError> {
        Ok(self
            .get_query(paths::BOOKING_HISTORY, &filter.to_query())
            .await?
            .unwrap_or_default())
    }

    /// Aggregate stats for the driver's profile page.
    pub async fn driver_stats(&self) -> Result<DriverStats, ApiError> {
        require(self.get(paths::PROFILE_STATS).await?)
    }
}
