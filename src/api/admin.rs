//! Admin booking operations: analytics over the admin's zone.

use super::models::{AdminBookingStats, Booking, HistoryFilter};
use super::{paths, require, ApiClient, ApiError};

impl ApiClient {
    /// Bookings against the admin's zone, most recent first.
    pub async fn admin_bookings(&self, filter: &HistoryFilter) -> Result<Vec<Booking>, ApiError> {
        Ok(self
            .get_query(paths::ADMIN_BOOKINGS, &filter.to_query())
            .await?
            .unwrap_or_default())
    }

    /// Revenue and occupancy rollup for the admin's zone.
    pub async fn admin_booking_stats(&self) -> Result<AdminBookingStats, ApiError> {
        require(self.get(paths::ADMIN_BOOKING_STATS).await?)
    }
}
