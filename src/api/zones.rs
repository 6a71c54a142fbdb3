//! Zone operations: browse, search, and admin zone management.

use super::models::{
    AvailabilityUpdate, AvailabilityUpdated, CreateZoneRequest, ParkingZone, ZoneCreated,
};
use super::{paths, require, ApiClient, ApiError};

/// Default search radius for nearby-zone queries, in kilometres.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

impl ApiClient {
    /// List every parking zone.
    pub async fn list_zones(&self) -> Result<Vec<ParkingZone>, ApiError> {
        Ok(self.get(paths::ZONES).await?.unwrap_or_default())
    }

    /// Search zones by name (case-insensitive partial match, server-side).
    pub async fn search_zones(&self, name: &str) -> Result<Vec<ParkingZone>, ApiError> {
        Ok(self
            .get_query(paths::ZONES_SEARCH, &[("name", name.to_string())])
            .await?
            .unwrap_or_default())
    }

    /// Zones within `radius_km` of a coordinate, closest first.
    pub async fn nearby_zones(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
    ) -> Result<Vec<ParkingZone>, ApiError> {
        let radius = radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("radius_km", radius.to_string()),
        ];
        Ok(self
            .get_query(paths::ZONES_NEARBY, &query)
            .await?
            .unwrap_or_default())
    }

    /// Create the admin's parking zone. The backend allows one zone per admin
    /// and rejects a second with a 400.
    pub async fn create_zone(&self, req: &CreateZoneRequest) -> Result<ZoneCreated, ApiError> {
        require(self.post(paths::ZONES, req).await?)
    }

    /// The admin's own zone, or `None` when they don't manage one yet.
    ///
    /// `None` is an ordinary state, not an error: consumers branch their
    /// whole rendering mode on it (create-zone empty state vs. dashboard).
    pub async fn my_zone(&self) -> Result<Option<ParkingZone>, ApiError> {
        self.get(paths::MY_ZONE).await
    }

    /// Manually adjust a zone's available-slot counter.
    pub async fn update_availability(
        &self,
        zone_id: i64,
        available_slots: u32,
    ) -> Result<AvailabilityUpdated, ApiError> {
        require(
            self.patch(
                &paths::zone_availability(zone_id),
                &AvailabilityUpdate { available_slots },
            )
            .await?,
        )
    }
}
