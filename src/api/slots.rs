//! Slot operations: the admin's slot grid.

use super::models::{
    CreateSlotRequest, ParkingSlot, SlotCreated, SlotDeleted, SlotListPayload, SlotStats,
    SlotStatus, SlotStatusUpdate, SlotStatusUpdated,
};
use super::{paths, require, ApiClient, ApiError};

impl ApiClient {
    /// All slots in a zone, in slot-number order.
    ///
    /// The response shape is normalized once here (see [`SlotListPayload`]);
    /// a shape that is neither a bare array nor a `slots` wrapper yields an
    /// empty list rather than a decode failure.
    pub async fn zone_slots(&self, zone_id: i64) -> Result<Vec<ParkingSlot>, ApiError> {
        let payload: Option<SlotListPayload> = self.get(&paths::zone_slots(zone_id)).await?;
        Ok(payload.map(SlotListPayload::into_slots).unwrap_or_default())
    }

    /// Add a single slot to the zone's grid.
    pub async fn create_slot(
        &self,
        zone_id: i64,
        req: &CreateSlotRequest,
    ) -> Result<SlotCreated, ApiError> {
        require(self.post(&paths::zone_slots(zone_id), req).await?)
    }

    /// Toggle a slot between available and occupied. The backend keeps the
    /// zone's availability counter in sync.
    pub async fn update_slot_status(
        &self,
        zone_id: i64,
        slot_id: i64,
        status: SlotStatus,
    ) -> Result<SlotStatusUpdated, ApiError> {
        require(
            self.patch(
                &paths::slot_status(zone_id, slot_id),
                &SlotStatusUpdate { status },
            )
            .await?,
        )
    }

    /// Occupancy and vehicle-type rollup for the zone's grid.
    pub async fn slot_stats(&self, zone_id: i64) -> Result<SlotStats, ApiError> {
        require(self.get(&paths::slot_stats(zone_id)).await?)
    }

    /// Remove a slot. The backend refuses while the slot has an active
    /// booking.
    pub async fn delete_slot(&self, zone_id: i64, slot_id: i64) -> Result<SlotDeleted, ApiError> {
        require(self.delete(&paths::slot(zone_id, slot_id)).await?)
    }
}
