//! Wire types for the parking backend.
//!
//! Every response is decoded into one of these types at the boundary, so the
//! rest of the client never branches on raw JSON shapes. All records are
//! owned by the backend; the client only transports them. Timestamps are
//! naive UTC because the backend serializes them without an offset.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Enumerations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Driver,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
    Truck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Occupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Driver => write!(f, "driver"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver" => Ok(Role::Driver),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleType::Car => write!(f, "car"),
            VehicleType::Bike => write!(f, "bike"),
            VehicleType::Truck => write!(f, "truck"),
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(VehicleType::Car),
            "bike" => Ok(VehicleType::Bike),
            "truck" => Ok(VehicleType::Truck),
            other => Err(format!("unknown vehicle type: {other}")),
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Available => write!(f, "available"),
            SlotStatus::Occupied => write!(f, "occupied"),
        }
    }
}

impl FromStr for SlotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(SlotStatus::Available),
            "occupied" => Ok(SlotStatus::Occupied),
            other => Err(format!("unknown slot status: {other}")),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Active => write!(f, "active"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BookingStatus::Active),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

// ============================================================================
// Entities
// ============================================================================

/// The user profile persisted beside the auth token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A parking facility owned by one admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingZone {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_slots: u32,
    pub available_slots: u32,
    pub admin_id: i64,
}

/// An individual parking space within a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSlot {
    pub id: i64,
    pub slot_number: String,
    pub vehicle_type: VehicleType,
    pub status: SlotStatus,
    pub price_per_hour: f64,
    pub zone_id: i64,
}

/// A driver's time-bounded reservation against a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub zone_id: i64,
    pub slot_id: Option<i64>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub status: BookingStatus,
    pub amount_paid: f64,
    pub duration_hours: u32,
    pub zone_name: Option<String>,
    pub slot_number: Option<String>,
}

/// The history endpoint returns its own flattened shape, not a `Booking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingHistoryEntry {
    pub id: i64,
    pub zone_id: i64,
    pub zone_name: String,
    pub slot_number: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub duration_hours: u32,
    pub amount_paid: f64,
    pub status: BookingStatus,
}

// ============================================================================
// Stats rollups (read-only, recomputed by the backend per request)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverStats {
    pub total_bookings: u32,
    pub active_bookings: u32,
    pub completed_bookings: u32,
    pub cancelled_bookings: u32,
    pub total_amount_spent: f64,
    pub total_hours_parked: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleTypeCounts {
    pub car: u32,
    pub bike: u32,
    pub truck: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotStats {
    pub zone_id: i64,
    pub zone_name: String,
    pub total_slots: u32,
    pub available_slots: u32,
    pub occupied_slots: u32,
    pub occupancy_rate: f64,
    pub vehicle_types: VehicleTypeCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBookingStats {
    pub zone_id: i64,
    pub zone_name: String,
    pub total_bookings: u32,
    pub active_bookings: u32,
    pub completed_bookings: u32,
    pub total_revenue: f64,
    pub average_booking_duration_hours: f64,
    /// Rendered by the backend as "occupied/total", e.g. "7/20".
    pub current_occupancy: String,
}

// ============================================================================
// Auth payloads
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct Registered {
    pub message: String,
}

// ============================================================================
// Request payloads
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateZoneRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_slots: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct AvailabilityUpdate {
    pub available_slots: u32,
}

#[derive(Debug, Serialize)]
pub struct CreateSlotRequest {
    pub slot_number: String,
    pub vehicle_type: VehicleType,
    pub price_per_hour: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SlotStatusUpdate {
    pub status: SlotStatus,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingRequest {
    pub zone_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<i64>,
    pub duration_hours: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtendBookingRequest {
    pub additional_hours: u32,
}

/// Optional status filter and pagination for booking listings.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub status: Option<BookingStatus>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl HistoryFilter {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            query.push(("skip", skip.to_string()));
        }
        query
    }
}

// ============================================================================
// Mutation acknowledgements
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ZoneCreated {
    pub message: String,
    pub zone_id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityUpdated {
    pub message: String,
    pub available_slots: u32,
    pub total_slots: u32,
}

#[derive(Debug, Deserialize)]
pub struct SlotCreated {
    pub message: String,
    pub slot_id: i64,
    pub slot_number: String,
}

/// Acknowledgement for a status update. The backend answers with two shapes:
/// a full one when the status changed (`old_status`/`new_status` plus zone
/// counters) and a short one when it was already in the requested state
/// (`status` only). The optional fields cover both.
#[derive(Debug, Deserialize)]
pub struct SlotStatusUpdated {
    pub message: String,
    pub slot_number: String,
    pub status: Option<SlotStatus>,
    pub old_status: Option<SlotStatus>,
    pub new_status: Option<SlotStatus>,
    pub zone_available_slots: Option<u32>,
    pub zone_total_slots: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SlotDeleted {
    pub message: String,
    pub deleted_slot: i64,
    pub zone_total_slots: u32,
    pub zone_available_slots: u32,
}

#[derive(Debug, Deserialize)]
pub struct BookingCreated {
    pub message: String,
    pub booking_id: i64,
    pub zone_name: String,
    pub slot_number: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_hours: u32,
    pub amount_paid: f64,
}

#[derive(Debug, Deserialize)]
pub struct BookingExtended {
    pub message: String,
    pub booking_id: i64,
    pub new_end_time: NaiveDateTime,
    pub additional_hours: u32,
    pub additional_amount: f64,
    pub total_amount: f64,
    pub total_duration: u32,
}

#[derive(Debug, Deserialize)]
pub struct BookingCompleted {
    pub message: String,
    pub booking_id: i64,
    pub slot_number: Option<String>,
    pub zone_name: Option<String>,
    pub amount_paid: f64,
    pub duration_hours: u32,
}

#[derive(Debug, Deserialize)]
pub struct BookingCancelled {
    pub message: String,
    pub booking_id: i64,
    pub refund_amount: f64,
}

// ============================================================================
// Boundary decoders
// ============================================================================

/// The slot list arrives as a bare array from the current backend, but older
/// deployments wrapped it in `{"slots": [...]}`. Anything else normalizes to
/// an empty list instead of a decode failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SlotListPayload {
    Bare(Vec<ParkingSlot>),
    Wrapped { slots: Vec<ParkingSlot> },
    Other(serde_json::Value),
}

impl SlotListPayload {
    pub(crate) fn into_slots(self) -> Vec<ParkingSlot> {
        match self {
            SlotListPayload::Bare(slots) => slots,
            SlotListPayload::Wrapped { slots } => slots,
            SlotListPayload::Other(_) => Vec::new(),
        }
    }
}
