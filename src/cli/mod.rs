//! Command-line interface for the Parkline client.
//!
//! One subcommand per backend operation:
//! - `register` / `login` / `logout` / `whoami` - session lifecycle
//! - `zones ...` - browse and manage parking zones
//! - `slots ...` - manage a zone's slot grid (admin)
//! - `bookings ...` - driver bookings and stats
//! - `admin ...` - zone booking analytics (admin)
//! - `theme` - show or set the display theme preference
//!
//! Handlers render what the library returns and nothing more; all business
//! logic lives behind the backend API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::models::{
    BookingStatus, CreateBookingRequest, CreateSlotRequest, CreateZoneRequest, HistoryFilter, Role,
    SlotStatus, VehicleType,
};
use crate::api::ApiClient;
use crate::auth::{AuthSession, AuthState};
use crate::session::{SessionStore, THEME_KEY};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "parkline")]
#[command(author, version, about = "Client for the Parkline parking reservation service", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "parkline.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API URL to connect to (default: http://localhost:8000)
    #[arg(long, env = "PARKLINE_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and log in
    Register {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Password (6-64 characters)
        password: String,
        /// Account role: driver or admin
        #[arg(long, default_value = "driver")]
        role: Role,
    },

    /// Log in and persist the session
    Login {
        email: String,
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the current session
    Whoami,

    /// Parking zone commands
    #[command(subcommand)]
    Zones(ZonesCommands),

    /// Slot grid commands (admin)
    #[command(subcommand)]
    Slots(SlotsCommands),

    /// Booking commands (driver)
    #[command(subcommand)]
    Bookings(BookingsCommands),

    /// Zone analytics commands (admin)
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Show or set the display theme preference
    Theme {
        /// New theme value (omit to show the current one)
        value: Option<String>,
    },
}

/// Zone subcommands
#[derive(Subcommand, Debug)]
pub enum ZonesCommands {
    /// List all parking zones
    List,
    /// Search zones by name
    Search { name: String },
    /// List zones near a coordinate
    #[command(allow_negative_numbers = true)]
    Nearby {
        latitude: f64,
        longitude: f64,
        /// Search radius in km (default: 5)
        #[arg(long)]
        radius_km: Option<f64>,
    },
    /// Create your parking zone (admin)
    #[command(allow_negative_numbers = true)]
    Create {
        name: String,
        latitude: f64,
        longitude: f64,
        total_slots: u32,
    },
    /// Show your own zone (admin)
    Mine,
    /// Update your zone's available-slot counter (admin)
    SetAvailability {
        zone_id: i64,
        available_slots: u32,
    },
}

/// Slot subcommands
#[derive(Subcommand, Debug)]
pub enum SlotsCommands {
    /// List the slots in a zone
    List { zone_id: i64 },
    /// Add a slot to a zone
    Create {
        zone_id: i64,
        slot_number: String,
        /// Vehicle type: car, bike or truck
        #[arg(long, default_value = "car")]
        vehicle_type: VehicleType,
        /// Hourly price
        #[arg(long, default_value = "20.0")]
        price_per_hour: f64,
    },
    /// Set a slot's status: available or occupied
    SetStatus {
        zone_id: i64,
        slot_id: i64,
        status: SlotStatus,
    },
    /// Delete a slot
    Delete { zone_id: i64, slot_id: i64 },
    /// Show slot statistics for a zone
    Stats { zone_id: i64 },
}

/// Booking subcommands
#[derive(Subcommand, Debug)]
pub enum BookingsCommands {
    /// Book a slot in a zone
    Create {
        zone_id: i64,
        /// Specific slot to book (default: auto-assigned)
        #[arg(long)]
        slot_id: Option<i64>,
        /// Booking duration in hours
        #[arg(long, default_value = "1")]
        hours: u32,
    },
    /// Show your active booking
    Active,
    /// Extend your active booking
    Extend { booking_id: i64, hours: u32 },
    /// Complete your booking (check out)
    Complete { booking_id: i64 },
    /// Cancel your active booking
    Cancel { booking_id: i64 },
    /// Show your booking history
    History {
        /// Filter by status: active, completed or cancelled
        #[arg(long)]
        status: Option<BookingStatus>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        skip: Option<u32>,
    },
    /// Show your booking statistics
    Stats,
}

/// Admin analytics subcommands
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List bookings against your zone
    Bookings {
        /// Filter by status: active, completed or cancelled
        #[arg(long)]
        status: Option<BookingStatus>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        skip: Option<u32>,
    },
    /// Show booking statistics for your zone
    Stats,
}

// ============================================================================
// CLI Command Handlers
// ============================================================================

/// Run a CLI command
pub async fn run_command(
    cli: &Cli,
    client: &ApiClient,
    auth: &AuthSession,
    store: &SessionStore,
) -> Result<()> {
    match &cli.command {
        Commands::Register {
            name,
            email,
            password,
            role,
        } => cmd_register(auth, name, email, password, *role).await,
        Commands::Login { email, password } => cmd_login(auth, email, password).await,
        Commands::Logout => cmd_logout(auth),
        Commands::Whoami => cmd_whoami(auth),
        Commands::Zones(cmd) => run_zones(cmd, client).await,
        Commands::Slots(cmd) => run_slots(cmd, client).await,
        Commands::Bookings(cmd) => run_bookings(cmd, client).await,
        Commands::Admin(cmd) => run_admin(cmd, client).await,
        Commands::Theme { value } => cmd_theme(store, value.as_deref()),
    }
}

async fn cmd_register(
    auth: &AuthSession,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<()> {
    let state = auth.register(name, email, password, role).await?;
    if let AuthState::Authenticated { role } = state {
        println!("Registered and logged in as {} ({})", email, role);
    }
    Ok(())
}

async fn cmd_login(auth: &AuthSession, email: &str, password: &str) -> Result<()> {
    let state = auth.login(email, password).await?;
    if let AuthState::Authenticated { role } = state {
        println!("Logged in as {} ({})", email, role);
    }
    Ok(())
}

fn cmd_logout(auth: &AuthSession) -> Result<()> {
    auth.logout();
    println!("Logged out.");
    Ok(())
}

fn cmd_whoami(auth: &AuthSession) -> Result<()> {
    match auth.user() {
        Some(user) => {
            println!("Name:   {}", user.name);
            println!("Email:  {}", user.email);
            println!("Role:   {}", user.role);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

async fn run_zones(cmd: &ZonesCommands, client: &ApiClient) -> Result<()> {
    match cmd {
        ZonesCommands::List => print_zones(&client.list_zones().await?),
        ZonesCommands::Search { name } => print_zones(&client.search_zones(name).await?),
        ZonesCommands::Nearby {
            latitude,
            longitude,
            radius_km,
        } => print_zones(&client.nearby_zones(*latitude, *longitude, *radius_km).await?),
        ZonesCommands::Create {
            name,
            latitude,
            longitude,
            total_slots,
        } => {
            let created = client
                .create_zone(&CreateZoneRequest {
                    name: name.clone(),
                    latitude: *latitude,
                    longitude: *longitude,
                    total_slots: *total_slots,
                })
                .await?;
            println!("{} (zone {})", created.message, created.zone_id);
        }
        ZonesCommands::Mine => match client.my_zone().await? {
            Some(zone) => {
                println!("Zone:       {} (id {})", zone.name, zone.id);
                println!("Location:   {:.5}, {:.5}", zone.latitude, zone.longitude);
                println!("Slots:      {}/{} available", zone.available_slots, zone.total_slots);
            }
            // Absence of a zone is an ordinary state, not an error
            None => println!("You don't manage a parking zone yet."),
        },
        ZonesCommands::SetAvailability {
            zone_id,
            available_slots,
        } => {
            let updated = client.update_availability(*zone_id, *available_slots).await?;
            println!(
                "Availability updated: {}/{}",
                updated.available_slots, updated.total_slots
            );
        }
    }
    Ok(())
}

async fn run_slots(cmd: &SlotsCommands, client: &ApiClient) -> Result<()> {
    match cmd {
        SlotsCommands::List { zone_id } => {
            let slots = client.zone_slots(*zone_id).await?;
            if slots.is_empty() {
                println!("No slots found.");
                return Ok(());
            }
            println!();
            println!(
                "{:<8}  {:<10}  {:<8}  {:<10}  {:<10}",
                "ID", "NUMBER", "TYPE", "STATUS", "PRICE/HR"
            );
            println!("{}", "-".repeat(54));
            for slot in slots {
                println!(
                    "{:<8}  {:<10}  {:<8}  {:<10}  {:<10.2}",
                    slot.id,
                    truncate(&slot.slot_number, 10),
                    slot.vehicle_type.to_string(),
                    slot.status.to_string(),
                    slot.price_per_hour
                );
            }
            println!();
        }
        SlotsCommands::Create {
            zone_id,
            slot_number,
            vehicle_type,
            price_per_hour,
        } => {
            let created = client
                .create_slot(
                    *zone_id,
                    &CreateSlotRequest {
                        slot_number: slot_number.clone(),
                        vehicle_type: *vehicle_type,
                        price_per_hour: *price_per_hour,
                    },
                )
                .await?;
            println!("{} (slot {})", created.message, created.slot_number);
        }
        SlotsCommands::SetStatus {
            zone_id,
            slot_id,
            status,
        } => {
            let updated = client.update_slot_status(*zone_id, *slot_id, *status).await?;
            println!("{}", updated.message);
            if let (Some(available), Some(total)) =
                (updated.zone_available_slots, updated.zone_total_slots)
            {
                println!("Zone availability: {}/{}", available, total);
            }
        }
        SlotsCommands::Delete { zone_id, slot_id } => {
            let deleted = client.delete_slot(*zone_id, *slot_id).await?;
            println!(
                "{} ({}/{} slots remain available)",
                deleted.message, deleted.zone_available_slots, deleted.zone_total_slots
            );
        }
        SlotsCommands::Stats { zone_id } => {
            let stats = client.slot_stats(*zone_id).await?;
            println!("Zone:            {}", stats.zone_name);
            println!("Total slots:     {}", stats.total_slots);
            println!("Available:       {}", stats.available_slots);
            println!("Occupied:        {}", stats.occupied_slots);
            println!("Occupancy rate:  {:.1}%", stats.occupancy_rate);
            println!(
                "By type:         {} car / {} bike / {} truck",
                stats.vehicle_types.car, stats.vehicle_types.bike, stats.vehicle_types.truck
            );
        }
    }
    Ok(())
}

async fn run_bookings(cmd: &BookingsCommands, client: &ApiClient) -> Result<()> {
    match cmd {
        BookingsCommands::Create {
            zone_id,
            slot_id,
            hours,
        } => {
            let created = client
                .create_booking(&CreateBookingRequest {
                    zone_id: *zone_id,
                    slot_id: *slot_id,
                    duration_hours: *hours,
                })
                .await?;
            println!(
                "Booked slot {} in {} for {}h (total {:.2}), booking {}",
                created.slot_number,
                created.zone_name,
                created.duration_hours,
                created.amount_paid,
                created.booking_id
            );
        }
        BookingsCommands::Active => match client.active_booking().await? {
            Some(booking) => {
                println!("Booking:   {}", booking.id);
                if let Some(zone_name) = &booking.zone_name {
                    println!("Zone:      {}", zone_name);
                }
                if let Some(slot_number) = &booking.slot_number {
                    println!("Slot:      {}", slot_number);
                }
                println!("Started:   {}", booking.start_time);
                if let Some(end_time) = booking.end_time {
                    println!("Ends:      {}", end_time);
                }
                println!("Duration:  {}h", booking.duration_hours);
                println!("Amount:    {:.2}", booking.amount_paid);
            }
            None => println!("No active booking."),
        },
        BookingsCommands::Extend { booking_id, hours } => {
            let extended = client.extend_booking(*booking_id, *hours).await?;
            println!(
                "Extended by {}h, new end time {} (total {:.2})",
                extended.additional_hours, extended.new_end_time, extended.total_amount
            );
        }
        BookingsCommands::Complete { booking_id } => {
            let completed = client.complete_booking(*booking_id).await?;
            println!(
                "{} ({}h, {:.2})",
                completed.message, completed.duration_hours, completed.amount_paid
            );
        }
        BookingsCommands::Cancel { booking_id } => {
            let cancelled = client.cancel_booking(*booking_id).await?;
            println!("{}", cancelled.message);
        }
        BookingsCommands::History {
            status,
            limit,
            skip,
        } => {
            let entries = client
                .booking_history(&HistoryFilter {
                    status: *status,
                    limit: *limit,
                    skip: *skip,
                })
                .await?;
            if entries.is_empty() {
                println!("No bookings found.");
                return Ok(());
            }
            println!();
            println!(
                "{:<8}  {:<20}  {:<8}  {:<11}  {:<6}  {:<10}  {:<19}",
                "ID", "ZONE", "SLOT", "STATUS", "HOURS", "AMOUNT", "START"
            );
            println!("{}", "-".repeat(92));
            for entry in entries {
                println!(
                    "{:<8}  {:<20}  {:<8}  {:<11}  {:<6}  {:<10.2}  {:<19}",
                    entry.id,
                    truncate(&entry.zone_name, 20),
                    entry.slot_number.as_deref().unwrap_or("-"),
                    entry.status.to_string(),
                    entry.duration_hours,
                    entry.amount_paid,
                    entry.start_time.format("%Y-%m-%d %H:%M:%S").to_string()
                );
            }
            println!();
        }
        BookingsCommands::Stats => {
            let stats = client.driver_stats().await?;
            println!("Total bookings:      {}", stats.total_bookings);
            println!("Active:              {}", stats.active_bookings);
            println!("Completed:           {}", stats.completed_bookings);
            println!("Cancelled:           {}", stats.cancelled_bookings);
            println!("Total spent:         {:.2}", stats.total_amount_spent);
            println!("Total hours parked:  {}", stats.total_hours_parked);
        }
    }
    Ok(())
}

async fn run_admin(cmd: &AdminCommands, client: &ApiClient) -> Result<()> {
    match cmd {
        AdminCommands::Bookings {
            status,
            limit,
            skip,
        } => {
            let bookings = client
                .admin_bookings(&HistoryFilter {
                    status: *status,
                    limit: *limit,
                    skip: *skip,
                })
                .await?;
            if bookings.is_empty() {
                println!("No bookings found.");
                return Ok(());
            }
            println!();
            println!(
                "{:<8}  {:<8}  {:<8}  {:<11}  {:<6}  {:<10}  {:<19}",
                "ID", "USER", "SLOT", "STATUS", "HOURS", "AMOUNT", "START"
            );
            println!("{}", "-".repeat(80));
            for booking in bookings {
                println!(
                    "{:<8}  {:<8}  {:<8}  {:<11}  {:<6}  {:<10.2}  {:<19}",
                    booking.id,
                    booking.user_id,
                    booking.slot_number.as_deref().unwrap_or("-"),
                    booking.status.to_string(),
                    booking.duration_hours,
                    booking.amount_paid,
                    booking.start_time.format("%Y-%m-%d %H:%M:%S").to_string()
                );
            }
            println!();
        }
        AdminCommands::Stats => {
            let stats = client.admin_booking_stats().await?;
            println!("Zone:              {}", stats.zone_name);
            println!("Total bookings:    {}", stats.total_bookings);
            println!("Active:            {}", stats.active_bookings);
            println!("Completed:         {}", stats.completed_bookings);
            println!("Total revenue:     {:.2}", stats.total_revenue);
            println!("Avg duration:      {:.2}h", stats.average_booking_duration_hours);
            println!("Occupancy:         {}", stats.current_occupancy);
        }
    }
    Ok(())
}

fn cmd_theme(store: &SessionStore, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => {
            store.set(THEME_KEY, value)?;
            println!("Theme set to {}", value);
        }
        None => match store.get(THEME_KEY) {
            Some(theme) => println!("{}", theme),
            None => println!("No theme preference set."),
        },
    }
    Ok(())
}

fn print_zones(zones: &[crate::api::models::ParkingZone]) {
    if zones.is_empty() {
        println!("No zones found.");
        return;
    }
    println!();
    println!(
        "{:<8}  {:<24}  {:>10}  {:>11}  {:>9}  {:>6}",
        "ID", "NAME", "LATITUDE", "LONGITUDE", "AVAILABLE", "TOTAL"
    );
    println!("{}", "-".repeat(78));
    for zone in zones {
        println!(
            "{:<8}  {:<24}  {:>10.5}  {:>11.5}  {:>9}  {:>6}",
            zone.id,
            truncate(&zone.name, 24),
            zone.latitude,
            zone.longitude,
            zone.available_slots,
            zone.total_slots
        );
    }
    println!();
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
