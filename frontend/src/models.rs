//! Typed contract with the booking API. Field names follow the server's
//! camelCase JSON; everything here is a plain view model the server owns.

use serde::{Deserialize, Serialize};
use std::fmt;

/* -------------------- identity -------------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Staff => "STAFF",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    // The login response carries no id; it arrives with /users/profile.
    #[serde(default)]
    pub id: Option<i64>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: Role,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/* -------------------- catalog & fleet -------------------- */

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub duration_minutes: u32,
}

fn default_currency() -> String {
    "KES".to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Sedan,
    Suv,
    Truck,
    Van,
    Motorcycle,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Sedan,
        VehicleType::Suv,
        VehicleType::Truck,
        VehicleType::Van,
        VehicleType::Motorcycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Sedan => "SEDAN",
            VehicleType::Suv => "SUV",
            VehicleType::Truck => "TRUCK",
            VehicleType::Van => "VAN",
            VehicleType::Motorcycle => "MOTORCYCLE",
        }
    }

    pub fn parse(value: &str) -> Option<VehicleType> {
        Self::ALL.iter().copied().find(|t| t.as_str() == value)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub license_plate: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

/* -------------------- bookings -------------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "status-badge status-pending",
            BookingStatus::Confirmed => "status-badge status-confirmed",
            BookingStatus::Completed => "status-badge status-completed",
            BookingStatus::Cancelled => "status-badge status-cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedService {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedVehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub license_plate: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub service: BookedService,
    pub vehicle: BookedVehicle,
    pub booking_date_time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub assigned_staff_name: Option<String>,
}

/* -------------------- request / response bodies -------------------- */

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: String,
    pub role: Role,
}

/// Login and registration answer with the same shape. `token` stays an
/// `Option` so a response without one is detectable instead of a parse error.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_id: i64,
    pub vehicle_id: i64,
    pub booking_date_time: String,
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize)]
pub struct RateBookingRequest {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload {
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub color: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

/* -------------------- display helpers -------------------- */

fn currency_symbol(currency: &str) -> &str {
    match currency {
        "KES" => "KSh",
        "USD" => "$",
        "EUR" => "€",
        other => other,
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// KES amounts render whole with thousands grouping ("KSh 1,500"); other
/// currencies render with two decimals ("$12.50").
pub fn format_price(price: f64, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    if currency == "KES" {
        format!("{} {}", symbol, group_thousands(price as i64))
    } else {
        format!("{}{:.2}", symbol, price)
    }
}

pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else if minutes % 60 == 0 {
        format!("{} hr", minutes / 60)
    } else {
        format!("{} hr {} min", minutes / 60, minutes % 60)
    }
}

/* -------------------- tests -------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_server_spelling() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"CUSTOMER\"");
        assert_eq!(serde_json::from_str::<Role>("\"ADMIN\"").unwrap(), Role::Admin);
        assert_eq!(serde_json::from_str::<Role>("\"STAFF\"").unwrap(), Role::Staff);
    }

    #[test]
    fn vehicle_type_round_trips_through_select_values() {
        for t in VehicleType::ALL {
            assert_eq!(VehicleType::parse(t.as_str()), Some(t));
        }
        assert_eq!(VehicleType::parse("HOVERCRAFT"), None);
        assert_eq!(serde_json::to_string(&VehicleType::Suv).unwrap(), "\"SUV\"");
    }

    #[test]
    fn booking_status_matches_wire_names() {
        assert_eq!(
            serde_json::from_str::<BookingStatus>("\"CANCELLED\"").unwrap(),
            BookingStatus::Cancelled
        );
        assert_eq!(serde_json::to_string(&BookingStatus::Pending).unwrap(), "\"PENDING\"");
    }

    #[test]
    fn service_without_currency_defaults_to_kes() {
        let service: Service = serde_json::from_str(
            r#"{"id":1,"name":"Premium Wash","description":"Full wash","price":1500.0,"durationMinutes":45}"#,
        )
        .unwrap();
        assert_eq!(service.currency, "KES");
    }

    #[test]
    fn auth_response_token_is_optional() {
        let resp: AuthResponse = serde_json::from_str(
            r#"{"email":"a@b.com","fullName":"A B","role":"CUSTOMER"}"#,
        )
        .unwrap();
        assert!(resp.token.is_none());
    }

    #[test]
    fn price_formatting_is_stable() {
        assert_eq!(format_price(1500.0, "KES"), "KSh 1,500");
        assert_eq!(format_price(254700.0, "KES"), "KSh 254,700");
        assert_eq!(format_price(12.5, "USD"), "$12.50");
        assert_eq!(format_price(9.0, "EUR"), "€9.00");
        assert_eq!(format_price(9.0, "GBP"), "GBP9.00");
        // Pure function: identical inputs, identical output.
        assert_eq!(format_price(1500.0, "KES"), format_price(1500.0, "KES"));
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(45), "45 min");
        assert_eq!(format_duration(60), "1 hr");
        assert_eq!(format_duration(90), "1 hr 30 min");
    }
}
