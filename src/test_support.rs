//! Booking fixtures shared by the unit tests.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Header order and baseline values of the hotel-bookings export.
const BASE: &[(&str, &str)] = &[
    ("hotel", "Resort Hotel"),
    ("is_canceled", "0"),
    ("lead_time", "7"),
    ("arrival_date_year", "2015"),
    ("arrival_date_month", "July"),
    ("arrival_date_week_number", "27"),
    ("arrival_date_day_of_month", "1"),
    ("stays_in_weekend_nights", "0"),
    ("stays_in_week_nights", "1"),
    ("adults", "1"),
    ("children", "0"),
    ("babies", "0"),
    ("meal", "BB"),
    ("country", "GBR"),
    ("market_segment", "Direct"),
    ("distribution_channel", "Direct"),
    ("is_repeated_guest", "0"),
    ("previous_cancellations", "0"),
    ("previous_bookings_not_canceled", "0"),
    ("reserved_room_type", "A"),
    ("assigned_room_type", "C"),
    ("booking_changes", "0"),
    ("deposit_type", "No Deposit"),
    ("agent", "NULL"),
    ("company", "NULL"),
    ("days_in_waiting_list", "0"),
    ("customer_type", "Transient"),
    ("adr", "75"),
    ("required_car_parking_spaces", "0"),
    ("total_of_special_requests", "0"),
    ("reservation_status", "Check-Out"),
    ("reservation_status_date", "2015-07-02"),
];

/// One CSV line: the baseline booking with some cells replaced.
pub fn booking(overrides: &[(&str, &str)]) -> String {
    BASE.iter()
        .map(|(col, base)| {
            overrides
                .iter()
                .find(|(name, _)| name == col)
                .map_or(*base, |(_, v)| *v)
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Header plus the given lines, newline terminated.
pub fn bookings_csv(rows: &[String]) -> String {
    let header: Vec<&str> = BASE.iter().map(|(col, _)| *col).collect();
    let mut text = header.join(",");
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

pub fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
