//! Prometheus metrics shared across the server.
//!
//! Counters are registered once in a process-wide registry and rendered in the
//! text exposition format by `GET /metrics`.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let c = IntCounterVec::new(
        Opts::new("http_requests_total", "HTTP requests served, by method and status"),
        &["method", "status"],
    )
    .expect("valid http_requests_total definition");
    REGISTRY.register(Box::new(c.clone())).expect("register http_requests_total");
    c
});

pub static BOOKINGS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::new("bookings_created_total", "Bookings created")
        .expect("valid bookings_created_total definition");
    REGISTRY.register(Box::new(c.clone())).expect("register bookings_created_total");
    c
});

pub static LOGINS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let c = IntCounterVec::new(
        Opts::new("logins_total", "Login attempts, by outcome"),
        &["outcome"],
    )
    .expect("valid logins_total definition");
    REGISTRY.register(Box::new(c.clone())).expect("register logins_total");
    c
});

pub fn record_http_request(method: &str, status: u16) {
    HTTP_REQUESTS_TOTAL.with_label_values(&[method, &status.to_string()]).inc();
}

pub fn record_booking_created() {
    BOOKINGS_CREATED_TOTAL.inc();
}

pub fn record_login(outcome: &str) {
    LOGINS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Render every registered metric in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    // Touch the lazies so all families appear even before the first event.
    Lazy::force(&HTTP_REQUESTS_TOTAL);
    Lazy::force(&BOOKINGS_CREATED_TOTAL);
    Lazy::force(&LOGINS_TOTAL);

    let mut buf = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
