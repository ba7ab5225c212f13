//! Shared building blocks for the workspace: logging setup, wire types and
//! the process-wide metrics registry.

pub mod types;
pub mod utils;
pub mod metrics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::healthy("1.0.0");
        assert_eq!(h.status, "healthy");
        assert_eq!(h.version, "1.0.0");
    }
}
