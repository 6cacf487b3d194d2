//! Admin surface records.
//!
//! Read-only views consumed by the admin dashboard: usage metrics, the
//! user and role lists, and the system activity log.

use serde::{Deserialize, Serialize};

/// Usage counters shown on the admin dashboard.
///
/// Field names follow the backend's camelCase payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetrics {
    pub total_users: u64,
    pub active_users: u64,
    pub total_messages: u64,
    /// Mean assistant response time in milliseconds
    pub average_response_time: f64,
    /// Share of conversations resolved without escalation, 0.0..=100.0
    pub success_rate: f64,
    /// Backend-reported health score, 0.0..=100.0
    pub system_health: f64,
    /// Assistant accuracy score, 0.0..=100.0
    pub ai_accuracy: f64,
}

/// Severity of an activity-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// One entry of the system activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,
    /// Severity of the event
    #[serde(rename = "type")]
    pub level: LogLevel,
    pub message: String,
    pub timestamp: String,
    /// User the event concerns, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// A role definition from the roles listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub id: String,
    pub name: String,
    /// Permission identifiers granted to the role
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_parse_camel_case() {
        let metrics: UsageMetrics = serde_json::from_str(
            r#"{
                "totalUsers": 42,
                "activeUsers": 7,
                "totalMessages": 1200,
                "averageResponseTime": 310.5,
                "successRate": 92.0,
                "systemHealth": 99.1,
                "aiAccuracy": 87.3
            }"#,
        )
        .unwrap();
        assert_eq!(metrics.total_users, 42);
        assert_eq!(metrics.average_response_time, 310.5);
    }

    #[test]
    fn test_log_level_uses_type_field() {
        let log: ActivityLog = serde_json::from_str(
            r#"{"id":"l-1","type":"warning","message":"disk 80%","timestamp":"t"}"#,
        )
        .unwrap();
        assert_eq!(log.level, LogLevel::Warning);
        assert!(log.user.is_none());
    }
}
