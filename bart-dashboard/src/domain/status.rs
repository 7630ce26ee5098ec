//! Service advisories and system-wide status.

use serde::Serialize;

/// A service advisory or elevator notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemAlert {
    pub description: String,
    pub posted: String,
    #[serde(rename = "type")]
    pub alert_type: String,
}

impl SystemAlert {
    /// Indicator colour for the status panel.
    pub fn indicator_color(&self) -> &'static str {
        match self.alert_type.to_ascii_lowercase().as_str() {
            "info" => "#3b82f6",
            "warning" | "delay" => "#eab308",
            "error" | "emergency" => "#ef4444",
            _ => "#22c55e",
        }
    }
}

/// Train count plus current advisories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemStatus {
    pub train_count: u32,
    pub alerts: Vec<SystemAlert>,
    pub elevator_status: Vec<SystemAlert>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiVersion {
    pub api_version: String,
    pub copyright: String,
    pub license: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(kind: &str) -> SystemAlert {
        SystemAlert {
            description: String::new(),
            posted: String::new(),
            alert_type: kind.into(),
        }
    }

    #[test]
    fn indicator_colors() {
        assert_eq!(alert("info").indicator_color(), "#3b82f6");
        assert_eq!(alert("DELAY").indicator_color(), "#eab308");
        assert_eq!(alert("error").indicator_color(), "#ef4444");
        assert_eq!(alert("").indicator_color(), "#22c55e");
    }
}
