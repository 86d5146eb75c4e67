//! Display descriptors for the closed enumerations.
//!
//! Pure lookups used by clients that draw maps, charts and lists. Every
//! function matches exhaustively, so adding an enum variant forces a style
//! decision here.

use serde::Serialize;

use crate::model::{DisasterStatistics, DisasterType, SeverityLevel};

/// How a disaster type is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeStyle {
    pub label: &'static str,
    pub icon: &'static str,
    /// CSS hex color.
    pub color: &'static str,
}

/// How a severity level is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityStyle {
    pub label: &'static str,
    /// Semantic tone (success, warning, danger) for badge components.
    pub tone: &'static str,
}

/// Style for a disaster type.
pub fn type_style(disaster_type: DisasterType) -> TypeStyle {
    match disaster_type {
        DisasterType::Earthquake => TypeStyle {
            label: "Earthquake",
            icon: "🌍",
            color: "#ef5350",
        },
        DisasterType::Fire => TypeStyle {
            label: "Fire",
            icon: "🔥",
            color: "#ff9800",
        },
        DisasterType::Cyclone => TypeStyle {
            label: "Cyclone",
            icon: "🌪️",
            color: "#42a5f5",
        },
        DisasterType::Flood => TypeStyle {
            label: "Flood",
            icon: "🌊",
            color: "#66bb6a",
        },
        DisasterType::Volcano => TypeStyle {
            label: "Volcano",
            icon: "🌋",
            color: "#ab47bc",
        },
        DisasterType::Drought => TypeStyle {
            label: "Drought",
            icon: "☀️",
            color: "#fdd835",
        },
        DisasterType::Storm => TypeStyle {
            label: "Storm",
            icon: "⛈️",
            color: "#5c6bc0",
        },
        DisasterType::Other => TypeStyle {
            label: "Other",
            icon: "📍",
            color: "#9e9e9e",
        },
    }
}

/// Style for a severity level.
pub fn severity_style(severity: SeverityLevel) -> SeverityStyle {
    match severity {
        SeverityLevel::Low => SeverityStyle {
            label: "Low",
            tone: "success",
        },
        SeverityLevel::Medium => SeverityStyle {
            label: "Medium",
            tone: "warning",
        },
        SeverityLevel::High => SeverityStyle {
            label: "High",
            tone: "warning",
        },
        SeverityLevel::Critical => SeverityStyle {
            label: "Critical",
            tone: "danger",
        },
    }
}

/// One slice of a per-type breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub count: usize,
    /// Share of the total, 0.0 to 100.0.
    pub percentage: f64,
}

/// Per-type breakdown of statistics, in display order.
pub fn type_shares(stats: &DisasterStatistics) -> Vec<TypeShare> {
    DisasterType::ALL
        .into_iter()
        .map(|disaster_type| {
            let style = type_style(disaster_type);
            let count = stats.count(disaster_type);
            TypeShare {
                disaster_type,
                label: style.label,
                icon: style.icon,
                color: style.color,
                count,
                percentage: percentage(count, stats.total),
            }
        })
        .collect()
}

/// Tooltip line for a chart slice, e.g. `"Flood: 3 (42.9%)"`.
pub fn format_share(disaster_type: DisasterType, stats: &DisasterStatistics) -> String {
    let count = stats.count(disaster_type);
    format!(
        "{}: {} ({:.1}%)",
        type_style(disaster_type).label,
        count,
        percentage(count, stats.total)
    )
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
