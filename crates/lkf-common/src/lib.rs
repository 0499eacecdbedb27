//! Shared records for the Sri Lanka flood data service.
//!
//! Station registry entries and gauge readings as delivered by a data
//! provider, the views derived from them (rivers, basins, water levels,
//! alerts), and the threshold rules that classify a water level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Multiple of the danger level at or above which a reading is critical.
pub const CRITICAL_FACTOR: f64 = 1.2;

/// Level change (metres) between consecutive readings treated as no change.
pub const TREND_TOLERANCE_M: f64 = 0.05;

// ============================================================================
// Alert Classification
// ============================================================================

/// Flood alert level, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Normal,
    Warning,
    Danger,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "normal",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
            AlertLevel::Critical => "critical",
        }
    }

    /// Whether this level raises an alert
    pub fn is_alerting(&self) -> bool {
        *self >= AlertLevel::Warning
    }

    /// Public guidance for residents near a station at this level
    pub fn recommendation(&self) -> &'static str {
        match self {
            AlertLevel::Critical => {
                "IMMEDIATE ACTION: Evacuate low-lying areas immediately. Contact emergency services."
            }
            AlertLevel::Danger => {
                "URGENT: Prepare for evacuation. Gather emergency supplies. Monitor official updates."
            }
            AlertLevel::Warning => {
                "ALERT: Avoid flood-prone areas. Pack emergency bags. Monitor water levels."
            }
            AlertLevel::Normal => "NORMAL: Continue monitoring weather and water levels.",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown alert level: {0}")]
pub struct UnknownAlertLevel(pub String);

impl FromStr for AlertLevel {
    type Err = UnknownAlertLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(AlertLevel::Normal),
            "warning" => Ok(AlertLevel::Warning),
            "danger" => Ok(AlertLevel::Danger),
            "critical" => Ok(AlertLevel::Critical),
            _ => Err(UnknownAlertLevel(s.to_string())),
        }
    }
}

/// Gauge thresholds for a station, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Thresholds {
    pub normal_level: f64,
    pub warning_level: f64,
    pub danger_level: f64,
}

impl Thresholds {
    pub fn new(normal_level: f64, warning_level: f64, danger_level: f64) -> Self {
        Self {
            normal_level,
            warning_level,
            danger_level,
        }
    }

    /// Classify a water level against these thresholds
    pub fn classify(&self, level: f64) -> AlertLevel {
        if level >= self.danger_level * CRITICAL_FACTOR {
            AlertLevel::Critical
        } else if level >= self.danger_level {
            AlertLevel::Danger
        } else if level >= self.warning_level {
            AlertLevel::Warning
        } else {
            AlertLevel::Normal
        }
    }

    /// Position of `level` between the normal (0%) and danger (100%) levels.
    ///
    /// A degenerate band (danger not above normal) reports 100 at or above
    /// the danger level and 0 below it.
    pub fn percentage(&self, level: f64) -> f64 {
        let band = self.danger_level - self.normal_level;
        if band <= 0.0 {
            return if level >= self.danger_level { 100.0 } else { 0.0 };
        }
        (level - self.normal_level) / band * 100.0
    }
}

/// Situation text for a percentage produced by [`Thresholds::percentage`]
pub fn describe_percentage(percentage: f64) -> &'static str {
    if percentage >= 120.0 {
        "CRITICAL: Water levels are dangerously high. Immediate evacuation recommended."
    } else if percentage >= 100.0 {
        "DANGER: Water levels exceed danger threshold. Prepare for evacuation."
    } else if percentage >= 80.0 {
        "WARNING: Water levels rising towards danger threshold. Stay alert."
    } else if percentage >= 50.0 {
        "CAUTION: Water levels elevated. Monitor situation closely."
    } else {
        "NORMAL: Water levels within acceptable range."
    }
}

/// Direction of travel between the two latest readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

impl Trend {
    pub fn between(previous: f64, current: f64) -> Self {
        let delta = current - previous;
        if delta > TREND_TOLERANCE_M {
            Trend::Rising
        } else if delta < -TREND_TOLERANCE_M {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }
}

// ============================================================================
// Provider Records
// ============================================================================

/// A gauging station registry entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub river: String,
    pub basin: String,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub thresholds: Thresholds,
}

/// A single gauge observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reading {
    pub station_id: String,
    /// Water level in metres
    pub level: f64,
    pub timestamp: DateTime<Utc>,
}

/// Optional basin metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BasinInfo {
    pub name: String,
    #[serde(default)]
    pub area_km2: Option<f64>,
}

/// The full document a provider serves from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stations: Vec<Station>,
    #[serde(default)]
    pub readings: Vec<Reading>,
    #[serde(default)]
    pub basins: Vec<BasinInfo>,
}

// ============================================================================
// Derived Views
// ============================================================================

/// Station with its latest reading and alert level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationStatus {
    #[serde(flatten)]
    pub station: Station,
    pub current_level: Option<f64>,
    pub alert_level: AlertLevel,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct River {
    pub id: String,
    pub name: String,
    pub basin: String,
    pub districts: Vec<String>,
    pub stations_count: usize,
    /// Worst alert level among the river's stations
    pub alert_level: AlertLevel,
    /// Highest current level among the river's stations
    pub latest_level: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Basin {
    pub id: String,
    pub name: String,
    pub area_km2: Option<f64>,
    pub rivers_count: usize,
    pub stations_count: usize,
    pub alert_level: AlertLevel,
}

/// Latest water level at a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WaterLevel {
    pub station_id: String,
    pub station_name: String,
    pub river_name: String,
    pub current_level: f64,
    pub normal_level: f64,
    pub warning_level: f64,
    pub danger_level: f64,
    pub trend: Trend,
    pub timestamp: DateTime<Utc>,
    pub alert_status: AlertLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FloodAlert {
    pub id: String,
    pub station_id: String,
    pub station_name: String,
    pub river_name: String,
    pub district: String,
    pub alert_type: AlertLevel,
    pub level: f64,
    pub percentage: f64,
    pub description: String,
    pub recommendation: String,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
}

impl FloodAlert {
    pub fn alert_id(station_id: &str, timestamp: &DateTime<Utc>) -> String {
        format!("{}-{}", station_id, timestamp.timestamp())
    }
}

/// Alert counts for dashboard headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlertSummary {
    pub total: usize,
    pub critical: usize,
    pub danger: usize,
    pub warning: usize,
    pub affected_districts: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[FloodAlert]) -> Self {
        let count = |level: AlertLevel| alerts.iter().filter(|a| a.alert_type == level).count();

        let mut districts: Vec<&str> = alerts.iter().map(|a| a.district.as_str()).collect();
        districts.sort_unstable();
        districts.dedup();

        Self {
            total: alerts.len(),
            critical: count(AlertLevel::Critical),
            danger: count(AlertLevel::Danger),
            warning: count(AlertLevel::Warning),
            affected_districts: districts.len(),
            last_updated: alerts.iter().map(|a| a.timestamp).max(),
        }
    }
}

/// URL-safe identifier derived from a display name ("Kalu Ganga" -> "kalu-ganga")
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kelani() -> Thresholds {
        Thresholds::new(2.0, 5.0, 6.0)
    }

    #[test]
    fn test_classify_bands() {
        let t = kelani();
        assert_eq!(t.classify(1.0), AlertLevel::Normal);
        assert_eq!(t.classify(5.0), AlertLevel::Warning);
        assert_eq!(t.classify(6.0), AlertLevel::Danger);
        assert_eq!(t.classify(7.1), AlertLevel::Danger);
        assert_eq!(t.classify(7.3), AlertLevel::Critical);
    }

    #[test]
    fn test_alert_level_ordering() {
        assert!(AlertLevel::Critical > AlertLevel::Danger);
        assert!(AlertLevel::Danger > AlertLevel::Warning);
        assert!(AlertLevel::Warning > AlertLevel::Normal);
        assert!(AlertLevel::Warning.is_alerting());
        assert!(!AlertLevel::Normal.is_alerting());
    }

    #[test]
    fn test_alert_level_parse() {
        assert_eq!("Danger".parse::<AlertLevel>(), Ok(AlertLevel::Danger));
        assert_eq!(" critical ".parse::<AlertLevel>(), Ok(AlertLevel::Critical));
        assert!("flooded".parse::<AlertLevel>().is_err());
    }

    #[test]
    fn test_percentage() {
        let t = kelani();
        assert_eq!(t.percentage(2.0), 0.0);
        assert_eq!(t.percentage(6.0), 100.0);
        assert_eq!(t.percentage(4.0), 50.0);
    }

    #[test]
    fn test_percentage_degenerate_band() {
        let t = Thresholds::new(5.0, 5.0, 5.0);
        assert_eq!(t.percentage(5.5), 100.0);
        assert_eq!(t.percentage(4.0), 0.0);
    }

    #[test]
    fn test_describe_percentage() {
        assert!(describe_percentage(130.0).starts_with("CRITICAL"));
        assert!(describe_percentage(100.0).starts_with("DANGER"));
        assert!(describe_percentage(85.0).starts_with("WARNING"));
        assert!(describe_percentage(50.0).starts_with("CAUTION"));
        assert!(describe_percentage(10.0).starts_with("NORMAL"));
    }

    #[test]
    fn test_trend() {
        assert_eq!(Trend::between(3.0, 3.2), Trend::Rising);
        assert_eq!(Trend::between(3.2, 3.0), Trend::Falling);
        assert_eq!(Trend::between(3.0, 3.04), Trend::Stable);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Kalu Ganga"), "kalu-ganga");
        assert_eq!(slugify("  Attanagalu  Oya "), "attanagalu-oya");
        assert_eq!(slugify("Mahaweli River (Upper)"), "mahaweli-river-upper");
    }

    #[test]
    fn test_station_json_is_flat() {
        let station = Station {
            id: "hanwella".to_string(),
            name: "Hanwella".to_string(),
            river: "Kelani Ganga".to_string(),
            basin: "Kelani Ganga".to_string(),
            district: "Colombo".to_string(),
            latitude: 6.9097,
            longitude: 80.0842,
            thresholds: Thresholds::new(4.0, 8.0, 9.5),
        };

        let json = serde_json::to_value(&station).unwrap();
        assert_eq!(json["danger_level"], 9.5);
        assert!(json.get("thresholds").is_none());

        let back: Station = serde_json::from_value(json).unwrap();
        assert_eq!(back, station);
    }

    #[test]
    fn test_alert_summary() {
        let ts = Utc.with_ymd_and_hms(2025, 11, 27, 6, 0, 0).unwrap();
        let alert = |station: &str, district: &str, level: AlertLevel| FloodAlert {
            id: FloodAlert::alert_id(station, &ts),
            station_id: station.to_string(),
            station_name: station.to_string(),
            river_name: "Kelani Ganga".to_string(),
            district: district.to_string(),
            alert_type: level,
            level: 7.0,
            percentage: 100.0,
            description: String::new(),
            recommendation: String::new(),
            timestamp: ts,
            resolved: false,
        };

        let summary = AlertSummary::from_alerts(&[
            alert("a", "Colombo", AlertLevel::Critical),
            alert("b", "Colombo", AlertLevel::Warning),
            alert("c", "Gampaha", AlertLevel::Warning),
        ]);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.danger, 0);
        assert_eq!(summary.warning, 2);
        assert_eq!(summary.affected_districts, 2);
        assert_eq!(summary.last_updated, Some(ts));
        assert_eq!(FloodAlert::alert_id("a", &ts), format!("a-{}", ts.timestamp()));
    }
}
