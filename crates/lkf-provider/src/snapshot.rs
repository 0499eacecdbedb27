//! Snapshot-backed provider and the views derived from a snapshot

use async_trait::async_trait;
use chrono::Duration;
use lkf_common::{
    describe_percentage, slugify, AlertLevel, Basin, FloodAlert, Reading, River, Snapshot,
    StationStatus, Trend, WaterLevel,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::{DataProvider, ProviderError, Result};

/// Reject snapshots a view cannot be derived from unambiguously
pub fn validate(snapshot: &Snapshot) -> Result<()> {
    let mut seen = HashSet::new();
    for station in &snapshot.stations {
        if station.id.trim().is_empty() {
            return Err(ProviderError::Configuration(format!(
                "Station '{}' has an empty id",
                station.name
            )));
        }
        if !seen.insert(station.id.as_str()) {
            return Err(ProviderError::Configuration(format!(
                "Duplicate station id: {}",
                station.id
            )));
        }
        if slugify(&station.river).is_empty() || slugify(&station.basin).is_empty() {
            return Err(ProviderError::Configuration(format!(
                "Station '{}' has a river or basin name with no letters or digits",
                station.id
            )));
        }
    }
    for basin in &snapshot.basins {
        if slugify(&basin.name).is_empty() {
            return Err(ProviderError::Configuration(format!(
                "Basin name '{}' has no letters or digits",
                basin.name
            )));
        }
    }
    Ok(())
}

/// Derived, read-only view over a snapshot.
///
/// Readings are indexed per station in ascending timestamp order; readings
/// for stations missing from the registry are ignored.
pub struct SnapshotView<'a> {
    snapshot: &'a Snapshot,
    readings: HashMap<&'a str, Vec<&'a Reading>>,
}

impl<'a> SnapshotView<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let mut readings: HashMap<&str, Vec<&Reading>> = HashMap::new();
        for reading in &snapshot.readings {
            readings.entry(reading.station_id.as_str()).or_default().push(reading);
        }
        for series in readings.values_mut() {
            series.sort_by_key(|r| r.timestamp);
        }
        Self { snapshot, readings }
    }

    fn series(&self, station_id: &str) -> &[&'a Reading] {
        self.readings.get(station_id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn latest(&self, station_id: &str) -> Option<&'a Reading> {
        self.series(station_id).last().copied()
    }

    pub fn station_statuses(&self) -> Vec<StationStatus> {
        self.snapshot
            .stations
            .iter()
            .map(|station| {
                let latest = self.latest(&station.id);
                StationStatus {
                    station: station.clone(),
                    current_level: latest.map(|r| r.level),
                    alert_level: latest
                        .map(|r| station.thresholds.classify(r.level))
                        .unwrap_or(AlertLevel::Normal),
                    last_updated: latest.map(|r| r.timestamp),
                }
            })
            .collect()
    }

    /// Rivers ordered by id. Names that slugify alike are one river, shown
    /// under the first spelling in registry order.
    pub fn rivers(&self) -> Vec<River> {
        let mut grouped: BTreeMap<String, Vec<StationStatus>> = BTreeMap::new();
        for status in self.station_statuses() {
            grouped.entry(slugify(&status.station.river)).or_default().push(status);
        }

        grouped
            .into_iter()
            .map(|(id, stations)| {
                let districts: BTreeSet<&str> =
                    stations.iter().map(|s| s.station.district.as_str()).collect();
                River {
                    name: stations[0].station.river.trim().to_string(),
                    basin: stations[0].station.basin.trim().to_string(),
                    districts: districts.into_iter().map(str::to_string).collect(),
                    stations_count: stations.len(),
                    alert_level: worst(stations.iter().map(|s| s.alert_level)),
                    latest_level: stations
                        .iter()
                        .filter_map(|s| s.current_level)
                        .fold(None, |max: Option<f64>, level| {
                            Some(max.map_or(level, |m| m.max(level)))
                        }),
                    id,
                }
            })
            .collect()
    }

    /// Basins ordered by id, including metadata-only basins with no stations.
    /// Station spellings of a name take precedence over metadata ones.
    pub fn basins(&self) -> Vec<Basin> {
        let statuses = self.station_statuses();
        let mut names: BTreeMap<String, &str> = BTreeMap::new();
        let spellings = self
            .snapshot
            .stations
            .iter()
            .map(|s| s.basin.as_str())
            .chain(self.snapshot.basins.iter().map(|b| b.name.as_str()));
        for name in spellings {
            names.entry(slugify(name)).or_insert(name.trim());
        }

        names
            .into_iter()
            .map(|(id, name)| {
                let members: Vec<&StationStatus> = statuses
                    .iter()
                    .filter(|s| slugify(&s.station.basin) == id)
                    .collect();
                let rivers: HashSet<String> =
                    members.iter().map(|s| slugify(&s.station.river)).collect();
                let area_km2 = self
                    .snapshot
                    .basins
                    .iter()
                    .filter(|b| slugify(&b.name) == id)
                    .find_map(|b| b.area_km2);

                Basin {
                    name: name.to_string(),
                    area_km2,
                    rivers_count: rivers.len(),
                    stations_count: members.len(),
                    alert_level: worst(members.iter().map(|s| s.alert_level)),
                    id,
                }
            })
            .collect()
    }

    /// Stations on a river, or `None` when no station carries that river id
    pub fn river_stations(&self, river_id: &str) -> Option<Vec<StationStatus>> {
        let stations: Vec<StationStatus> = self
            .station_statuses()
            .into_iter()
            .filter(|s| slugify(&s.station.river) == river_id)
            .collect();
        (!stations.is_empty()).then_some(stations)
    }

    /// Rivers draining a basin, or `None` for an unknown basin
    pub fn basin_rivers(&self, basin_id: &str) -> Option<Vec<River>> {
        if !self.basins().iter().any(|b| b.id == basin_id) {
            return None;
        }
        Some(
            self.rivers()
                .into_iter()
                .filter(|r| slugify(&r.basin) == basin_id)
                .collect(),
        )
    }

    /// Latest level per station, in registry order
    pub fn levels(&self) -> Vec<WaterLevel> {
        self.snapshot
            .stations
            .iter()
            .filter_map(|station| {
                let series = self.series(&station.id);
                let latest = series.last()?;
                let trend = match series {
                    [.., previous, _] => Trend::between(previous.level, latest.level),
                    _ => Trend::Stable,
                };
                let t = station.thresholds;
                Some(WaterLevel {
                    station_id: station.id.clone(),
                    station_name: station.name.clone(),
                    river_name: station.river.clone(),
                    current_level: latest.level,
                    normal_level: t.normal_level,
                    warning_level: t.warning_level,
                    danger_level: t.danger_level,
                    trend,
                    timestamp: latest.timestamp,
                    alert_status: t.classify(latest.level),
                })
            })
            .collect()
    }

    /// Readings within `days` of the station's latest reading, oldest first.
    ///
    /// `None` for a station missing from the registry. A window reaching
    /// past the representable time range covers the whole series.
    pub fn station_history(&self, station_id: &str, days: u32) -> Option<Vec<Reading>> {
        if !self.snapshot.stations.iter().any(|s| s.id == station_id) {
            return None;
        }
        let series = self.series(station_id);
        let Some(latest) = series.last() else {
            return Some(Vec::new());
        };
        let since = Duration::try_days(i64::from(days))
            .and_then(|window| latest.timestamp.checked_sub_signed(window));
        Some(
            series
                .iter()
                .filter(|r| since.map_or(true, |since| r.timestamp >= since))
                .map(|r| (*r).clone())
                .collect(),
        )
    }

    /// Alerts for stations at warning or worse, most severe first
    pub fn alerts(&self) -> Vec<FloodAlert> {
        let mut alerts: Vec<FloodAlert> = self
            .snapshot
            .stations
            .iter()
            .filter_map(|station| {
                let latest = self.latest(&station.id)?;
                let level = station.thresholds.classify(latest.level);
                if !level.is_alerting() {
                    return None;
                }
                let percentage = station.thresholds.percentage(latest.level);
                Some(FloodAlert {
                    id: FloodAlert::alert_id(&station.id, &latest.timestamp),
                    station_id: station.id.clone(),
                    station_name: station.name.clone(),
                    river_name: station.river.clone(),
                    district: station.district.clone(),
                    alert_type: level,
                    level: latest.level,
                    percentage: (percentage * 10.0).round() / 10.0,
                    description: describe_percentage(percentage).to_string(),
                    recommendation: level.recommendation().to_string(),
                    timestamp: latest.timestamp,
                    resolved: false,
                })
            })
            .collect();

        alerts.sort_by(|a, b| {
            b.alert_type
                .cmp(&a.alert_type)
                .then_with(|| a.station_id.cmp(&b.station_id))
        });
        alerts
    }
}

fn worst(levels: impl Iterator<Item = AlertLevel>) -> AlertLevel {
    levels.max().unwrap_or(AlertLevel::Normal)
}

/// Provider serving a snapshot held in memory
pub struct SnapshotProvider {
    snapshot: Snapshot,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot) -> Result<Self> {
        validate(&snapshot)?;
        Ok(Self { snapshot })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        debug!(
            "Loaded snapshot from {}: {} stations, {} readings",
            path.display(),
            snapshot.stations.len(),
            snapshot.readings.len()
        );
        Self::new(snapshot)
    }

    fn view(&self) -> SnapshotView<'_> {
        SnapshotView::new(&self.snapshot)
    }
}

#[async_trait]
impl DataProvider for SnapshotProvider {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn stations(&self) -> Result<Vec<StationStatus>> {
        Ok(self.view().station_statuses())
    }

    async fn rivers(&self) -> Result<Vec<River>> {
        Ok(self.view().rivers())
    }

    async fn basins(&self) -> Result<Vec<Basin>> {
        Ok(self.view().basins())
    }

    async fn levels(&self) -> Result<Vec<WaterLevel>> {
        Ok(self.view().levels())
    }

    async fn station_history(&self, station_id: &str, days: u32) -> Result<Option<Vec<Reading>>> {
        Ok(self.view().station_history(station_id, days))
    }

    async fn river_stations(&self, river_id: &str) -> Result<Option<Vec<StationStatus>>> {
        Ok(self.view().river_stations(river_id))
    }

    async fn basin_rivers(&self, basin_id: &str) -> Result<Option<Vec<River>>> {
        Ok(self.view().basin_rivers(basin_id))
    }

    async fn alerts(&self) -> Result<Vec<FloodAlert>> {
        Ok(self.view().alerts())
    }
}
