use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transmission state of a report with respect to the remote system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendStatus {
    /// Queued locally, not yet delivered.
    #[default]
    WaitingToSend,
    /// Delivered to the remote system.
    Sent,
    /// Kept locally without being queued.
    Saved,
}

impl SendStatus {
    /// Stable integer id stored in the `send_status` column.
    pub fn id(self) -> i64 {
        match self {
            SendStatus::WaitingToSend => 0,
            SendStatus::Sent => 1,
            SendStatus::Saved => 2,
        }
    }

    /// Looks up a status by its column id.
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(SendStatus::WaitingToSend),
            1 => Some(SendStatus::Sent),
            2 => Some(SendStatus::Saved),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SendStatus::WaitingToSend => "waiting-to-send",
            SendStatus::Sent => "sent",
            SendStatus::Saved => "saved",
        }
    }
}

impl std::fmt::Display for SendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an observation's measurements came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    /// Read and typed in by the observer.
    #[default]
    Manual,
    /// Handheld weather meter.
    Instrument,
    /// Fixed or portable weather station.
    Station,
}

impl DataSource {
    pub fn id(self) -> i64 {
        match self {
            DataSource::Manual => 0,
            DataSource::Instrument => 1,
            DataSource::Station => 2,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(DataSource::Manual),
            1 => Some(DataSource::Instrument),
            2 => Some(DataSource::Station),
            _ => None,
        }
    }
}

/// Direction the wind is blowing from, on a 16-point compass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WindDirection {
    #[default]
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
    /// No measurable wind.
    Calm,
}

impl WindDirection {
    const ALL: [WindDirection; 17] = [
        WindDirection::N,
        WindDirection::Nne,
        WindDirection::Ne,
        WindDirection::Ene,
        WindDirection::E,
        WindDirection::Ese,
        WindDirection::Se,
        WindDirection::Sse,
        WindDirection::S,
        WindDirection::Ssw,
        WindDirection::Sw,
        WindDirection::Wsw,
        WindDirection::W,
        WindDirection::Wnw,
        WindDirection::Nw,
        WindDirection::Nnw,
        WindDirection::Calm,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn from_id(id: i64) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

/// Compass direction a slope faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aspect {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
    /// Level ground.
    #[default]
    Flat,
}

impl Aspect {
    const ALL: [Aspect; 9] = [
        Aspect::N,
        Aspect::Ne,
        Aspect::E,
        Aspect::Se,
        Aspect::S,
        Aspect::Sw,
        Aspect::W,
        Aspect::Nw,
        Aspect::Flat,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn from_id(id: i64) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

/// Measurements taken by one observer at one place and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    pub user: String,
    #[serde(default)]
    pub data_source: DataSource,
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above sea level.
    pub elevation: Option<f64>,
    /// Degrees Fahrenheit.
    pub dry_bulb_temp: Option<f64>,
    /// Degrees Fahrenheit.
    pub wet_bulb_temp: Option<f64>,
    /// Percent.
    pub relative_humidity: Option<f64>,
    #[serde(default)]
    pub wind_direction: WindDirection,
    /// Miles per hour.
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub aspect: Aspect,
    pub physical_location: Option<String>,
    pub time_taken: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

impl WeatherObservation {
    /// Creates an observation with only the required fields set.
    pub fn new(user: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            user: user.into(),
            data_source: DataSource::default(),
            latitude,
            longitude,
            elevation: None,
            dry_bulb_temp: None,
            wet_bulb_temp: None,
            relative_humidity: None,
            wind_direction: WindDirection::default(),
            wind_speed: None,
            aspect: Aspect::default(),
            physical_location: None,
            time_taken: None,
            status: None,
        }
    }
}

/// A weather report as persisted by the local report store.
///
/// `id`, `send_status`, `is_draft` and `is_new` are managed by the store:
/// on read they come from the table columns, not from the stored JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Assigned by the store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub seq_num: i64,
    /// Ordering key; newest first when sorted descending. Not unique.
    pub seq_time: i64,
    pub incident_id: i64,
    #[serde(default)]
    pub send_status: SendStatus,
    pub message: WeatherObservation,
}

impl WeatherReport {
    /// Creates a new report waiting to be sent.
    pub fn new(incident_id: i64, seq_time: i64, message: WeatherObservation) -> Self {
        Self {
            id: None,
            is_draft: false,
            is_new: true,
            seq_num: 0,
            seq_time,
            incident_id,
            send_status: SendStatus::WaitingToSend,
            message,
        }
    }

    pub fn with_send_status(mut self, status: SendStatus) -> Self {
        self.send_status = status;
        self
    }

    pub fn with_seq_num(mut self, seq_num: i64) -> Self {
        self.seq_num = seq_num;
        self
    }

    pub fn with_draft(mut self, is_draft: bool) -> Self {
        self.is_draft = is_draft;
        self
    }

    /// Sets a specific ID for this report (useful for testing).
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
