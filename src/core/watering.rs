//! Watering advice business logic.
//!
//! Pure aggregation over an injected 3-day forecast summary and the current
//! moisture readings. The forecast wins over the readings: imminent rain
//! delays watering regardless of how dry the soil looks, then heat escalates
//! the advice, and only a calm forecast defers to the per-sensor readings.
//! No network I/O happens here; fetching and caching the forecast belongs to
//! the weather collaborator.

use serde::Serialize;

/// Soil-moisture classification for one reading (percent scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoistureStatus {
    /// Below 20 percent - water immediately
    Critical,
    /// Below 35 percent
    Low,
    /// Comfortable range
    Good,
    /// Above 70 percent - skip watering
    Saturated,
}

impl MoistureStatus {
    /// Short user-facing description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Critical => "water immediately",
            Self::Low => "moisture low",
            Self::Good => "moisture good",
            Self::Saturated => "saturated, skip watering",
        }
    }
}

/// Classifies a single moisture reading (percent).
#[must_use]
pub fn classify_moisture(percent: f64) -> MoistureStatus {
    if percent < 20.0 {
        MoistureStatus::Critical
    } else if percent < 35.0 {
        MoistureStatus::Low
    } else if percent > 70.0 {
        MoistureStatus::Saturated
    } else {
        MoistureStatus::Good
    }
}

/// Aggregated 3-day forecast, supplied by the weather collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastSummary {
    /// Total forecast rainfall in inches
    pub total_rain: f64,
    /// Highest rain probability across the window, percent
    pub max_rain_probability: f64,
    /// Highest forecast temperature, degrees Fahrenheit
    pub max_temp: f64,
}

/// Overall watering recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WateringRecommendation {
    /// Rain is coming - hold off
    DelayForRain,
    /// Heat above 95F - water extra
    ExtraWater,
    /// Heat above 85F - keep an eye on moisture
    Monitor,
    /// Calm forecast - follow the sensor readings
    WaterByReadings,
}

impl WateringRecommendation {
    /// Short user-facing description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::DelayForRain => "rain expected, delay watering",
            Self::ExtraWater => "high heat, water extra",
            Self::Monitor => "warm spell, monitor moisture",
            Self::WaterByReadings => "water based on readings",
        }
    }
}

/// One classified moisture reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoistureAssessment {
    /// The raw reading, percent
    pub value: f64,
    /// Its classification
    pub status: MoistureStatus,
}

/// The full watering advice bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WateringAdvice {
    /// Overall recommendation from the forecast ladder
    pub recommendation: WateringRecommendation,
    /// Every supplied reading with its classification
    pub readings: Vec<MoistureAssessment>,
}

/// Produces watering advice from the forecast summary and moisture readings.
#[must_use]
pub fn advise_watering(forecast: &ForecastSummary, readings: &[f64]) -> WateringAdvice {
    let recommendation = if forecast.total_rain > 0.5 || forecast.max_rain_probability > 60.0 {
        WateringRecommendation::DelayForRain
    } else if forecast.max_temp > 95.0 {
        WateringRecommendation::ExtraWater
    } else if forecast.max_temp > 85.0 {
        WateringRecommendation::Monitor
    } else {
        WateringRecommendation::WaterByReadings
    };

    let readings = readings
        .iter()
        .map(|&value| MoistureAssessment {
            value,
            status: classify_moisture(value),
        })
        .collect();

    WateringAdvice {
        recommendation,
        readings,
    }
}
