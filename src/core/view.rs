use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    api::PriceSource,
    core::{
        refresher::Refresher,
        snapshot::{PriceSnapshot, RawPricePoint},
    },
};

pub const FRIENDLY_NAME: &str = "Engie Price Sensor";
pub const UNIQUE_ID: &str = "engie_price_sensor";
pub const ICON: &str = "mdi:flash";

/// Read-only projection of the refresher's latest snapshot.
pub struct PriceView<S> {
    refresher: Arc<Refresher<S>>,
}

impl<S: PriceSource> PriceView<S> {
    pub const fn new(refresher: Arc<Refresher<S>>) -> Self {
        Self { refresher }
    }

    /// Current price, `None` («unknown») until the first successful refresh.
    pub fn current_value(&self) -> Option<f64> {
        self.refresher.snapshot().map(|snapshot| snapshot.current_price)
    }

    pub fn attributes(&self) -> Option<Attributes> {
        self.refresher.snapshot().as_deref().map(Attributes::from)
    }

    /// Both the state and the attributes, taken from the same snapshot.
    pub fn state(&self) -> SensorState {
        let snapshot = self.refresher.snapshot();
        SensorState {
            unique_id: UNIQUE_ID,
            name: FRIENDLY_NAME,
            state: snapshot.as_ref().map(|snapshot| snapshot.current_price),
            attributes: snapshot.as_deref().map(Attributes::from),
        }
    }
}

#[must_use]
#[derive(Serialize)]
pub struct SensorState {
    pub unique_id: &'static str,
    pub name: &'static str,
    pub state: Option<f64>,
    pub attributes: Option<Attributes>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attributes {
    pub state_class: &'static str,
    pub average: f64,

    /// Same as [`Attributes::min`]: the feed carries no tariff periods.
    pub off_peak_1: f64,

    /// Same as [`Attributes::max`].
    pub off_peak_2: f64,

    pub peak: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub unit: &'static str,
    pub currency: &'static str,
    pub country: &'static str,
    pub region: &'static str,
    pub low_price: bool,
    pub price_percent_to_average: f64,
    pub today: Vec<f64>,
    pub tomorrow: Vec<f64>,
    pub tomorrow_valid: bool,
    pub raw_today: Vec<RawPricePoint>,
    pub raw_tomorrow: Vec<RawPricePoint>,
    pub current_price: f64,
    pub additional_costs_current_hour: f64,
    pub price_in_cents: bool,
    pub unit_of_measurement: &'static str,
    pub device_class: &'static str,
    pub icon: &'static str,
    pub friendly_name: &'static str,
    pub fetched_at: DateTime<Local>,
}

impl From<&PriceSnapshot> for Attributes {
    fn from(snapshot: &PriceSnapshot) -> Self {
        Self {
            state_class: "total",
            average: snapshot.average,
            off_peak_1: snapshot.min,
            off_peak_2: snapshot.max,
            peak: snapshot.max,
            min: snapshot.min,
            max: snapshot.max,
            mean: snapshot.average,
            unit: "kWh",
            currency: "EUR",
            country: "Belgium",
            region: "BE",
            low_price: false,
            price_percent_to_average: if snapshot.average.abs() < f64::EPSILON {
                0.0
            } else {
                snapshot.current_price / snapshot.average
            },
            today: snapshot.today.clone(),
            tomorrow: snapshot.tomorrow.clone(),
            tomorrow_valid: snapshot.tomorrow_valid,
            raw_today: snapshot.raw_today.clone(),
            raw_tomorrow: snapshot.raw_tomorrow.clone(),
            current_price: snapshot.current_price,
            additional_costs_current_hour: 0.0,
            price_in_cents: true,
            unit_of_measurement: "c/kWh",
            device_class: "monetary",
            icon: ICON,
            friendly_name: FRIENDLY_NAME,
            fetched_at: snapshot.fetched_at,
        }
    }
}
