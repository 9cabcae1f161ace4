use chrono::Datelike;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;
use strum_macros::Display;

use crate::dictionary::Weighted;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display)]
pub enum WeatherCondition {
    Sunny,
    Snow,
    Blizzard,
    Rain,
    Overcast,
}

impl WeatherCondition {
    pub fn is_snowing(self) -> bool {
        matches!(self, WeatherCondition::Snow | WeatherCondition::Blizzard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weather {
    pub condition: WeatherCondition,
    pub avg_temperature_c: Decimal,
    pub snow_depth_cm: i32,
}

/// December to March.
pub fn is_peak_season(date: NaiveDate) -> bool {
    matches!(date.month(), 12 | 1 | 2 | 3)
}

pub struct WeatherProvider {
    peak: Weighted<WeatherCondition>,
    shoulder: Weighted<WeatherCondition>,
}

impl WeatherProvider {
    pub fn try_new() -> Result<Self> {
        Ok(Self {
            peak: Weighted::try_new(&[
                (WeatherCondition::Sunny, 30),
                (WeatherCondition::Snow, 40),
                (WeatherCondition::Blizzard, 10),
                (WeatherCondition::Overcast, 20),
            ])?,
            shoulder: Weighted::try_new(&[
                (WeatherCondition::Sunny, 50),
                (WeatherCondition::Rain, 20),
                (WeatherCondition::Overcast, 30),
            ])?,
        })
    }

    pub fn sample(&self, rng: &mut StdRng, date: NaiveDate) -> Weather {
        if is_peak_season(date) {
            let condition = self.peak.sample(rng);
            let snow_depth_cm = if condition.is_snowing() {
                rng.gen_range(20..=150)
            } else {
                rng.gen_range(10..=80)
            };

            Weather {
                condition,
                avg_temperature_c: Decimal::new(rng.gen_range(-100..=50), 1),
                snow_depth_cm,
            }
        } else {
            Weather {
                condition: self.shoulder.sample(rng),
                avg_temperature_c: Decimal::new(rng.gen_range(50..=150), 1),
                snow_depth_cm: rng.gen_range(0..=30),
            }
        }
    }
}
