// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;

use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::fsrs::DEFAULT_WEIGHTS;
use crate::fsrs::Weights;
use crate::scheduler::FsrsParameters;
use crate::scheduler::FsrsScheduler;
use crate::scheduler::Scheduler;
use crate::scheduler::Sm2Parameters;
use crate::scheduler::Sm2Scheduler;
use crate::sm2::INITIAL_EASINESS;
use crate::sm2::MIN_EASINESS;
use crate::types::card_state::MAX_SCHEDULED_DAYS;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Fsrs,
    Sm2,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    pub strategy: Strategy,
    pub desired_retention: f64,
    pub maximum_interval: u32,
    /// FSRS weights. The defaults are used if absent.
    pub weights: Option<Vec<f64>>,
    pub initial_easiness: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        let fsrs = FsrsParameters::default();
        Self {
            strategy: Strategy::Fsrs,
            desired_retention: fsrs.desired_retention,
            maximum_interval: MAX_SCHEDULED_DAYS,
            weights: None,
            initial_easiness: INITIAL_EASINESS,
        }
    }
}

impl Config {
    /// Parses and validates a TOML configuration.
    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        config.scheduler.validate()?;
        Ok(config)
    }

    pub fn build_scheduler(&self) -> Fallible<Box<dyn Scheduler>> {
        let sc = &self.scheduler;
        sc.validate()?;
        let scheduler: Box<dyn Scheduler> = match sc.strategy {
            Strategy::Fsrs => Box::new(FsrsScheduler::new(FsrsParameters {
                weights: sc.weights()?,
                desired_retention: sc.desired_retention,
                maximum_interval: sc.maximum_interval,
            })),
            Strategy::Sm2 => Box::new(Sm2Scheduler::new(Sm2Parameters {
                initial_easiness: sc.initial_easiness,
                maximum_interval: sc.maximum_interval,
            })),
        };
        log::debug!("Using the {} scheduler.", scheduler.name());
        Ok(scheduler)
    }
}

impl SchedulerConfig {
    fn validate(&self) -> Fallible<()> {
        let retention = self.desired_retention;
        if !(retention > 0.0 && retention < 1.0) {
            return fail_with(
                ErrorKind::Config,
                format!("desired_retention must be between 0 and 1, got {retention}"),
            );
        }
        if !(1..=MAX_SCHEDULED_DAYS).contains(&self.maximum_interval) {
            return fail_with(
                ErrorKind::Config,
                format!(
                    "maximum_interval must be between 1 and {MAX_SCHEDULED_DAYS}, got {}",
                    self.maximum_interval
                ),
            );
        }
        if !(self.initial_easiness >= MIN_EASINESS && self.initial_easiness.is_finite()) {
            return fail_with(
                ErrorKind::Config,
                format!(
                    "initial_easiness must be at least {MIN_EASINESS}, got {}",
                    self.initial_easiness
                ),
            );
        }
        self.weights()?;
        Ok(())
    }

    fn weights(&self) -> Fallible<Weights> {
        let Some(weights) = &self.weights else {
            return Ok(DEFAULT_WEIGHTS);
        };
        if weights.iter().any(|w| !w.is_finite()) {
            return fail_with(ErrorKind::Config, "weights must be finite numbers");
        }
        <Weights>::try_from(weights.as_slice()).or_else(|_| {
            fail_with(
                ErrorKind::Config,
                format!(
                    "expected {} weights, got {}",
                    DEFAULT_WEIGHTS.len(),
                    weights.len()
                ),
            )
        })
    }
}
