//! Per-connection form state and conversion history
//!
//! A session mirrors the fields of a conversion form: category, value,
//! source and target units, decimal places. It owns its history; nothing
//! here is shared between sessions.

use std::collections::VecDeque;
use serde::Serialize;
use gauge_core::{ConvertError, Decimals, ErrorReport, RawValue};
use gauge_units::{
    refresh_units, render, is_error_display,
    ConversionRequest, UnitPair, UnitRegistry,
};
use crate::config::Config;

/// Successful conversions shown to the user, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        History { entries: VecDeque::new(), limit: limit.max(1) }
    }

    /// Append a display string; error displays are ignored
    ///
    /// Returns whether the entry was recorded. The oldest entry is dropped
    /// once the limit is reached.
    pub fn record(&mut self, display: &str) -> bool {
        if is_error_display(display) {
            return false;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(display.to_string());
        true
    }

    pub fn entries(&self) -> Vec<&str> {
        self.entries.iter().map(String::as_str).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Optional field updates supplied with a convert call
#[derive(Debug, Clone, Default)]
pub struct ConvertInput {
    pub value: Option<RawValue>,
    pub category: Option<String>,
    pub from_unit: Option<String>,
    pub to_unit: Option<String>,
    pub decimals: Option<Decimals>,
}

/// Result of a convert call that did not violate the unit contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertOutcome {
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
    pub recorded: bool,
}

/// Serialisable snapshot of the form fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub category: String,
    pub options: Vec<String>,
    pub from_unit: String,
    pub to_unit: String,
    pub value: RawValue,
    pub decimals: Decimals,
}

pub struct Session<'r> {
    registry: &'r UnitRegistry,
    category: String,
    options: Vec<String>,
    pair: UnitPair,
    value: RawValue,
    decimals: Decimals,
    history: History,
}

impl<'r> Session<'r> {
    /// Start a session with the configured defaults
    pub fn new(registry: &'r UnitRegistry, config: &Config) -> Result<Self, ConvertError> {
        let choices = refresh_units(registry, &config.default_category)?;
        let mut pair = choices.pair;

        let preferred = (config.default_from.as_deref(), config.default_to.as_deref());
        if let (Some(from), Some(to)) = preferred {
            if choices.options.iter().any(|o| o == from) && choices.options.iter().any(|o| o == to) {
                pair = UnitPair::new(from, to);
            } else {
                tracing::warn!(from, to, category = %choices.category, "default units not in category, using first two");
            }
        }

        Ok(Session {
            registry,
            category: choices.category,
            options: choices.options,
            pair,
            value: RawValue::Number(1.0),
            decimals: config.default_decimals,
            history: History::new(config.history_limit),
        })
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            category: self.category.clone(),
            options: self.options.clone(),
            from_unit: self.pair.from.clone(),
            to_unit: self.pair.to.clone(),
            value: self.value.clone(),
            decimals: self.decimals,
        }
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    pub fn pair(&self) -> &UnitPair {
        &self.pair
    }

    /// Switch category and reset the unit pair
    pub fn select_category(&mut self, category: &str) -> Result<SessionState, ConvertError> {
        let choices = refresh_units(self.registry, category)?;
        self.category = choices.category;
        self.options = choices.options;
        self.pair = choices.pair;
        Ok(self.state())
    }

    /// Exchange source and target units
    pub fn swap_units(&mut self) -> &UnitPair {
        self.pair = self.pair.clone().swapped();
        &self.pair
    }

    /// Convert with the current fields, applying any updates first
    ///
    /// Unknown units or categories fail the call and leave the session
    /// untouched. An unparseable value is a normal outcome: the error
    /// display is returned and nothing is added to history.
    pub fn convert(&mut self, input: ConvertInput) -> Result<ConvertOutcome, ConvertError> {
        let (category, options, default_pair) = match input.category {
            Some(name) if name != self.category => {
                let choices = refresh_units(self.registry, &name)?;
                (choices.category, choices.options, choices.pair)
            }
            _ => (self.category.clone(), self.options.clone(), self.pair.clone()),
        };
        let from = input.from_unit.unwrap_or(default_pair.from);
        let to = input.to_unit.unwrap_or(default_pair.to);
        let value = input.value.unwrap_or_else(|| self.value.clone());
        let decimals = input.decimals.unwrap_or(self.decimals);

        self.registry.unit(&category, &from)?;
        self.registry.unit(&category, &to)?;

        let request = ConversionRequest {
            value,
            from_unit: from,
            to_unit: to,
            category,
            decimals,
        };
        let outcome = self.registry.convert(&request);
        if let Err(e) = &outcome {
            if !e.is_user_error() {
                return Err(e.clone());
            }
        }

        self.category = request.category;
        self.options = options;
        self.pair = UnitPair::new(&request.from_unit, &request.to_unit);
        self.value = request.value;
        self.decimals = request.decimals;

        let display = render(&outcome);
        let recorded = self.history.record(&display);
        Ok(ConvertOutcome {
            display,
            result: outcome.as_ref().ok().map(|c| c.result),
            error: outcome.err().map(|e| e.report()),
            recorded,
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
