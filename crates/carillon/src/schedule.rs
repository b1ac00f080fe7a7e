//! Schedule data model and normalization into five-field cron expressions.

use serde::{Deserialize, Serialize};

use crate::error::CronError;

/// Specification for one field of a cron schedule.
///
/// A field is a single value, an exact set of values, or a range/step
/// combination. An *unspecified* field is `None` at the [`CronSchedule`]
/// level and renders as `*`.
///
/// The serde representation matches the wire shape of structured schedules:
/// a bare integer, `{"exact": n}` / `{"exact": [..]}`, or any subset of
/// `{"start": .., "end": .., "every": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CronField {
    /// A single value: `5` renders as `5`.
    Value(u32),
    /// An exact set of values, rendered comma-joined in the order given.
    Exact { exact: ExactSet },
    /// A range and/or step. Rendering depends on which of the three parts
    /// are present; see [`render_field`].
    Range {
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        end: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        every: Option<u32>,
    },
}

/// The payload of an exact field: one value or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExactSet {
    One(u32),
    Many(Vec<u32>),
}

impl CronField {
    /// Field matching exactly the given value(s), in the order given.
    pub fn exact(values: impl Into<ExactSet>) -> Self {
        CronField::Exact {
            exact: values.into(),
        }
    }

    /// Field matching the inclusive range `start-end`.
    pub fn range(start: u32, end: u32) -> Self {
        CronField::Range {
            start: Some(start),
            end: Some(end),
            every: None,
        }
    }

    /// Field matching every `step` units (`*/step`).
    pub fn every(step: u32) -> Self {
        CronField::Range {
            start: None,
            end: None,
            every: Some(step),
        }
    }
}

impl From<u32> for CronField {
    fn from(value: u32) -> Self {
        CronField::Value(value)
    }
}

impl From<u32> for ExactSet {
    fn from(value: u32) -> Self {
        ExactSet::One(value)
    }
}

impl From<Vec<u32>> for ExactSet {
    fn from(values: Vec<u32>) -> Self {
        ExactSet::Many(values)
    }
}

/// Render one schedule field to its canonical textual form.
///
/// `None` (unspecified) renders as `*`. A `Range` with none of
/// start/end/every, or with `end` but no `start`, cannot be rendered and
/// fails with [`CronError::InvalidSchedule`].
pub fn render_field(field: Option<&CronField>) -> Result<String, CronError> {
    let Some(field) = field else {
        return Ok("*".to_string());
    };

    match field {
        CronField::Value(value) => Ok(value.to_string()),
        CronField::Exact {
            exact: ExactSet::One(value),
        } => Ok(value.to_string()),
        CronField::Exact {
            exact: ExactSet::Many(values),
        } => Ok(values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",")),
        CronField::Range { start, end, every } => match (start, end, every) {
            (Some(start), Some(end), Some(every)) => Ok(format!("{start}-{end}/{every}")),
            (Some(start), Some(end), None) => Ok(format!("{start}-{end}")),
            (Some(start), None, Some(every)) => Ok(format!("{start}/{every}")),
            (Some(start), None, None) => Ok(format!("{start}/1")),
            (None, None, Some(every)) => Ok(format!("*/{every}")),
            _ => Err(CronError::InvalidSchedule(
                "range field requires a start value or a bare every step".to_string(),
            )),
        },
    }
}

/// A structured schedule: five optional cron fields in fixed order.
///
/// Omitted fields render as wildcards, except that unspecified higher-order
/// fields are defaulted when a lower-order field is given; see
/// [`CronSchedule::to_expression`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<CronField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<CronField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<CronField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<CronField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<CronField>,
}

impl CronSchedule {
    /// Create a schedule with all fields unspecified (`* * * * *`).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minute(mut self, field: impl Into<CronField>) -> Self {
        self.minute = Some(field.into());
        self
    }

    pub fn with_hour(mut self, field: impl Into<CronField>) -> Self {
        self.hour = Some(field.into());
        self
    }

    pub fn with_day_of_month(mut self, field: impl Into<CronField>) -> Self {
        self.day_of_month = Some(field.into());
        self
    }

    pub fn with_month(mut self, field: impl Into<CronField>) -> Self {
        self.month = Some(field.into());
        self
    }

    pub fn with_day_of_week(mut self, field: impl Into<CronField>) -> Self {
        self.day_of_week = Some(field.into());
        self
    }

    /// Render the schedule to a five-field cron expression.
    ///
    /// Unspecified higher-order fields are defaulted so that, for example,
    /// "every 2 hours" can be written as just `{ hour: every 2 }` and still
    /// mean minute 0 of every second hour rather than every minute of those
    /// hours. The defaults cascade in one pass, top to bottom, first
    /// matching rule wins; a field the caller set explicitly is never
    /// overridden:
    ///
    /// 1. minute given: nothing injected
    /// 2. hour given: minute = 0
    /// 3. day-of-month or day-of-week given: minute = 0, hour = 0
    /// 4. month given: minute = 0, hour = 0, day-of-month = 1
    /// 5. nothing given: all wildcards
    pub fn to_expression(&self) -> Result<String, CronError> {
        let zero = || Some(CronField::Value(0));

        let (minute, hour, day_of_month) = if self.minute.is_some() {
            (
                self.minute.clone(),
                self.hour.clone(),
                self.day_of_month.clone(),
            )
        } else if self.hour.is_some() {
            (zero(), self.hour.clone(), self.day_of_month.clone())
        } else if self.day_of_month.is_some() || self.day_of_week.is_some() {
            (zero(), zero(), self.day_of_month.clone())
        } else if self.month.is_some() {
            (zero(), zero(), Some(CronField::Value(1)))
        } else {
            (None, None, None)
        };

        Ok([
            render_field(minute.as_ref())?,
            render_field(hour.as_ref())?,
            render_field(day_of_month.as_ref())?,
            render_field(self.month.as_ref())?,
            render_field(self.day_of_week.as_ref())?,
        ]
        .join(" "))
    }
}

/// A schedule as supplied at registration: either a literal five-field cron
/// expression or a structured [`CronSchedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Schedule {
    /// A literal cron expression, passed to the service untouched. No
    /// syntax validation happens client-side; a malformed expression is
    /// rejected by the service at registration.
    Expression(String),
    /// A structured schedule, rendered via [`CronSchedule::to_expression`].
    Structured(CronSchedule),
}

impl Schedule {
    /// Normalize into the cron expression string the service expects.
    pub fn normalize(&self) -> Result<String, CronError> {
        match self {
            Schedule::Expression(expression) => Ok(expression.clone()),
            Schedule::Structured(schedule) => schedule.to_expression(),
        }
    }
}

impl From<&str> for Schedule {
    fn from(expression: &str) -> Self {
        Schedule::Expression(expression.to_string())
    }
}

impl From<String> for Schedule {
    fn from(expression: String) -> Self {
        Schedule::Expression(expression)
    }
}

impl From<CronSchedule> for Schedule {
    fn from(schedule: CronSchedule) -> Self {
        Schedule::Structured(schedule)
    }
}
