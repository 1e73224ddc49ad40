//! Field-by-field validation of JSON request bodies.
//!
//! Each insertable shape enumerates its field rules against a [`FieldRules`]
//! collector. Every failing field is recorded, so a single response lists all of
//! the problems with a payload instead of stopping at the first one.

use std::borrow::Cow;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

/// Largest magnitude that fits a NUMERIC(10, 2) column.
const MAX_AMOUNT: i64 = 100_000_000;

/// Closed string domains used on the wire (`"EXPENSE"`, `"GROUP1"`, ...).
pub trait WireEnum: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == s)
    }

    fn domain() -> String {
        Self::VARIANTS
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build a validation error carrying a human-readable message.
pub fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Render validation errors as `field: message` pairs, sorted by field name.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Collects per-field errors while extracting typed values from a JSON object.
pub struct FieldRules<'a> {
    body: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldRules<'a> {
    pub fn new(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body.as_object() {
            Some(body) => Ok(Self {
                body,
                errors: ValidationErrors::new(),
            }),
            None => {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "body",
                    field_error("invalid_type", "request body must be a JSON object"),
                );
                Err(errors)
            }
        }
    }

    fn present(&self, field: &'static str) -> Option<&'a Value> {
        self.body.get(field).filter(|v| !v.is_null())
    }

    /// A field that must be present and non-null.
    pub fn required<T>(
        &mut self,
        field: &'static str,
        parse: impl Fn(&Value) -> Result<T, ValidationError>,
    ) -> Option<T> {
        match self.present(field) {
            Some(value) => self.record(field, parse(value)),
            None => {
                self.errors
                    .add(field, field_error("required", "is required"));
                None
            }
        }
    }

    /// A field that may be absent or null; both yield `None`.
    pub fn optional<T>(
        &mut self,
        field: &'static str,
        parse: impl Fn(&Value) -> Result<T, ValidationError>,
    ) -> Option<T> {
        let value = self.present(field)?;
        self.record(field, parse(value))
    }

    /// A nullable field in a partial update: absent is `None`, an explicit null
    /// is `Some(None)`.
    pub fn nullable<T>(
        &mut self,
        field: &'static str,
        parse: impl Fn(&Value) -> Result<T, ValidationError>,
    ) -> Option<Option<T>> {
        match self.body.get(field)? {
            Value::Null => Some(None),
            value => self.record(field, parse(value)).map(Some),
        }
    }

    fn record<T>(&mut self, field: &'static str, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.add(field, error);
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.errors().is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

/// String of 1..=`max` characters, measured without surrounding whitespace.
/// The value itself is kept exactly as sent.
pub fn text(max: usize) -> impl Fn(&Value) -> Result<String, ValidationError> {
    move |value| {
        let raw = value
            .as_str()
            .ok_or_else(|| field_error("invalid_type", "must be a string"))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(field_error("length", "cannot be empty"));
        }
        if trimmed.chars().count() > max {
            return Err(field_error(
                "length",
                format!("cannot exceed {max} characters"),
            ));
        }
        Ok(raw.to_string())
    }
}

pub fn one_of<T: WireEnum>(value: &Value) -> Result<T, ValidationError> {
    value
        .as_str()
        .and_then(T::parse)
        .ok_or_else(|| field_error("invalid_choice", format!("must be one of {}", T::domain())))
}

/// Decimal from a JSON number or a numeric string, rounded to cents.
pub fn decimal(value: &Value) -> Result<Decimal, ValidationError> {
    let invalid = || field_error("invalid_type", "must be a number or numeric string");

    let parsed = match value {
        Value::Number(n) => {
            let raw = n.to_string();
            Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw))
        }
        Value::String(s) => Decimal::from_str(s.trim()),
        _ => return Err(invalid()),
    }
    .map_err(|_| invalid())?;

    let rounded = parsed.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= Decimal::from(MAX_AMOUNT) {
        return Err(field_error(
            "range",
            format!("must be less than {MAX_AMOUNT} in magnitude"),
        ));
    }
    Ok(rounded)
}

pub fn non_negative_decimal(value: &Value) -> Result<Decimal, ValidationError> {
    let amount = decimal(value)?;
    if amount < Decimal::ZERO {
        return Err(field_error("range", "must not be negative"));
    }
    Ok(amount)
}

/// Calendar date as `YYYY-MM-DD`; a trailing time part (`T...`) is ignored.
pub fn date(value: &Value) -> Result<NaiveDate, ValidationError> {
    let invalid = || field_error("invalid_date", "must be a date formatted as YYYY-MM-DD");
    let s = value.as_str().ok_or_else(invalid)?;
    let day = s.split('T').next().unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| invalid())
}

/// Positive 32-bit row id.
pub fn record_id(value: &Value) -> Result<i32, ValidationError> {
    value
        .as_i64()
        .filter(|id| *id > 0)
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| field_error("invalid_id", "must be a positive integer"))
}

pub fn boolean(value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| field_error("invalid_type", "must be a boolean"))
}

/// Hex color in `#RRGGBB` form.
pub fn color_hex(value: &Value) -> Result<String, ValidationError> {
    let color = value
        .as_str()
        .ok_or_else(|| field_error("invalid_type", "must be a string"))?;
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(field_error("invalid_color", "must be in #RRGGBB format"));
    }
    Ok(color.to_string())
}
