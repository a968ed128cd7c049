//! Recovery of a validated [`AnalysisResult`] from a free-form model reply.
//!
//! The reply is narrowed in three stages, loosest first: a fenced code block is
//! unwrapped, surrounding prose is cut away at the outermost braces, and the
//! remainder must then parse as strict JSON. The parsed tree is checked field by
//! field without any coercion; the first violation is reported.

use crate::analysis::{AnalysisResult, RiskLevel, TrendPoint, Verdict};
use crate::error::AnalysisError;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;
use tracing::{trace, warn};

const FENCE: &str = "```";

/// Extract and validate an analysis from a raw model reply.
///
/// The returned result has no `sources`; those come from the transport.
pub fn extract_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let candidate = isolate_json(text);
    trace!("Extracted JSON candidate:\n{}", candidate);

    let tree: Value = serde_json::from_str(candidate).map_err(|e| {
        warn!("Model reply is not valid JSON: {}", e);
        AnalysisError::malformed(format!("reply was not valid JSON ({e})"), text)
    })?;

    validate(&tree).map_err(|e| {
        warn!("Model reply failed validation: {}", e);
        AnalysisError::malformed(e.to_string(), text)
    })
}

/// Narrow the reply down to the span that should hold the JSON object.
fn isolate_json(text: &str) -> &str {
    let mut working = text.trim();

    if let Some(inner) = fenced_interior(working) {
        working = inner;
    }

    brace_span(working)
}

/// Trimmed interior of the first fenced block, optionally tagged `json`.
fn fenced_interior(text: &str) -> Option<&str> {
    let start = text.find(FENCE)? + FENCE.len();
    let after_marker = &text[start..];
    let body = after_marker.strip_prefix("json").unwrap_or(after_marker);
    let end = body.find(FENCE)?;

    let inner = body[..end].trim();
    (!inner.is_empty()).then_some(inner)
}

/// Slice from the first `{` to the last `}` inclusive, if both exist in order.
fn brace_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if open <= close => &text[open..=close],
        _ => text,
    }
}

#[derive(Debug, Error)]
enum FieldError {
    #[error("reply is not a JSON object")]
    NotAnObject,
    #[error("missing required field '{0}'")]
    Missing(String),
    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
    #[error("field '{field}' has unrecognized value '{value}' (expected one of {allowed})")]
    NotInEnum {
        field: String,
        value: String,
        allowed: &'static str,
    },
    #[error("field '{field}' is {value}, outside the range 0-100")]
    OutOfRange { field: String, value: f64 },
}

/// Typed accessors over one JSON object; `path` prefixes field names in errors.
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value, path: String) -> Result<Self, FieldError> {
        match value.as_object() {
            Some(obj) => Ok(Self { obj, path }),
            None if path.is_empty() => Err(FieldError::NotAnObject),
            None => Err(FieldError::WrongType {
                field: path,
                expected: "an object",
            }),
        }
    }

    fn name(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn get(&self, key: &str) -> Result<&'a Value, FieldError> {
        self.obj
            .get(key)
            .ok_or_else(|| FieldError::Missing(self.name(key)))
    }

    fn string(&self, key: &str) -> Result<String, FieldError> {
        self.get(key)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| FieldError::WrongType {
                field: self.name(key),
                expected: "a string",
            })
    }

    fn optional_string(&self, key: &str) -> Result<Option<String>, FieldError> {
        match self.obj.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.string(key).map(Some),
        }
    }

    fn number(&self, key: &str) -> Result<f64, FieldError> {
        self.get(key)?
            .as_f64()
            .ok_or_else(|| FieldError::WrongType {
                field: self.name(key),
                expected: "a number",
            })
    }

    fn array(&self, key: &str) -> Result<&'a Vec<Value>, FieldError> {
        self.get(key)?
            .as_array()
            .ok_or_else(|| FieldError::WrongType {
                field: self.name(key),
                expected: "an array",
            })
    }

    fn token<T: FromStr>(&self, key: &str, allowed: &'static str) -> Result<T, FieldError> {
        let value = self.string(key)?;
        T::from_str(&value).map_err(|_| FieldError::NotInEnum {
            field: self.name(key),
            value,
            allowed,
        })
    }
}

fn validate(tree: &Value) -> Result<AnalysisResult, FieldError> {
    let fields = Fields::new(tree, String::new())?;

    let subject = fields.string("coin")?;
    let current_price_label = fields.string("currentPrice")?;
    let verdict: Verdict = fields.token("verdict", "BUY, SELL, HOLD, WAIT")?;

    let confidence_score = fields.number("confidenceScore")?;
    if !(0.0..=100.0).contains(&confidence_score) {
        return Err(FieldError::OutOfRange {
            field: "confidenceScore".to_string(),
            value: confidence_score,
        });
    }

    let risk_level: RiskLevel = fields.token("riskLevel", "LOW, MEDIUM, HIGH, EXTREME")?;
    let summary = fields.string("summary")?;
    let detailed_analysis = fields.string("detailedAnalysis")?;

    let key_factors = fields
        .array("keyFactors")?
        .iter()
        .enumerate()
        .map(|(i, factor)| {
            factor
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| FieldError::WrongType {
                    field: format!("keyFactors[{i}]"),
                    expected: "a string",
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let entry_price = fields.string("entryPrice")?;
    let take_profit = fields.string("takeProfit")?;
    let stop_loss = fields.string("stopLoss")?;

    let predicted_trend = fields
        .array("predictedTrend")?
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let point = Fields::new(point, format!("predictedTrend[{i}]"))?;
            Ok(TrendPoint {
                label: point.string("label")?,
                price: point.number("price")?,
                annotation: point.optional_string("annotation")?,
            })
        })
        .collect::<Result<Vec<_>, FieldError>>()?;

    Ok(AnalysisResult {
        subject,
        current_price_label,
        verdict,
        confidence_score,
        risk_level,
        summary,
        detailed_analysis,
        key_factors,
        entry_price,
        take_profit,
        stop_loss,
        predicted_trend,
        sources: Vec::new(),
    })
}
