//! # Curve Rules
//!
//! Shape rules shared by `curve` and `colorcurve` attributes. A curve
//! default is `{type, keys}`:
//!
//! - `type` is the interpolation mode, one of 0, 1 or 2 (filled with 1);
//! - with one channel, `keys` is a flat list of `(time, value)` pairs;
//! - with several channels, `keys` is empty or holds one pair list per
//!   channel.
//!
//! The channel count comes from `options.curves` for `curve` (names of
//! the curves, default `["Value"]`) and from `options.type` for
//! `colorcurve` (a channel spelling such as `rgb`, the default).
//!
//! A default that already has the right shape is returned unchanged.

use edschema_core::json_kind;
use serde_json::{Map, Value};

use crate::error::AttributeViolation;

/// Maximum number of channels of one curve attribute.
pub const MAX_CURVE_CHANNELS: usize = 4;

/// Interpolation mode filled into curve defaults.
pub const DEFAULT_CURVE_TYPE: u64 = 1;

const MAX_CURVE_TYPE: u64 = 2;
const DEFAULT_CURVE_NAME: &str = "Value";
const DEFAULT_COLOR_CHANNELS: &str = "rgb";
const CURVES_OPTION: &str = "curves";
const COLOR_TYPE_OPTION: &str = "type";

/// Channel count of a `curve` attribute, filling `options.curves` when
/// absent.
pub(crate) fn curve_channels(options: &mut Map<String, Value>) -> Result<usize, AttributeViolation> {
    match options.get(CURVES_OPTION) {
        None | Some(Value::Null) => {
            options.insert(
                CURVES_OPTION.to_string(),
                Value::Array(vec![Value::String(DEFAULT_CURVE_NAME.to_string())]),
            );
            Ok(1)
        }
        Some(Value::Array(names)) => {
            if names.is_empty() || names.len() > MAX_CURVE_CHANNELS {
                return Err(AttributeViolation::CurveCount {
                    count: names.len(),
                    max: MAX_CURVE_CHANNELS,
                });
            }
            if let Some(index) = names.iter().position(|n| !n.is_string()) {
                return Err(AttributeViolation::CurveName {
                    index,
                    found: json_kind(&names[index]),
                });
            }
            Ok(names.len())
        }
        Some(other) => Err(AttributeViolation::CurvesNotArray {
            found: json_kind(other),
        }),
    }
}

/// Channel count of a `colorcurve` attribute, filling `options.type`
/// when absent.
pub(crate) fn color_channels(options: &mut Map<String, Value>) -> Result<usize, AttributeViolation> {
    match options.get(COLOR_TYPE_OPTION) {
        None | Some(Value::Null) => {
            options.insert(
                COLOR_TYPE_OPTION.to_string(),
                Value::String(DEFAULT_COLOR_CHANNELS.to_string()),
            );
            Ok(DEFAULT_COLOR_CHANNELS.len())
        }
        Some(Value::String(spelling)) => match spelling.as_str() {
            "r" | "rgb" | "rgba" | "g" | "b" | "a" => Ok(spelling.len()),
            _ => Err(AttributeViolation::ColorChannels {
                value: spelling.clone(),
            }),
        },
        Some(other) => Err(AttributeViolation::ColorChannelsNotString {
            found: json_kind(other),
        }),
    }
}

/// Keys of a freshly filled default: none for a single channel, one
/// zero pair per channel otherwise.
pub fn default_keys(channels: usize) -> Value {
    if channels <= 1 {
        return Value::Array(Vec::new());
    }
    let zero_pair = Value::Array(vec![Value::from(0), Value::from(0)]);
    Value::Array(vec![zero_pair; channels])
}

/// `1.0` and `1` name the same curve type.
fn is_curve_type(t: f64) -> bool {
    t.fract() == 0.0 && (0.0..=MAX_CURVE_TYPE as f64).contains(&t)
}

/// Validate a curve default against `channels`, filling what is absent.
pub(crate) fn normalize_curve(
    default: Option<Value>,
    channels: usize,
) -> Result<Value, AttributeViolation> {
    let mut curve = match default {
        None => Map::new(),
        Some(Value::Object(curve)) => curve,
        Some(other) => {
            return Err(AttributeViolation::CurveNotObject {
                found: json_kind(&other),
            })
        }
    };

    match curve.get("type") {
        None | Some(Value::Null) => {
            curve.insert("type".to_string(), Value::from(DEFAULT_CURVE_TYPE));
        }
        Some(Value::Number(n)) if n.as_f64().is_some_and(is_curve_type) => {}
        Some(other) => {
            return Err(AttributeViolation::CurveType {
                value: other.clone(),
            })
        }
    }

    match curve.get("keys") {
        None | Some(Value::Null) => {
            curve.insert("keys".to_string(), default_keys(channels));
        }
        Some(Value::Array(keys)) => check_keys(keys, channels)?,
        Some(other) => {
            return Err(AttributeViolation::CurveKeysNotArray {
                found: json_kind(other),
            })
        }
    }

    Ok(Value::Object(curve))
}

fn check_keys(keys: &[Value], channels: usize) -> Result<(), AttributeViolation> {
    if channels <= 1 {
        return check_pairs(keys, None);
    }
    if keys.is_empty() {
        return Ok(());
    }
    if keys.len() != channels {
        return Err(AttributeViolation::CurveChannelCount {
            expected: channels,
            found: keys.len(),
        });
    }
    for (channel, inner) in keys.iter().enumerate() {
        let Value::Array(pairs) = inner else {
            return Err(AttributeViolation::CurveChannelNotArray {
                channel,
                found: json_kind(inner),
            });
        };
        check_pairs(pairs, Some(channel))?;
    }
    Ok(())
}

fn check_pairs(keys: &[Value], channel: Option<usize>) -> Result<(), AttributeViolation> {
    if keys.len() % 2 != 0 {
        return Err(AttributeViolation::CurveKeysOdd {
            channel,
            length: keys.len(),
        });
    }
    match keys.iter().position(|k| !k.is_number()) {
        Some(index) => Err(AttributeViolation::CurveKey {
            channel,
            index,
            found: json_kind(&keys[index]),
        }),
        None => Ok(()),
    }
}
