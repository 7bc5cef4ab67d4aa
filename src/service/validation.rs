//! Request validation: path ids, required create fields, update field presence.

use crate::error::AppError;
use crate::model::{ArtisanPatch, Field, NewArtisan};
use serde_json::{Map, Value};

/// Default `note` for a create that omits it.
pub const DEFAULT_NOTE: f64 = 0.0;

/// Parse the `:id` path segment.
///
/// `Err(InvalidId)` when the segment is not a number in the loose sense a
/// JavaScript client would use (see [`is_numeric`]). `Ok(Some(id))` only for a
/// plain decimal integer in `i64` range. Any other numeric spelling (`1.5`,
/// `2.0`, `1e3`, `0x10`, `Infinity`, out of range) is `Ok(None)`: callers answer
/// 404 without asking storage.
pub fn parse_id(raw: &str) -> Result<Option<i64>, AppError> {
    let s = raw.trim();
    if !is_numeric(s) {
        return Err(AppError::InvalidId);
    }
    let plain = s.strip_prefix(['+', '-']).unwrap_or(s);
    if plain.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(s.parse::<i64>().ok());
    }
    Ok(None)
}

/// Number literal grammar of JavaScript's `Number()` on trimmed input:
/// signed decimal with optional fraction and exponent, signed `Infinity`, or
/// unsigned `0x`/`0o`/`0b` integers. `inf`, `NaN` and blank are not numbers.
pub fn is_numeric(s: &str) -> bool {
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(rest) = s.strip_prefix(prefix) {
            return !rest.is_empty() && rest.chars().all(|c| c.is_digit(radix));
        }
    }
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned == "Infinity" {
        return true;
    }
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() || !digits(int_part) || !digits(frac_part) {
        return false;
    }
    match exponent {
        Some(e) => {
            let e = e.strip_prefix(['+', '-']).unwrap_or(e);
            !e.is_empty() && digits(e)
        }
        None => true,
    }
}

/// Loose truthiness over JSON: null, false, 0, and "" are falsy; everything else is truthy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_or(body: &Map<String, Value>, field: Field, default: Value) -> Value {
    match body.get(field.column()) {
        Some(v) if is_truthy(v) => v.clone(),
        _ => default,
    }
}

/// Shape a create body: `nom` and `profession` must be truthy; falsy optional
/// fields fall back to null, and `note` to [`DEFAULT_NOTE`] (so an explicit 0 is
/// replaced by the same value).
pub fn new_artisan(body: &Map<String, Value>) -> Result<NewArtisan, AppError> {
    let required = |field: Field| body.get(field.column()).filter(|v| is_truthy(v)).cloned();
    let (Some(nom), Some(profession)) = (required(Field::Nom), required(Field::Profession)) else {
        return Err(AppError::MissingRequiredFields);
    };
    Ok(NewArtisan {
        nom,
        profession,
        telephone: truthy_or(body, Field::Telephone, Value::Null),
        adresse: truthy_or(body, Field::Adresse, Value::Null),
        note: truthy_or(body, Field::Note, Value::from(DEFAULT_NOTE)),
    })
}

/// Collect recognized keys present in an update body, in [`Field::ALL`] order.
/// Presence is what counts: explicit null and 0 are kept. Unknown keys are ignored.
pub fn artisan_patch(body: &Map<String, Value>) -> ArtisanPatch {
    let mut patch = ArtisanPatch::default();
    for field in Field::ALL {
        if let Some(v) = body.get(field.column()) {
            patch.set(field, v.clone());
        }
    }
    patch
}
