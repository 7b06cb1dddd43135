use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Image shown when a listing has no usable picture of its own
pub const PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=870&q=80";

pub const UNTITLED: &str = "Untitled Property";
pub const UNKNOWN_LOCATION: &str = "Location not specified";
pub const UNKNOWN_TYPE: &str = "unknown";
pub const NO_DESCRIPTION: &str = "No description available.";

/// Identifier of a listing. The remote sends either numbers or strings,
/// so equality across the two is decided on the textual form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum PropertyId {
    Number(i64),
    Text(String),
}

impl PropertyId {
    /// True when this id renders to exactly `id`
    pub fn matches(&self, id: &str) -> bool {
        match self {
            PropertyId::Number(n) => n.to_string() == id,
            PropertyId::Text(s) => s == id,
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyId::Number(n) => write!(f, "{n}"),
            PropertyId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PropertyId {
    fn from(value: i64) -> Self {
        PropertyId::Number(value)
    }
}

impl From<i32> for PropertyId {
    fn from(value: i32) -> Self {
        PropertyId::Number(value.into())
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        PropertyId::Text(value.to_string())
    }
}

impl From<String> for PropertyId {
    fn from(value: String) -> Self {
        PropertyId::Text(value)
    }
}

/// A single property listing as served by the listings endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Asking price. Missing or non-numeric prices decode to `None`.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub bedrooms: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub bathrooms: u32,
    /// Floor area in square feet
    #[serde(default, deserialize_with = "lenient_amount")]
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields the endpoint sends that we do not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    /// Empty listing with only an id set
    pub fn new(id: impl Into<PropertyId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            location: None,
            price: None,
            property_type: None,
            bedrooms: 0,
            bathrooms: 0,
            area: 0.0,
            image: None,
            description: None,
            extra: Map::new(),
        }
    }

    /// Price used for comparisons: the listed price, or 0 when it is missing
    pub fn effective_price(&self) -> f64 {
        self.price.filter(|p| p.is_finite()).unwrap_or(0.0)
    }

    pub fn display_title(&self) -> &str {
        non_blank(&self.title).unwrap_or(UNTITLED)
    }

    pub fn display_location(&self) -> &str {
        non_blank(&self.location).unwrap_or(UNKNOWN_LOCATION)
    }

    pub fn display_type(&self) -> &str {
        non_blank(&self.property_type).unwrap_or(UNKNOWN_TYPE)
    }

    pub fn display_image(&self) -> &str {
        non_blank(&self.image).unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn display_description(&self) -> &str {
        non_blank(&self.description).unwrap_or(NO_DESCRIPTION)
    }

    /// Effective price as `$1,234,567`, rounded to whole units
    pub fn formatted_price(&self) -> String {
        let whole = self.effective_price().round().max(0.0) as u64;
        let digits = whole.to_string();

        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        out.push('$');
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Longest numeric prefix of `text` after leading whitespace, so
/// `"450000 USD"` reads as 450000 and `"1,200,000"` as 1.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        mantissa_end = digits_from(int_end + 1);
    }
    // a sign and/or a lone dot is not a number
    if !bytes[end..mantissa_end].iter().any(u8::is_ascii_digit) {
        return None;
    }
    end = mantissa_end;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .filter(|n| *n >= 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}
