use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Request parameter carrying the requested page number
pub const PAGE_NUMBER_PARAM: &str = "pageNumber";
/// Request parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "pageSize";

/// Body returned by a server in structured (JSON) mode.
///
/// The three pagination fields are authoritative for the client; every
/// other key is kept in `payload` and handed to the caller's renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    #[serde(deserialize_with = "lenient_number")]
    pub page_number: i64,
    #[serde(deserialize_with = "lenient_number")]
    pub page_size: i64,
    #[serde(deserialize_with = "lenient_number")]
    pub total_row: i64,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl PageResult {
    /// Caller payload entry, by its JSON key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

/// Numeric field as servers actually send it
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Integer(i64),
    Float(f64),
    Text(String),
    Null(Option<()>),
}

/// Accepts integers, floats and numeric strings. Anything else becomes 0,
/// which the client treats as "use the default".
fn lenient_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawNumber::deserialize(deserializer)?;
    Ok(match raw {
        RawNumber::Integer(n) => n,
        RawNumber::Float(f) if f.is_finite() => f.trunc() as i64,
        RawNumber::Float(_) => 0,
        RawNumber::Text(s) => s.trim().parse().unwrap_or(0),
        RawNumber::Null(_) => 0,
    })
}
