// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{ModcfgError, Value};

impl TryFrom<Value> for String {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected string, got {:?}", value),
                line: 0,
                column: 0,
                hint: Some("Use a string value in your config".into()),
                code: Some(401),
            }),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(i),
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected integer, got {:?}", value),
                line: 0,
                column: 0,
                hint: Some("Use an integer value in your config".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let i = i64::try_from(value)?;
        i.try_into().map_err(|_| ModcfgError::TypeError {
            message: format!("Integer {} out of range for i32", i),
            line: 0,
            column: 0,
            hint: None,
            code: Some(403),
        })
    }
}

impl TryFrom<Value> for u16 {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let i = i64::try_from(value)?;
        i.try_into().map_err(|_| ModcfgError::TypeError {
            message: format!("Integer {} out of range for u16", i),
            line: 0,
            column: 0,
            hint: Some("Use an integer between 0 and 65535".into()),
            code: Some(403),
        })
    }
}

impl TryFrom<Value> for u32 {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let i = i64::try_from(value)?;
        i.try_into().map_err(|_| ModcfgError::TypeError {
            message: format!("Integer {} out of range for u32", i),
            line: 0,
            column: 0,
            hint: None,
            code: Some(403),
        })
    }
}

impl TryFrom<Value> for u64 {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let i = i64::try_from(value)?;
        i.try_into().map_err(|_| ModcfgError::TypeError {
            message: format!("Integer {} out of range for u64", i),
            line: 0,
            column: 0,
            hint: Some("Use a non-negative integer".into()),
            code: Some(403),
        })
    }
}

impl TryFrom<Value> for usize {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let i = i64::try_from(value)?;
        i.try_into().map_err(|_| ModcfgError::TypeError {
            message: format!("Integer {} out of range for usize", i),
            line: 0,
            column: 0,
            hint: Some("Use a non-negative integer".into()),
            code: Some(403),
        })
    }
}

impl TryFrom<Value> for f64 {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(i as f64),
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected integer, got {:?}", value),
                line: 0,
                column: 0,
                hint: Some("Use an integer value in your config".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::String(ref s)
                if s.to_lowercase().starts_with("tru") || s.to_lowercase().starts_with("fal") =>
            {
                Err(ModcfgError::TypeError {
                    message: format!(
                        "Invalid boolean value '{}'. Did you mean 'true' or 'false'?",
                        s
                    ),
                    line: 0,
                    column: 0,
                    hint: None,
                    code: Some(404),
                })
            }
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected boolean, got {:?}", value),
                line: 0,
                column: 0,
                hint: None,
                code: Some(404),
            }),
        }
    }
}

impl TryFrom<Value> for NaiveDate {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Date(date) => Ok(date),
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected date, got {:?}", value),
                line: 0,
                column: 0,
                hint: Some("Use a date(YYYY-MM-DD) literal".into()),
                code: Some(407),
            }),
        }
    }
}

impl TryFrom<Value> for NaiveDateTime {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected datetime, got {:?}", value),
                line: 0,
                column: 0,
                hint: Some("Use a datetime(YYYY-MM-DD HH:MM:SS) literal".into()),
                code: Some(407),
            }),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = ModcfgError>,
{
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(arr) => {
                let mut result = Vec::new();
                for item in arr {
                    result.push(T::try_from(item)?);
                }
                Ok(result)
            }
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected array, got {:?}", value),
                line: 0,
                column: 0,
                hint: Some("Use an array [...] in your config".into()),
                code: Some(405),
            }),
        }
    }
}

impl TryFrom<Value> for HashMap<String, Value> {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => Ok(items.into_iter().collect()),
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected object, got {:?}", value),
                line: 0,
                column: 0,
                hint: Some("Use an object block in your config".into()),
                code: Some(406),
            }),
        }
    }
}

impl TryFrom<Value> for HashMap<String, String> {
    type Error = ModcfgError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => {
                let mut map = HashMap::new();
                for (key, val) in items {
                    map.insert(key, String::try_from(val)?);
                }
                Ok(map)
            }
            _ => Err(ModcfgError::TypeError {
                message: format!("Expected object, got {:?}", value),
                line: 0,
                column: 0,
                hint: Some("Use an object block with string values".into()),
                code: Some(406),
            }),
        }
    }
}
