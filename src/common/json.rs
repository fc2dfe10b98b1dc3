use crate::common::errors::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub struct JsonUtil;

impl JsonUtil {
    // Keywords without arguments may be called with `null`; treat it as an empty object.
    pub fn args<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
        let value = if value.is_null() {
            Value::Object(Default::default())
        } else {
            value
        };
        serde_json::from_value(value).map_err(|e| AppError::InvalidInput(e.to_string()))
    }

    pub fn to_value<T: Serialize>(value: T) -> Result<Value, AppError> {
        serde_json::to_value(value).map_err(|e| AppError::InvalidInput(e.to_string()))
    }
}
