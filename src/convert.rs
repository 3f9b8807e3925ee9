//! 字符串到类型值的转换
//!
//! 按属性类型代码把请求中的原始字符串转换为对应的类型值.
//! 日期类型按给定的格式列表逐个尝试, 只有日期部分的格式解析为当天零点.

use crate::types::{PropertyType, PropertyValue};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// 默认的日期格式, 先尝试带时间的格式, 再尝试纯日期.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

#[derive(Debug, Clone, PartialEq, Error)]
#[error("无法将字符串 `{value}` 转换为 {target:?} 类型")]
pub struct ConvertError {
    pub value: String,
    pub target: PropertyType,
}

impl ConvertError {
    fn new(value: &str, target: PropertyType) -> Self {
        Self {
            value: value.to_string(),
            target,
        }
    }
}

/// 使用默认日期格式转换.
pub fn convert(value: &str, target: PropertyType) -> Result<PropertyValue, ConvertError> {
    convert_with_formats(value, target, DEFAULT_DATE_FORMATS)
}

/// 把原始字符串转换为 `target` 类型的值, 失败时返回 [`ConvertError`].
pub fn convert_with_formats<S: AsRef<str>>(
    value: &str,
    target: PropertyType,
    date_formats: &[S],
) -> Result<PropertyValue, ConvertError> {
    match target {
        PropertyType::Text | PropertyType::RawText => Ok(PropertyValue::Text(value.to_string())),
        PropertyType::Integer => value
            .trim()
            .parse::<i32>()
            .map(PropertyValue::Integer)
            .map_err(|_| ConvertError::new(value, target)),
        PropertyType::Long => value
            .trim()
            .parse::<i64>()
            .map(PropertyValue::Long)
            .map_err(|_| ConvertError::new(value, target)),
        PropertyType::Float => value
            .trim()
            .parse::<f32>()
            .map(PropertyValue::Float)
            .map_err(|_| ConvertError::new(value, target)),
        PropertyType::Double => value
            .trim()
            .parse::<f64>()
            .map(PropertyValue::Double)
            .map_err(|_| ConvertError::new(value, target)),
        PropertyType::Boolean => parse_bool(value)
            .map(PropertyValue::Boolean)
            .ok_or_else(|| ConvertError::new(value, target)),
        PropertyType::Date => parse_date(value.trim(), date_formats)
            .map(PropertyValue::Date)
            .ok_or_else(|| ConvertError::new(value, target)),
    }
}

/// 布尔值接受 true/false/yes/no/on/off/1/0, 不区分大小写.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_date<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDateTime> {
    for format in formats {
        let format = format.as_ref();
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime);
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}
