//! 属性过滤条件解析
//!
//! 与具体ORM实现无关的属性过滤条件封装, 主要记录页面中简单的搜索过滤条件.
//!
//! ## 命名规则
//!
//! ```text
//! filter_LIKES_name_OR_login_name
//! │      │   ││
//! │      │   │└─ 属性名列表, 多个属性用 _OR_ 分隔 (任一属性满足即可)
//! │      │   └── 属性值类型代码 (S = 字符串)
//! │      └────── 比较类型助记符 (LIKE = 两侧通配)
//! └───────────── 参数名前缀, 默认为 "filter"
//! ```
//!
//! ## 批量构造流程
//!
//! ```text
//! build_with_prefix()
//!   ├─ 选取以 <前缀>_ 开头的参数, 去除前缀得到filter名称
//!   ├─ 对参数值做百分号解码 (解码失败记录日志后按空串处理)
//!   ├─ 值为空白的条目被忽略 (IN 除外, 它不需要比较值)
//!   └─ 逐个构造 PropertyFilter, 任何名称错误都会中断整个批次
//! ```

use crate::config::FilterConfig;
use crate::convert::{self, ConvertError};
use crate::request::ParameterSource;
use crate::types::{MatchType, PropertyType, PropertyValue};
use log::warn;
use thiserror::Error;

/// 多个属性间OR关系的分隔符.
pub const OR_SEPARATOR: &str = "_OR_";

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("filter名称 `{name}` 没有按规则编写, {reason}")]
    InvalidFilterName { name: String, reason: String },
    #[error("filter值类型转换失败: {0}")]
    ValueCoercion(#[from] ConvertError),
    #[error("filter包含多个比较属性, 不存在唯一属性名")]
    MultipleProperties,
}

impl FilterError {
    fn invalid(name: &str, reason: &str) -> Self {
        Self::InvalidFilterName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// 一条属性过滤条件.
///
/// 构造成功后即不可变, 仅可通过 `with_*` 方法得到替换个别字段后的新值.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFilter {
    match_type: MatchType,
    property_type: PropertyType,
    match_value: Option<PropertyValue>,
    origin_value: String,
    property_names: Vec<String>,
}

impl PropertyFilter {
    /// 按命名规则解析filter名称并构造过滤条件, 日期使用默认格式.
    ///
    /// `filter_name` 为去除前缀后的名称, 例如 `LIKES_name_OR_login_name`.
    pub fn new(filter_name: &str, value: &str) -> Result<Self, FilterError> {
        Self::parse_with_formats(filter_name, value, convert::DEFAULT_DATE_FORMATS)
    }

    /// 与 [`PropertyFilter::new`] 相同, 但使用调用方给定的日期格式列表.
    pub fn parse_with_formats<S: AsRef<str>>(
        filter_name: &str,
        value: &str,
        date_formats: &[S],
    ) -> Result<Self, FilterError> {
        let (head, tail) = match filter_name.split_once('_') {
            Some((head, tail)) => (head, tail),
            None => (filter_name, ""),
        };

        // 首段的末位字符是属性值类型代码, 其余部分是比较类型助记符
        let type_code = head
            .chars()
            .last()
            .ok_or_else(|| FilterError::invalid(filter_name, "无法得到属性比较类型"))?;
        let mnemonic = &head[..head.len() - type_code.len_utf8()];

        let match_type = MatchType::from_mnemonic(mnemonic)
            .ok_or_else(|| FilterError::invalid(filter_name, "无法得到属性比较类型"))?;
        let property_type = PropertyType::from_code(type_code)
            .ok_or_else(|| FilterError::invalid(filter_name, "无法得到属性值类型"))?;

        let property_names: Vec<String> = tail
            .split(OR_SEPARATOR)
            .filter(|segment| !segment.trim().is_empty())
            .map(str::to_string)
            .collect();
        if property_names.is_empty() {
            return Err(FilterError::invalid(filter_name, "无法得到属性名称"));
        }

        // IN 与 NN 不需要比较值, 无论请求里带了什么
        let match_value = if match_type.needs_value() {
            Some(convert::convert_with_formats(
                value,
                property_type,
                date_formats,
            )?)
        } else {
            None
        };

        Ok(Self {
            match_type,
            property_type,
            match_value,
            origin_value: value.to_string(),
            property_names,
        })
    }

    /// 获取比较方式.
    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// 获取比较值的类型.
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// 获取属性值类型代码.
    pub fn property_type_code(&self) -> char {
        self.property_type.code()
    }

    /// 获取转换后的比较值, IN/NN 时为 `None`.
    pub fn match_value(&self) -> Option<&PropertyValue> {
        self.match_value.as_ref()
    }

    /// 获取转换前的原始值.
    pub fn origin_value(&self) -> &str {
        &self.origin_value
    }

    /// 获取比较属性名称列表.
    pub fn property_names(&self) -> &[String] {
        &self.property_names
    }

    /// 获取唯一的比较属性名称, 包含多个属性时返回错误.
    pub fn property_name(&self) -> Result<&str, FilterError> {
        if self.property_names.len() == 1 {
            Ok(&self.property_names[0])
        } else {
            Err(FilterError::MultipleProperties)
        }
    }

    /// 是否比较多个属性.
    pub fn has_multi_properties(&self) -> bool {
        self.property_names.len() > 1
    }

    /// 比较类型对应的SQL比较符号, LIKE族与BTD没有对应符号.
    pub fn sql_operator(&self) -> Option<&'static str> {
        self.match_type.sql_operator()
    }

    /// 替换比较方式后的新条件, 原始值与属性列表保持不变.
    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    /// 替换比较值后的新条件. 调用方负责保证值类型与类型代码一致,
    /// 这里不会重新解析.
    pub fn with_match_value(mut self, match_value: Option<PropertyValue>) -> Self {
        self.match_value = match_value;
        self
    }
}

/// 从参数源批量构造 [`PropertyFilter`] 列表.
pub struct FilterBuilder {
    config: FilterConfig,
}

impl FilterBuilder {
    /// 使用默认配置 (前缀 "filter", 默认日期格式).
    pub fn new() -> Self {
        Self {
            config: FilterConfig::default(),
        }
    }

    pub fn from_config(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// 按配置中的前缀批量构造.
    pub fn build_from_source<S: ParameterSource>(
        &self,
        source: &S,
    ) -> Result<Vec<PropertyFilter>, FilterError> {
        self.build_with_prefix(source, &self.config.filter_prefix)
    }

    /// 按给定前缀批量构造, 返回顺序与参数源的迭代顺序一致.
    ///
    /// 任何一条名称不符合规则都会中断整个批次, 不产生部分结果.
    pub fn build_with_prefix<S: ParameterSource>(
        &self,
        source: &S,
        prefix: &str,
    ) -> Result<Vec<PropertyFilter>, FilterError> {
        let mut filters = Vec::new();
        for (filter_name, raw_value) in source.parameters_starting_with(&format!("{prefix}_")) {
            let value = decode_form_value(&filter_name, &raw_value);
            // 值为空白则忽略此filter; IN 不需要比较值, 始终保留
            if leading_mnemonic(&filter_name) == "IN" || !value.trim().is_empty() {
                filters.push(self.parse(&filter_name, &value)?);
            }
        }
        Ok(filters)
    }

    /// 用配置的日期格式解析单条filter.
    pub fn parse(&self, filter_name: &str, value: &str) -> Result<PropertyFilter, FilterError> {
        PropertyFilter::parse_with_formats(filter_name, value, &self.config.date_formats)
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 取出filter名称首段中的比较类型助记符 (去掉末位的类型代码).
fn leading_mnemonic(filter_name: &str) -> &str {
    let head = match filter_name.split_once('_') {
        Some((head, _)) => head,
        None => filter_name,
    };
    match head.char_indices().last() {
        Some((index, _)) => &head[..index],
        None => head,
    }
}

/// 按UTF-8做百分号解码, 表单编码中的 `+` 代表空格.
/// 解码失败不中断批次, 记录日志后按空串处理.
fn decode_form_value(filter_name: &str, raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(error) => {
            warn!("参数 {filter_name} 的值无法按UTF-8解码: {error}");
            String::new()
        }
    }
}
