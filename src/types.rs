//! The operator and value-type vocabulary of the filter naming convention.

use chrono::NaiveDateTime;

/// How a property is compared against the filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    Eq,         // EQ
    Ne,         // NE
    Like,       // LIKE, both-side wildcard
    LeftLike,   // LLIKE, starts-with
    RightLike,  // RLIKE, ends-with
    Lt,         // LT
    Gt,         // GT
    Le,         // LE
    Ge,         // GE
    NotNull,    // NN, needs no value
    IsNull,     // IN, needs no value
    BetweenDay, // BTD, date range covering one day
}

impl MatchType {
    /// 按命名规则中的助记符解析比较类型.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic {
            "EQ" => Some(MatchType::Eq),
            "NE" => Some(MatchType::Ne),
            "LIKE" => Some(MatchType::Like),
            "LLIKE" => Some(MatchType::LeftLike),
            "RLIKE" => Some(MatchType::RightLike),
            "LT" => Some(MatchType::Lt),
            "GT" => Some(MatchType::Gt),
            "LE" => Some(MatchType::Le),
            "GE" => Some(MatchType::Ge),
            "NN" => Some(MatchType::NotNull),
            "IN" => Some(MatchType::IsNull),
            "BTD" => Some(MatchType::BetweenDay),
            _ => None,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            MatchType::Eq => "EQ",
            MatchType::Ne => "NE",
            MatchType::Like => "LIKE",
            MatchType::LeftLike => "LLIKE",
            MatchType::RightLike => "RLIKE",
            MatchType::Lt => "LT",
            MatchType::Gt => "GT",
            MatchType::Le => "LE",
            MatchType::Ge => "GE",
            MatchType::NotNull => "NN",
            MatchType::IsNull => "IN",
            MatchType::BetweenDay => "BTD",
        }
    }

    /// IN 与 NN 不需要比较值, 其余类型都需要.
    pub fn needs_value(&self) -> bool {
        !matches!(self, MatchType::IsNull | MatchType::NotNull)
    }

    /// 比较类型对应的SQL比较符号.
    ///
    /// LIKE/LLIKE/RLIKE/BTD 没有单一符号, 由下游的查询构造逻辑自行处理,
    /// 这里返回 `None` 而不是错误.
    pub fn sql_operator(&self) -> Option<&'static str> {
        match self {
            MatchType::Eq => Some("="),
            MatchType::Ne => Some("!="),
            MatchType::Gt => Some(">"),
            MatchType::Lt => Some("<"),
            MatchType::Ge => Some(">="),
            MatchType::Le => Some("<="),
            MatchType::IsNull => Some("is null"),
            MatchType::NotNull => Some("is not null"),
            MatchType::Like | MatchType::LeftLike | MatchType::RightLike | MatchType::BetweenDay => {
                None
            }
        }
    }
}

/// The one-character value-type code appended to the operator mnemonic.
///
/// `RawText` (W) is identical to `Text` (S) at this layer; the distinction
/// only matters to downstream consumers, e.g. wildcard-escaping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Text,    // S
    Integer, // I
    Long,    // L
    Float,   // F
    Double,  // N
    Date,    // D
    Boolean, // B
    RawText, // W
}

impl PropertyType {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'S' => Some(PropertyType::Text),
            'I' => Some(PropertyType::Integer),
            'L' => Some(PropertyType::Long),
            'F' => Some(PropertyType::Float),
            'N' => Some(PropertyType::Double),
            'D' => Some(PropertyType::Date),
            'B' => Some(PropertyType::Boolean),
            'W' => Some(PropertyType::RawText),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            PropertyType::Text => 'S',
            PropertyType::Integer => 'I',
            PropertyType::Long => 'L',
            PropertyType::Float => 'F',
            PropertyType::Double => 'N',
            PropertyType::Date => 'D',
            PropertyType::Boolean => 'B',
            PropertyType::RawText => 'W',
        }
    }
}

/// A comparison value coerced to the type its code names.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Date(NaiveDateTime),
    Boolean(bool),
}
