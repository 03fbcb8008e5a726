use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// The fixed set of comparison operators a single condition can use.
///
/// Wire names are camelCase to match the authoring UI's JSON. An operator
/// name this build does not recognize deserializes to [`Unsupported`],
/// which always evaluates to `false` — one stale condition in a stored
/// rule must not poison parsing or event processing.
///
/// [`Unsupported`]: ConditionOperator::Unsupported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    IsEmpty,
    GreaterThan,
    LessThan,
    GreaterThanOrEquals,
    LessThanOrEquals,
    Between,
    Before,
    After,
    Within,
    DayOfWeek,
    DayOfMonth,
    IsNull,
    In,
    InGroup,
    Unsupported,
}

impl ConditionOperator {
    /// Parses a wire name, falling back to `Unsupported` for anything unknown.
    pub fn parse(name: &str) -> Self {
        match name {
            "equals" => Self::Equals,
            "notEquals" => Self::NotEquals,
            "contains" => Self::Contains,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            "matches" => Self::Matches,
            "isEmpty" => Self::IsEmpty,
            "greaterThan" => Self::GreaterThan,
            "lessThan" => Self::LessThan,
            "greaterThanOrEquals" => Self::GreaterThanOrEquals,
            "lessThanOrEquals" => Self::LessThanOrEquals,
            "between" => Self::Between,
            "before" => Self::Before,
            "after" => Self::After,
            "within" => Self::Within,
            "dayOfWeek" => Self::DayOfWeek,
            "dayOfMonth" => Self::DayOfMonth,
            "isNull" => Self::IsNull,
            "in" => Self::In,
            "inGroup" => Self::InGroup,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Matches => "matches",
            Self::IsEmpty => "isEmpty",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::GreaterThanOrEquals => "greaterThanOrEquals",
            Self::LessThanOrEquals => "lessThanOrEquals",
            Self::Between => "between",
            Self::Before => "before",
            Self::After => "after",
            Self::Within => "within",
            Self::DayOfWeek => "dayOfWeek",
            Self::DayOfMonth => "dayOfMonth",
            Self::IsNull => "isNull",
            Self::In => "in",
            Self::InGroup => "inGroup",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConditionOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

/// Boolean combinator for a condition group.
///
/// The two wire names `"AND"` and `"OR"` are deliberately disjoint from
/// every [`ConditionOperator`] name: a node in a mixed conditions array is
/// a group precisely when its operator is one of these two strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupOperator::And => write!(f, "AND"),
            GroupOperator::Or => write!(f, "OR"),
        }
    }
}

/// A single field/operator/value test against an entity snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub id: String,
    /// Dotted path into the entity, e.g. `payee.name` or `category.group.name`.
    pub field: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: Value,
    /// Upper bound for range operators (`between`); unused otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<Value>,
    /// Inverts the final boolean result after operator evaluation.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negate: bool,
}

/// A boolean (AND/OR) combination of conditions and/or nested groups.
///
/// An empty `conditions` array evaluates to `true` for both operators —
/// the identity element of the respective boolean monoid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroup {
    #[serde(default)]
    pub id: String,
    pub operator: GroupOperator,
    #[serde(default)]
    pub conditions: Vec<ConditionNode>,
}

/// A child of a [`ConditionGroup`]: either a leaf condition or a nested group.
///
/// Untagged on the wire; the `Group` arm is tried first, so a node parses
/// as a group exactly when its operator is `"AND"` or `"OR"` and falls
/// through to a leaf otherwise. This reproduces the structural
/// discrimination rule the authoring format relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    Group(ConditionGroup),
    Leaf(Condition),
}

impl ConditionNode {
    pub fn is_group(&self) -> bool {
        matches!(self, ConditionNode::Group(_))
    }
}

impl From<Condition> for ConditionNode {
    fn from(condition: Condition) -> Self {
        ConditionNode::Leaf(condition)
    }
}

impl From<ConditionGroup> for ConditionNode {
    fn from(group: ConditionGroup) -> Self {
        ConditionNode::Group(group)
    }
}
