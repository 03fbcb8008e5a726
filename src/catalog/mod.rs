//! Static catalogs describing what rules can be authored against: entity
//! types with their trigger events, per-entity condition fields with their
//! allowed operator subsets, operator metadata, and action definitions.
//!
//! These are data, not behavior. The rule-builder UI drives its pickers
//! from them, and the validator's notion of a "known operator" resolves
//! here.

/// The kind of operand an operator or action parameter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None,
    Any,
    Text,
    Number,
    Date,
    List,
    GroupRef,
}

/// Metadata for one condition operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorSpec {
    /// Wire name, as stored in authored flows and compiled rules.
    pub name: &'static str,
    pub label: &'static str,
    /// Number of operand values the operator consumes (0, 1, or 2).
    pub arity: u8,
    pub operand: ValueKind,
}

macro_rules! define_operators {
    ( $( ($name:expr, $label:expr, $arity:expr, $kind:ident) ),* $(,)? ) => {
        /// Every operator this engine evaluates, in catalog order.
        pub const OPERATORS: &[OperatorSpec] = &[
            $( OperatorSpec {
                name: $name,
                label: $label,
                arity: $arity,
                operand: ValueKind::$kind,
            }, )*
        ];
    };
}

define_operators! {
    ("equals", "equals", 1, Any),
    ("notEquals", "does not equal", 1, Any),
    ("contains", "contains", 1, Text),
    ("startsWith", "starts with", 1, Text),
    ("endsWith", "ends with", 1, Text),
    ("matches", "matches pattern", 1, Text),
    ("isEmpty", "is empty", 0, None),
    ("greaterThan", "is greater than", 1, Number),
    ("lessThan", "is less than", 1, Number),
    ("greaterThanOrEquals", "is at least", 1, Number),
    ("lessThanOrEquals", "is at most", 1, Number),
    ("between", "is between", 2, Number),
    ("before", "is before", 1, Date),
    ("after", "is after", 1, Date),
    ("within", "is within the next N days", 1, Number),
    ("dayOfWeek", "falls on weekday", 1, List),
    ("dayOfMonth", "falls on day of month", 1, Number),
    ("isNull", "is not set", 0, None),
    ("in", "is one of", 1, List),
    ("inGroup", "is in category group", 1, GroupRef),
}

pub fn operator_spec(name: &str) -> Option<&'static OperatorSpec> {
    OPERATORS.iter().find(|spec| spec.name == name)
}

pub fn is_known_operator(name: &str) -> bool {
    operator_spec(name).is_some()
}

/// A condition field available on an entity type.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Dotted path into the entity snapshot.
    pub path: &'static str,
    pub label: &'static str,
    /// Operator wire names the UI offers for this field.
    pub operators: &'static [&'static str],
}

/// One parameter of an action definition.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ValueKind,
    pub required: bool,
}

/// An action that can be attached to rules for an entity type.
#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub params: &'static [ParamSpec],
}

/// An entity type rules can be authored against.
#[derive(Debug, Clone, Copy)]
pub struct EntitySpec {
    pub entity_type: &'static str,
    pub events: &'static [&'static str],
    pub fields: &'static [FieldSpec],
    pub actions: &'static [ActionSpec],
}

const TEXT_OPS: &[&str] = &[
    "equals",
    "notEquals",
    "contains",
    "startsWith",
    "endsWith",
    "matches",
    "isEmpty",
    "isNull",
    "in",
];
const NUMBER_OPS: &[&str] = &[
    "equals",
    "notEquals",
    "greaterThan",
    "lessThan",
    "greaterThanOrEquals",
    "lessThanOrEquals",
    "between",
    "isNull",
];
const DATE_OPS: &[&str] = &[
    "before",
    "after",
    "within",
    "dayOfWeek",
    "dayOfMonth",
    "isNull",
];
const ID_OPS: &[&str] = &["equals", "notEquals", "in", "inGroup", "isNull"];

const NOTIFY: ActionSpec = ActionSpec {
    name: "sendNotification",
    label: "Send a notification",
    params: &[ParamSpec {
        name: "message",
        kind: ValueKind::Text,
        required: true,
    }],
};

/// Every entity type rules can target.
pub const ENTITIES: &[EntitySpec] = &[
    EntitySpec {
        entity_type: "transaction",
        events: &["created", "updated", "deleted"],
        fields: &[
            FieldSpec { path: "amount", label: "Amount", operators: NUMBER_OPS },
            FieldSpec { path: "date", label: "Date", operators: DATE_OPS },
            FieldSpec { path: "status", label: "Status", operators: TEXT_OPS },
            FieldSpec { path: "notes", label: "Notes", operators: TEXT_OPS },
            FieldSpec { path: "payee.name", label: "Payee name", operators: TEXT_OPS },
            FieldSpec { path: "category.id", label: "Category", operators: ID_OPS },
            FieldSpec { path: "category.name", label: "Category name", operators: TEXT_OPS },
            FieldSpec { path: "category.group.name", label: "Category group", operators: TEXT_OPS },
            FieldSpec { path: "account.name", label: "Account name", operators: TEXT_OPS },
        ],
        actions: &[
            ActionSpec {
                name: "setCategory",
                label: "Set category",
                params: &[ParamSpec { name: "categoryId", kind: ValueKind::Number, required: true }],
            },
            ActionSpec {
                name: "setPayee",
                label: "Set payee",
                params: &[ParamSpec { name: "payeeId", kind: ValueKind::Number, required: true }],
            },
            ActionSpec {
                name: "setStatus",
                label: "Set status",
                params: &[ParamSpec { name: "status", kind: ValueKind::Text, required: true }],
            },
            ActionSpec {
                name: "appendNote",
                label: "Append a note",
                params: &[ParamSpec { name: "text", kind: ValueKind::Text, required: true }],
            },
            NOTIFY,
        ],
    },
    EntitySpec {
        entity_type: "account",
        events: &["created", "updated"],
        fields: &[
            FieldSpec { path: "name", label: "Name", operators: TEXT_OPS },
            FieldSpec { path: "type", label: "Type", operators: TEXT_OPS },
            FieldSpec { path: "balance", label: "Balance", operators: NUMBER_OPS },
            FieldSpec { path: "institution", label: "Institution", operators: TEXT_OPS },
        ],
        actions: &[NOTIFY],
    },
    EntitySpec {
        entity_type: "payee",
        events: &["created", "updated", "deleted"],
        fields: &[
            FieldSpec { path: "name", label: "Name", operators: TEXT_OPS },
            FieldSpec { path: "defaultCategory.id", label: "Default category", operators: ID_OPS },
        ],
        actions: &[
            ActionSpec {
                name: "setDefaultCategory",
                label: "Set default category",
                params: &[ParamSpec { name: "categoryId", kind: ValueKind::Number, required: true }],
            },
            NOTIFY,
        ],
    },
    EntitySpec {
        entity_type: "category",
        events: &["created", "updated", "deleted"],
        fields: &[
            FieldSpec { path: "name", label: "Name", operators: TEXT_OPS },
            FieldSpec { path: "group.name", label: "Group name", operators: TEXT_OPS },
        ],
        actions: &[NOTIFY],
    },
    EntitySpec {
        entity_type: "schedule",
        events: &["created", "updated", "upcoming", "due"],
        fields: &[
            FieldSpec { path: "name", label: "Name", operators: TEXT_OPS },
            FieldSpec { path: "amount", label: "Amount", operators: NUMBER_OPS },
            FieldSpec { path: "nextOccurrence", label: "Next occurrence", operators: DATE_OPS },
            FieldSpec { path: "status", label: "Status", operators: TEXT_OPS },
        ],
        actions: &[
            ActionSpec {
                name: "createTransaction",
                label: "Create the scheduled transaction",
                params: &[ParamSpec { name: "accountId", kind: ValueKind::Number, required: false }],
            },
            NOTIFY,
        ],
    },
    EntitySpec {
        entity_type: "budget",
        events: &["created", "updated", "exceeded"],
        fields: &[
            FieldSpec { path: "name", label: "Name", operators: TEXT_OPS },
            FieldSpec { path: "amount", label: "Amount", operators: NUMBER_OPS },
            FieldSpec { path: "spent", label: "Spent", operators: NUMBER_OPS },
            FieldSpec { path: "category.name", label: "Category name", operators: TEXT_OPS },
        ],
        actions: &[NOTIFY],
    },
];

pub fn entity_spec(entity_type: &str) -> Option<&'static EntitySpec> {
    ENTITIES.iter().find(|spec| spec.entity_type == entity_type)
}

pub fn field_spec(entity_type: &str, path: &str) -> Option<&'static FieldSpec> {
    entity_spec(entity_type)?
        .fields
        .iter()
        .find(|field| field.path == path)
}

pub fn action_spec(entity_type: &str, name: &str) -> Option<&'static ActionSpec> {
    entity_spec(entity_type)?
        .actions
        .iter()
        .find(|action| action.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ConditionOperator;

    #[test]
    fn every_catalog_operator_is_evaluatable() {
        for spec in OPERATORS {
            assert!(
                ConditionOperator::parse(spec.name).is_supported(),
                "catalog operator '{}' does not parse",
                spec.name
            );
        }
    }

    #[test]
    fn field_operator_subsets_stay_within_the_catalog() {
        for entity in ENTITIES {
            for field in entity.fields {
                for op in field.operators {
                    assert!(
                        is_known_operator(op),
                        "field '{}.{}' references unknown operator '{}'",
                        entity.entity_type,
                        field.path,
                        op
                    );
                }
            }
        }
    }

    #[test]
    fn lookups_resolve() {
        assert!(entity_spec("transaction").is_some());
        assert!(field_spec("transaction", "payee.name").is_some());
        assert!(action_spec("transaction", "setCategory").is_some());
        assert!(action_spec("budget", "setCategory").is_none());
    }
}
