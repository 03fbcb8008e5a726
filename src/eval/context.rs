use ahash::{AHashMap, AHashSet};
use serde_json::Value;

/// Auxiliary lookup data supplied at evaluation time, currently the
/// category-group membership table consumed by the `inGroup` operator.
///
/// The table is read-only for the duration of a call; callers own its
/// construction and freshness. Ids are compared by canonical string form,
/// so integer and string ids from different serialization paths agree.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    group_members: AHashMap<String, AHashSet<String>>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group with its member ids, replacing any prior entry.
    pub fn with_group<G, M, I>(mut self, group_id: G, members: I) -> Self
    where
        G: ToString,
        M: ToString,
        I: IntoIterator<Item = M>,
    {
        self.add_group(group_id, members);
        self
    }

    pub fn add_group<G, M, I>(&mut self, group_id: G, members: I)
    where
        G: ToString,
        M: ToString,
        I: IntoIterator<Item = M>,
    {
        self.group_members.insert(
            group_id.to_string(),
            members.into_iter().map(|m| m.to_string()).collect(),
        );
    }

    /// `true` iff `member` belongs to the group identified by `group_id`.
    /// A group id absent from the table is simply not a match.
    pub(crate) fn is_member(&self, group_id: &Value, member: &Value) -> bool {
        let (Some(group_key), Some(member_key)) = (id_key(group_id), id_key(member)) else {
            return false;
        };
        self.group_members
            .get(&group_key)
            .is_some_and(|members| members.contains(&member_key))
    }
}

/// Canonical string form of an id value. Only strings and numbers qualify.
fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
