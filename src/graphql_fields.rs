use std::fmt;

/// GraphQL field selection builder. Fields keep insertion order so the
/// generated documents are stable.
#[derive(Debug, Clone, Default)]
pub struct FieldSelection {
    fields: Vec<String>,
}

impl FieldSelection {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a simple field
    pub fn field(mut self, name: &str) -> Self {
        self.push(name.to_string());
        self
    }

    /// Add multiple simple fields
    pub fn fields(mut self, names: &[&str]) -> Self {
        for name in names {
            self.push(name.to_string());
        }
        self
    }

    /// Add a nested field with its own selection
    pub fn nested(mut self, name: &str, selection: FieldSelection) -> Self {
        self.push(format!("{} {{ {} }}", name, selection));
        self
    }

    /// Add a nested field with arguments
    pub fn nested_with_args(
        mut self,
        name: &str,
        args: &[(String, String)],
        selection: FieldSelection,
    ) -> Self {
        if args.is_empty() {
            return self.nested(name, selection);
        }
        self.push(format!("{}({}) {{ {} }}", name, join_args(args), selection));
        self
    }

    /// Merge another field selection into this one
    pub fn merge(mut self, other: FieldSelection) -> Self {
        for field in other.fields {
            self.push(field);
        }
        self
    }

    fn push(&mut self, field: String) {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
    }
}

impl fmt::Display for FieldSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join(" "))
    }
}

pub(crate) fn join_args(args: &[(String, String)]) -> String {
    args.iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Predefined field selections for the team directory
pub mod selections {
    use super::FieldSelection;

    pub fn page_info_fields() -> FieldSelection {
        FieldSelection::new().fields(&["totalCount", "hasNextPage", "endCursor"])
    }

    pub fn user_fields() -> FieldSelection {
        FieldSelection::new().fields(&["name", "email"])
    }

    pub fn member_fields() -> FieldSelection {
        FieldSelection::new()
            .nested("user", user_fields())
            .field("role")
    }

    /// `members(...) { pageInfo { .. } nodes { .. } }` with the given arguments.
    pub fn members_connection(args: &[(String, String)]) -> FieldSelection {
        FieldSelection::new().nested_with_args(
            "members",
            args,
            FieldSelection::new()
                .nested("pageInfo", page_info_fields())
                .nested("nodes", member_fields()),
        )
    }

    pub fn team_fields(member_args: &[(String, String)]) -> FieldSelection {
        FieldSelection::new()
            .fields(&["slug", "slackChannel"])
            .merge(members_connection(member_args))
    }
}
