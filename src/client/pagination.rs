use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};

use crate::error::{NotifyError, NotifyResult};
use crate::models::PageInfo;

/// How a connection is paged by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// `first` / `after`, continued with the server supplied `endCursor`.
    #[default]
    Cursor,
    /// `offset` / `limit`, continued by counting received nodes.
    Offset,
}

impl Pagination {
    /// Variable declarations and field arguments for a paged connection.
    /// `prefix` keeps the variables of nested connections apart, e.g.
    /// `members` yields `$membersFirst` and `$membersAfter`.
    pub fn arguments(&self, prefix: &str) -> (Vec<(String, String)>, Vec<(String, String)>) {
        let (size_arg, size_type, position_arg, position_type) = match self {
            Pagination::Cursor => ("first", "Int!", "after", "String"),
            Pagination::Offset => ("limit", "Int!", "offset", "Int!"),
        };
        let size_var = variable_name(prefix, size_arg);
        let position_var = variable_name(prefix, position_arg);

        let declarations = vec![
            (format!("${}", size_var), size_type.to_string()),
            (format!("${}", position_var), position_type.to_string()),
        ];
        let arguments = vec![
            (size_arg.to_string(), format!("${}", size_var)),
            (position_arg.to_string(), format!("${}", position_var)),
        ];
        (declarations, arguments)
    }
}

impl FromStr for Pagination {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cursor" => Ok(Pagination::Cursor),
            "offset" => Ok(Pagination::Offset),
            other => Err(NotifyError::Config(format!(
                "unsupported pagination mode {:?}, expected \"cursor\" or \"offset\"",
                other
            ))),
        }
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pagination::Cursor => write!(f, "cursor"),
            Pagination::Offset => write!(f, "offset"),
        }
    }
}

/// Where the next page of a connection starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Cursor(Option<String>),
    Offset(usize),
}

impl PageState {
    pub fn first(mode: Pagination) -> Self {
        match mode {
            Pagination::Cursor => PageState::Cursor(None),
            Pagination::Offset => PageState::Offset(0),
        }
    }

    /// Inserts this position into `variables` using the names from
    /// [`Pagination::arguments`].
    pub fn write_variables(&self, prefix: &str, page_size: usize, variables: &mut Map<String, Value>) {
        match self {
            PageState::Cursor(after) => {
                variables.insert(variable_name(prefix, "first"), json!(page_size));
                variables.insert(variable_name(prefix, "after"), json!(after));
            }
            PageState::Offset(offset) => {
                variables.insert(variable_name(prefix, "limit"), json!(page_size));
                variables.insert(variable_name(prefix, "offset"), json!(offset));
            }
        }
    }

    /// Computes the position of the following page, or `None` once the server
    /// reports no further pages. `received` is the number of nodes on the page
    /// that was just read.
    pub fn advance(&self, page_info: &PageInfo, received: usize) -> NotifyResult<Option<PageState>> {
        if !page_info.has_next_page {
            return Ok(None);
        }

        match self {
            PageState::Cursor(current) => {
                let next = page_info
                    .end_cursor
                    .as_deref()
                    .filter(|cursor| !cursor.is_empty())
                    .ok_or_else(|| {
                        NotifyError::Pagination(
                            "server reported another page but returned no end cursor".to_string(),
                        )
                    })?;
                if current.as_deref() == Some(next) {
                    return Err(NotifyError::Pagination(format!(
                        "server returned the same cursor {:?} twice",
                        next
                    )));
                }
                Ok(Some(PageState::Cursor(Some(next.to_string()))))
            }
            PageState::Offset(offset) => {
                if received == 0 {
                    return Err(NotifyError::Pagination(format!(
                        "server reported another page but the page at offset {} was empty",
                        offset
                    )));
                }
                Ok(Some(PageState::Offset(offset + received)))
            }
        }
    }
}

fn variable_name(prefix: &str, argument: &str) -> String {
    if prefix.is_empty() {
        return argument.to_string();
    }
    let mut chars = argument.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", prefix, first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}
