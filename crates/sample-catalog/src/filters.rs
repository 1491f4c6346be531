//! Search filters advertised to the platform and the selections made with
//! them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A selectable option of a multi-select filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub name: &'static str,
    /// Value sent to the catalog API when the option is selected.
    pub value: &'static str,
}

/// A search filter as rendered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterDefinition {
    MultiSelect {
        name: &'static str,
        display_name: &'static str,
        options: &'static [FilterOption],
    },
    Toggle {
        name: &'static str,
        display_name: &'static str,
    },
}

impl FilterDefinition {
    /// Key under which selections for this filter arrive.
    pub fn name(&self) -> &'static str {
        match self {
            FilterDefinition::MultiSelect { name, .. } => *name,
            FilterDefinition::Toggle { name, .. } => *name,
        }
    }
}

pub const LANGUAGES_FILTER: FilterDefinition = FilterDefinition::MultiSelect {
    name: "languages",
    display_name: "Languages",
    options: &[
        FilterOption {
            name: "Python",
            value: "python",
        },
        FilterOption {
            name: "Java",
            value: "java",
        },
        FilterOption {
            name: "JavaScript",
            value: "javascript",
        },
        FilterOption {
            name: "TypeScript",
            value: "typescript",
        },
    ],
};

pub const TEMPLATES_FILTER: FilterDefinition = FilterDefinition::Toggle {
    name: "template",
    display_name: "Templates",
};

pub const SAMPLES_FILTER: FilterDefinition = FilterDefinition::Toggle {
    name: "sample",
    display_name: "Samples",
};

static FILTERS: [FilterDefinition; 3] = [LANGUAGES_FILTER, TEMPLATES_FILTER, SAMPLES_FILTER];

/// All filters offered by the app, in display order.
pub fn filters() -> &'static [FilterDefinition] {
    &FILTERS
}

/// The value selected for a single filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    Toggle(bool),
    Options(Vec<String>),
    /// Anything else the platform sends; treated as no selection.
    Other(Value),
}

/// Filter selections keyed by filter name, as received with a search
/// request.
///
/// Keys that don't name one of [filters()] are carried along but never read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(BTreeMap<String, SelectionValue>);

impl FilterSelection {
    /// Options selected for a multi-select filter, if any were sent.
    pub fn options(&self, filter: &FilterDefinition) -> Option<&[String]> {
        match self.0.get(filter.name()) {
            Some(SelectionValue::Options(options)) => Some(options),
            _ => None,
        }
    }

    /// Whether a toggle filter is switched on. Absent toggles are off.
    pub fn is_toggled(&self, filter: &FilterDefinition) -> bool {
        matches!(self.0.get(filter.name()), Some(SelectionValue::Toggle(true)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SelectionValue)> for FilterSelection {
    fn from_iter<T: IntoIterator<Item = (K, SelectionValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
