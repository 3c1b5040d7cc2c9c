use serde::{Deserialize, Serialize};

/// A selection category on the profile forms.
///
/// Each field owns a fixed set of DOM handles and a selection limit.
/// `Profession` is single-select; the others are soft-capped multi-selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Profession,
    Skills,
    Services,
}

/// Element ids the widget reads from and writes to for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHandles {
    pub search_container_id: &'static str,
    pub input_id: &'static str,
    pub suggestions_id: &'static str,
    pub chips_id: &'static str,
    pub hidden_id: &'static str,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Profession, Field::Skills, Field::Services];

    /// Maximum number of items a selection may hold.
    pub fn limit(self) -> usize {
        match self {
            Field::Profession => 1,
            Field::Skills => 4,
            Field::Services => 6,
        }
    }

    pub fn is_single_select(self) -> bool {
        self.limit() == 1
    }

    /// The `type` value used on the suggestion endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Profession => "profession",
            Field::Skills => "skills",
            Field::Services => "services",
        }
    }

    pub fn from_type(value: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == value)
    }

    pub fn handles(self) -> FieldHandles {
        match self {
            Field::Profession => FieldHandles {
                search_container_id: "profession-search",
                input_id: "profession-input",
                suggestions_id: "profession-suggestions",
                chips_id: "profession-chip",
                hidden_id: "selected-pro-id",
            },
            Field::Skills => FieldHandles {
                search_container_id: "skills-search",
                input_id: "skills-input",
                suggestions_id: "skills-suggestions",
                chips_id: "skills-chips",
                hidden_id: "selected-skills-data",
            },
            Field::Services => FieldHandles {
                search_container_id: "services-search",
                input_id: "services-input",
                suggestions_id: "services-suggestions",
                chips_id: "services-chips",
                hidden_id: "selected-service-ids",
            },
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
