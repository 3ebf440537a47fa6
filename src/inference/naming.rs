//! Entity and relation naming.
//!
//! Provides pluralization and singularization for table names, plus the
//! child_/parent_ convention used to keep self-referencing relations apart.
//! Uses the `inflector` crate with additional handling for common irregular
//! plurals that appear in database schemas.

use inflector::Inflector;

use crate::model::RelationShape;

/// Prefix for the owning side of a self-reference.
pub const CHILD_PREFIX: &str = "child_";
/// Prefix for the inverse side of a self-reference.
pub const PARENT_PREFIX: &str = "parent_";

/// Known irregular plurals that inflector doesn't handle well for database contexts.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("self", "selves"),
    ("calf", "calves"),
    ("loaf", "loaves"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("hero", "heroes"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("crisis", "crises"),
    ("diagnosis", "diagnoses"),
    ("hypothesis", "hypotheses"),
    ("thesis", "theses"),
    ("phenomenon", "phenomena"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("appendix", "appendices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

/// Split `word` into everything up to the last `_` and the final segment.
fn split_last_segment(word: &str) -> (&str, &str) {
    match word.rfind('_') {
        Some(pos) => word.split_at(pos + 1),
        None => ("", word),
    }
}

/// Pluralize a word, handling irregulars first then falling back to inflector.
///
/// Only the last `_`-separated segment is inflected, so `user_person`
/// becomes `user_people`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let (head, last) = split_last_segment(word);
    let lower = last.to_lowercase();

    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *singular || lower == *plural {
            return format!("{head}{plural}");
        }
    }

    word.to_plural()
}

/// Singularize a word, handling irregulars first then falling back to inflector.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let (head, last) = split_last_segment(word);
    let lower = last.to_lowercase();

    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *plural || lower == *singular {
            return format!("{head}{singular}");
        }
    }

    word.to_singular()
}

/// Snake_case form of a table name.
///
/// Only mixed-case names are re-segmented, so digits stay attached:
/// `oauth2_client` is kept as is, `UserGroups` becomes `user_groups`.
fn snake_name(table: &str) -> String {
    if table.chars().any(char::is_uppercase) {
        table.to_snake_case()
    } else {
        table.to_string()
    }
}

/// Singular snake_case name for a table, e.g. `user_groups` -> `user_group`.
pub fn singular_name(table: &str) -> String {
    singularize(&snake_name(table))
}

/// Plural snake_case name for a table, e.g. `user` -> `users`.
pub fn plural_name(table: &str) -> String {
    pluralize(&singular_name(table))
}

/// Entity name for a table: singular and PascalCase, e.g. `user_groups` -> `UserGroup`.
pub fn entity_name(table: &str) -> String {
    singular_name(table).to_pascal_case()
}

/// Names for both edges of one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationNames {
    /// Name of the `To` edge.
    pub to: String,
    /// Name of the `From` edge.
    pub from: String,
}

impl RelationNames {
    /// Append `_<suffix>` to both names.
    pub fn qualified(&self, suffix: &str) -> Self {
        Self {
            to: format!("{}_{}", self.to, suffix),
            from: format!("{}_{}", self.from, suffix),
        }
    }
}

/// Name the two edges of a relation.
///
/// `to_side` is the table whose entity holds the `To` edge; `from_side` holds
/// the `From` edge. Each edge is named after the entity on its far end.
/// Self-references go through [`self_reference_names`].
pub fn relation_names(shape: RelationShape, to_side: &str, from_side: &str) -> RelationNames {
    if to_side == from_side {
        return self_reference_names(shape, to_side);
    }
    RelationNames {
        to: far_end_name(from_side, shape.to_side_unique()),
        from: far_end_name(to_side, shape.from_side_unique()),
    }
}

/// Names for a relation from a table to itself.
///
/// The `To` edge is prefixed with `child_` and the `From` edge with
/// `parent_`. Each side is singular when it holds at most one target:
///
/// | shape | to             | from           |
/// |-------|----------------|----------------|
/// | O2O   | `child_node`   | `parent_node`  |
/// | O2M   | `child_nodes`  | `parent_node`  |
/// | M2M   | `child_users`  | `parent_users` |
pub fn self_reference_names(shape: RelationShape, table: &str) -> RelationNames {
    RelationNames {
        to: format!(
            "{CHILD_PREFIX}{}",
            far_end_name(table, shape.to_side_unique())
        ),
        from: format!(
            "{PARENT_PREFIX}{}",
            far_end_name(table, shape.from_side_unique())
        ),
    }
}

fn far_end_name(table: &str, unique: bool) -> String {
    if unique {
        singular_name(table)
    } else {
        plural_name(table)
    }
}
