//! Resume data model. The single value the editor mutates and every theme renders.
//!
//! All edit helpers take `&self` and return a fresh `ResumeData`. Callers swap the
//! whole value in (see `session::SessionStore::update`), never mutate it in place.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkItem {
    pub id: String,
    /// Free text. Only used to pick an icon by substring match.
    pub platform: String,
    /// Free text, never validated.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub company: String,
    /// Free text ("2021 - Present"), never parsed as dates.
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: String,
}

/// Everything the form captures.
///
/// `skills` stays a comma-separated string; use [`skill_tokens`] to split it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    /// `data:` URI of the uploaded photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<LinkItem>,
    pub about: String,
    pub skills: String,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ResumeData {
    /// The built-in example every session starts from.
    pub fn example() -> Self {
        Self {
            profile_image: None,
            full_name: "Somsri Jai-dee".to_string(),
            title: "Senior Frontend Developer".to_string(),
            email: "somsri.dev@example.com".to_string(),
            phone: "+66 81 234 5678".to_string(),
            location: "Bangkok, Thailand".to_string(),
            links: vec![
                LinkItem {
                    id: "1".to_string(),
                    platform: "LinkedIn".to_string(),
                    url: "linkedin.com/in/somsri".to_string(),
                },
                LinkItem {
                    id: "2".to_string(),
                    platform: "GitHub".to_string(),
                    url: "github.com/somsri-dev".to_string(),
                },
            ],
            about: "Passionate developer with 5 years of experience in building scalable web \
                    applications. I love creating beautiful and functional user interfaces."
                .to_string(),
            skills: "React, TypeScript, Tailwind CSS, Node.js, UX/UI Design".to_string(),
            experiences: vec![Experience {
                id: "1".to_string(),
                role: "Senior Frontend Engineer".to_string(),
                company: "Tech Giant Co., Ltd.".to_string(),
                duration: "2021 - Present".to_string(),
                description: "Leading the frontend team to rebuild the core product using React \
                              and Next.js. Improved performance by 40%."
                    .to_string(),
            }],
            education: vec![Education {
                id: "1".to_string(),
                degree: "B.Sc. Computer Science".to_string(),
                institution: "Chulalongkorn University".to_string(),
                year: "2017".to_string(),
            }],
            projects: vec![Project {
                id: "1".to_string(),
                name: "E-Commerce Platform".to_string(),
                description: "A full-featured online store with payment gateway integration."
                    .to_string(),
                technologies: "Next.js, Stripe, PostgreSQL".to_string(),
            }],
        }
    }

    /// Skill tokens in stored order. See [`skill_tokens`].
    pub fn skill_list(&self) -> Vec<String> {
        skill_tokens(&self.skills)
    }

    /// Returns a copy with a single scalar field replaced.
    pub fn with_field(&self, field: ScalarField, value: String) -> Self {
        let mut next = self.clone();
        match field {
            ScalarField::FullName => next.full_name = value,
            ScalarField::Title => next.title = value,
            ScalarField::Email => next.email = value,
            ScalarField::Phone => next.phone = value,
            ScalarField::Location => next.location = value,
            ScalarField::About => next.about = value,
            ScalarField::Skills => next.skills = value,
        }
        next
    }

    pub fn with_profile_image(&self, data_uri: Option<String>) -> Self {
        let mut next = self.clone();
        next.profile_image = data_uri;
        next
    }

    /// Checks the identifier-uniqueness invariant on every list.
    pub fn validate_ids(&self) -> Result<(), EditError> {
        check_unique(ListKind::Links, &self.links)?;
        check_unique(ListKind::Experiences, &self.experiences)?;
        check_unique(ListKind::Education, &self.education)?;
        check_unique(ListKind::Projects, &self.projects)?;
        Ok(())
    }
}

/// Splits the comma-separated skills string into trimmed tokens.
///
/// Order is preserved and duplicates are kept. Empty tokens (trailing commas,
/// `"a,,b"`) are dropped so no blank chip is ever rendered.
pub fn skill_tokens(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The scalar text fields the editor can replace one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    About,
    Skills,
}

// ────────────────────────────────────────────────────────────────────────────
// List operations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("no {list} entry with id '{id}'")]
    UnknownId { list: ListKind, id: String },

    #[error("{list} already contains an entry with id '{id}'")]
    DuplicateId { list: ListKind, id: String },

    #[error("payload does not match the {list} entry shape: {reason}")]
    Shape { list: ListKind, reason: String },
}

/// The four identified lists inside `ResumeData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Links,
    Experiences,
    Education,
    Projects,
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ListKind::Links => "links",
            ListKind::Experiences => "experiences",
            ListKind::Education => "education",
            ListKind::Projects => "projects",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "links" => Ok(ListKind::Links),
            "experiences" => Ok(ListKind::Experiences),
            "education" => Ok(ListKind::Education),
            "projects" => Ok(ListKind::Projects),
            other => Err(format!("unknown list '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Anything stored in an identified list.
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        })*
    };
}

identified!(LinkItem, Experience, Education, Project);

fn check_unique<T: Identified>(list: ListKind, items: &[T]) -> Result<(), EditError> {
    let mut seen = std::collections::HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(EditError::DuplicateId {
                list,
                id: item.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Appends `item`. An empty id is replaced with a fresh uuid.
pub fn add_item<T: Identified + Clone>(
    list: ListKind,
    items: &[T],
    mut item: T,
) -> Result<Vec<T>, EditError> {
    if item.id().is_empty() {
        item.set_id(Uuid::new_v4().to_string());
    }
    if items.iter().any(|existing| existing.id() == item.id()) {
        return Err(EditError::DuplicateId {
            list,
            id: item.id().to_string(),
        });
    }
    let mut next = items.to_vec();
    next.push(item);
    Ok(next)
}

/// Replaces the entry with `id` in place, keeping its position and id.
pub fn update_item<T: Identified + Clone>(
    list: ListKind,
    items: &[T],
    id: &str,
    mut item: T,
) -> Result<Vec<T>, EditError> {
    let pos = position(list, items, id)?;
    item.set_id(id.to_string());
    let mut next = items.to_vec();
    next[pos] = item;
    Ok(next)
}

pub fn remove_item<T: Identified + Clone>(
    list: ListKind,
    items: &[T],
    id: &str,
) -> Result<Vec<T>, EditError> {
    position(list, items, id)?;
    Ok(items.iter().filter(|i| i.id() != id).cloned().collect())
}

/// Swaps the entry with its neighbour. Moving past either end is a no-op.
pub fn move_item<T: Identified + Clone>(
    list: ListKind,
    items: &[T],
    id: &str,
    direction: MoveDirection,
) -> Result<Vec<T>, EditError> {
    let pos = position(list, items, id)?;
    let mut next = items.to_vec();
    match direction {
        MoveDirection::Up if pos > 0 => next.swap(pos, pos - 1),
        MoveDirection::Down if pos + 1 < next.len() => next.swap(pos, pos + 1),
        _ => {}
    }
    Ok(next)
}

fn position<T: Identified>(list: ListKind, items: &[T], id: &str) -> Result<usize, EditError> {
    items
        .iter()
        .position(|i| i.id() == id)
        .ok_or_else(|| EditError::UnknownId {
            list,
            id: id.to_string(),
        })
}

/// Untyped list edit, as it arrives from the HTTP layer.
///
/// The JSON payload is decoded into the entry type that belongs to `list`.
#[derive(Debug, Clone)]
pub enum ListEdit {
    Add(serde_json::Value),
    Update(String, serde_json::Value),
    Remove(String),
    Move(String, MoveDirection),
}

impl ResumeData {
    /// Applies one list edit and returns the new value.
    pub fn apply_list_edit(&self, list: ListKind, edit: ListEdit) -> Result<Self, EditError> {
        let mut next = self.clone();
        match list {
            ListKind::Links => next.links = edit_list(list, &self.links, edit)?,
            ListKind::Experiences => next.experiences = edit_list(list, &self.experiences, edit)?,
            ListKind::Education => next.education = edit_list(list, &self.education, edit)?,
            ListKind::Projects => next.projects = edit_list(list, &self.projects, edit)?,
        }
        Ok(next)
    }
}

fn edit_list<T>(list: ListKind, items: &[T], edit: ListEdit) -> Result<Vec<T>, EditError>
where
    T: Identified + Clone + serde::de::DeserializeOwned,
{
    let decode = |value: serde_json::Value| -> Result<T, EditError> {
        let mut value = value;
        // New entries may omit the id; the add path fills one in.
        if let Some(obj) = value.as_object_mut() {
            obj.entry("id").or_insert_with(|| serde_json::Value::String(String::new()));
        }
        serde_json::from_value(value).map_err(|e| EditError::Shape {
            list,
            reason: e.to_string(),
        })
    };

    match edit {
        ListEdit::Add(value) => add_item(list, items, decode(value)?),
        ListEdit::Update(id, value) => update_item(list, items, &id, decode(value)?),
        ListEdit::Remove(id) => remove_item(list, items, &id),
        ListEdit::Move(id, direction) => move_item(list, items, &id, direction),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skill_tokens_trims_and_preserves_order() {
        assert_eq!(
            skill_tokens("React, Node.js, TypeScript"),
            vec!["React", "Node.js", "TypeScript"]
        );
    }

    #[test]
    fn test_skill_tokens_keeps_duplicates_drops_blanks() {
        assert_eq!(skill_tokens(" Go ,, Go, "), vec!["Go", "Go"]);
        assert!(skill_tokens("").is_empty());
    }

    #[test]
    fn test_example_has_unique_ids() {
        assert!(ResumeData::example().validate_ids().is_ok());
    }

    #[test]
    fn test_camel_case_round_trip_of_field_names() {
        let value = serde_json::to_value(ResumeData::example()).unwrap();
        assert!(value.get("fullName").is_some());
        assert!(value.get("experiences").is_some());
        assert!(value.get("profileImage").is_none(), "absent photo is omitted");
    }

    #[test]
    fn test_add_assigns_fresh_id_when_empty() {
        let data = ResumeData::example();
        let next = data
            .apply_list_edit(
                ListKind::Projects,
                ListEdit::Add(json!({"name": "CLI", "description": "d", "technologies": "Rust"})),
            )
            .unwrap();
        assert_eq!(next.projects.len(), 2);
        assert!(!next.projects[1].id.is_empty());
        assert_ne!(next.projects[1].id, next.projects[0].id);
        // the original value is untouched
        assert_eq!(data.projects.len(), 1);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let data = ResumeData::example();
        let err = data
            .apply_list_edit(
                ListKind::Links,
                ListEdit::Add(json!({"id": "1", "platform": "X", "url": "x.com/me"})),
            )
            .unwrap_err();
        assert!(matches!(err, EditError::DuplicateId { .. }));
    }

    #[test]
    fn test_update_keeps_position_and_id() {
        let data = ResumeData::example();
        let next = data
            .apply_list_edit(
                ListKind::Links,
                ListEdit::Update(
                    "1".to_string(),
                    json!({"id": "zzz", "platform": "Website", "url": "somsri.dev"}),
                ),
            )
            .unwrap();
        assert_eq!(next.links[0].id, "1");
        assert_eq!(next.links[0].platform, "Website");
        assert_eq!(next.links[1].id, "2");
    }

    #[test]
    fn test_remove_unknown_id_is_error() {
        let data = ResumeData::example();
        let err = data
            .apply_list_edit(ListKind::Education, ListEdit::Remove("nope".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::UnknownId {
                list: ListKind::Education,
                id: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_move_swaps_neighbours_and_clamps_at_ends() {
        let data = ResumeData::example();
        let down = data
            .apply_list_edit(
                ListKind::Links,
                ListEdit::Move("1".to_string(), MoveDirection::Down),
            )
            .unwrap();
        assert_eq!(down.links[0].id, "2");
        assert_eq!(down.links[1].id, "1");

        let noop = down
            .apply_list_edit(
                ListKind::Links,
                ListEdit::Move("1".to_string(), MoveDirection::Down),
            )
            .unwrap();
        assert_eq!(noop.links, down.links);
    }

    #[test]
    fn test_shape_error_on_wrong_payload() {
        let data = ResumeData::example();
        let err = data
            .apply_list_edit(ListKind::Education, ListEdit::Add(json!({"degree": 3})))
            .unwrap_err();
        assert!(matches!(err, EditError::Shape { .. }));
    }

    #[test]
    fn test_with_field_replaces_only_that_field() {
        let data = ResumeData::example();
        let next = data.with_field(ScalarField::Title, "Staff Engineer".to_string());
        assert_eq!(next.title, "Staff Engineer");
        assert_eq!(next.full_name, data.full_name);
    }
}
