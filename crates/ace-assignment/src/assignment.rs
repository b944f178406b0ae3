//! The assignment aggregate root
//!
//! An assignment owns every task extracted from one reference/template
//! document pair. Construction validates the required fields immediately;
//! hydration of persisted task records is lenient, keeping unparseable
//! records verbatim so one malformed task never aborts loading.

use chrono::{DateTime, Utc};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AssignmentError;
use crate::task::Task;

/// Kind of document pair backing an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    /// Presentation documents: text, tables, images
    Slides,
    /// Spreadsheet documents: formula grids
    Sheets,
}

/// Construction parameters for [`Assignment::new`]
#[derive(Debug, Clone, Default)]
pub struct AssignmentParams {
    pub primary_title: String,
    pub primary_topic: String,
    pub year_group: Option<i32>,
    pub alternate_titles: Vec<String>,
    pub alternate_topics: Vec<String>,
    pub document_type: Option<DocumentType>,
    pub reference_document_id: String,
    pub template_document_id: String,
    pub reference_last_modified: Option<DateTime<Utc>>,
    pub template_last_modified: Option<DateTime<Utc>>,
    pub assignment_weighting: Option<f64>,
    /// Computed from title/topic/year when not supplied
    pub definition_key: Option<String>,
}

/// Canonical `title_topic_yearGroup` storage lookup key
///
/// Parts are trimmed, lower-cased, with internal whitespace runs collapsed
/// to `-`; a missing year group contributes `none`.
#[must_use]
pub fn build_definition_key(title: &str, topic: &str, year_group: Option<i32>) -> String {
    let year = year_group.map_or_else(|| "none".to_string(), |year| year.to_string());
    format!("{}_{}_{}", key_part(title), key_part(topic), year)
}

fn key_part(part: &str) -> String {
    part.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Aggregate of all tasks for one reference/template document pair
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    primary_title: String,
    primary_topic: String,
    year_group: Option<i32>,
    alternate_titles: Vec<String>,
    alternate_topics: Vec<String>,
    document_type: DocumentType,
    reference_document_id: String,
    template_document_id: String,
    reference_last_modified: Option<DateTime<Utc>>,
    template_last_modified: Option<DateTime<Utc>>,
    assignment_weighting: Option<f64>,
    definition_key: String,
    tasks: IndexMap<String, Task>,
    // Persisted task records that failed hydration, kept verbatim.
    unparsed_tasks: IndexMap<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Assignment {
    /// Construct and validate a new assignment
    ///
    /// # Errors
    /// Returns [`AssignmentError::MissingField`] when any required field is
    /// missing or blank.
    pub fn new(params: AssignmentParams) -> Result<Self, AssignmentError> {
        let primary_title = required(params.primary_title, "primaryTitle")?;
        let primary_topic = required(params.primary_topic, "primaryTopic")?;
        let document_type = params
            .document_type
            .ok_or(AssignmentError::MissingField("documentType"))?;
        let reference_document_id =
            required(params.reference_document_id, "referenceDocumentId")?;
        let template_document_id = required(params.template_document_id, "templateDocumentId")?;

        let definition_key = params
            .definition_key
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| {
                build_definition_key(&primary_title, &primary_topic, params.year_group)
            });

        let now = Utc::now();
        Ok(Self {
            primary_title,
            primary_topic,
            year_group: params.year_group,
            alternate_titles: params.alternate_titles,
            alternate_topics: params.alternate_topics,
            document_type,
            reference_document_id,
            template_document_id,
            reference_last_modified: params.reference_last_modified,
            template_last_modified: params.template_last_modified,
            assignment_weighting: params.assignment_weighting,
            definition_key,
            tasks: IndexMap::new(),
            unparsed_tasks: IndexMap::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Primary title
    #[inline]
    #[must_use]
    pub fn primary_title(&self) -> &str {
        &self.primary_title
    }

    /// Primary topic
    #[inline]
    #[must_use]
    pub fn primary_topic(&self) -> &str {
        &self.primary_topic
    }

    /// Year group, when known
    #[inline]
    #[must_use]
    pub fn year_group(&self) -> Option<i32> {
        self.year_group
    }

    /// Backing document kind
    #[inline]
    #[must_use]
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Answer-key document id
    #[inline]
    #[must_use]
    pub fn reference_document_id(&self) -> &str {
        &self.reference_document_id
    }

    /// Blank-document id
    #[inline]
    #[must_use]
    pub fn template_document_id(&self) -> &str {
        &self.template_document_id
    }

    /// Storage lookup key
    #[inline]
    #[must_use]
    pub fn definition_key(&self) -> &str {
        &self.definition_key
    }

    /// Creation timestamp
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation timestamp
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Tasks keyed by id; insertion order is storage order, display order is
    /// [`Task::index`]
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &IndexMap<String, Task> {
        &self.tasks
    }

    /// Mutable access to every task, for extraction passes
    pub fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks.values_mut()
    }

    /// Tasks in display order
    #[must_use]
    pub fn ordered_tasks(&self) -> Vec<&Task> {
        let mut ordered: Vec<&Task> = self.tasks.values().collect();
        ordered.sort_by_key(|task| task.index());
        ordered
    }

    /// Retained task records that failed hydration
    #[inline]
    #[must_use]
    pub fn unparsed_tasks(&self) -> &IndexMap<String, Value> {
        &self.unparsed_tasks
    }

    /// Find or create the task for a title/page pair
    ///
    /// A new task takes the next free index; an existing one keeps the
    /// index it was first seen with; indices are never renumbered.
    pub fn ensure_task(&mut self, title: &str, page_id: &str) -> &mut Task {
        let id = Task::derive_id(title, page_id);
        let next_index = self.next_index();
        match self.tasks.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.updated_at = Utc::now();
                entry.insert(Task::new(title, page_id, next_index))
            }
        }
    }

    /// Insert a pre-built task, keyed by its id
    pub fn add_task(&mut self, task: Task) {
        self.tasks.insert(task.id().to_string(), task);
        self.touch();
    }

    fn next_index(&self) -> u32 {
        self.tasks
            .values()
            .map(Task::index)
            .max()
            .map_or(0, |highest| highest + 1)
    }

    /// Record when the reference document was last modified
    pub fn set_reference_last_modified(&mut self, at: DateTime<Utc>) {
        self.reference_last_modified = Some(at);
        self.touch();
    }

    /// Record when the template document was last modified
    pub fn set_template_last_modified(&mut self, at: DateTime<Utc>) {
        self.template_last_modified = Some(at);
        self.touch();
    }

    /// Mark the assignment as mutated
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Full, lossless projection for internal persistence
    #[must_use]
    pub fn to_json(&self) -> Value {
        self.project(false)
    }

    /// Redacted projection: artifact content and hashes nulled everywhere
    ///
    /// Used whenever assignment definitions are shared or displayed without
    /// exposing answer content.
    #[must_use]
    pub fn to_partial_json(&self) -> Value {
        self.project(true)
    }

    fn project(&self, redact: bool) -> Value {
        let mut tasks = serde_json::Map::new();
        for (id, task) in &self.tasks {
            let projected = if redact { task.redacted() } else { task.clone() };
            tasks.insert(
                id.clone(),
                serde_json::to_value(projected).unwrap_or(Value::Null),
            );
        }
        for (id, raw) in &self.unparsed_tasks {
            let projected = if redact { redact_raw_task(raw) } else { raw.clone() };
            tasks.insert(id.clone(), projected);
        }

        serde_json::json!({
            "primaryTitle": self.primary_title,
            "primaryTopic": self.primary_topic,
            "yearGroup": self.year_group,
            "alternateTitles": self.alternate_titles,
            "alternateTopics": self.alternate_topics,
            "documentType": self.document_type,
            "referenceDocumentId": self.reference_document_id,
            "templateDocumentId": self.template_document_id,
            "referenceLastModified": self.reference_last_modified,
            "templateLastModified": self.template_last_modified,
            "assignmentWeighting": self.assignment_weighting,
            "definitionKey": self.definition_key,
            "tasks": tasks,
            "createdAt": self.created_at,
            "updatedAt": self.updated_at,
        })
    }

    /// Hydrate a persisted assignment
    ///
    /// Task records that don't parse into the expected shape are logged and
    /// retained verbatim rather than dropped or thrown.
    ///
    /// # Errors
    /// Returns [`AssignmentError`] for a malformed record, missing required
    /// fields, or a non-integer year group.
    pub fn from_json(value: Value) -> Result<Self, AssignmentError> {
        let record: AssignmentRecord = serde_json::from_value(value)?;

        let year_group = parse_year_group(record.year_group)?;
        let mut assignment = Self::new(AssignmentParams {
            primary_title: record.primary_title,
            primary_topic: record.primary_topic,
            year_group,
            alternate_titles: record.alternate_titles,
            alternate_topics: record.alternate_topics,
            document_type: record.document_type,
            reference_document_id: record.reference_document_id,
            template_document_id: record.template_document_id,
            reference_last_modified: record.reference_last_modified,
            template_last_modified: record.template_last_modified,
            assignment_weighting: record.assignment_weighting,
            definition_key: record.definition_key,
        })?;

        for (id, raw) in record.tasks {
            match serde_json::from_value::<Task>(raw.clone()) {
                Ok(mut task) => {
                    // The map key is authoritative for identity.
                    task.set_id(id.clone());
                    assignment.tasks.insert(id, task);
                }
                Err(error) => {
                    tracing::warn!(task_id = %id, %error, "keeping unparsed task record");
                    assignment.unparsed_tasks.insert(id, raw);
                }
            }
        }

        if let Some(created_at) = record.created_at {
            assignment.created_at = created_at;
        }
        assignment.updated_at = record.updated_at.unwrap_or(assignment.created_at);
        Ok(assignment)
    }
}

impl Serialize for Assignment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Assignment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(serde::de::Error::custom)
    }
}

/// Wire-shape mirror used by hydration; everything optional so field
/// validation stays in [`Assignment::new`] where it reports precise errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentRecord {
    #[serde(default)]
    primary_title: String,
    #[serde(default)]
    primary_topic: String,
    #[serde(default)]
    year_group: Option<Value>,
    #[serde(default)]
    alternate_titles: Vec<String>,
    #[serde(default)]
    alternate_topics: Vec<String>,
    #[serde(default)]
    document_type: Option<DocumentType>,
    #[serde(default)]
    reference_document_id: String,
    #[serde(default)]
    template_document_id: String,
    #[serde(default)]
    reference_last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    template_last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    assignment_weighting: Option<f64>,
    #[serde(default)]
    definition_key: Option<String>,
    #[serde(default)]
    tasks: IndexMap<String, Value>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

fn required(value: String, field: &'static str) -> Result<String, AssignmentError> {
    if value.trim().is_empty() {
        Err(AssignmentError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn parse_year_group(value: Option<Value>) -> Result<Option<i32>, AssignmentError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_i64()
            .and_then(|year| i32::try_from(year).ok())
            .map(Some)
            .ok_or_else(|| AssignmentError::InvalidYearGroup(number.to_string())),
        Some(other) => Err(AssignmentError::InvalidYearGroup(other.to_string())),
    }
}

/// Null out `content`/`contentHash` inside a retained raw task record
fn redact_raw_task(raw: &Value) -> Value {
    let mut value = raw.clone();
    if let Some(artifacts) = value.get_mut("artifacts").and_then(Value::as_object_mut) {
        for list in artifacts.values_mut() {
            let Some(items) = list.as_array_mut() else {
                continue;
            };
            for item in items {
                if let Some(artifact) = item.as_object_mut() {
                    artifact.insert("content".to_string(), Value::Null);
                    artifact.insert("contentHash".to_string(), Value::Null);
                }
            }
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params() -> AssignmentParams {
        AssignmentParams {
            primary_title: "Fractions Test".to_string(),
            primary_topic: "Fractions".to_string(),
            year_group: Some(7),
            document_type: Some(DocumentType::Sheets),
            reference_document_id: "doc-ref".to_string(),
            template_document_id: "doc-tmpl".to_string(),
            ..AssignmentParams::default()
        }
    }

    #[test]
    fn construction_requires_every_mandatory_field() {
        assert!(Assignment::new(params()).is_ok());

        let mut missing_title = params();
        missing_title.primary_title = "  ".to_string();
        assert!(matches!(
            Assignment::new(missing_title),
            Err(AssignmentError::MissingField("primaryTitle"))
        ));

        let mut missing_type = params();
        missing_type.document_type = None;
        assert!(matches!(
            Assignment::new(missing_type),
            Err(AssignmentError::MissingField("documentType"))
        ));

        let mut missing_doc = params();
        missing_doc.template_document_id = String::new();
        assert!(matches!(
            Assignment::new(missing_doc),
            Err(AssignmentError::MissingField("templateDocumentId"))
        ));
    }

    #[test]
    fn definition_key_is_computed_once_when_absent() {
        let assignment = Assignment::new(params()).unwrap();
        assert_eq!(assignment.definition_key(), "fractions-test_fractions_7");

        let mut supplied = params();
        supplied.definition_key = Some("custom_key_1".to_string());
        let assignment = Assignment::new(supplied).unwrap();
        assert_eq!(assignment.definition_key(), "custom_key_1");
    }

    #[test]
    fn definition_key_handles_missing_year_and_spacing() {
        assert_eq!(
            build_definition_key("  Algebra   Basics ", "Equations", None),
            "algebra-basics_equations_none"
        );
    }

    #[test]
    fn ensure_task_converges_and_indices_are_stable() {
        let mut assignment = Assignment::new(params()).unwrap();
        let first = assignment.ensure_task("Q1", "sheet1").id().to_string();
        assignment.ensure_task("Q2", "sheet1");
        let again = assignment.ensure_task("Q1", "sheet1");

        assert_eq!(again.id(), first);
        assert_eq!(again.index(), 0);
        assert_eq!(assignment.tasks().len(), 2);
        assert_eq!(assignment.ensure_task("Q3", "sheet2").index(), 2);
    }

    #[test]
    fn ordered_tasks_follow_the_index_not_map_order() {
        let mut assignment = Assignment::new(params()).unwrap();
        assignment.add_task(Task::new("Later", "p1", 4));
        assignment.add_task(Task::new("Earlier", "p1", 1));

        let ordered = assignment.ordered_tasks();
        assert_eq!(ordered[0].task_title(), "Earlier");
        assert_eq!(ordered[1].task_title(), "Later");
    }

    #[test]
    fn touch_moves_updated_at_forward() {
        let mut assignment = Assignment::new(params()).unwrap();
        let before = assignment.updated_at();
        assignment.touch();
        assert!(assignment.updated_at() >= before);
    }

    #[test]
    fn year_group_must_be_an_integer() {
        let mut record = Assignment::new(params()).unwrap().to_json();
        record["yearGroup"] = serde_json::json!(7.5);
        assert!(matches!(
            Assignment::from_json(record),
            Err(AssignmentError::InvalidYearGroup(_))
        ));

        let mut record = Assignment::new(params()).unwrap().to_json();
        record["yearGroup"] = serde_json::json!("seven");
        assert!(matches!(
            Assignment::from_json(record),
            Err(AssignmentError::InvalidYearGroup(_))
        ));
    }

    #[test]
    fn malformed_task_records_are_retained_not_dropped() {
        let mut record = Assignment::new(params()).unwrap().to_json();
        record["tasks"] = serde_json::json!({
            "bad-task": {"taskTitle": 17, "unexpected": true},
        });

        let assignment = Assignment::from_json(record).unwrap();
        assert!(assignment.tasks().is_empty());
        assert_eq!(assignment.unparsed_tasks().len(), 1);

        let out = assignment.to_json();
        assert_eq!(out["tasks"]["bad-task"]["taskTitle"], 17);
    }

    #[test]
    fn hydration_trusts_the_task_map_key() {
        let mut assignment = Assignment::new(params()).unwrap();
        assignment.add_task(Task::new("Q1", "p1", 0));
        let mut record = assignment.to_json();

        // Simulate a record stored under a foreign key.
        let task_value = record["tasks"].as_object().unwrap().values().next().unwrap().clone();
        record["tasks"] = serde_json::json!({ "legacy-id": task_value });

        let hydrated = Assignment::from_json(record).unwrap();
        assert_eq!(hydrated.tasks().get_index(0).unwrap().1.id(), "legacy-id");
    }
}
