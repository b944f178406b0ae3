//! Tasks: one gradable unit each
//!
//! A task owns three ordered artifact lists keyed by role. Its identity is
//! derived deterministically from title and page so that repeated
//! extraction passes converge on the same task instead of duplicating it;
//! its index is assigned once, at first sight, and never renumbered.

use ace_artifact::{Artifact, ArtifactParams, ContentHash};
use ace_formula::BoundingBox;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role an artifact plays within its task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Answer-key content
    Reference,
    /// Blank-document content
    Template,
    /// Student content
    Submission,
}

/// The three role-keyed artifact lists of a task
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtifactLists {
    #[serde(default)]
    pub reference: Vec<Artifact>,
    #[serde(default)]
    pub template: Vec<Artifact>,
    #[serde(default)]
    pub submission: Vec<Artifact>,
}

impl ArtifactLists {
    fn list(&self, role: Role) -> &Vec<Artifact> {
        match role {
            Role::Reference => &self.reference,
            Role::Template => &self.template,
            Role::Submission => &self.submission,
        }
    }

    fn list_mut(&mut self, role: Role) -> &mut Vec<Artifact> {
        match role {
            Role::Reference => &mut self.reference,
            Role::Template => &mut self.template,
            Role::Submission => &mut self.submission,
        }
    }
}

/// Metadata key the diff pass stores the bounding box under
pub const BOUNDING_BOX_KEY: &str = "boundingBox";
/// Metadata key the diff pass stores the location index under
pub const REFERENCE_LOCATIONS_KEY: &str = "referenceLocations";

/// One gradable unit within an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: String,
    task_title: String,
    page_id: String,
    #[serde(default)]
    task_notes: Option<String>,
    index: u32,
    #[serde(default)]
    task_metadata: IndexMap<String, Value>,
    #[serde(default)]
    artifacts: ArtifactLists,
}

impl Task {
    /// Create a task at its assigned position
    #[must_use]
    pub fn new(title: impl Into<String>, page_id: impl Into<String>, index: u32) -> Self {
        let task_title = title.into();
        let page_id = page_id.into();
        Self {
            id: Self::derive_id(&task_title, &page_id),
            task_title,
            page_id,
            task_notes: None,
            index,
            task_metadata: IndexMap::new(),
            artifacts: ArtifactLists::default(),
        }
    }

    /// Deterministic identity from title and page
    ///
    /// The same title on the same page always produces the same id, which
    /// is what lets a re-run converge on existing tasks.
    #[must_use]
    pub fn derive_id(title: &str, page_id: &str) -> String {
        ContentHash::compute(format!("{title}\u{1f}{page_id}").as_bytes()).short()
    }

    /// Task identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    /// Task title
    #[inline]
    #[must_use]
    pub fn task_title(&self) -> &str {
        &self.task_title
    }

    /// Originating page/sheet-tab identifier
    #[inline]
    #[must_use]
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Freeform annotation, attached by a separate extraction pass
    #[inline]
    #[must_use]
    pub fn task_notes(&self) -> Option<&str> {
        self.task_notes.as_deref()
    }

    /// Attach or replace the task notes
    pub fn set_task_notes(&mut self, notes: impl Into<String>) {
        self.task_notes = Some(notes.into());
    }

    /// Presentation/iteration position, assigned once
    #[inline]
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Diff-engine output and source-specific extras
    #[inline]
    #[must_use]
    pub fn task_metadata(&self) -> &IndexMap<String, Value> {
        &self.task_metadata
    }

    /// Insert or replace a metadata entry
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.task_metadata.insert(key.into(), value);
    }

    /// The bounding box recorded by the diff pass, if any
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let value = self.task_metadata.get(BOUNDING_BOX_KEY)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Artifacts for a role, in append order
    #[inline]
    #[must_use]
    pub fn artifacts(&self, role: Role) -> &[Artifact] {
        self.artifacts.list(role)
    }

    /// First reference artifact: the shape oracle for submission extraction
    #[inline]
    #[must_use]
    pub fn primary_reference(&self) -> Option<&Artifact> {
        self.artifacts.reference.first()
    }

    /// First template artifact
    #[inline]
    #[must_use]
    pub fn primary_template(&self) -> Option<&Artifact> {
        self.artifacts.template.first()
    }

    /// Build a reference artifact through the factory and append it
    ///
    /// No deduplication: call once per logical artifact.
    pub fn add_reference_artifact(&mut self, kind_tag: &str, params: ArtifactParams) -> &Artifact {
        self.add_artifact(Role::Reference, kind_tag, params)
    }

    /// Build a template artifact through the factory and append it
    pub fn add_template_artifact(&mut self, kind_tag: &str, params: ArtifactParams) -> &Artifact {
        self.add_artifact(Role::Template, kind_tag, params)
    }

    /// Build a submission artifact through the factory and append it
    pub fn add_submission_artifact(&mut self, kind_tag: &str, params: ArtifactParams) -> &Artifact {
        self.add_artifact(Role::Submission, kind_tag, params)
    }

    fn add_artifact(&mut self, role: Role, kind_tag: &str, mut params: ArtifactParams) -> &Artifact {
        params.task_index = self.index;
        let mut artifact = Artifact::from_tag(kind_tag, params);
        artifact.ensure_content_hash();
        let list = self.artifacts.list_mut(role);
        list.push(artifact);
        &list[list.len() - 1]
    }

    /// Append an already-built artifact, restamping its task index and hash
    ///
    /// The diff engine uses this for its materialized, already-canonical
    /// grids.
    pub fn push_artifact(&mut self, role: Role, mut artifact: Artifact) -> &Artifact {
        artifact.set_task_index(self.index);
        artifact.ensure_content_hash();
        let list = self.artifacts.list_mut(role);
        list.push(artifact);
        &list[list.len() - 1]
    }

    /// Clone with every artifact's content and hash nulled
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut task = self.clone();
        task.artifacts = ArtifactLists {
            reference: self.artifacts.reference.iter().map(Artifact::redacted).collect(),
            template: self.artifacts.template.iter().map(Artifact::redacted).collect(),
            submission: self.artifacts.submission.iter().map(Artifact::redacted).collect(),
        };
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_artifact::{ArtifactKind, Content};
    use pretty_assertions::assert_eq;

    fn sample_params(content: &str) -> ArtifactParams {
        ArtifactParams {
            page_id: "sheet1".to_string(),
            document_id: "doc-ref".to_string(),
            raw_content: Some(Content::Text(content.to_string())),
            ..ArtifactParams::default()
        }
    }

    #[test]
    fn id_is_deterministic_over_title_and_page() {
        let a = Task::new("Question 1", "sheet1", 0);
        let b = Task::new("Question 1", "sheet1", 5);
        let c = Task::new("Question 1", "sheet2", 0);
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn added_artifacts_carry_the_task_index_and_a_hash() {
        let mut task = Task::new("Q1", "p1", 3);
        task.add_reference_artifact("text", sample_params("answer"));

        let artifact = task.primary_reference().unwrap();
        assert_eq!(artifact.task_index(), 3);
        assert!(artifact.content_hash().is_some());
    }

    #[test]
    fn factory_tag_selects_the_kind() {
        let mut task = Task::new("Q1", "p1", 0);
        task.add_template_artifact("TABLE", sample_params("| a |"));
        assert_eq!(task.primary_template().unwrap().kind(), ArtifactKind::Table);
    }

    #[test]
    fn artifacts_append_without_deduplication() {
        let mut task = Task::new("Q1", "p1", 0);
        task.add_reference_artifact("text", sample_params("same"));
        task.add_reference_artifact("text", sample_params("same"));
        assert_eq!(task.artifacts(Role::Reference).len(), 2);
    }

    #[test]
    fn primary_accessors_return_first_of_role() {
        let mut task = Task::new("Q1", "p1", 0);
        assert!(task.primary_reference().is_none());

        task.add_reference_artifact("text", sample_params("first"));
        task.add_reference_artifact("text", sample_params("second"));
        let primary = task.primary_reference().unwrap();
        assert_eq!(
            primary.normalized_content(),
            Some(&Content::Text("first".to_string()))
        );
    }

    #[test]
    fn bounding_box_round_trips_through_metadata() {
        use ace_formula::compare;

        let reference = vec![vec!["x".to_string()]];
        let template = vec![vec![String::new()]];
        let bounds = BoundingBox::from_differences(&compare(&reference, &template)).unwrap();

        let mut task = Task::new("Q1", "p1", 0);
        task.insert_metadata(BOUNDING_BOX_KEY, serde_json::to_value(bounds).unwrap());
        assert_eq!(task.bounding_box(), Some(bounds));
    }

    #[test]
    fn redacted_task_keeps_shape_but_no_content() {
        let mut task = Task::new("Q1", "p1", 0);
        task.add_reference_artifact("text", sample_params("secret"));
        task.set_task_notes("check working");

        let redacted = task.redacted();
        assert_eq!(redacted.id(), task.id());
        assert_eq!(redacted.task_notes(), Some("check working"));
        assert_eq!(redacted.artifacts(Role::Reference).len(), 1);
        assert!(redacted.artifacts(Role::Reference)[0]
            .normalized_content()
            .is_none());
    }

    #[test]
    fn serde_shape_uses_camel_case_and_role_lists() {
        let mut task = Task::new("Q1", "p1", 1);
        task.add_reference_artifact("text", sample_params("a"));

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["taskTitle"], "Q1");
        assert_eq!(json["pageId"], "p1");
        assert_eq!(json["index"], 1);
        assert!(json["artifacts"]["reference"].is_array());
        assert!(json["artifacts"]["template"].as_array().unwrap().is_empty());
        assert!(json["artifacts"]["submission"].as_array().unwrap().is_empty());

        // Raw content is an in-memory intermediate, so the wire form (not
        // struct equality) is what must round-trip.
        let back: Task = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&back).unwrap(), json);
    }
}
