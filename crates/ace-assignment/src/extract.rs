//! Extraction passes over a sheets-backed assignment
//!
//! Both passes run task by task and catch failures at the task boundary: a
//! connector error on one task is logged with enough context to diagnose
//! and never prevents extraction or diffing of the remaining tasks.

use ace_artifact::{Artifact, ArtifactKind, ArtifactParams, Content};
use ace_formula::{
    compare, location_index, read_submission_region, reference_region, template_region,
    BoundingBox, SheetSource, SourceError,
};
use indexmap::IndexMap;
use serde_json::Value;

use crate::assignment::{Assignment, DocumentType};
use crate::task::{Role, Task, BOUNDING_BOX_KEY, REFERENCE_LOCATIONS_KEY};

/// One materialized content item extracted from a page
///
/// Connectors resolve their element references (text runs, table elements,
/// image anchors) down to primitive content before the core sees it.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Factory kind tag (`text`, `table`, `image`, ...)
    pub kind_tag: String,
    /// Materialized raw content
    pub content: Option<Content>,
    /// Source extras (element id, image URL, ...)
    pub metadata: IndexMap<String, Value>,
}

/// Blocking read access to a slides-like document
///
/// The slides counterpart of [`SheetSource`]: implementations walk a page's
/// elements and hand back already-materialized text runs and table cells.
pub trait PageSource {
    /// Extract every gradable content item on a page, in page order
    ///
    /// # Errors
    /// Returns [`SourceError`] when the document or page cannot be read.
    fn extract_page(
        &self,
        document_id: &str,
        page_id: &str,
    ) -> Result<Vec<PageContent>, SourceError>;
}

/// Extract reference and template content for every task of a slides-backed
/// assignment
///
/// Each page item goes through the artifact factory under its own kind tag,
/// so the declared shape of the primary reference doubles as the oracle for
/// later submission extraction. A page that cannot be read is logged and
/// leaves that task/role without artifacts; the other tasks proceed.
pub fn run_content_pass(assignment: &mut Assignment, source: &dyn PageSource) {
    if assignment.document_type() != DocumentType::Slides {
        tracing::debug!(
            definition_key = %assignment.definition_key(),
            "content pass only applies to slides-backed assignments"
        );
        return;
    }

    let reference_document_id = assignment.reference_document_id().to_string();
    let template_document_id = assignment.template_document_id().to_string();

    for task in assignment.tasks_mut() {
        for (role, document_id) in [
            (Role::Reference, reference_document_id.as_str()),
            (Role::Template, template_document_id.as_str()),
        ] {
            match source.extract_page(document_id, task.page_id()) {
                Ok(items) => {
                    for item in items {
                        let params = ArtifactParams {
                            page_id: task.page_id().to_string(),
                            document_id: document_id.to_string(),
                            raw_content: item.content,
                            metadata: item.metadata,
                            ..ArtifactParams::default()
                        };
                        match role {
                            Role::Reference => {
                                task.add_reference_artifact(&item.kind_tag, params);
                            }
                            Role::Template | Role::Submission => {
                                task.add_template_artifact(&item.kind_tag, params);
                            }
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        task_title = %task.task_title(),
                        document_id = %document_id,
                        %error,
                        "skipping page content for task"
                    );
                }
            }
        }
    }
    assignment.touch();
}

/// Diff every task's reference sheet against the template sheet
///
/// For each task: extract both grids, compare, record the bounding box and
/// location index in the task metadata, and materialize the box-shaped
/// reference and template artifacts. Tasks whose sheets cannot be read are
/// skipped with a warning; tasks with no differences get no artifacts and
/// no metadata.
pub fn run_formula_diff_pass(assignment: &mut Assignment, source: &dyn SheetSource) {
    if assignment.document_type() != DocumentType::Sheets {
        tracing::debug!(
            definition_key = %assignment.definition_key(),
            "formula diff pass only applies to sheets-backed assignments"
        );
        return;
    }

    let reference_document_id = assignment.reference_document_id().to_string();
    let template_document_id = assignment.template_document_id().to_string();

    for task in assignment.tasks_mut() {
        if let Err(error) = diff_task(task, &reference_document_id, &template_document_id, source)
        {
            tracing::warn!(
                task_title = %task.task_title(),
                document_id = %reference_document_id,
                %error,
                "skipping formula diff for task"
            );
        }
    }
    assignment.touch();
}

fn diff_task(
    task: &mut Task,
    reference_document_id: &str,
    template_document_id: &str,
    source: &dyn SheetSource,
) -> Result<(), SourceError> {
    let reference = source
        .extract_grid(reference_document_id, task.page_id())?
        .unwrap_or_default();
    let template = source
        .extract_grid(template_document_id, task.page_id())?
        .unwrap_or_default();

    let differences = compare(&reference, &template);
    let Some(bounds) = BoundingBox::from_differences(&differences) else {
        return Ok(());
    };

    task.insert_metadata(
        BOUNDING_BOX_KEY,
        serde_json::to_value(bounds).unwrap_or(Value::Null),
    );
    task.insert_metadata(
        REFERENCE_LOCATIONS_KEY,
        serde_json::to_value(location_index(&differences)).unwrap_or(Value::Null),
    );

    let reference_artifact = Artifact::of_kind_canonical(
        ArtifactKind::Spreadsheet,
        ArtifactParams {
            page_id: task.page_id().to_string(),
            document_id: reference_document_id.to_string(),
            raw_content: Some(Content::Grid(reference_region(&differences, &bounds))),
            ..ArtifactParams::default()
        },
    );
    task.push_artifact(Role::Reference, reference_artifact);

    let template_artifact = Artifact::of_kind_canonical(
        ArtifactKind::Spreadsheet,
        ArtifactParams {
            page_id: task.page_id().to_string(),
            document_id: template_document_id.to_string(),
            raw_content: Some(Content::Grid(template_region(&bounds))),
            ..ArtifactParams::default()
        },
    );
    task.push_artifact(Role::Template, template_artifact);
    Ok(())
}

/// Append bounding-box-restricted submission artifacts for one student
///
/// Reads only the recorded difference region of each task, never the whole
/// sheet, so I/O stays proportional to the expected differences. Tasks
/// without a recorded bounding box, or whose region cannot be read, are
/// skipped; read failures are logged by the engine.
pub fn run_submission_pass(
    assignment: &mut Assignment,
    submission_document_id: &str,
    source: &dyn SheetSource,
) {
    for task in assignment.tasks_mut() {
        let Some(shape) = task.primary_reference().map(Artifact::kind) else {
            continue;
        };
        if shape != ArtifactKind::Spreadsheet {
            continue;
        }
        let Some(bounds) = task.bounding_box() else {
            continue;
        };
        let Some(grid) =
            read_submission_region(source, submission_document_id, task.page_id(), &bounds)
        else {
            continue;
        };

        let artifact = Artifact::of_kind_canonical(
            ArtifactKind::Spreadsheet,
            ArtifactParams {
                page_id: task.page_id().to_string(),
                document_id: submission_document_id.to_string(),
                raw_content: Some(Content::Grid(grid)),
                ..ArtifactParams::default()
            },
        );
        task.push_artifact(Role::Submission, artifact);
    }
    assignment.touch();
}
