/// Description and node-type extraction from raw workflow definitions
///
/// n8n workflows often carry a sticky-note node with a human-written
/// summary. When one exists it becomes the description; otherwise a
/// fallback is synthesized from the node types in the workflow.

use crate::workflow::types::{RawNode, RawWorkflow};

/// Node type string n8n uses for free-text annotation notes
const STICKY_NOTE_TYPE: &str = "n8n-nodes-base.stickyNote";

/// Namespace prefixes stripped when rendering node types in descriptions
const TYPE_PREFIXES: &[&str] = &["n8n-nodes-base.", "@n8n/n8n-nodes-langchain."];

/// Maximum description length before truncation
const MAX_DESCRIPTION_CHARS: usize = 200;

/// Extract a human-readable description from a workflow definition
///
/// Prefers sticky-note content: markdown markers are stripped, lines with
/// more than 10 trimmed characters are kept, and the first two such lines
/// are joined. Results shorter than 20 characters are discarded in favor
/// of the fallback, and longer ones are truncated to 200 characters with
/// an ellipsis.
pub fn extract_description(workflow: &RawWorkflow) -> String {
    if let Some(content) = sticky_note_content(workflow) {
        let cleaned: String = content
            .chars()
            .filter(|c| *c != '#' && *c != '*')
            .collect();

        let summary = cleaned
            .lines()
            .filter(|line| line.trim().chars().count() > 10)
            .take(2)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        if summary.chars().count() > 20 {
            return truncate_with_ellipsis(&summary, MAX_DESCRIPTION_CHARS);
        }
    }

    // Fallback: summarize by listing the main node types
    let unique_types = dedup_first_occurrence(
        workflow
            .nodes
            .iter()
            .map(|n| strip_type_prefix(&n.node_type))
            .filter(|t| t != "stickyNote"),
    );

    format!(
        "Workflow with {} nodes: {}",
        workflow.nodes.len(),
        unique_types
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// List the unique node types in a workflow
///
/// Full type strings (prefixes intact) excluding sticky notes, in
/// first-occurrence order so repeated extraction is reproducible.
pub fn node_types(workflow: &RawWorkflow) -> Vec<String> {
    dedup_first_occurrence(
        workflow
            .nodes
            .iter()
            .map(|n| n.node_type.clone())
            .filter(|t| !t.contains("stickyNote")),
    )
}

/// Find the first sticky note carrying non-empty text content
fn sticky_note_content(workflow: &RawWorkflow) -> Option<String> {
    workflow.nodes.iter().find_map(|node| {
        if node.node_type != STICKY_NOTE_TYPE {
            return None;
        }
        note_text(node).filter(|content| !content.is_empty())
    })
}

/// Read `parameters.content` as a string, if present
fn note_text(node: &RawNode) -> Option<String> {
    node.parameters
        .as_ref()?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}

fn strip_type_prefix(node_type: &str) -> String {
    let mut stripped = node_type;
    for prefix in TYPE_PREFIXES {
        stripped = stripped.strip_prefix(prefix).unwrap_or(stripped);
    }
    stripped.to_string()
}

fn dedup_first_occurrence(types: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();
    for t in types {
        if seen.insert(t.clone()) {
            unique.push(t);
        }
    }
    unique
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(node_type: &str) -> RawNode {
        RawNode {
            id: None,
            name: None,
            node_type: node_type.to_string(),
            parameters: None,
        }
    }

    fn sticky(content: &str) -> RawNode {
        RawNode {
            id: None,
            name: None,
            node_type: "n8n-nodes-base.stickyNote".to_string(),
            parameters: Some(json!({ "content": content })),
        }
    }

    fn workflow(nodes: Vec<RawNode>) -> RawWorkflow {
        RawWorkflow {
            name: Some("test".to_string()),
            nodes,
        }
    }

    #[test]
    fn uses_sticky_note_content() {
        let wf = workflow(vec![
            node("n8n-nodes-base.httpRequest"),
            sticky("## Overview\nFetches product prices from three vendors every hour.\nshort\nPosts a digest to Slack when anything changed."),
        ]);

        assert_eq!(
            extract_description(&wf),
            "Fetches product prices from three vendors every hour. Posts a digest to Slack when anything changed."
        );
    }

    #[test]
    fn strips_markdown_markers() {
        let wf = workflow(vec![sticky("**Syncs CRM contacts into the mailing list**")]);
        assert_eq!(
            extract_description(&wf),
            "Syncs CRM contacts into the mailing list"
        );
    }

    #[test]
    fn long_notes_truncate_at_200_chars() {
        let long_line = "x".repeat(300);
        let wf = workflow(vec![node("n8n-nodes-base.set"), sticky(&long_line)]);

        let description = extract_description(&wf);
        assert_eq!(description.chars().count(), 203);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn short_note_falls_back_to_node_summary() {
        // 20 chars or fewer after cleanup is not a usable description
        let wf = workflow(vec![
            sticky("# Short note"),
            node("n8n-nodes-base.httpRequest"),
            node("n8n-nodes-base.set"),
            node("n8n-nodes-base.httpRequest"),
        ]);

        assert_eq!(
            extract_description(&wf),
            "Workflow with 4 nodes: httpRequest, set"
        );
    }

    #[test]
    fn fallback_strips_prefixes_and_limits_to_five_types() {
        let wf = workflow(vec![
            node("n8n-nodes-base.webhook"),
            node("n8n-nodes-base.set"),
            node("@n8n/n8n-nodes-langchain.agent"),
            node("n8n-nodes-base.if"),
            node("n8n-nodes-base.merge"),
            node("n8n-nodes-base.slack"),
        ]);

        assert_eq!(
            extract_description(&wf),
            "Workflow with 6 nodes: webhook, set, agent, if, merge"
        );
    }

    #[test]
    fn empty_sticky_note_is_ignored() {
        let wf = workflow(vec![sticky(""), node("n8n-nodes-base.cron")]);
        assert_eq!(extract_description(&wf), "Workflow with 2 nodes: cron");
    }

    #[test]
    fn node_types_excludes_sticky_notes_and_dedups() {
        let wf = workflow(vec![
            node("n8n-nodes-base.httpRequest"),
            sticky("notes"),
            node("n8n-nodes-base.set"),
            node("n8n-nodes-base.httpRequest"),
        ]);

        assert_eq!(
            node_types(&wf),
            vec![
                "n8n-nodes-base.httpRequest".to_string(),
                "n8n-nodes-base.set".to_string(),
            ]
        );
    }

    #[test]
    fn node_types_keeps_namespace_prefixes() {
        let wf = workflow(vec![node("@n8n/n8n-nodes-langchain.agent")]);
        assert_eq!(node_types(&wf), vec!["@n8n/n8n-nodes-langchain.agent"]);
    }
}
