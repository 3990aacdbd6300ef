/// Galaxy layout engine
///
/// Assigns every workflow a 3D position for the dashboard's galaxy view.
/// Workflows cluster by category: each category owns a fixed base angle and
/// orbit radius, members fan out across a 45 degree window, node-heavy
/// workflows sit higher, and a trigonometric hash of the ordinal index adds
/// organic jitter. The whole computation is a pure function of the input
/// sequence, so the same workflows in the same order always produce
/// bit-identical coordinates.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::workflow::types::{Category, Position, WorkflowMetadata};

/// Angular window members of one category spread across (45 degrees)
const ANGLE_SPREAD: f64 = PI / 4.0;

impl Category {
    /// Base angle of the category cluster on the galaxy ring
    ///
    /// Six categories sit on an even 60 degree ring; `Other` is parked at
    /// an off-ring angle on purpose so uncategorized workflows stay
    /// visually distinct from the named clusters.
    fn base_angle(&self) -> f64 {
        match self {
            Category::Ai => 0.0,
            Category::Seo => PI / 3.0,
            Category::Hr => 2.0 * PI / 3.0,
            Category::LeadGen => PI,
            Category::Monitoring => 4.0 * PI / 3.0,
            Category::Data => 5.0 * PI / 3.0,
            Category::Other => PI / 6.0,
        }
    }

    /// Orbit radius of the category cluster
    fn base_radius(&self) -> f64 {
        match self {
            Category::Ai => 12.0,
            Category::Seo => 10.0,
            Category::Hr => 11.0,
            Category::LeadGen => 9.0,
            Category::Monitoring => 13.0,
            Category::Data => 14.0,
            Category::Other => 8.0,
        }
    }
}

/// Deterministic pseudo-random jitter for one workflow
///
/// A stateless trigonometric hash over the ordinal index. Keeping this a
/// fixed formula instead of a seeded generator is what makes the layout a
/// pure function; the exact constants are part of the visual contract.
fn noise(index: usize) -> f64 {
    ((index as f64) * 12.9898).sin() * 43758.5453 % 1.0
}

/// Compute galaxy positions for a sequence of workflows
///
/// Length- and identity-preserving: the output is the input sequence with
/// `position` filled in. Index within a category counts members in input
/// order, so reordering the input is the only way to move anything.
pub fn calculate_galaxy_positions(workflows: Vec<WorkflowMetadata>) -> Vec<WorkflowMetadata> {
    // Category sizes and running per-category indexes
    let mut category_counts: HashMap<Category, usize> = HashMap::new();
    for workflow in &workflows {
        *category_counts.entry(workflow.category).or_insert(0) += 1;
    }
    let mut category_cursor: HashMap<Category, usize> = HashMap::new();

    workflows
        .into_iter()
        .enumerate()
        .map(|(index, mut workflow)| {
            let category_count = category_counts[&workflow.category];
            let cursor = category_cursor.entry(workflow.category).or_insert(0);
            let index_in_category = *cursor;
            *cursor += 1;

            // Spread category members across the window, centered on the
            // category's base angle. A singleton sits exactly on it.
            let angle_offset = if category_count > 1 {
                (index_in_category as f64 / (category_count - 1) as f64 - 0.5) * ANGLE_SPREAD
            } else {
                0.0
            };

            let angle = workflow.category.base_angle() + angle_offset;
            let radius = workflow.category.base_radius();

            // Workflows with more nodes float higher
            let y_offset = (workflow.node_count as f64 / 20.0 - 0.5) * 4.0;

            let jitter = noise(index);

            workflow.position = Some(Position {
                x: angle.cos() * radius + jitter * 2.0,
                y: y_offset + jitter,
                z: angle.sin() * radius + jitter * 2.0,
            });

            workflow
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn workflow(id: &str, category: Category, node_count: usize) -> WorkflowMetadata {
        WorkflowMetadata {
            id: id.to_string(),
            name: format!("wf-{id}"),
            description: String::new(),
            node_count,
            node_types: vec![],
            category,
            github_url: String::new(),
            raw_url: String::new(),
            size: 0,
            last_updated: Utc::now(),
            position: None,
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let input: Vec<_> = (0..12)
            .map(|i| {
                let category = match i % 3 {
                    0 => Category::Ai,
                    1 => Category::Data,
                    _ => Category::Other,
                };
                workflow(&format!("w{i}"), category, i)
            })
            .collect();

        let first = calculate_galaxy_positions(input.clone());
        let second = calculate_galaxy_positions(input);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.position, b.position, "position drifted for {}", a.id);
        }
    }

    #[test]
    fn layout_preserves_length_and_identity() {
        let input: Vec<_> = (0..7)
            .map(|i| workflow(&format!("w{i}"), Category::Monitoring, i))
            .collect();
        let ids: Vec<_> = input.iter().map(|w| w.id.clone()).collect();

        let positioned = calculate_galaxy_positions(input);

        assert_eq!(positioned.len(), 7);
        let out_ids: Vec<_> = positioned.iter().map(|w| w.id.clone()).collect();
        assert_eq!(out_ids, ids);
        assert!(positioned.iter().all(|w| w.position.is_some()));
    }

    #[test]
    fn singleton_category_sits_on_its_base_angle() {
        // index 0 has zero jitter (sin(0) == 0), so the position is exactly
        // the category anchor
        let positioned = calculate_galaxy_positions(vec![workflow("solo", Category::Seo, 10)]);
        let position = positioned[0].position.expect("position assigned");

        let angle = PI / 3.0;
        assert_eq!(position.x, angle.cos() * 10.0);
        assert_eq!(position.y, 0.0);
        assert_eq!(position.z, angle.sin() * 10.0);
    }

    #[test]
    fn three_member_category_spreads_across_the_window() {
        let input = vec![
            workflow("a", Category::Data, 10),
            workflow("b", Category::Data, 10),
            workflow("c", Category::Data, 10),
        ];

        let positioned = calculate_galaxy_positions(input);
        let base = Category::Data.base_angle();
        let radius = Category::Data.base_radius();

        // Offsets are -22.5, 0, +22.5 degrees around the base angle
        let expected_angles = [
            base - ANGLE_SPREAD / 2.0,
            base,
            base + ANGLE_SPREAD / 2.0,
        ];

        for (i, (wf, expected)) in positioned.iter().zip(expected_angles).enumerate() {
            let position = wf.position.expect("position assigned");
            let jitter = noise(i);
            assert!(
                (position.x - (expected.cos() * radius + jitter * 2.0)).abs() < 1e-12,
                "x mismatch at {i}"
            );
            assert!(
                (position.z - (expected.sin() * radius + jitter * 2.0)).abs() < 1e-12,
                "z mismatch at {i}"
            );
        }
    }

    #[test]
    fn node_count_lifts_the_workflow() {
        let positioned = calculate_galaxy_positions(vec![
            workflow("light", Category::Hr, 0),
        ]);
        let light = positioned[0].position.expect("position assigned");
        // 0 nodes => (0/20 - 0.5) * 4 == -2, index 0 has zero jitter
        assert_eq!(light.y, -2.0);

        let positioned = calculate_galaxy_positions(vec![
            workflow("heavy", Category::Hr, 20),
        ]);
        let heavy = positioned[0].position.expect("position assigned");
        // 20 nodes => (20/20 - 0.5) * 4 == 2
        assert_eq!(heavy.y, 2.0);
    }

    #[test]
    fn noise_is_stable_per_index() {
        for index in 0..64 {
            assert_eq!(noise(index), noise(index));
            assert!(noise(index).abs() < 1.0);
        }
        assert_eq!(noise(0), 0.0);
    }
}
