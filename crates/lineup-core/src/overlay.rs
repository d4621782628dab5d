//! Overlay planning — draw instructions for a rendering surface.
//!
//! The core emits what to draw; it owns no canvas, pixels, or widget
//! state. Surfaces (a PNG annotator, a terminal printer) implement
//! [`RenderSurface`].

use crate::types::{BoundingBox, Detection, MatchResult};

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Erase any overlay left from a previous query.
    Clear,
    /// Draw a labeled box around one detected face.
    Box { bbox: BoundingBox, label: String },
}

/// Drawing sink for planned overlays.
pub trait RenderSurface {
    fn clear(&mut self);
    fn draw_box(&mut self, bbox: &BoundingBox, label: &str);
}

/// Plan the overlay for one query image: clear, then one labeled box per
/// detected face, in detection order.
///
/// Faces without a confident match are still drawn, labeled with the
/// unknown sentinel and the nearest distance.
pub fn plan_overlay(detections: &[Detection], results: &[MatchResult]) -> Vec<DrawCommand> {
    debug_assert_eq!(detections.len(), results.len());

    let mut commands = Vec::with_capacity(detections.len() + 1);
    commands.push(DrawCommand::Clear);
    for (detection, result) in detections.iter().zip(results.iter()) {
        commands.push(DrawCommand::Box {
            bbox: detection.bbox.clone(),
            label: result.to_string(),
        });
    }
    commands
}

/// Replay planned commands onto a surface.
pub fn render(commands: &[DrawCommand], surface: &mut dyn RenderSurface) {
    for command in commands {
        match command {
            DrawCommand::Clear => surface.clear(),
            DrawCommand::Box { bbox, label } => surface.draw_box(bbox, label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Descriptor;

    fn detection(x: f32) -> Detection {
        Detection {
            bbox: BoundingBox {
                x,
                y: 5.0,
                width: 40.0,
                height: 50.0,
                confidence: 0.9,
            },
            landmarks: None,
            descriptor: Descriptor::new(vec![0.0]),
        }
    }

    #[test]
    fn test_plan_starts_with_clear() {
        let commands = plan_overlay(&[], &[]);
        assert_eq!(commands, vec![DrawCommand::Clear]);
    }

    #[test]
    fn test_plan_one_box_per_detection_in_order() {
        let detections = vec![detection(10.0), detection(200.0)];
        let results = vec![
            MatchResult {
                label: Some("Thor".into()),
                distance: 0.31,
            },
            MatchResult {
                label: None,
                distance: 0.92,
            },
        ];

        let commands = plan_overlay(&detections, &results);
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], DrawCommand::Clear);
        match &commands[1] {
            DrawCommand::Box { bbox, label } => {
                assert_eq!(bbox.x, 10.0);
                assert_eq!(label, "Thor (0.31)");
            }
            other => panic!("expected box, got {other:?}"),
        }
        match &commands[2] {
            DrawCommand::Box { bbox, label } => {
                assert_eq!(bbox.x, 200.0);
                // Unknown faces are drawn too
                assert_eq!(label, "unknown (0.92)");
            }
            other => panic!("expected box, got {other:?}"),
        }
    }

    #[test]
    fn test_render_replays_commands() {
        #[derive(Default)]
        struct RecordingSurface {
            events: Vec<String>,
        }

        impl RenderSurface for RecordingSurface {
            fn clear(&mut self) {
                self.events.push("clear".into());
            }
            fn draw_box(&mut self, bbox: &BoundingBox, label: &str) {
                self.events.push(format!("box {} {label}", bbox.x));
            }
        }

        let commands = plan_overlay(
            &[detection(1.0)],
            &[MatchResult {
                label: Some("Thor".into()),
                distance: 0.2,
            }],
        );

        let mut surface = RecordingSurface::default();
        render(&commands, &mut surface);
        assert_eq!(surface.events, vec!["clear", "box 1 Thor (0.20)"]);
    }
}
