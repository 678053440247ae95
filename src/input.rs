//! Hand detections from the pose model
//!
//! The model reports every detected hand as 21 keypoints in the pixels of
//! the video it ran on; [`HandFrame::rescaled`] maps them onto the canvas.
//! Only the index fingertip is used. Detections arrive asynchronously and are
//! published into [`LatestHands`]; the frame loop reads whatever is newest.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::INDEX_FINGERTIP;

/// One landmark on a hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
}

impl Keypoint {
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A single detected hand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    #[serde(default)]
    pub keypoints: Vec<Keypoint>,
}

impl Hand {
    /// Index fingertip position, `None` for a truncated keypoint list
    pub fn fingertip(&self) -> Option<Vec2> {
        self.keypoints.get(INDEX_FINGERTIP).map(Keypoint::pos)
    }
}

/// All hands from one detection pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandFrame {
    pub hands: Vec<Hand>,
}

impl HandFrame {
    /// Decode the model's JSON output (an array of hands). Unknown fields
    /// such as keypoint names or confidence scores are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Map keypoints from `source` pixels (the video frame) to `canvas`
    /// pixels. A source with a zero or non-finite side leaves the frame as is.
    pub fn rescaled(mut self, source: Vec2, canvas: Vec2) -> Self {
        if !(source.x > 0.0 && source.y > 0.0 && source.is_finite()) {
            return self;
        }
        let scale = canvas / source;
        for keypoint in self.hands.iter_mut().flat_map(|h| h.keypoints.iter_mut()) {
            let pos = keypoint.pos() * scale;
            keypoint.x = pos.x;
            keypoint.y = pos.y;
        }
        self
    }

    /// Fingertip of every hand that has one
    pub fn fingertips(&self) -> Vec<Vec2> {
        self.hands.iter().filter_map(Hand::fingertip).collect()
    }
}

/// Newest-wins slot for hand detections.
///
/// Publishing swaps in a whole new `Rc<HandFrame>` and reading clones the
/// `Rc`, so a reader holds a complete frame even if a newer one lands while
/// it is being used.
#[derive(Debug, Clone, Default)]
pub struct LatestHands {
    slot: Rc<RefCell<Rc<HandFrame>>>,
}

impl LatestHands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current detection
    pub fn publish(&self, frame: HandFrame) {
        *self.slot.borrow_mut() = Rc::new(frame);
    }

    /// Decode and publish model JSON. On a decode error the previous
    /// detection is kept.
    pub fn publish_json(&self, json: &str) -> Result<(), serde_json::Error> {
        let frame = HandFrame::from_json(json)?;
        self.publish(frame);
        Ok(())
    }

    /// Like [`publish_json`](Self::publish_json), with keypoints measured on
    /// a `source`-sized video and stored in `canvas` pixels
    pub fn publish_json_scaled(
        &self,
        json: &str,
        source: Vec2,
        canvas: Vec2,
    ) -> Result<(), serde_json::Error> {
        let frame = HandFrame::from_json(json)?.rescaled(source, canvas);
        self.publish(frame);
        Ok(())
    }

    /// The newest detection; repeated reads return the same frame until
    /// something new is published
    pub fn snapshot(&self) -> Rc<HandFrame> {
        Rc::clone(&self.slot.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_json(tip_x: f32, tip_y: f32) -> String {
        let points: Vec<String> = (0..21)
            .map(|k| {
                let (x, y) = if k == INDEX_FINGERTIP {
                    (tip_x, tip_y)
                } else {
                    (k as f32, k as f32)
                };
                format!(r#"{{"x":{x},"y":{y},"name":"kp{k}"}}"#)
            })
            .collect();
        format!(r#"{{"keypoints":[{}],"handedness":"Left","confidence":0.93}}"#, points.join(","))
    }

    #[test]
    fn test_decode_model_output() {
        let json = format!("[{},{}]", hand_json(120.5, 44.0), hand_json(600.0, 10.0));
        let frame = HandFrame::from_json(&json).unwrap();
        assert_eq!(frame.hands.len(), 2);
        assert_eq!(frame.hands[0].keypoints.len(), 21);
        assert_eq!(
            frame.fingertips(),
            vec![Vec2::new(120.5, 44.0), Vec2::new(600.0, 10.0)]
        );
    }

    #[test]
    fn test_empty_detection() {
        let frame = HandFrame::from_json("[]").unwrap();
        assert!(frame.is_empty());
        assert!(frame.fingertips().is_empty());
    }

    #[test]
    fn test_truncated_hand_has_no_fingertip() {
        let frame = HandFrame::from_json(r#"[{"keypoints":[{"x":1,"y":2}]},{}]"#).unwrap();
        assert_eq!(frame.hands.len(), 2);
        assert!(frame.fingertips().is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(HandFrame::from_json("{not json").is_err());
        assert!(HandFrame::from_json(r#"[{"keypoints":[{"x":"left"}]}]"#).is_err());
    }

    #[test]
    fn test_latest_hands_newest_wins() {
        let latest = LatestHands::new();
        assert!(latest.snapshot().is_empty());

        latest.publish_json(&format!("[{}]", hand_json(1.0, 2.0))).unwrap();
        latest.publish_json(&format!("[{}]", hand_json(3.0, 4.0))).unwrap();
        assert_eq!(latest.snapshot().fingertips(), vec![Vec2::new(3.0, 4.0)]);

        // Not consumed by reading
        assert_eq!(latest.snapshot().fingertips(), vec![Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn test_held_snapshot_survives_publish() {
        let latest = LatestHands::new();
        let writer = latest.clone();
        latest.publish_json(&format!("[{}]", hand_json(1.0, 2.0))).unwrap();

        let held = latest.snapshot();
        writer.publish(HandFrame::default());

        assert_eq!(held.fingertips(), vec![Vec2::new(1.0, 2.0)]);
        assert!(latest.snapshot().is_empty());
    }

    #[test]
    fn test_bad_json_keeps_previous() {
        let latest = LatestHands::new();
        latest.publish_json(&format!("[{}]", hand_json(5.0, 6.0))).unwrap();
        assert!(latest.publish_json("garbage").is_err());
        assert_eq!(latest.snapshot().fingertips(), vec![Vec2::new(5.0, 6.0)]);
    }

    #[test]
    fn test_rescale_video_to_canvas() {
        let json = format!("[{}]", hand_json(1280.0, 360.0));
        let frame = HandFrame::from_json(&json)
            .unwrap()
            .rescaled(Vec2::new(1280.0, 720.0), Vec2::new(640.0, 480.0));
        let tip = frame.fingertips()[0];
        assert!(tip.abs_diff_eq(Vec2::new(640.0, 240.0), 1e-3));
        let wrist_side = frame.hands[0].keypoints[2].pos();
        assert!(wrist_side.abs_diff_eq(Vec2::new(1.0, 4.0 / 3.0), 1e-4));
    }

    #[test]
    fn test_rescale_same_size_is_identity() {
        let frame = HandFrame::from_json(&format!("[{}]", hand_json(320.0, 100.0))).unwrap();
        let same = frame.clone().rescaled(Vec2::new(640.0, 480.0), Vec2::new(640.0, 480.0));
        assert_eq!(same, frame);
    }

    #[test]
    fn test_rescale_unknown_video_size_is_noop() {
        // The video reports 0x0 until its metadata has loaded
        let frame = HandFrame::from_json(&format!("[{}]", hand_json(50.0, 60.0))).unwrap();
        let kept = frame.clone().rescaled(Vec2::ZERO, Vec2::new(640.0, 480.0));
        assert_eq!(kept, frame);
    }

    #[test]
    fn test_publish_scaled_lands_on_canvas_cell() {
        let latest = LatestHands::new();
        latest
            .publish_json_scaled(
                &format!("[{}]", hand_json(1270.0, 710.0)),
                Vec2::new(1280.0, 720.0),
                Vec2::new(640.0, 480.0),
            )
            .unwrap();
        let tips = latest.snapshot().fingertips();
        let grid = crate::sim::Grid::for_canvas(640, 480, 10);
        assert_eq!(grid.cell_at_pixel(tips[0].x, tips[0].y, 10), (63, 47));
    }
}
