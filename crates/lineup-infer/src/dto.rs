//! Wire types for the inference service.

use lineup_core::{BoundingBox, Descriptor, Detection};
use serde::Deserialize;

/// `GET /v1/ready` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadyDto {
    pub model: String,
    pub descriptor_dim: usize,
}

/// One detected face on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct FaceDto {
    /// [x, y, width, height] in pixels.
    pub bbox: [f32; 4],
    pub confidence: f32,
    /// 5-point landmarks as [x, y] pairs; optional.
    #[serde(default)]
    pub landmarks: Option<Vec<[f32; 2]>>,
    pub descriptor: Vec<f32>,
}

impl FaceDto {
    pub fn into_detection(self) -> Detection {
        let [x, y, width, height] = self.bbox;
        let landmarks = self.landmarks.and_then(|points| {
            if points.len() == 5 {
                let mut fixed = [(0.0f32, 0.0f32); 5];
                for (slot, point) in fixed.iter_mut().zip(points.iter()) {
                    *slot = (point[0], point[1]);
                }
                Some(fixed)
            } else {
                // Anything other than the 5-point layout is dropped rather
                // than silently misassigned.
                None
            }
        });

        Detection {
            bbox: BoundingBox {
                x,
                y,
                width,
                height,
                confidence: self.confidence,
            },
            landmarks,
            descriptor: Descriptor::new(self.descriptor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_dto_into_detection() {
        let dto = FaceDto {
            bbox: [10.0, 20.0, 100.0, 120.0],
            confidence: 0.97,
            landmarks: Some(vec![
                [30.0, 50.0],
                [70.0, 50.0],
                [50.0, 70.0],
                [35.0, 95.0],
                [65.0, 95.0],
            ]),
            descriptor: vec![0.1, 0.2, 0.3],
        };

        let detection = dto.into_detection();
        assert_eq!(detection.bbox.x, 10.0);
        assert_eq!(detection.bbox.height, 120.0);
        assert_eq!(detection.bbox.confidence, 0.97);
        assert_eq!(detection.landmarks.unwrap()[2], (50.0, 70.0));
        assert_eq!(detection.descriptor.values(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_face_dto_drops_non_five_point_landmarks() {
        let dto = FaceDto {
            bbox: [0.0, 0.0, 10.0, 10.0],
            confidence: 0.5,
            landmarks: Some(vec![[1.0, 1.0], [2.0, 2.0]]),
            descriptor: vec![0.0],
        };
        assert!(dto.into_detection().landmarks.is_none());
    }

    #[test]
    fn test_face_dto_deserializes_without_landmarks() {
        let json = r#"{"bbox": [1, 2, 3, 4], "confidence": 0.9, "descriptor": [0.5]}"#;
        let dto: FaceDto = serde_json::from_str(json).unwrap();
        assert!(dto.landmarks.is_none());
        assert_eq!(dto.bbox, [1.0, 2.0, 3.0, 4.0]);
    }
}
