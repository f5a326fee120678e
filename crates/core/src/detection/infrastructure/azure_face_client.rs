use std::time::Duration;

use serde::Deserialize;

use crate::detection::domain::face_detector::{
    FaceAttributeKind, FaceDetector, ServiceError,
};
use crate::shared::constants::{DETECTION_MODEL, RECOGNITION_MODEL};
use crate::shared::face::{BlurLevel, FaceRecord, FaceRectangle, HeadPose, MaskType};

/// Hard cap on a single detection round-trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the remote face API. Supplied by the
/// caller; this crate never reads the environment itself.
#[derive(Clone, Debug)]
pub struct FaceApiConfig {
    pub endpoint: String,
    pub key: String,
}

/// Blocking client for the Azure Face detect endpoint.
///
/// Sends raw image bytes and maps the service's camelCase JSON into
/// domain records. Model identifiers are fixed constants; callers
/// choose only the attribute set.
pub struct AzureFaceClient {
    config: FaceApiConfig,
    client: reqwest::blocking::Client,
}

impl AzureFaceClient {
    pub fn new(config: FaceApiConfig) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn detect_url(&self, attributes: &[FaceAttributeKind]) -> String {
        let names: Vec<&str> = attributes.iter().copied().map(attribute_name).collect();
        format!(
            "{}/face/v1.0/detect\
             ?detectionModel={DETECTION_MODEL}\
             &recognitionModel={RECOGNITION_MODEL}\
             &returnFaceId=false\
             &returnFaceAttributes={}",
            self.config.endpoint.trim_end_matches('/'),
            names.join(",")
        )
    }
}

impl FaceDetector for AzureFaceClient {
    fn detect(
        &self,
        image: &[u8],
        attributes: &[FaceAttributeKind],
    ) -> Result<Vec<FaceRecord>, ServiceError> {
        let response = self
            .client
            .post(self.detect_url(attributes))
            .header("Ocp-Apim-Subscription-Key", &self.config.key)
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let faces: Vec<WireFace> = response
            .json()
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
        Ok(faces.into_iter().map(WireFace::into_record).collect())
    }
}

fn attribute_name(kind: FaceAttributeKind) -> &'static str {
    match kind {
        FaceAttributeKind::HeadPose => "headPose",
        FaceAttributeKind::Blur => "blur",
        FaceAttributeKind::Mask => "mask",
    }
}

/// Maps a non-success HTTP status and error body to a typed failure.
fn status_error(status: u16, body: &str) -> ServiceError {
    let message = error_message(body);
    match status {
        401 | 403 => ServiceError::Unauthorized,
        429 => ServiceError::Throttled,
        400 => ServiceError::InvalidImage(message),
        _ => ServiceError::Api { status, message },
    }
}

/// Extracts the message from the service's error envelope, falling
/// back to the raw body when the envelope doesn't parse.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: Detail,
    }
    #[derive(Deserialize)]
    struct Detail {
        message: String,
    }
    serde_json::from_str::<Envelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// Wire types mirror the service's camelCase JSON; unknown fields are
// ignored so new attributes don't break deserialization.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFace {
    face_rectangle: WireRectangle,
    face_attributes: WireAttributes,
}

#[derive(Debug, Deserialize)]
struct WireRectangle {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAttributes {
    head_pose: WireHeadPose,
    blur: WireBlur,
    mask: WireMask,
}

#[derive(Debug, Deserialize)]
struct WireHeadPose {
    yaw: f64,
    pitch: f64,
    roll: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlur {
    blur_level: WireBlurLevel,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum WireBlurLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Deserialize)]
struct WireMask {
    #[serde(rename = "type")]
    kind: WireMaskType,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
enum WireMaskType {
    NoMask,
    FaceMask,
    OtherMaskOrOcclusion,
    Uncertain,
}

impl WireFace {
    fn into_record(self) -> FaceRecord {
        let r = self.face_rectangle;
        let pose = self.face_attributes.head_pose;
        FaceRecord {
            rectangle: FaceRectangle::new(r.left, r.top, r.width, r.height),
            head_pose: HeadPose {
                yaw: pose.yaw,
                pitch: pose.pitch,
                roll: pose.roll,
            },
            blur_level: match self.face_attributes.blur.blur_level {
                WireBlurLevel::Low => BlurLevel::Low,
                WireBlurLevel::Medium => BlurLevel::Medium,
                WireBlurLevel::High => BlurLevel::High,
            },
            mask: match self.face_attributes.mask.kind {
                WireMaskType::NoMask => MaskType::NoMask,
                WireMaskType::FaceMask => MaskType::FaceMask,
                WireMaskType::OtherMaskOrOcclusion => MaskType::OtherMaskOrOcclusion,
                WireMaskType::Uncertain => MaskType::Uncertain,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const SAMPLE_RESPONSE: &str = r#"[
        {
            "faceRectangle": {"top": 84, "left": 170, "width": 219, "height": 219},
            "faceAttributes": {
                "headPose": {"pitch": 6.3, "roll": 1.9, "yaw": -22.1},
                "blur": {"blurLevel": "low", "value": 0.06},
                "mask": {"type": "noMask", "noseAndMouthCovered": false}
            }
        },
        {
            "faceRectangle": {"top": 10, "left": 20, "width": 30, "height": 40},
            "faceAttributes": {
                "headPose": {"pitch": -4.0, "roll": 0.5, "yaw": 12.8},
                "blur": {"blurLevel": "high", "value": 0.91},
                "mask": {"type": "faceMask", "noseAndMouthCovered": true}
            }
        }
    ]"#;

    fn client() -> AzureFaceClient {
        AzureFaceClient::new(FaceApiConfig {
            endpoint: "https://example.cognitiveservices.azure.com".into(),
            key: "secret".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_sample_response_maps_to_records() {
        let faces: Vec<WireFace> = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let records: Vec<FaceRecord> = faces.into_iter().map(WireFace::into_record).collect();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.rectangle, FaceRectangle::new(170, 84, 219, 219));
        assert_relative_eq!(first.head_pose.yaw, -22.1);
        assert_relative_eq!(first.head_pose.pitch, 6.3);
        assert_relative_eq!(first.head_pose.roll, 1.9);
        assert_eq!(first.blur_level, BlurLevel::Low);
        assert_eq!(first.mask, MaskType::NoMask);

        let second = &records[1];
        assert_eq!(second.blur_level, BlurLevel::High);
        assert_eq!(second.mask, MaskType::FaceMask);
    }

    #[test]
    fn test_response_order_is_preserved() {
        let faces: Vec<WireFace> = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let records: Vec<FaceRecord> = faces.into_iter().map(WireFace::into_record).collect();
        assert_eq!(records[0].rectangle.left, 170);
        assert_eq!(records[1].rectangle.left, 20);
    }

    #[test]
    fn test_empty_response_is_no_faces() {
        let faces: Vec<WireFace> = serde_json::from_str("[]").unwrap();
        assert!(faces.is_empty());
    }

    #[rstest]
    #[case::mask_uncertain(r#"{"type": "uncertain"}"#, WireMaskType::Uncertain)]
    #[case::mask_occlusion(
        r#"{"type": "otherMaskOrOcclusion"}"#,
        WireMaskType::OtherMaskOrOcclusion
    )]
    fn test_mask_vocabulary(#[case] json: &str, #[case] expected: WireMaskType) {
        let mask: WireMask = serde_json::from_str(json).unwrap();
        assert_eq!(mask.kind, expected);
    }

    #[test]
    fn test_detect_url_carries_models_and_attributes() {
        let url = client().detect_url(crate::detection::domain::face_detector::REQUESTED_ATTRIBUTES);
        assert!(url.starts_with("https://example.cognitiveservices.azure.com/face/v1.0/detect?"));
        assert!(url.contains("detectionModel=detection_03"));
        assert!(url.contains("recognitionModel=recognition_04"));
        assert!(url.contains("returnFaceId=false"));
        assert!(url.contains("returnFaceAttributes=headPose,blur,mask"));
    }

    #[test]
    fn test_detect_url_tolerates_trailing_slash() {
        let client = AzureFaceClient::new(FaceApiConfig {
            endpoint: "https://example.cognitiveservices.azure.com/".into(),
            key: "secret".into(),
        })
        .unwrap();
        let url = client.detect_url(&[FaceAttributeKind::Blur]);
        assert!(url.contains("azure.com/face/v1.0/detect?"));
        assert!(url.contains("returnFaceAttributes=blur"));
    }

    #[rstest]
    #[case::unauthorized(401)]
    #[case::forbidden(403)]
    fn test_auth_statuses_map_to_unauthorized(#[case] status: u16) {
        assert!(matches!(
            status_error(status, ""),
            ServiceError::Unauthorized
        ));
    }

    #[test]
    fn test_throttle_status_maps_to_throttled() {
        assert!(matches!(status_error(429, ""), ServiceError::Throttled));
    }

    #[test]
    fn test_bad_request_maps_to_invalid_image() {
        let body = r#"{"error": {"code": "InvalidImage", "message": "Decoding error."}}"#;
        match status_error(400, body) {
            ServiceError::InvalidImage(message) => assert_eq!(message, "Decoding error."),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_server_error_keeps_status_and_message() {
        let body = r#"{"error": {"code": "Internal", "message": "Something broke."}}"#;
        match status_error(500, body) {
            ServiceError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Something broke.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("not json"), "not json");
    }
}
