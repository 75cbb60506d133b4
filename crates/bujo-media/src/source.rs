//! Camera vs. gallery classification from path hints.

use bujo_core::ImageSource;

const CAMERA_MARKERS: &[&str] = &["/dcim/camera/", "/camera/", "camera-capture", "/tmp/capture", "cache/camera"];
const GALLERY_MARKERS: &[&str] = &[
    "content://media",
    "ph://",
    "assets-library://",
    "/pictures/",
    "/dcim/",
    "/download/",
    "/whatsapp/",
    "/screenshots/",
    "/photos/",
];

/// Classify where an image came from.
///
/// An explicit hint from the caller wins; otherwise the URI is matched
/// against known camera paths first, then gallery paths.
pub fn classify(uri: &str, hint: Option<ImageSource>) -> ImageSource {
    if let Some(hint) = hint.filter(|h| *h != ImageSource::Unknown) {
        return hint;
    }
    let lowered = uri.to_lowercase().replace('\\', "/");
    if CAMERA_MARKERS.iter().any(|m| lowered.contains(m)) {
        ImageSource::Camera
    } else if GALLERY_MARKERS.iter().any(|m| lowered.contains(m)) {
        ImageSource::Gallery
    } else {
        ImageSource::Unknown
    }
}
