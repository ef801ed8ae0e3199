//! Video source classification and playback path selection.

/// A video URL tagged by how it must be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Segmented HLS manifest (`.m3u8`).
    Manifest(String),
    /// Anything the media element can load directly.
    File(String),
}

impl VideoSource {
    pub fn classify(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.to_ascii_lowercase().ends_with(".m3u8") {
            Self::Manifest(url.to_owned())
        } else {
            Self::File(url.to_owned())
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Manifest(url) | Self::File(url) => url,
        }
    }

    pub fn is_manifest(&self) -> bool {
        matches!(self, Self::Manifest(_))
    }
}

/// How a source ends up on the video element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPath {
    /// hls.js fetches segments and feeds the element through MSE.
    StreamingClient,
    /// `src` is assigned and the element loads it itself.
    Direct,
    /// Manifest with neither hls.js nor native HLS support.
    Unsupported,
}

impl PlaybackPath {
    pub fn choose(source: &VideoSource, hls_supported: bool, native_hls: bool) -> Self {
        match source {
            VideoSource::File(_) => Self::Direct,
            VideoSource::Manifest(_) if hls_supported => Self::StreamingClient,
            VideoSource::Manifest(_) if native_hls => Self::Direct,
            VideoSource::Manifest(_) => Self::Unsupported,
        }
    }
}
