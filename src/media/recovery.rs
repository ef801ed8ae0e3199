//! Fatal stream error recovery.
//!
//! Network errors reload, decode errors go through the client's media
//! recovery, anything else destroys the client for good. Once destroyed the
//! session ignores every later error.

/// Streaming client operations the recovery policy needs.
pub trait StreamingClient {
    fn start_load(&self);
    fn recover_media_error(&self);
    fn destroy(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamErrorKind {
    Network,
    Media,
    Other,
}

impl StreamErrorKind {
    /// Maps hls.js `ErrorTypes` values.
    pub fn from_hls_type(kind: &str) -> Self {
        match kind {
            "networkError" => Self::Network,
            "mediaError" => Self::Media,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamError {
    pub kind: StreamErrorKind,
    pub fatal: bool,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    Reload,
    RecoverMedia,
    Teardown,
}

impl RecoveryAction {
    pub fn for_kind(kind: StreamErrorKind) -> Self {
        match kind {
            StreamErrorKind::Network => Self::Reload,
            StreamErrorKind::Media => Self::RecoverMedia,
            StreamErrorKind::Other => Self::Teardown,
        }
    }
}

/// Owns a streaming client until it is torn down.
#[derive(Debug)]
pub struct StreamSession<C: StreamingClient> {
    client: Option<C>,
}

impl<C: StreamingClient> StreamSession<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Some(client),
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.client.is_some()
    }

    /// Applies the recovery policy. Returns the action taken, or `None` for
    /// non-fatal errors and errors after teardown.
    pub fn handle_error(&mut self, error: &StreamError) -> Option<RecoveryAction> {
        if !error.fatal {
            log::debug!("non-fatal stream error: {}", error.details);
            return None;
        }
        let client = self.client.as_ref()?;
        let action = RecoveryAction::for_kind(error.kind);
        match action {
            RecoveryAction::Reload => {
                log::warn!("stream network error ({}), reloading", error.details);
                client.start_load();
            }
            RecoveryAction::RecoverMedia => {
                log::warn!("stream media error ({}), recovering", error.details);
                client.recover_media_error();
            }
            RecoveryAction::Teardown => {
                log::error!(
                    "unrecoverable stream error ({}), stopping playback",
                    error.details
                );
                self.teardown();
            }
        }
        Some(action)
    }

    pub fn teardown(&mut self) {
        if let Some(client) = self.client.take() {
            client.destroy();
        }
    }
}
