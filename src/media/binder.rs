//! Attaches a video URL to the off-screen video element and reports when
//! decoded frames are available for the disk's top-face texture.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Event, HtmlMediaElement, HtmlVideoElement};

use super::hls::{self, Hls};
use super::recovery::StreamSession;
use super::source::{PlaybackPath, VideoSource};
use crate::util::js_error;

const NATIVE_HLS_MIME: &str = "application/vnd.apple.mpegurl";

type MediaListener = (&'static str, Closure<dyn FnMut(Event)>);

pub struct VideoBinder {
    video: HtmlVideoElement,
    path: PlaybackPath,
    session: Rc<RefCell<Option<StreamSession<Hls>>>>,
    has_data: Rc<Cell<bool>>,
    listeners: Vec<MediaListener>,
    // hls.js holds references to these; they must outlive the client.
    hls_callbacks: Vec<Closure<dyn FnMut(JsValue, JsValue)>>,
}

impl VideoBinder {
    pub fn attach(video: HtmlVideoElement, url: &str) -> Self {
        video.set_muted(true);
        video.set_loop(true);
        video.set_cross_origin(Some("anonymous"));
        let _ = video.set_attribute("playsinline", "");

        let source = VideoSource::classify(url);
        let native_hls = !video.can_play_type(NATIVE_HLS_MIME).is_empty();
        let hls_supported = source.is_manifest() && Hls::available();
        let path = PlaybackPath::choose(&source, hls_supported, native_hls);

        let mut binder = Self {
            video,
            path,
            session: Rc::new(RefCell::new(None)),
            has_data: Rc::new(Cell::new(false)),
            listeners: Vec::new(),
            hls_callbacks: Vec::new(),
        };

        let has_data = binder.has_data.clone();
        binder.listen("loadeddata", move |_| {
            if !has_data.replace(true) {
                log::info!("video data available, binding texture");
            }
        });
        binder.listen("error", |_| {
            log::warn!("video element reported a media error")
        });

        match path {
            PlaybackPath::StreamingClient => binder.attach_stream(source.url()),
            PlaybackPath::Direct => binder.attach_direct(source.url()),
            PlaybackPath::Unsupported => {
                log::warn!(
                    "cannot play HLS manifest {}: no hls.js and no native support",
                    source.url()
                );
            }
        }
        binder
    }

    fn listen(&mut self, event: &'static str, handler: impl FnMut(Event) + 'static) {
        let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        if self
            .video
            .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            .is_ok()
        {
            self.listeners.push((event, cb));
        }
    }

    fn attach_stream(&mut self, url: &str) {
        log::info!("attaching HLS stream {url}");
        let client = Hls::create();

        let video = self.video.clone();
        let on_parsed = Closure::wrap(Box::new(move |_event: JsValue, _data: JsValue| {
            log::debug!("manifest parsed, starting playback");
            try_play(&video);
        }) as Box<dyn FnMut(JsValue, JsValue)>);
        client.on(
            hls::EVENT_MANIFEST_PARSED,
            on_parsed.as_ref().unchecked_ref(),
        );

        let session = self.session.clone();
        let on_error = Closure::wrap(Box::new(move |_event: JsValue, data: JsValue| {
            let error = hls::parse_error(&data);
            // Errors raised while the session is already handling one are dropped.
            match session.try_borrow_mut() {
                Ok(mut guard) => {
                    if let Some(session) = guard.as_mut() {
                        session.handle_error(&error);
                    }
                }
                Err(_) => log::debug!("stream error during recovery: {}", error.details),
            }
        }) as Box<dyn FnMut(JsValue, JsValue)>);
        client.on(hls::EVENT_ERROR, on_error.as_ref().unchecked_ref());

        client.load_source(url);
        client.attach_media(&self.video);
        self.hls_callbacks.push(on_parsed);
        self.hls_callbacks.push(on_error);
        *self.session.borrow_mut() = Some(StreamSession::new(client));
    }

    fn attach_direct(&mut self, url: &str) {
        log::info!("attaching video file {url}");
        let video = self.video.clone();
        self.listen("canplay", move |_| try_play(&video));
        self.video.set_src(url);
        self.video.load();
    }

    pub fn path(&self) -> PlaybackPath {
        self.path
    }

    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }

    /// True once media data has arrived and the element holds a current frame.
    pub fn has_frame(&self) -> bool {
        self.has_data.get() && self.video.ready_state() >= HtmlMediaElement::HAVE_CURRENT_DATA
    }

    /// Destroys the streaming client, removes listeners and unloads the
    /// element.
    pub fn detach(mut self) {
        let session = self.session.borrow_mut().take();
        if let Some(mut session) = session {
            session.teardown();
        }
        for (event, cb) in self.listeners.drain(..) {
            let _ = self
                .video
                .remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
        }
        let _ = self.video.pause();
        self.video.remove_attribute("src").ok();
        self.video.load();
        self.has_data.set(false);
        self.hls_callbacks.clear();
    }
}

/// Starts playback; a rejected promise (autoplay policy) is logged only.
fn try_play(video: &HtmlVideoElement) {
    match video.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!(
                    "video playback did not start ({}); user interaction may be required",
                    js_error(&err)
                );
            }
        }),
        Err(err) => log::warn!("video play() threw: {}", js_error(&err)),
    }
}
