//! Wires the controllers, media and renderer to a mounted canvas/video pair
//! and tears them down again on unmount.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{HtmlCanvasElement, HtmlVideoElement};

use crate::error::DiskError;
use crate::frame::FrameLoop;
use crate::input::InputBinding;
use crate::media::{ImageLoader, VideoBinder};
use crate::render::DiskRenderer;
use crate::state::ViewState;
use crate::util::fit_canvas;

/// GL and media resources that only exist when WebGL2 came up.
struct Stage {
    renderer: DiskRenderer,
    binder: VideoBinder,
    image: Option<ImageLoader>,
}

impl Stage {
    fn frame(&mut self, state: &ViewState) {
        if self.binder.has_frame() {
            self.renderer.mark_video_dirty();
        }
        if let Some(image) = self.image.as_ref().and_then(ImageLoader::take_loaded) {
            self.renderer.set_image(&image);
        }
        if let Some(scene) = &state.scene {
            self.renderer.draw(&scene.pose, &scene.camera, self.binder.video());
        }
    }

    fn dispose(self) {
        log::debug!(
            "disposing stage after {} video texture uploads via {:?}",
            self.renderer.video_uploads(),
            self.binder.path()
        );
        self.binder.detach();
        if let Some(image) = self.image {
            image.detach();
        }
        self.renderer.dispose();
    }
}

pub struct DiskRuntime {
    state: Rc<RefCell<ViewState>>,
    input: InputBinding,
    frame: Option<FrameLoop>,
    stage: Option<Rc<RefCell<Stage>>>,
}

impl DiskRuntime {
    pub fn mount(
        canvas: HtmlCanvasElement,
        video: HtmlVideoElement,
        video_url: &str,
        image_url: &str,
        state: Rc<RefCell<ViewState>>,
    ) -> Result<Self, DiskError> {
        let window = web_sys::window().ok_or(DiskError::MissingDom("window"))?;
        let viewport = fit_canvas(&window, &canvas);
        state.borrow_mut().on_resize(viewport);

        let input = InputBinding::attach(&window, &canvas, state.clone())?;
        log::debug!("attached {} input listeners", input.listener_count());

        let color = state.borrow().settings().color;
        let renderer = match DiskRenderer::new(&canvas, &color) {
            Ok(renderer) => renderer,
            Err(e) => {
                // Input stays attached; with no scene every gesture is a no-op.
                log::error!("disk renderer unavailable: {e}");
                return Ok(Self {
                    state,
                    input,
                    frame: None,
                    stage: None,
                });
            }
        };

        state.borrow_mut().attach_scene();
        let binder = VideoBinder::attach(video, video_url);
        let image = match ImageLoader::load(image_url) {
            Ok(loader) => Some(loader),
            Err(e) => {
                log::warn!("underside image not loaded: {e}");
                None
            }
        };
        let stage = Rc::new(RefCell::new(Stage {
            renderer,
            binder,
            image,
        }));

        let frame = {
            let state = state.clone();
            let stage = stage.clone();
            FrameLoop::start(&window, move || {
                let mut view = state.borrow_mut();
                view.on_frame();
                stage.borrow_mut().frame(&view);
            })
        };

        Ok(Self {
            state,
            input,
            frame: Some(frame),
            stage: Some(stage),
        })
    }

    pub fn unmount(self) {
        if let Some(frame) = self.frame {
            frame.stop();
        }
        if let Some(stage) = self.stage {
            match Rc::try_unwrap(stage) {
                Ok(stage) => stage.into_inner().dispose(),
                Err(_) => log::warn!("stage still referenced at unmount; GL resources leak"),
            }
        }
        self.input.detach();
        self.state.borrow_mut().detach_scene();
    }
}
