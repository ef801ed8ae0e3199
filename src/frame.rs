// requestAnimationFrame loop with cancellation.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

type FrameCallback = Closure<dyn FnMut()>;

pub struct FrameLoop {
    window: Window,
    raf_id: Rc<Cell<Option<i32>>>,
    // The closure reschedules itself through this cell; clearing it breaks
    // the Rc cycle.
    closure: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    pub fn start(window: &Window, mut on_frame: impl FnMut() + 'static) -> Self {
        let raf_id = Rc::new(Cell::new(None));
        let closure: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        {
            let raf_id = raf_id.clone();
            let window_loop = window.clone();
            let closure_loop = closure.clone();
            *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                on_frame();
                if let Some(cb) = closure_loop.borrow().as_ref() {
                    raf_id.set(request(&window_loop, cb));
                }
            }) as Box<dyn FnMut()>));
        }
        if let Some(cb) = closure.borrow().as_ref() {
            raf_id.set(request(window, cb));
        }
        Self {
            window: window.clone(),
            raf_id,
            closure,
        }
    }

    pub fn stop(self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.closure.borrow_mut().take();
    }
}

fn request(window: &Window, cb: &FrameCallback) -> Option<i32> {
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!(
                "requestAnimationFrame failed: {}",
                crate::util::js_error(&e)
            );
            None
        }
    }
}
