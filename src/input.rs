//! DOM listener registration for the disk view.
//!
//! `InputBinding::attach` registers every listener the view needs and keeps
//! the closures; `detach` removes exactly those listeners again.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Event, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent, WheelEvent,
    Window,
};

use crate::error::DiskError;
use crate::state::ViewState;
use crate::util::{canvas_point, fit_canvas};

type Listener = Closure<dyn FnMut(Event)>;

struct Registered {
    target: EventTarget,
    event: &'static str,
    callback: Listener,
}

pub struct InputBinding {
    registered: Vec<Registered>,
}

impl InputBinding {
    pub fn attach(
        window: &Window,
        canvas: &HtmlCanvasElement,
        state: Rc<RefCell<ViewState>>,
    ) -> Result<Self, DiskError> {
        let mut binding = Self {
            registered: Vec::new(),
        };
        if let Err(e) = binding.register_all(window, canvas, state) {
            binding.detach();
            return Err(e);
        }
        Ok(binding)
    }

    fn register_all(
        &mut self,
        window: &Window,
        canvas: &HtmlCanvasElement,
        state: Rc<RefCell<ViewState>>,
    ) -> Result<(), DiskError> {
        let canvas_target: &EventTarget = canvas.as_ref();
        let window_target: &EventTarget = window.as_ref();

        // Pointer rotation
        {
            let state = state.clone();
            let canvas_c = canvas.clone();
            self.listen(canvas_target, "pointerdown", move |e| {
                let Some(e) = e.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let _ = canvas_c.set_pointer_capture(e.pointer_id());
                let pos = canvas_point(&canvas_c, e.client_x() as f64, e.client_y() as f64);
                state.borrow_mut().on_pointer_down(e.pointer_id(), pos);
            })?;
        }
        {
            let state = state.clone();
            let canvas_c = canvas.clone();
            self.listen(canvas_target, "pointermove", move |e| {
                let Some(e) = e.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let pos = canvas_point(&canvas_c, e.client_x() as f64, e.client_y() as f64);
                state.borrow_mut().on_pointer_move(e.pointer_id(), pos);
            })?;
        }
        {
            let state = state.clone();
            self.listen(canvas_target, "pointerup", move |e| {
                if let Some(e) = e.dyn_ref::<PointerEvent>() {
                    state.borrow_mut().on_pointer_up(e.pointer_id());
                }
            })?;
        }
        {
            let state = state.clone();
            self.listen(canvas_target, "pointercancel", move |e| {
                if let Some(e) = e.dyn_ref::<PointerEvent>() {
                    state.borrow_mut().on_pointer_cancel(e.pointer_id());
                }
            })?;
        }

        // Wheel zoom
        {
            let state = state.clone();
            self.listen(canvas_target, "wheel", move |e| {
                e.prevent_default();
                if let Some(e) = e.dyn_ref::<WheelEvent>() {
                    state.borrow_mut().on_wheel(e.delta_y());
                }
            })?;
        }

        // Touch pinch: every phase reports the full current touch list.
        for event in ["touchstart", "touchmove", "touchend", "touchcancel"] {
            let state = state.clone();
            let canvas_c = canvas.clone();
            self.listen(canvas_target, event, move |e| {
                let Some(e) = e.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let touches = e.touches();
                let points: Vec<Vec2> = (0..touches.length())
                    .filter_map(|i| touches.item(i))
                    .map(|t| canvas_point(&canvas_c, t.client_x() as f64, t.client_y() as f64))
                    .collect();
                if points.len() >= 2 {
                    e.prevent_default();
                }
                state.borrow_mut().on_touches(&points);
            })?;
        }

        // Diagnostic orientation dump
        {
            let state = state.clone();
            self.listen(window_target, "keydown", move |e| {
                let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if e.key() != "o" && e.key() != "O" {
                    return;
                }
                match state.borrow().report() {
                    Some(report) => match serde_json::to_string(&report) {
                        Ok(json) => log::info!("disk pose {json}"),
                        Err(err) => log::warn!("could not serialize pose: {err}"),
                    },
                    None => log::info!("disk pose unavailable: scene not attached"),
                }
            })?;
        }

        // Resize
        {
            let window_c = window.clone();
            let canvas_c = canvas.clone();
            self.listen(window_target, "resize", move |_| {
                let viewport = fit_canvas(&window_c, &canvas_c);
                state.borrow_mut().on_resize(viewport);
            })?;
        }

        Ok(())
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), DiskError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.registered.push(Registered {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    pub fn listener_count(&self) -> usize {
        self.registered.len()
    }

    pub fn detach(self) {
        for r in self.registered {
            let _ = r
                .target
                .remove_event_listener_with_callback(r.event, r.callback.as_ref().unchecked_ref());
        }
    }
}
