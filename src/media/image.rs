// Static underside image, loaded asynchronously and handed to the renderer once.
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, HtmlImageElement};

use crate::error::DiskError;

pub struct ImageLoader {
    image: HtmlImageElement,
    loaded: Rc<RefCell<Option<HtmlImageElement>>>,
    on_load: Closure<dyn FnMut(Event)>,
    on_error: Closure<dyn FnMut(Event)>,
}

impl ImageLoader {
    pub fn load(url: &str) -> Result<Self, DiskError> {
        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some("anonymous"));
        let loaded = Rc::new(RefCell::new(None));

        let on_load = {
            let loaded = loaded.clone();
            let image = image.clone();
            Closure::wrap(Box::new(move |_: Event| {
                log::debug!(
                    "underside image loaded ({}x{})",
                    image.natural_width(),
                    image.natural_height()
                );
                *loaded.borrow_mut() = Some(image.clone());
            }) as Box<dyn FnMut(Event)>)
        };
        let on_error = {
            let url = url.to_owned();
            Closure::wrap(Box::new(move |_: Event| {
                log::warn!("failed to load underside image {url}; face stays untextured");
            }) as Box<dyn FnMut(Event)>)
        };
        image.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        image.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
        image.set_src(url);

        Ok(Self {
            image,
            loaded,
            on_load,
            on_error,
        })
    }

    /// The decoded image, at most once.
    pub fn take_loaded(&self) -> Option<HtmlImageElement> {
        self.loaded.borrow_mut().take()
    }

    pub fn detach(self) {
        let _ = self
            .image
            .remove_event_listener_with_callback("load", self.on_load.as_ref().unchecked_ref());
        let _ = self
            .image
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
        self.image.set_src("");
    }
}
