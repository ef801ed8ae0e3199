use super::disk_view::DiskView;
use crate::model::{DEFAULT_IMAGE_URL, DEFAULT_VIDEO_URL};
use crate::util::query_param;
use yew::prelude::*;

/// Source URLs for the two faces. `?video=` and `?image=` on the page URL
/// override the built-in defaults.
#[derive(Clone, PartialEq)]
struct Sources {
    video: AttrValue,
    image: AttrValue,
}

impl Sources {
    fn from_page() -> Self {
        let window = web_sys::window();
        let param = |name: &str, default: &'static str| -> AttrValue {
            window
                .as_ref()
                .and_then(|w| query_param(w, name))
                .map(AttrValue::from)
                .unwrap_or(AttrValue::Static(default))
        };
        Self {
            video: param("video", DEFAULT_VIDEO_URL),
            image: param("image", DEFAULT_IMAGE_URL),
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let sources = use_state(Sources::from_page);

    html! {
        <div id="root">
            <DiskView video_url={sources.video.clone()} image_url={sources.image.clone()} />
        </div>
    }
}
