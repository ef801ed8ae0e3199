use yew::prelude::*;

use crate::runtime::DiskRuntime;
use crate::state::ViewState;

#[derive(Properties, PartialEq, Clone)]
pub struct DiskViewProps {
    pub video_url: AttrValue,
    pub image_url: AttrValue,
}

#[function_component(DiskView)]
pub fn disk_view(props: &DiskViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let video_ref = use_node_ref();
    // Survives remounts of the runtime so scale carries over a source change.
    let state = use_mut_ref(ViewState::default);

    {
        let canvas_ref = canvas_ref.clone();
        let video_ref = video_ref.clone();
        let state = state.clone();
        use_effect_with(
            (props.video_url.clone(), props.image_url.clone()),
            move |(video_url, image_url)| {
                let runtime = match (
                    canvas_ref.cast::<web_sys::HtmlCanvasElement>(),
                    video_ref.cast::<web_sys::HtmlVideoElement>(),
                ) {
                    (Some(canvas), Some(video)) => {
                        match DiskRuntime::mount(canvas, video, video_url, image_url, state) {
                            Ok(runtime) => Some(runtime),
                            Err(e) => {
                                log::error!("failed to mount disk view: {e}");
                                None
                            }
                        }
                    }
                    _ => {
                        log::error!("disk view refs not attached");
                        None
                    }
                };
                move || {
                    if let Some(runtime) = runtime {
                        runtime.unmount();
                    }
                }
            },
        );
    }

    html! {
        <div id="disk-view" style="position:fixed; inset:0; overflow:hidden; background:#0e1116;">
            <canvas
                ref={canvas_ref}
                style="display:block; width:100vw; height:100vh; touch-action:none; cursor:grab;"
            />
            // Off-screen source for the top-face texture; the binder sets
            // muted/inline/loop before any playback attempt.
            <video ref={video_ref} style="display:none;" />
        </div>
    }
}
