use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, FutureExt, LocalBoxFuture};
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use web_sys::HtmlElement;
use wheel_core::{RandomSource, ReelMotion, SpinHost};
use yew::functional::UseForceUpdateHandle;
use yew::NodeRef;

pub fn set_transition(el: &HtmlElement, value: &str) {
    let style = el.style();
    let _ = style.set_property("transition", value);
    let _ = style.set_property("-webkit-transition", value);
}

pub fn set_transform(el: &HtmlElement, translate_y_px: f64) {
    let value = format!("translateY({translate_y_px}px)");
    let style = el.style();
    let _ = style.set_property("transform", &value);
    let _ = style.set_property("-webkit-transform", &value);
}

/// Jumps to `translate_y_px` with transitions disabled, then forces a reflow
/// so a transition set right after starts from this position.
pub fn place(el: &HtmlElement, translate_y_px: f64) {
    set_transition(el, "none");
    set_transform(el, translate_y_px);
    let _ = el.offset_height();
}

/// Rendered height of the first cell in a track, if there is one.
pub fn measure_first_cell(track: &HtmlElement) -> Option<f64> {
    let cell = track.query_selector(".wheel-cell").ok().flatten()?;
    Some(cell.get_bounding_client_rect().height())
}

/// `Math.random`, as used for unseeded wheels.
pub struct BrowserRng;

impl RandomSource for BrowserRng {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Spin host backed by CSS transitions on the rendered reel tracks.
pub struct DomHost {
    tracks: Rc<Vec<NodeRef>>,
    refresh: UseForceUpdateHandle,
}

impl DomHost {
    pub fn new(tracks: Rc<Vec<NodeRef>>, refresh: UseForceUpdateHandle) -> Self {
        Self { tracks, refresh }
    }

    fn track(&self, reel: usize) -> Option<HtmlElement> {
        self.tracks.get(reel)?.cast::<HtmlElement>()
    }
}

impl SpinHost for DomHost {
    type Settled = LocalBoxFuture<'static, ()>;
    type Delay = TimeoutFuture;

    fn animate(&self, motion: &ReelMotion) -> Self::Settled {
        let Some(track) = self.track(motion.reel) else {
            return future::ready(()).boxed_local();
        };

        place(&track, motion.from_px);

        let (tx, rx) = oneshot::channel();
        let listener = EventListener::once(&track, "transitionend", move |_| {
            let _ = tx.send(());
        });
        set_transition(&track, &motion.transition);
        set_transform(&track, motion.to_px);

        async move {
            // dropping the listener early would unregister it
            let _listener = listener;
            let _ = rx.await;
        }
        .boxed_local()
    }

    fn snap(&self, reel: usize, translate_px: f64) {
        if let Some(track) = self.track(reel) {
            place(&track, translate_px);
        }
    }

    fn delay(&self, ms: u32) -> Self::Delay {
        TimeoutFuture::new(ms)
    }

    fn refresh(&self) {
        self.refresh.force_update();
    }
}
