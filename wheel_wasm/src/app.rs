use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, FocusOptions, HtmlElement, KeyboardEvent, MouseEvent, Node};
use wheel_core::{
    drive_spin, track_cells, CloseReason, FocusTarget, RandomSource, SeededRng, Wheel,
    SPINNING_CLASS,
};
use yew::prelude::*;

use crate::host::{self, BrowserRng, DomHost};

/// Shared handle to one widget's state. Equality is identity.
#[derive(Clone)]
pub struct WheelHandle(pub Rc<RefCell<Wheel>>);

impl WheelHandle {
    pub fn new(wheel: Wheel) -> Self {
        Self(Rc::new(RefCell::new(wheel)))
    }
}

impl PartialEq for WheelHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub wheel: WheelHandle,
    /// The `.wheel` element the widget renders into.
    pub root: Element,
}

fn random_source(seed: Option<&str>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => {
            let rng = SeededRng::new(seed, 0);
            info!(seed_hash = %rng.seed_hash_hex(), "seeded spins");
            Box::new(rng)
        }
        None => Box::new(BrowserRng),
    }
}

fn focus(node: &NodeRef) {
    if let Some(el) = node.cast::<HtmlElement>() {
        let opts = FocusOptions::new();
        opts.set_prevent_scroll(true);
        let _ = el.focus_with_options(&opts);
    }
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let wheel = props.wheel.0.clone();
    let force = use_force_update();
    let rng = {
        let seed = wheel.borrow().config().seed.clone();
        use_mut_ref(move || random_source(seed.as_deref()))
    };
    let reel_count = wheel.borrow().reels().len();
    let tracks = use_memo(reel_count, |&n| {
        (0..n).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let trigger_ref = use_node_ref();
    let dialog_ref = use_node_ref();
    let card_ref = use_node_ref();

    // Measure the first cell of each track and pre-position it at its base.
    {
        let wheel = wheel.clone();
        let tracks = tracks.clone();
        use_effect_with(reel_count, move |_| {
            for (index, node) in tracks.iter().enumerate() {
                let Some(track) = node.cast::<HtmlElement>() else {
                    continue;
                };
                let measured = host::measure_first_cell(&track);
                match wheel.borrow_mut().measure_reel(index, measured) {
                    Ok(px) => host::place(&track, px),
                    Err(err) => warn!(%err, "cannot position reel"),
                }
            }
        });
    }

    let view = wheel.borrow().presentation();

    {
        let root = props.root.clone();
        use_effect_with(view.spinning, move |&spinning| {
            let _ = root.class_list().toggle_with_force(SPINNING_CLASS, spinning);
        });
    }

    {
        let wheel = wheel.clone();
        let card_ref = card_ref.clone();
        let trigger_ref = trigger_ref.clone();
        use_effect(move || {
            let target = wheel.borrow_mut().take_focus();
            match target {
                Some(FocusTarget::DialogCard) => focus(&card_ref),
                Some(FocusTarget::Trigger) => focus(&trigger_ref),
                None => {}
            }
        });
    }

    let on_spin = {
        let wheel = wheel.clone();
        let tracks = tracks.clone();
        let force = force.clone();
        Callback::from(move |_: MouseEvent| {
            let plan = wheel.borrow_mut().begin_spin(&mut *rng.borrow_mut());
            let Some(plan) = plan else {
                return;
            };
            let host = DomHost::new(tracks.clone(), force.clone());
            let wheel = wheel.clone();
            wasm_bindgen_futures::spawn_local(async move {
                drive_spin(&wheel, plan, &host).await;
            });
        })
    };

    let close = {
        let wheel = wheel.clone();
        Callback::from(move |reason: CloseReason| {
            if wheel.borrow_mut().close_dialog(reason) {
                force.force_update();
            }
        })
    };
    let on_close = close.reform(|_: MouseEvent| CloseReason::CloseButton);
    let on_backdrop = {
        let close = close.clone();
        let dialog_ref = dialog_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            if target.is_some() && target == dialog_ref.get() {
                close.emit(CloseReason::Backdrop);
            }
        })
    };
    let on_keydown = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            close.emit(CloseReason::Escape);
        }
    });

    let w = wheel.borrow();
    let items = w.items();
    let cells: Html = track_cells(items.len(), w.config())
        .map(|i| {
            html! {
                <div class="wheel-cell" data-item-index={i.to_string()}>{ &items[i].title }</div>
            }
        })
        .collect();
    let result_id = w.config().result_id.clone();

    html! {
        <>
            <div class="wheel-viewport">
                <div class="wheel-mask" aria-hidden={view.mask_hidden.then_some("true")}>
                    { for tracks.iter().map(|node| html! {
                        <div class="wheel-col">
                            <div class="wheel-track" ref={node.clone()}>{ cells.clone() }</div>
                        </div>
                    }) }
                </div>
            </div>
            <button
                class="wheel-spin"
                type="button"
                ref={trigger_ref}
                disabled={view.trigger_disabled}
                aria-disabled={view.trigger_disabled.then_some("true")}
                onclick={on_spin}
            >
                {"Spin"}
            </button>
            <div
                id={result_id}
                class="wheel-result"
                role="dialog"
                aria-modal="true"
                hidden={view.dialog_hidden()}
                ref={dialog_ref}
                onclick={on_backdrop}
                onkeydown={on_keydown}
            >
                <div class="wheel-card" tabindex="-1" ref={card_ref}>
                    if let Some(fields) = &view.dialog {
                        <h2 data-title="">{ &fields.title }</h2>
                        if let Some(desc) = &fields.description {
                            <p data-desc="">{ desc }</p>
                        }
                        if let Some(author) = &fields.author {
                            <p data-author="">{ author }</p>
                        }
                        if let Some(tag) = &fields.tag {
                            <span data-tag="">{ tag }</span>
                        }
                    }
                    <button class="wheel-close" type="button" onclick={on_close}>{"Close"}</button>
                </div>
            </div>
        </>
    }
}
