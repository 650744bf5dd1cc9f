use anyhow::{anyhow, Context};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::Element;
use wheel_core::{parse_items, Wheel, WheelConfig};

use crate::app::{App, AppProps, WheelHandle};

pub const ROOT_SELECTOR: &str = ".wheel";

/// Mounts a widget on every `.wheel` element of the page.
///
/// Each widget renders its own viewport, trigger and result dialog inside
/// its root. `data-result-id` becomes the id of that rendered dialog; a
/// page element elsewhere with the same id is left untouched.
pub fn mount_all() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let roots = match document.query_selector_all(ROOT_SELECTOR) {
        Ok(roots) => roots,
        Err(_) => return,
    };
    if roots.length() == 0 {
        debug!("no wheel root on page");
        return;
    }

    for index in 0..roots.length() {
        let Some(root) = roots.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = mount(root).await {
                warn!(wheel = index, "wheel not initialized: {err:#}");
            }
        });
    }
}

/// Reads the root's `data-*` attributes. A broken `data-config` overlay is
/// logged and dropped; the remaining attributes still apply.
pub fn read_config(root: &Element) -> WheelConfig {
    let attr = |name: &str| root.get_attribute(&format!("data-{name}"));
    WheelConfig::from_attributes(attr).unwrap_or_else(|err| {
        warn!(%err, "ignoring data-config");
        WheelConfig::from_attributes(|name| if name == "config" { None } else { attr(name) })
            .unwrap_or_default()
    })
}

async fn mount(root: Element) -> anyhow::Result<()> {
    let config = read_config(&root);
    let url = resolve(&config.data_url)?;
    let text = fetch_text(url).await?;
    let items = parse_items(&text);
    let wheel = Wheel::new(config, items).context("wheel dataset")?;
    info!(
        items = wheel.items().len(),
        reels = wheel.reels().len(),
        "mounting wheel"
    );

    yew::Renderer::<App>::with_root_and_props(
        root.clone(),
        AppProps {
            wheel: WheelHandle::new(wheel),
            root,
        },
    )
    .render();
    Ok(())
}

/// Resolves a dataset path against the page URL.
fn resolve(path: &str) -> anyhow::Result<reqwest::Url> {
    let href = web_sys::window()
        .context("no window")?
        .location()
        .href()
        .map_err(|_| anyhow!("page location unavailable"))?;
    let base = reqwest::Url::parse(&href).context("page url")?;
    base.join(path).with_context(|| format!("dataset url {path:?}"))
}

async fn fetch_text(url: reqwest::Url) -> anyhow::Result<String> {
    let resp = reqwest::get(url.clone())
        .await
        .with_context(|| format!("fetching {url}"))?
        .error_for_status()?;
    Ok(resp.text().await?)
}
