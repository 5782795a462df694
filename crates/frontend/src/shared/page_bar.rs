//! Mounting a page bar into a browser container.
//!
//! Wires the core controller to the `PageBar` component, the gloo-net
//! transport and `window.location`.

use std::any::Any;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, warn};
use web_sys::HtmlElement;

use crate::pagebar::{
    DeclaredAttributes, DetachGuard, Detachable, NavTarget, Navigator, PageBarConfig,
    PageBarError, PageBarModel, PageBarOptions, PageBarView, PageController, SwitchOutcome,
};
use crate::shared::api_utils::GlooTransport;
use crate::shared::components::pagination_controls::PageBar;

/// View writing models into a signal read by the `PageBar` component
#[derive(Clone, Copy)]
pub struct SignalView {
    model: RwSignal<Option<PageBarModel>>,
}

impl SignalView {
    pub fn new(model: RwSignal<Option<PageBarModel>>) -> Self {
        Self { model }
    }
}

impl PageBarView for SignalView {
    fn render(&self, model: PageBarModel) {
        self.model.set(Some(model));
    }

    fn inject_markup(&self, target: &str, markup: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            warn!("pagebar: no document, markup for {target} dropped");
            return;
        };
        match document.query_selector(target) {
            Ok(Some(element)) => element.set_inner_html(markup),
            Ok(None) => warn!("pagebar: async target {target} not found"),
            Err(e) => error!("pagebar: invalid async target {target}: {e:?}"),
        }
    }
}

/// Navigator setting `window.location.href`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            error!("pagebar: navigation to {url} failed: {e:?}");
        }
    }
}

pub type BrowserController = PageController<GlooTransport, SignalView, LocationNavigator>;

/// A page bar mounted into a container. Dropping it detaches the
/// controller and unmounts the bar.
pub struct MountedPageBar {
    controller: DetachGuard<BrowserController>,
    _mount: Box<dyn Any>,
}

impl MountedPageBar {
    pub fn controller(&self) -> &Rc<BrowserController> {
        self.controller.get()
    }

    pub fn switch_to_page(&self, page: i64) {
        let controller = Rc::clone(self.controller.get());
        spawn_switch(async move { controller.switch_to_page(page).await });
    }

    pub fn refresh(&self, options: PageBarOptions) {
        let controller = Rc::clone(self.controller.get());
        spawn_switch(async move { controller.refresh(options).await });
    }
}

impl Detachable for MountedPageBar {
    fn detach(&self) {
        self.controller.detach();
    }
}

/// Read the `data-*` attributes the widget understands off `container`.
pub fn declared_attributes(container: &HtmlElement) -> DeclaredAttributes {
    DeclaredAttributes::KEYS
        .iter()
        .filter_map(|key| {
            container
                .get_attribute(&format!("data-{key}"))
                .map(|value| (*key, value))
        })
        .collect()
}

/// Build the configuration, mount the page bar into `container` and run
/// the first switch.
pub fn initialize(
    container: HtmlElement,
    options: PageBarOptions,
) -> Result<MountedPageBar, PageBarError> {
    if web_sys::window().is_none() {
        return Err(PageBarError::Mount("window is not available".to_string()));
    }

    let config = PageBarConfig::build(&declared_attributes(&container), options)?;
    let model = RwSignal::new(None::<PageBarModel>);
    let controller = Rc::new(PageController::new(
        config,
        GlooTransport,
        SignalView::new(model),
        LocationNavigator,
    ));

    let mounted = Rc::clone(&controller);
    let handle = leptos::mount::mount_to(container, move || {
        let controller = StoredValue::new_local(mounted);
        let on_navigate = Callback::new(move |target: NavTarget| {
            let controller = controller.get_value();
            spawn_switch(async move { controller.switch_to(target).await });
        });
        let on_page_size_change = Callback::new(move |size: u32| {
            let controller = controller.get_value();
            spawn_switch(async move { controller.change_page_size(i64::from(size)).await });
        });
        view! {
            <PageBar
                model=model
                on_navigate=on_navigate
                on_page_size_change=on_page_size_change
            />
        }
    });

    let starting = Rc::clone(&controller);
    spawn_switch(async move { starting.start().await });

    Ok(MountedPageBar {
        controller: DetachGuard::new(controller),
        _mount: Box::new(handle),
    })
}

/// Run a switch without waiting for it. Load failures are logged by the
/// controller itself.
fn spawn_switch<F>(switch: F)
where
    F: std::future::Future<Output = Result<SwitchOutcome, PageBarError>> + 'static,
{
    leptos::task::spawn_local(async move {
        match switch.await {
            Err(err @ PageBarError::Configuration(_)) => error!("pagebar: {err}"),
            Ok(SwitchOutcome::Stale) => debug!("pagebar: switch finished after detach"),
            _ => {}
        }
    });
}
