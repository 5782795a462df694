use crate::pagebar::{NavTarget, PageBarModel};
use leptos::prelude::*;

/// PageBar component - draws the page bar of one controller
///
/// Renders nothing until the controller produced its first model.
#[component]
pub fn PageBar(
    /// Latest model pushed by the controller
    #[prop(into)]
    model: Signal<Option<PageBarModel>>,

    /// Callback when a page link or control is activated
    on_navigate: Callback<NavTarget>,

    /// Callback when a size is picked from the page-size menu
    on_page_size_change: Callback<u32>,
) -> impl IntoView {
    move || {
        model.get().map(|m| {
            let class = match &m.class_name {
                Some(extra) => format!("pagination bPage bPageRight {extra}"),
                None => "pagination bPage bPageRight".to_string(),
            };
            let info = m.info_line();
            let page_size = m.page_size;

            let menu = (!m.page_size_menu.is_empty()).then(|| {
                let options = m
                    .page_size_menu
                    .iter()
                    .map(|&size| {
                        view! {
                            <option value={size.to_string()} selected={size == page_size}>
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view();
                view! {
                    <li class="disabled bPageList">
                        <a>
                            "Per page "
                            <select
                                class="bPageDropList"
                                on:change=move |ev| {
                                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                                        on_page_size_change.run(size);
                                    }
                                }
                            >
                                {options}
                            </select>
                            " records"
                        </a>
                    </li>
                }
            });

            let pages = m
                .page_links()
                .map(|(page, target)| {
                    view! {
                        <li class:active={!target.is_enabled()}>
                            <a
                                href="javascript:void(0);"
                                on:click=move |_| on_navigate.run(target)
                            >
                                {page.to_string()}
                            </a>
                        </li>
                    }
                })
                .collect_view();

            view! {
                <div class=class>
                    <ul>
                        {menu}
                        <li class="disabled bPageInfo">
                            <a>{info}</a>
                        </li>
                        {control("bPageControlButton bPageFirstPage", "First", m.controls.first, on_navigate)}
                        {control("bPageControlButton bPagePreviousPage", "«", m.controls.prev, on_navigate)}
                        {pages}
                        {control("bPageControlButton bPageNextPage", "»", m.controls.next, on_navigate)}
                        {control("bPageControlButton bPageLastPage", "Last", m.controls.last, on_navigate)}
                    </ul>
                </div>
            }
        })
    }
}

fn control(
    class: &'static str,
    label: &'static str,
    target: NavTarget,
    on_navigate: Callback<NavTarget>,
) -> impl IntoView {
    view! {
        <li class=class class:disabled={!target.is_enabled()}>
            <a href="javascript:void(0);" on:click=move |_| on_navigate.run(target)>
                {label}
            </a>
        </li>
    }
}
