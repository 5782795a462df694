//! Page-switch dispatch and reconciliation of server state.

use std::cell::{Cell, RefCell};

use contracts::shared::pagination::PageResult;
use log::{debug, error};

use super::config::{AsyncMode, LoadMode, PageBarConfig, PageBarOptions};
use super::error::PageBarError;
use super::markup::extract_page_info;
use super::state::PaginationState;
use super::transport::{Navigator, ResponseKind, Transport, TransportRequest, TransportResponse};
use super::url::{navigation_url, request_params};
use super::view::{PageBarModel, PageBarView};
use super::window::NavTarget;

/// How a page switch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Disabled control, or a page number the caller should not have sent
    Ignored,
    Navigated(String),
    /// Navigation mode without a URL
    NoDestination,
    Rendered,
    /// The controller was detached while the request was in flight
    Stale,
}

/// Something a registry can tear down.
pub trait Detachable {
    fn detach(&self);
}

/// Owns the pagination state of one page bar.
///
/// All methods take `&self`; the controller is meant to sit behind an `Rc`
/// shared by event handlers. No borrow is held across an await, so a click
/// arriving while a request is in flight starts its own switch and the last
/// response to complete wins.
pub struct PageController<T, V, N> {
    config: RefCell<PageBarConfig>,
    state: Cell<PaginationState>,
    /// Last state confirmed by the server, restored when a switch fails
    settled: Cell<PaginationState>,
    generation: Cell<u64>,
    attached: Cell<bool>,
    transport: T,
    view: V,
    navigator: N,
}

impl<T, V, N> PageController<T, V, N>
where
    T: Transport,
    V: PageBarView,
    N: Navigator,
{
    pub fn new(config: PageBarConfig, transport: T, view: V, navigator: N) -> Self {
        Self {
            state: Cell::new(config.initial_state()),
            settled: Cell::new(config.initial_state()),
            config: RefCell::new(config),
            generation: Cell::new(0),
            attached: Cell::new(true),
            transport,
            view,
            navigator,
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state.get()
    }

    pub fn config(&self) -> PageBarConfig {
        self.config.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn model(&self) -> PageBarModel {
        PageBarModel::build(&self.state.get(), &self.config.borrow())
    }

    /// Draw the page bar from the current state.
    pub fn render(&self) {
        self.view.render(self.model());
    }

    /// First paint after attaching: navigation mode draws right away,
    /// async mode loads page 1.
    pub async fn start(&self) -> Result<SwitchOutcome, PageBarError> {
        let mode = self.config.borrow().load_mode();
        match mode {
            LoadMode::Navigate => {
                self.render();
                Ok(SwitchOutcome::Rendered)
            }
            LoadMode::Async(_) => self.dispatch(Some(1)).await,
        }
    }

    /// Handle activation of a page link or control.
    pub async fn switch_to(&self, target: NavTarget) -> Result<SwitchOutcome, PageBarError> {
        match target {
            NavTarget::Disabled => Ok(SwitchOutcome::Ignored),
            NavTarget::Page(page) => self.dispatch(Some(page)).await,
        }
    }

    /// Caller-facing switch; non-positive page numbers are ignored.
    pub async fn switch_to_page(&self, page: i64) -> Result<SwitchOutcome, PageBarError> {
        match u32::try_from(page) {
            Ok(page) if page > 0 => self.dispatch(Some(page)).await,
            _ => {
                debug!("pagebar: ignoring switch to page {page}");
                Ok(SwitchOutcome::Ignored)
            }
        }
    }

    /// Switch to the current page again.
    pub async fn reload(&self) -> Result<SwitchOutcome, PageBarError> {
        self.dispatch(None).await
    }

    /// New page size from the page-size menu; goes back to page 1.
    pub async fn change_page_size(&self, page_size: i64) -> Result<SwitchOutcome, PageBarError> {
        if !self.attached.get() {
            return Ok(SwitchOutcome::Stale);
        }
        let mut state = self.state.get();
        state.set_page_size(page_size);
        self.state.set(state);
        self.dispatch(Some(1)).await
    }

    /// Merge `options` over the configuration, reset the state from it and
    /// switch to the resulting page.
    pub async fn refresh(&self, options: PageBarOptions) -> Result<SwitchOutcome, PageBarError> {
        if !self.attached.get() {
            return Ok(SwitchOutcome::Stale);
        }
        let config = self.config.borrow().merged(options)?;
        self.state.set(config.initial_state());
        self.settled.set(config.initial_state());
        *self.config.borrow_mut() = config;
        self.dispatch(None).await
    }

    async fn dispatch(&self, requested: Option<u32>) -> Result<SwitchOutcome, PageBarError> {
        if !self.attached.get() {
            return Ok(SwitchOutcome::Stale);
        }

        let current = self.state.get();
        let total_page = current.total_page();
        let mut target = requested
            .filter(|page| *page > 0)
            .unwrap_or(current.page_number());
        if total_page > 0 && target > total_page {
            target = total_page;
        }

        let config = self.config();
        match config.load_mode() {
            LoadMode::Navigate => {
                let params = config.params();
                match navigation_url(config.url(), target, current.page_size(), &params) {
                    Some(url) => {
                        debug!("pagebar: navigating to {url}");
                        self.navigator.navigate(&url);
                        Ok(SwitchOutcome::Navigated(url))
                    }
                    None => {
                        debug!("pagebar: no url configured, page {target} not loaded");
                        Ok(SwitchOutcome::NoDestination)
                    }
                }
            }
            LoadMode::Async(mode) => self.load(&config, mode, current, target).await,
        }
    }

    async fn load(
        &self,
        config: &PageBarConfig,
        mode: AsyncMode,
        current: PaginationState,
        target: u32,
    ) -> Result<SwitchOutcome, PageBarError> {
        let mut optimistic = current;
        optimistic.set_page_number(i64::from(target));
        self.state.set(optimistic);

        let params = request_params(target, optimistic.page_size(), config.params());
        let request = TransportRequest {
            url: config.url().to_string(),
            method: config.method(),
            params: params.clone(),
            kind: match mode {
                AsyncMode::Markup => ResponseKind::Text,
                AsyncMode::Structured => ResponseKind::Json,
            },
        };

        let generation = self.generation.get();
        let response = self.transport.request(request).await;
        if generation != self.generation.get() || !self.attached.get() {
            debug!("pagebar: dropping response for page {target}, page bar was detached");
            return Ok(SwitchOutcome::Stale);
        }

        let applied = response.and_then(|response| self.apply(config, mode, response));
        if let Err(err) = applied {
            error!("pagebar: switch to page {target} failed: {err}");
            self.state.set(self.settled.get());
            return Err(err);
        }
        self.settled.set(self.state.get());

        if let Some(callback) = config.callback_fn() {
            callback(&params);
        }
        self.render();
        Ok(SwitchOutcome::Rendered)
    }

    /// Reconcile state from the response and hand the content to the view
    /// or to the caller's renderer.
    fn apply(
        &self,
        config: &PageBarConfig,
        mode: AsyncMode,
        response: TransportResponse,
    ) -> Result<(), PageBarError> {
        let mut state = self.state.get();
        match (mode, response) {
            (AsyncMode::Markup, TransportResponse::Text(markup)) => {
                let info = extract_page_info(&markup)?;
                state.reconcile(info.page_number, info.page_size, info.total_row);
                self.state.set(state);
                self.view.inject_markup(config.async_target(), &markup);
            }
            (AsyncMode::Structured, TransportResponse::Json(value)) => {
                let result: PageResult = serde_json::from_value(value).map_err(|e| {
                    PageBarError::Transport(format!("Failed to parse page result: {e}"))
                })?;
                state.reconcile(result.page_number, result.page_size, result.total_row);
                self.state.set(state);
                if let Some(render) = config.render_fn() {
                    render(&result);
                }
            }
            (_, response) => {
                return Err(PageBarError::Transport(format!(
                    "unexpected response kind for {mode:?} mode: {response:?}"
                )));
            }
        }
        Ok(())
    }
}

impl<T, V, N> Detachable for PageController<T, V, N> {
    /// Stop accepting switches and drop responses still in flight.
    fn detach(&self) {
        self.attached.set(false);
        self.generation.set(self.generation.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagebar::config::{HttpMethod, Params};
    use crate::pagebar::registry::DetachGuard;
    use crate::pagebar::window::PageWindow;
    use async_trait::async_trait;
    use contracts::shared::pagination::render_info_box;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeTransport {
        replies: RefCell<VecDeque<Result<TransportResponse, PageBarError>>>,
        pending: RefCell<VecDeque<oneshot::Receiver<TransportResponse>>>,
        requests: RefCell<Vec<TransportRequest>>,
    }

    impl FakeTransport {
        fn reply(&self, response: TransportResponse) {
            self.replies.borrow_mut().push_back(Ok(response));
        }

        fn fail(&self, message: &str) {
            self.replies
                .borrow_mut()
                .push_back(Err(PageBarError::Transport(message.to_string())));
        }

        fn hold(&self) -> oneshot::Sender<TransportResponse> {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().push_back(rx);
            tx
        }

        fn last_request(&self) -> TransportRequest {
            self.requests.borrow().last().cloned().unwrap()
        }
    }

    #[async_trait(?Send)]
    impl Transport for FakeTransport {
        async fn request(&self, request: TransportRequest) -> Result<TransportResponse, PageBarError> {
            self.requests.borrow_mut().push(request);
            let pending = self.pending.borrow_mut().pop_front();
            if let Some(rx) = pending {
                return rx
                    .await
                    .map_err(|_| PageBarError::Transport("cancelled".to_string()));
            }
            let reply = self.replies.borrow_mut().pop_front();
            reply.unwrap_or_else(|| Err(PageBarError::Transport("no reply queued".to_string())))
        }
    }

    #[derive(Default)]
    struct FakeView {
        renders: RefCell<Vec<PageBarModel>>,
        injected: RefCell<Vec<(String, String)>>,
    }

    impl FakeView {
        fn last(&self) -> PageBarModel {
            self.renders.borrow().last().cloned().unwrap()
        }
    }

    impl PageBarView for FakeView {
        fn render(&self, model: PageBarModel) {
            self.renders.borrow_mut().push(model);
        }

        fn inject_markup(&self, target: &str, markup: &str) {
            self.injected
                .borrow_mut()
                .push((target.to_string(), markup.to_string()));
        }
    }

    #[derive(Default)]
    struct FakeNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl Navigator for FakeNavigator {
        fn navigate(&self, url: &str) {
            self.visited.borrow_mut().push(url.to_string());
        }
    }

    type TestController = PageController<Rc<FakeTransport>, Rc<FakeView>, Rc<FakeNavigator>>;

    struct Harness {
        controller: TestController,
        transport: Rc<FakeTransport>,
        view: Rc<FakeView>,
        navigator: Rc<FakeNavigator>,
    }

    fn harness(options: PageBarOptions) -> Harness {
        let transport = Rc::new(FakeTransport::default());
        let view = Rc::new(FakeView::default());
        let navigator = Rc::new(FakeNavigator::default());
        let config = PageBarConfig::from_options(options).unwrap();
        Harness {
            controller: PageController::new(
                config,
                Rc::clone(&transport),
                Rc::clone(&view),
                Rc::clone(&navigator),
            ),
            transport,
            view,
            navigator,
        }
    }

    fn markup_page(page_number: u32, page_size: u32, total_row: u64) -> TransportResponse {
        TransportResponse::Text(format!(
            "<ul><li>row</li></ul>{}",
            render_info_box(page_number, page_size, total_row)
        ))
    }

    fn structured() -> PageBarOptions {
        PageBarOptions::new()
            .url("/api/rows")
            .load_mode(LoadMode::Async(AsyncMode::Structured))
    }

    fn markup() -> PageBarOptions {
        PageBarOptions::new()
            .url("/rows")
            .async_target("#rows")
            .load_mode(LoadMode::Async(AsyncMode::Markup))
    }

    #[test]
    fn test_navigation_mode_renders_on_start() {
        let h = harness(PageBarOptions::new().url("/orders").total_row(95).page_number(5));
        assert_eq!(block_on(h.controller.start()).unwrap(), SwitchOutcome::Rendered);
        let model = h.view.last();
        assert_eq!(model.window, PageWindow { start: 3, end: 7 });
        assert_eq!(model.active_page, 5);
        assert!(h.transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_navigation_mode_builds_url() {
        let h = harness(
            PageBarOptions::new()
                .url("/orders")
                .total_row(95)
                .params(|| Params::from([("status".to_string(), "open".to_string())])),
        );
        let outcome = block_on(h.controller.switch_to(NavTarget::Page(7))).unwrap();
        let expected = "/orders?1=1&pageNumber=7&pageSize=10&status=open";
        assert_eq!(outcome, SwitchOutcome::Navigated(expected.to_string()));
        assert_eq!(*h.navigator.visited.borrow(), vec![expected.to_string()]);
        assert_eq!(h.controller.state().page_number(), 1);
    }

    #[test]
    fn test_navigation_target_is_clamped_to_total_page() {
        let h = harness(PageBarOptions::new().url("/orders").total_row(95));
        let outcome = block_on(h.controller.switch_to(NavTarget::Page(40))).unwrap();
        assert_eq!(
            outcome,
            SwitchOutcome::Navigated("/orders?1=1&pageNumber=10&pageSize=10".to_string())
        );
    }

    #[test]
    fn test_navigation_without_url_does_nothing() {
        let h = harness(PageBarOptions::new().total_row(95));
        let outcome = block_on(h.controller.switch_to(NavTarget::Page(2))).unwrap();
        assert_eq!(outcome, SwitchOutcome::NoDestination);
        assert!(h.navigator.visited.borrow().is_empty());
    }

    #[test]
    fn test_disabled_target_is_a_no_op() {
        let h = harness(structured());
        let outcome = block_on(h.controller.switch_to(NavTarget::Disabled)).unwrap();
        assert_eq!(outcome, SwitchOutcome::Ignored);
        assert!(h.transport.requests.borrow().is_empty());
        assert!(h.view.renders.borrow().is_empty());
    }

    #[test]
    fn test_non_positive_page_is_ignored() {
        let h = harness(structured());
        assert_eq!(
            block_on(h.controller.switch_to_page(0)).unwrap(),
            SwitchOutcome::Ignored
        );
        assert_eq!(
            block_on(h.controller.switch_to_page(-1)).unwrap(),
            SwitchOutcome::Ignored
        );
        assert!(h.transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_structured_response_is_authoritative() {
        let rendered = Rc::new(RefCell::new(Vec::new()));
        let called = Rc::new(RefCell::new(Vec::new()));
        let (r, c) = (Rc::clone(&rendered), Rc::clone(&called));
        let h = harness(
            structured()
                .method(HttpMethod::Get)
                .render(move |result: &PageResult| r.borrow_mut().push(result.clone()))
                .callback(move |params: &Params| c.borrow_mut().push(params.clone())),
        );
        h.transport.reply(TransportResponse::Json(json!({
            "pageNumber": 2,
            "pageSize": 20,
            "totalRow": 45,
            "rows": ["a", "b"]
        })));

        let outcome = block_on(h.controller.switch_to_page(2)).unwrap();
        assert_eq!(outcome, SwitchOutcome::Rendered);

        let state = h.controller.state();
        assert_eq!(
            (state.page_number(), state.page_size(), state.total_row()),
            (2, 20, 45)
        );
        assert_eq!(state.total_page(), 3);

        let request = h.transport.last_request();
        assert_eq!(request.url, "/api/rows");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.kind, ResponseKind::Json);
        assert_eq!(request.params["pageNumber"], "2");
        assert_eq!(request.params["pageSize"], "10");

        assert_eq!(rendered.borrow().len(), 1);
        assert_eq!(rendered.borrow()[0].get("rows"), Some(&json!(["a", "b"])));
        assert_eq!(called.borrow().len(), 1);
        assert_eq!(called.borrow()[0]["pageNumber"], "2");

        let model = h.view.last();
        assert_eq!(model.total_page, 3);
        assert_eq!(model.window, PageWindow { start: 1, end: 3 });
        assert_eq!(model.controls.prev, NavTarget::Page(1));
        assert_eq!(model.controls.next, NavTarget::Page(3));
        assert_eq!(model.controls.last, NavTarget::Page(3));
    }

    #[test]
    fn test_async_start_loads_first_page() {
        let h = harness(structured());
        h.transport
            .reply(TransportResponse::Json(json!({"pageNumber": 1, "pageSize": 10, "totalRow": 95})));
        assert_eq!(block_on(h.controller.start()).unwrap(), SwitchOutcome::Rendered);
        assert_eq!(h.transport.last_request().params["pageNumber"], "1");
        assert_eq!(h.view.last().window, PageWindow { start: 1, end: 5 });
    }

    #[test]
    fn test_markup_response_is_injected_and_reconciled() {
        let h = harness(markup().total_row(95));
        h.transport.reply(markup_page(4, 10, 95));

        let outcome = block_on(h.controller.switch_to(NavTarget::Page(4))).unwrap();
        assert_eq!(outcome, SwitchOutcome::Rendered);
        assert_eq!(h.transport.last_request().kind, ResponseKind::Text);
        assert_eq!(h.transport.last_request().method, HttpMethod::Post);

        let injected = h.view.injected.borrow();
        assert_eq!(injected.len(), 1);
        assert_eq!(injected[0].0, "#rows");
        assert!(injected[0].1.contains("paginationInfoBox"));
        assert_eq!(h.view.last().window, PageWindow { start: 2, end: 6 });
    }

    #[test]
    fn test_server_overrides_optimistic_page() {
        let h = harness(markup().total_row(95));
        h.transport.reply(markup_page(1, 10, 3));
        block_on(h.controller.switch_to(NavTarget::Page(9))).unwrap();
        let state = h.controller.state();
        assert_eq!(state.page_number(), 1);
        assert_eq!(state.total_row(), 3);
        assert_eq!(state.total_page(), 1);
    }

    #[test]
    fn test_markup_missing_total_row_leaves_state_untouched() {
        let called = Rc::new(Cell::new(false));
        let c = Rc::clone(&called);
        let h = harness(
            markup()
                .total_row(95)
                .page_number(3)
                .callback(move |_: &Params| c.set(true)),
        );
        let before = h.controller.state();
        h.transport.reply(TransportResponse::Text(
            r#"<div class="paginationInfoBox">
                 <input type="hidden" id="bPagePageNumber" value="4">
                 <input type="hidden" id="bPagePageSize" value="10">
               </div>"#
                .to_string(),
        ));

        let err = block_on(h.controller.switch_to(NavTarget::Page(4))).unwrap_err();
        assert!(matches!(err, PageBarError::Extraction(_)));
        assert_eq!(h.controller.state(), before);
        assert!(h.view.injected.borrow().is_empty());
        assert!(h.view.renders.borrow().is_empty());
        assert!(!called.get());
    }

    #[test]
    fn test_transport_failure_is_returned_and_not_retried() {
        let h = harness(structured().total_row(95));
        h.transport.fail("connection refused");
        let err = block_on(h.controller.switch_to(NavTarget::Page(3))).unwrap_err();
        assert!(matches!(err, PageBarError::Transport(_)));
        assert_eq!(h.transport.requests.borrow().len(), 1);
        assert_eq!(h.controller.state().page_number(), 1);
    }

    #[test]
    fn test_wrong_response_kind_is_an_error() {
        let h = harness(structured());
        h.transport.reply(TransportResponse::Text("<p>hi</p>".to_string()));
        let err = block_on(h.controller.switch_to(NavTarget::Page(1))).unwrap_err();
        assert!(matches!(err, PageBarError::Transport(_)));
    }

    #[test]
    fn test_switch_to_current_page_is_idempotent() {
        let h = harness(structured());
        let page = json!({"pageNumber": 5, "pageSize": 10, "totalRow": 95});
        h.transport.reply(TransportResponse::Json(page.clone()));
        h.transport.reply(TransportResponse::Json(page));

        block_on(h.controller.switch_to_page(5)).unwrap();
        let first = h.view.last();
        let state = h.controller.state();
        block_on(h.controller.reload()).unwrap();

        assert_eq!(h.transport.last_request().params["pageNumber"], "5");
        assert_eq!(h.view.last(), first);
        assert_eq!(h.controller.state(), state);
    }

    #[test]
    fn test_page_size_change_goes_back_to_first_page() {
        let h = harness(PageBarOptions::new().url("/orders").total_row(95).page_number(6));
        let outcome = block_on(h.controller.change_page_size(50)).unwrap();
        assert_eq!(
            outcome,
            SwitchOutcome::Navigated("/orders?1=1&pageNumber=1&pageSize=50".to_string())
        );
        assert_eq!(h.controller.state().page_size(), 50);
    }

    #[test]
    fn test_refresh_merges_config_and_reloads() {
        let h = harness(structured().total_row(95).page_number(2));
        h.transport
            .reply(TransportResponse::Json(json!({"pageNumber": 2, "pageSize": 25, "totalRow": 60})));

        let outcome = block_on(h.controller.refresh(PageBarOptions::new().page_size(25))).unwrap();
        assert_eq!(outcome, SwitchOutcome::Rendered);
        let request = h.transport.last_request();
        assert_eq!(request.url, "/api/rows");
        assert_eq!(request.params["pageNumber"], "2");
        assert_eq!(request.params["pageSize"], "25");
        assert_eq!(h.controller.state().total_row(), 60);
    }

    #[test]
    fn test_late_response_after_detach_is_dropped() {
        let h = harness(structured());
        let reply = h.transport.hold();

        block_on(async {
            let mut pending = Box::pin(h.controller.switch_to_page(3));
            assert!(futures::poll!(pending.as_mut()).is_pending());

            h.controller.detach();
            reply
                .send(TransportResponse::Json(
                    json!({"pageNumber": 3, "pageSize": 10, "totalRow": 95}),
                ))
                .unwrap();

            assert_eq!(pending.await.unwrap(), SwitchOutcome::Stale);
        });

        assert!(h.view.renders.borrow().is_empty());
        assert_eq!(h.controller.state().total_row(), 0);
        assert_eq!(
            block_on(h.controller.switch_to_page(1)).unwrap(),
            SwitchOutcome::Stale
        );
    }

    #[test]
    fn test_last_completed_response_wins() {
        let h = harness(structured().total_row(95));
        let slow = h.transport.hold();
        let fast = h.transport.hold();

        block_on(async {
            let mut first = Box::pin(h.controller.switch_to_page(2));
            assert!(futures::poll!(first.as_mut()).is_pending());
            let mut second = Box::pin(h.controller.switch_to_page(7));
            assert!(futures::poll!(second.as_mut()).is_pending());

            fast.send(TransportResponse::Json(
                json!({"pageNumber": 7, "pageSize": 10, "totalRow": 95}),
            ))
            .unwrap();
            assert_eq!(second.await.unwrap(), SwitchOutcome::Rendered);

            slow.send(TransportResponse::Json(
                json!({"pageNumber": 2, "pageSize": 10, "totalRow": 95}),
            ))
            .unwrap();
            assert_eq!(first.await.unwrap(), SwitchOutcome::Rendered);
        });

        assert_eq!(h.controller.state().page_number(), 2);
        assert_eq!(h.view.renders.borrow().len(), 2);
    }

    #[test]
    fn test_dropping_the_owner_drops_late_responses() {
        let called = Rc::new(Cell::new(false));
        let c = Rc::clone(&called);
        let Harness {
            controller,
            transport,
            view,
            ..
        } = harness(structured().callback(move |_: &Params| c.set(true)));
        let reply = transport.hold();
        let owner = DetachGuard::new(Rc::new(controller));
        let in_flight = Rc::clone(owner.get());

        block_on(async {
            let mut pending = Box::pin(in_flight.switch_to_page(3));
            assert!(futures::poll!(pending.as_mut()).is_pending());

            drop(owner);
            reply
                .send(TransportResponse::Json(
                    json!({"pageNumber": 3, "pageSize": 10, "totalRow": 95}),
                ))
                .unwrap();

            assert_eq!(pending.await.unwrap(), SwitchOutcome::Stale);
        });

        assert!(!called.get());
        assert!(view.renders.borrow().is_empty());
        assert_eq!(in_flight.state().total_row(), 0);
    }

    #[test]
    fn test_detached_controller_is_not_mutated() {
        let h = harness(structured().total_row(95).page_number(4));
        let before = h.controller.state();
        h.controller.detach();

        assert_eq!(
            block_on(h.controller.change_page_size(50)).unwrap(),
            SwitchOutcome::Stale
        );
        assert_eq!(
            block_on(h.controller.refresh(PageBarOptions::new().page_size(25))).unwrap(),
            SwitchOutcome::Stale
        );
        assert_eq!(h.controller.state(), before);
        assert_eq!(h.controller.config().initial_state().page_size(), 10);
        assert!(h.transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_overlapping_failures_restore_last_settled_state() {
        let h = harness(structured().total_row(95));
        let first_reply = h.transport.hold();
        let second_reply = h.transport.hold();

        block_on(async {
            let mut first = Box::pin(h.controller.switch_to_page(2));
            assert!(futures::poll!(first.as_mut()).is_pending());
            let mut second = Box::pin(h.controller.switch_to_page(7));
            assert!(futures::poll!(second.as_mut()).is_pending());

            drop(first_reply);
            assert!(first.await.is_err());
            drop(second_reply);
            assert!(second.await.is_err());
        });

        assert_eq!(h.controller.state().page_number(), 1);
        assert!(h.view.renders.borrow().is_empty());
    }

    #[test]
    fn test_failure_after_success_restores_reconciled_state() {
        let h = harness(structured());
        h.transport
            .reply(TransportResponse::Json(json!({"pageNumber": 4, "pageSize": 10, "totalRow": 95})));
        h.transport.fail("timeout");

        block_on(h.controller.switch_to_page(4)).unwrap();
        let settled = h.controller.state();
        assert!(block_on(h.controller.change_page_size(50)).is_err());

        assert_eq!(h.controller.state(), settled);
        assert_eq!(h.view.last().page_size, 10);
    }
}
