//! Immutable widget configuration.
//!
//! A configuration is assembled once from three layers, lowest precedence
//! first: hard defaults, attributes declared on the container
//! (`data-page-size="20"` and friends), and options passed by the caller.
//! `refresh` overlays new options on top of the resulting value.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use contracts::shared::pagination::PageResult;
use indexmap::IndexMap;
use log::debug;

use super::error::PageBarError;
use super::state::{
    is_valid_positive, PaginationState, DEFAULT_PAGE_BAR_SIZE, DEFAULT_PAGE_NUMBER,
    DEFAULT_PAGE_SIZE, DEFAULT_TOTAL_ROW,
};

/// Ordered flat key → value request parameters
pub type Params = IndexMap<String, String>;
pub type ParamsProvider = Rc<dyn Fn() -> Params>;
pub type RenderFn = Rc<dyn Fn(&PageResult)>;
pub type CallbackFn = Rc<dyn Fn(&Params)>;

pub const DEFAULT_PAGE_SIZE_MENU: [u32; 4] = [10, 20, 50, 100];
pub const DEFAULT_ASYNC_TARGET: &str = "body";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

impl HttpMethod {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            _ => None,
        }
    }
}

/// What the server answers with in async mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncMode {
    /// Rendered markup embedding the pagination info box
    Markup,
    /// JSON with `pageNumber`, `pageSize`, `totalRow` and a payload
    Structured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Full-page navigation to a URL carrying the page
    #[default]
    Navigate,
    Async(AsyncMode),
}

/// What to do with malformed initial numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Replace with defaults and carry on
    #[default]
    Correct,
    Reject,
}

/// One configuration layer. Unset fields fall through to the layer below.
#[derive(Clone, Default)]
pub struct PageBarOptions {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub total_row: Option<i64>,
    pub page_bar_size: Option<i64>,
    pub page_size_menu: Option<Vec<u32>>,
    pub class_name: Option<String>,
    pub async_load: Option<bool>,
    pub server_side_page: Option<bool>,
    pub async_target: Option<String>,
    pub method: Option<HttpMethod>,
    pub url: Option<String>,
    pub params: Option<ParamsProvider>,
    pub render: Option<RenderFn>,
    pub callback: Option<CallbackFn>,
    pub numeric_policy: Option<NumericPolicy>,
}

impl PageBarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    fn defaults() -> Self {
        Self {
            page_number: Some(i64::from(DEFAULT_PAGE_NUMBER)),
            page_size: Some(i64::from(DEFAULT_PAGE_SIZE)),
            total_row: Some(DEFAULT_TOTAL_ROW as i64),
            page_bar_size: Some(i64::from(DEFAULT_PAGE_BAR_SIZE)),
            page_size_menu: Some(DEFAULT_PAGE_SIZE_MENU.to_vec()),
            class_name: None,
            async_load: Some(false),
            server_side_page: Some(false),
            async_target: Some(DEFAULT_ASYNC_TARGET.to_string()),
            method: Some(HttpMethod::default()),
            url: Some(String::new()),
            params: None,
            render: None,
            callback: None,
            numeric_policy: Some(NumericPolicy::default()),
        }
    }

    /// Lay `upper` over `self`; set fields of `upper` win.
    pub fn overlay(self, upper: PageBarOptions) -> Self {
        Self {
            page_number: upper.page_number.or(self.page_number),
            page_size: upper.page_size.or(self.page_size),
            total_row: upper.total_row.or(self.total_row),
            page_bar_size: upper.page_bar_size.or(self.page_bar_size),
            page_size_menu: upper.page_size_menu.or(self.page_size_menu),
            class_name: upper.class_name.or(self.class_name),
            async_load: upper.async_load.or(self.async_load),
            server_side_page: upper.server_side_page.or(self.server_side_page),
            async_target: upper.async_target.or(self.async_target),
            method: upper.method.or(self.method),
            url: upper.url.or(self.url),
            params: upper.params.or(self.params),
            render: upper.render.or(self.render),
            callback: upper.callback.or(self.callback),
            numeric_policy: upper.numeric_policy.or(self.numeric_policy),
        }
    }

    pub fn page_number(mut self, page_number: i64) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn total_row(mut self, total_row: i64) -> Self {
        self.total_row = Some(total_row);
        self
    }

    pub fn page_bar_size(mut self, page_bar_size: i64) -> Self {
        self.page_bar_size = Some(page_bar_size);
        self
    }

    pub fn page_size_menu(mut self, menu: Vec<u32>) -> Self {
        self.page_size_menu = Some(menu);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn load_mode(mut self, mode: LoadMode) -> Self {
        match mode {
            LoadMode::Navigate => {
                self.async_load = Some(false);
            }
            LoadMode::Async(sub) => {
                self.async_load = Some(true);
                self.server_side_page = Some(sub == AsyncMode::Markup);
            }
        }
        self
    }

    pub fn async_target(mut self, selector: impl Into<String>) -> Self {
        self.async_target = Some(selector.into());
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn params(mut self, provider: impl Fn() -> Params + 'static) -> Self {
        self.params = Some(Rc::new(provider));
        self
    }

    pub fn render(mut self, render: impl Fn(&PageResult) + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn callback(mut self, callback: impl Fn(&Params) + 'static) -> Self {
        self.callback = Some(Rc::new(callback));
        self
    }

    pub fn numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = Some(policy);
        self
    }
}

impl fmt::Debug for PageBarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageBarOptions")
            .field("page_number", &self.page_number)
            .field("page_size", &self.page_size)
            .field("total_row", &self.total_row)
            .field("page_bar_size", &self.page_bar_size)
            .field("page_size_menu", &self.page_size_menu)
            .field("class_name", &self.class_name)
            .field("async_load", &self.async_load)
            .field("server_side_page", &self.server_side_page)
            .field("async_target", &self.async_target)
            .field("method", &self.method)
            .field("url", &self.url)
            .field("params", &self.params.is_some())
            .field("render", &self.render.is_some())
            .field("callback", &self.callback.is_some())
            .field("numeric_policy", &self.numeric_policy)
            .finish()
    }
}

/// `data-*` attributes read off the container, keyed without the `data-` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredAttributes(BTreeMap<String, String>);

impl DeclaredAttributes {
    /// Attribute names the widget understands
    pub const KEYS: [&'static str; 11] = [
        "page-number",
        "page-size",
        "total-row",
        "page-bar-size",
        "page-size-menu",
        "class-name",
        "async-load",
        "server-side-page",
        "async-target",
        "async-type",
        "url",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Interpret the attributes as a configuration layer.
    ///
    /// Numbers that do not parse are kept as 0 so the numeric policy
    /// decides whether they are corrected or rejected.
    pub fn to_options(&self) -> PageBarOptions {
        let number = |key: &str| self.get(key).map(|v| v.trim().parse::<i64>().unwrap_or(0));
        let flag = |key: &str| self.get(key).and_then(parse_flag);

        PageBarOptions {
            page_number: number("page-number"),
            page_size: number("page-size"),
            total_row: number("total-row"),
            page_bar_size: number("page-bar-size"),
            page_size_menu: self.get("page-size-menu").and_then(parse_menu),
            class_name: self.get("class-name").map(str::to_string),
            async_load: flag("async-load"),
            server_side_page: flag("server-side-page"),
            async_target: self.get("async-target").map(str::to_string),
            method: self.get("async-type").and_then(HttpMethod::parse),
            url: self.get("url").map(str::to_string),
            ..PageBarOptions::default()
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DeclaredAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Accepts `[10,20,50]` or `10,20,50`.
fn parse_menu(raw: &str) -> Option<Vec<u32>> {
    let menu = serde_json::from_str::<Vec<u32>>(raw).ok().or_else(|| {
        raw.split(',')
            .map(|part| part.trim().parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()
    })?;
    Some(menu.into_iter().filter(|size| *size > 0).collect())
}

/// Fully resolved widget configuration.
#[derive(Clone, Debug)]
pub struct PageBarConfig {
    layers: PageBarOptions,
    initial: PaginationState,
    page_bar_size: u32,
    load_mode: LoadMode,
}

impl PageBarConfig {
    /// Combine defaults, declared attributes and caller options.
    pub fn build(declared: &DeclaredAttributes, options: PageBarOptions) -> Result<Self, PageBarError> {
        let layers = PageBarOptions::defaults()
            .overlay(declared.to_options())
            .overlay(options);
        Self::resolve(layers)
    }

    /// Configuration with nothing declared on the container.
    pub fn from_options(options: PageBarOptions) -> Result<Self, PageBarError> {
        Self::build(&DeclaredAttributes::default(), options)
    }

    /// New configuration with `options` laid over this one.
    pub fn merged(&self, options: PageBarOptions) -> Result<Self, PageBarError> {
        Self::resolve(self.layers.clone().overlay(options))
    }

    fn resolve(layers: PageBarOptions) -> Result<Self, PageBarError> {
        let policy = layers.numeric_policy.unwrap_or_default();

        let page_number = checked(policy, "page number", layers.page_number, is_valid_positive)?;
        let page_size = checked(policy, "page size", layers.page_size, is_valid_positive)?;
        let total_row = checked(policy, "total row", layers.total_row, |raw| raw >= 0)?;
        let page_bar_size = checked(policy, "page bar size", layers.page_bar_size, is_valid_positive)?
            .and_then(|raw| u32::try_from(raw).ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_BAR_SIZE);

        let initial = PaginationState::new(
            page_number.unwrap_or(0),
            page_size.unwrap_or(0),
            total_row.unwrap_or(0),
        );

        let load_mode = match (
            layers.async_load.unwrap_or(false),
            layers.server_side_page.unwrap_or(false),
        ) {
            (false, _) => LoadMode::Navigate,
            (true, true) => LoadMode::Async(AsyncMode::Markup),
            (true, false) => LoadMode::Async(AsyncMode::Structured),
        };

        Ok(Self {
            layers,
            initial,
            page_bar_size,
            load_mode,
        })
    }

    pub fn initial_state(&self) -> PaginationState {
        self.initial
    }

    pub fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    pub fn page_bar_size(&self) -> u32 {
        self.page_bar_size
    }

    pub fn page_size_menu(&self) -> &[u32] {
        self.layers.page_size_menu.as_deref().unwrap_or(&[])
    }

    pub fn class_name(&self) -> Option<&str> {
        self.layers.class_name.as_deref()
    }

    pub fn url(&self) -> &str {
        self.layers.url.as_deref().unwrap_or_default()
    }

    pub fn method(&self) -> HttpMethod {
        self.layers.method.unwrap_or_default()
    }

    pub fn async_target(&self) -> &str {
        self.layers
            .async_target
            .as_deref()
            .unwrap_or(DEFAULT_ASYNC_TARGET)
    }

    /// Extra request parameters from the caller's provider, in its order.
    pub fn params(&self) -> Params {
        self.layers
            .params
            .as_ref()
            .map(|provider| provider())
            .unwrap_or_default()
    }

    pub fn render_fn(&self) -> Option<&RenderFn> {
        self.layers.render.as_ref()
    }

    pub fn callback_fn(&self) -> Option<&CallbackFn> {
        self.layers.callback.as_ref()
    }
}

fn checked(
    policy: NumericPolicy,
    name: &str,
    raw: Option<i64>,
    valid: impl Fn(i64) -> bool,
) -> Result<Option<i64>, PageBarError> {
    match raw {
        Some(value) if !valid(value) => match policy {
            NumericPolicy::Correct => {
                debug!("pagebar: {name} {value} is invalid, using default");
                Ok(None)
            }
            NumericPolicy::Reject => Err(PageBarError::Configuration(format!(
                "{name} must be a positive number, got {value}"
            ))),
        },
        other => Ok(other),
    }
}
