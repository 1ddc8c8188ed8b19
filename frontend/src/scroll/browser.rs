//! DOM binding for [`ScrollCoordinator`].
//!
//! Every listener, timer and observer created here is owned by a
//! [`SectionScroll`]; dropping it detaches all of them.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};
use yew::Callback;

use super::config::ScrollConfig;
use super::coordinator::{FrameOutcome, NavKey, ScrollCoordinator, Viewport};
use super::visibility::VisibilitySample;
use crate::sections::SectionRegistry;

pub const SECTION_INDEX_ATTR: &str = "data-section-index";

pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// An event listener that is removed again when dropped.
pub struct EventSubscription {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Holds at most one pending timeout. Arming replaces (and so cancels) the
/// previous one.
#[derive(Default)]
pub struct TimerSlot {
    pending: RefCell<Option<Timeout>>,
}

impl TimerSlot {
    pub fn arm(&self, delay_ms: u32, callback: impl FnOnce() + 'static) {
        self.pending.replace(Some(Timeout::new(delay_ms, callback)));
    }

    pub fn cancel(&self) {
        self.pending.replace(None);
    }
}

/// `requestAnimationFrame` loop that keeps going while the frame callback
/// returns true.
pub struct FrameLoop {
    inner: Rc<FrameLoopInner>,
}

struct FrameLoopInner {
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    pub fn new(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let inner = Rc::new(FrameLoopInner {
            pending: Cell::new(None),
            callback: RefCell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            if on_frame(timestamp) {
                inner.request();
            }
        }) as Box<dyn FnMut(f64)>);
        inner.callback.replace(Some(callback));
        Self { inner }
    }

    pub fn request(&self) {
        self.inner.request();
    }
}

impl FrameLoopInner {
    fn request(&self) {
        if self.pending.get().is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(callback) = self.callback.borrow().as_ref() {
            if let Ok(id) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                self.pending.set(Some(id));
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.inner.pending.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

/// `IntersectionObserver` over the section elements. Disconnects on drop.
pub struct SectionObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl SectionObserver {
    pub fn attach(
        elements: &[Element],
        config: &ScrollConfig,
        mut on_batch: impl FnMut(Vec<VisibilitySample>) + 'static,
    ) -> Option<Self> {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            let samples = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let index = entry
                        .target()
                        .get_attribute(SECTION_INDEX_ATTR)?
                        .parse()
                        .ok()?;
                    Some(VisibilitySample {
                        index,
                        ratio: entry.intersection_ratio(),
                        is_intersecting: entry.is_intersecting(),
                    })
                })
                .collect();
            on_batch(samples);
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(config.root_margin);
        let thresholds: js_sys::Array = config
            .thresholds
            .iter()
            .map(|t| JsValue::from_f64(*t))
            .collect();
        init.set_threshold(&thresholds);

        let observer = match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        ) {
            Ok(observer) => observer,
            Err(e) => {
                warn!("IntersectionObserver unavailable: {:?}", e);
                return None;
            }
        };
        for element in elements {
            observer.observe(element);
        }
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct DomViewport {
    window: Window,
    anchors: Vec<String>,
}

impl DomViewport {
    pub fn new(window: Window, registry: &SectionRegistry) -> Self {
        Self {
            window,
            anchors: registry.iter().map(|s| s.anchor()).collect(),
        }
    }

    fn element(&self, index: usize) -> Option<Element> {
        self.window
            .document()?
            .get_element_by_id(self.anchors.get(index)?)
    }

    fn elements(&self) -> Vec<Element> {
        (0..self.anchors.len()).filter_map(|i| self.element(i)).collect()
    }

    /// Native smooth `scrollIntoView`, aligned to the top. Leaves history
    /// alone.
    fn reveal(&self, index: usize) -> bool {
        let Some(element) = self.element(index) else {
            return false;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        options.set_inline(ScrollLogicalPosition::Nearest);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

impl Viewport for DomViewport {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn section_top(&self, index: usize) -> Option<f64> {
        let element = self.element(index)?;
        Some(element.get_bounding_client_rect().top() + self.scroll_y())
    }

    fn scroll_to(&mut self, y: f64) {
        self.window.scroll_to_with_x_and_y(0.0, y);
    }
}

struct Shared {
    registry: SectionRegistry,
    coordinator: RefCell<ScrollCoordinator>,
    viewport: RefCell<DomViewport>,
    wake: TimerSlot,
    frames: RefCell<Option<FrameLoop>>,
    observer: RefCell<Option<SectionObserver>>,
    on_change: Callback<usize>,
}

impl Shared {
    /// Re-arms the wake-up timer and the frame loop for whatever the
    /// coordinator is waiting on.
    fn schedule(self: &Rc<Self>) {
        let (animating, deadline) = {
            let coordinator = self.coordinator.borrow();
            (coordinator.is_animating(), coordinator.next_deadline())
        };
        if animating {
            if let Some(frames) = self.frames.borrow().as_ref() {
                frames.request();
            }
        }
        match deadline {
            Some(due) => {
                let delay = (due - now_ms()).max(0.0).ceil() as u32;
                let weak = Rc::downgrade(self);
                self.wake.arm(delay, move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.poll();
                    }
                });
            }
            None => self.wake.cancel(),
        }
    }

    fn poll(self: &Rc<Self>) {
        let changed = {
            let mut viewport = self.viewport.borrow_mut();
            self.coordinator.borrow_mut().poll(now_ms(), &mut *viewport)
        };
        if let Some(index) = changed {
            self.on_change.emit(index);
        }
        self.schedule();
    }

    fn frame(self: &Rc<Self>, timestamp: f64) -> bool {
        let (outcome, current) = {
            let mut viewport = self.viewport.borrow_mut();
            let mut coordinator = self.coordinator.borrow_mut();
            let outcome = coordinator.on_animation_frame(timestamp, &mut *viewport);
            (outcome, coordinator.current_index())
        };
        if outcome == FrameOutcome::Finished {
            self.on_change.emit(current);
            self.schedule();
        }
        outcome == FrameOutcome::Continue
    }

    fn on_click(self: &Rc<Self>, event: &Event) {
        let Some(href) = section_link_href(event) else {
            return;
        };
        let outcome = {
            let viewport = self.viewport.borrow();
            self.coordinator
                .borrow_mut()
                .on_hash_link_click(&href, &self.registry, now_ms(), &*viewport)
        };
        if outcome.prevents_default() {
            event.prevent_default();
        }
        self.schedule();
    }

    fn on_key_down(self: &Rc<Self>, event: &Event) {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if is_editable_target(event) {
            return;
        }
        let Some(key) = NavKey::from_key(&event.key()) else {
            return;
        };
        let handled = {
            let viewport = self.viewport.borrow();
            self.coordinator.borrow_mut().on_key_down(key, now_ms(), &*viewport)
        };
        if handled {
            event.prevent_default();
        }
        self.schedule();
    }

    fn attach_observer(self: &Rc<Self>) {
        // The old observer must be gone before a new one starts reporting.
        drop(self.observer.take());

        let elements = self.viewport.borrow().elements();
        let config = self.coordinator.borrow().config().clone();
        let weak = Rc::downgrade(self);
        let observer = SectionObserver::attach(&elements, &config, move |samples| {
            if let Some(shared) = weak.upgrade() {
                let queued = shared
                    .coordinator
                    .borrow_mut()
                    .on_visibility_batch(&samples, now_ms());
                if queued {
                    shared.schedule();
                }
            }
        });
        debug!("observing {} sections", elements.len());
        self.observer.replace(observer);
    }

    fn handle_initial_hash(self: &Rc<Self>, window: &Window) {
        let fragment = window.location().hash().unwrap_or_default();
        let selected = self
            .coordinator
            .borrow_mut()
            .handle_initial_hash(&fragment, &self.registry);
        let Some(index) = selected else {
            return;
        };
        self.on_change.emit(index);

        // The sections may not be laid out yet; reveal on the next frame.
        let weak: Weak<Self> = Rc::downgrade(self);
        let reveal = Closure::once_into_js(move || {
            if let Some(shared) = weak.upgrade() {
                if !shared.viewport.borrow().reveal(index) {
                    debug!("initial section {} has no element", index);
                }
            }
        });
        let _ = window.request_animation_frame(reveal.unchecked_ref());
    }
}

fn section_link_href(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let link = target.closest("a[href^=\"#\"]").ok()??;
    link.get_attribute("href")
}

fn is_editable_target(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "SELECT" | "TEXTAREA"))
        .unwrap_or(false)
}

/// Section scrolling for one mounted sections list.
pub struct SectionScroll {
    shared: Rc<Shared>,
    _subscriptions: Vec<EventSubscription>,
    _observer_delay: Timeout,
}

impl SectionScroll {
    pub fn mount(
        registry: SectionRegistry,
        config: ScrollConfig,
        on_change: Callback<usize>,
    ) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let observer_delay_ms = config.observer_delay_ms;

        let shared = Rc::new(Shared {
            coordinator: RefCell::new(ScrollCoordinator::new(registry.len(), config)),
            viewport: RefCell::new(DomViewport::new(window.clone(), &registry)),
            registry,
            wake: TimerSlot::default(),
            frames: RefCell::new(None),
            observer: RefCell::new(None),
            on_change,
        });

        let weak = Rc::downgrade(&shared);
        shared.frames.replace(Some(FrameLoop::new(move |timestamp| {
            weak.upgrade().map(|s| s.frame(timestamp)).unwrap_or(false)
        })));

        shared.handle_initial_hash(&window);

        let mut subscriptions = Vec::new();
        let weak = Rc::downgrade(&shared);
        subscriptions.extend(EventSubscription::new(&document, "click", move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_click(&event);
            }
        }));
        let weak = Rc::downgrade(&shared);
        subscriptions.extend(EventSubscription::new(&window, "keydown", move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_key_down(&event);
            }
        }));

        let weak = Rc::downgrade(&shared);
        let observer_delay = Timeout::new(observer_delay_ms, move || {
            if let Some(shared) = weak.upgrade() {
                shared.attach_observer();
            }
        });

        Some(Self {
            shared,
            _subscriptions: subscriptions,
            _observer_delay: observer_delay,
        })
    }
}

impl Drop for SectionScroll {
    fn drop(&mut self) {
        self.shared.coordinator.borrow_mut().teardown();
        self.shared.wake.cancel();
        drop(self.shared.observer.take());
        drop(self.shared.frames.take());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::sections::FACILITY_SECTIONS;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::{Document, EventInit, KeyboardEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn append(tag: &str, attrs: &[(&str, &str)]) -> Element {
        let element = document().create_element(tag).unwrap();
        for (name, value) in attrs {
            element.set_attribute(name, value).unwrap();
        }
        document().body().unwrap().append_child(&element).unwrap();
        element
    }

    fn click(target: &EventTarget) -> bool {
        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("click", &init).unwrap();
        target.dispatch_event(&event).unwrap();
        event.default_prevented()
    }

    fn key_down(key: &str) -> bool {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        web_sys::window().unwrap().dispatch_event(&event).unwrap();
        event.default_prevented()
    }

    /// Three tall sections plus an in-page link to the second one.
    struct Page {
        elements: Vec<Element>,
        link: Element,
    }

    impl Page {
        fn new() -> Self {
            let elements = FACILITY_SECTIONS[..3]
                .iter()
                .enumerate()
                .map(|(i, section)| {
                    let index = i.to_string();
                    append(
                        "section",
                        &[
                            ("id", section.anchor().as_str()),
                            (SECTION_INDEX_ATTR, index.as_str()),
                            ("style", "display:block;height:900px"),
                        ],
                    )
                })
                .collect();
            let link = append("a", &[("href", "#section-2")]);
            Self { elements, link }
        }

        fn mount(&self) -> SectionScroll {
            SectionScroll::mount(
                SectionRegistry::new(FACILITY_SECTIONS[..3].to_vec()),
                ScrollConfig::default(),
                Callback::from(|_: usize| ()),
            )
            .unwrap()
        }
    }

    impl Drop for Page {
        fn drop(&mut self) {
            for element in self.elements.iter().chain(std::iter::once(&self.link)) {
                element.remove();
            }
        }
    }

    #[wasm_bindgen_test]
    fn dropped_subscription_stops_listening() {
        let target = append("div", &[]);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let subscription =
            EventSubscription::new(&target, "click", move |_| counter.set(counter.get() + 1))
                .unwrap();

        click(&target);
        assert_eq!(calls.get(), 1);

        drop(subscription);
        click(&target);
        assert_eq!(calls.get(), 1);
        target.remove();
    }

    #[wasm_bindgen_test]
    async fn rearming_timer_slot_cancels_the_previous_callback() {
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));
        let slot = TimerSlot::default();

        let flag = first.clone();
        slot.arm(10, move || flag.set(true));
        let flag = second.clone();
        slot.arm(10, move || flag.set(true));

        TimeoutFuture::new(60).await;
        assert!(!first.get());
        assert!(second.get());
    }

    #[wasm_bindgen_test]
    async fn cancelled_timer_slot_never_fires() {
        let fired = Rc::new(Cell::new(false));
        let slot = TimerSlot::default();
        let flag = fired.clone();
        slot.arm(10, move || flag.set(true));
        slot.cancel();

        TimeoutFuture::new(60).await;
        assert!(!fired.get());
    }

    #[wasm_bindgen_test]
    async fn replaced_observer_stops_reporting() {
        let page = Page::new();
        let config = ScrollConfig::default();
        let old_batches = Rc::new(Cell::new(0));
        let new_batches = Rc::new(Cell::new(0));

        let counter = old_batches.clone();
        let old = SectionObserver::attach(&page.elements, &config, move |_| {
            counter.set(counter.get() + 1)
        })
        .unwrap();
        drop(old);
        let counter = new_batches.clone();
        let _new = SectionObserver::attach(&page.elements, &config, move |samples| {
            assert!(samples.iter().all(|s| s.index < 3));
            counter.set(counter.get() + 1)
        })
        .unwrap();

        TimeoutFuture::new(300).await;
        assert_eq!(old_batches.get(), 0);
        assert!(new_batches.get() >= 1);
    }

    #[wasm_bindgen_test]
    fn section_links_prevent_default_only_while_mounted() {
        let page = Page::new();
        let outside = append("a", &[("href", "#elsewhere")]);
        let scroll = page.mount();

        assert!(!click(&outside));
        assert!(click(&page.link));

        drop(scroll);
        assert!(!click(&page.link));
        outside.remove();
    }

    #[wasm_bindgen_test]
    fn arrow_keys_prevent_default_only_when_handled() {
        let page = Page::new();
        let scroll = page.mount();

        // Already at the first section.
        assert!(!key_down("ArrowUp"));
        assert!(!key_down("PageDown"));
        assert!(key_down("ArrowDown"));

        drop(scroll);
        assert!(!key_down("ArrowDown"));
    }
}
