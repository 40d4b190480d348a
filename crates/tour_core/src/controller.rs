//! Tour navigation state machine.
//!
//! The controller is `Idle` until a tour starts, then `Active(i)` while slide
//! `i` is mounted. Every operation takes the page explicitly; the controller
//! only keeps handles to what it inserted or styled.

use page::{ElementId, ListenerId, ListenerKind, MountedView, Page};
use shared::{Flow, HookName, Key, Slide, SlideStyle, TourAction, TourError};
use tracing::{debug, info, warn};

use crate::{
    config::TourConfig,
    diagnostics::report,
    hooks::{HookContext, HookRegistry},
    loader::FlowLoader,
    position::FloatPositioner,
    render::{render_slide, SLIDE_KEY},
};

#[derive(Debug)]
pub struct TourController {
    config: TourConfig,
    flow: Option<Flow>,
    hooks: HookRegistry,
    active_index: Option<usize>,
    mounted: Option<MountedView>,
    positioner: FloatPositioner,
    resize_listener: Option<ListenerId>,
    key_listener: Option<ListenerId>,
}

impl TourController {
    pub fn new(config: TourConfig) -> Self {
        Self {
            config,
            flow: None,
            hooks: HookRegistry::default(),
            active_index: None,
            mounted: None,
            positioner: FloatPositioner::default(),
            resize_listener: None,
            key_listener: None,
        }
    }

    pub fn with_flow(config: TourConfig, flow: Flow) -> Self {
        let mut controller = Self::new(config);
        controller.flow = Some(flow);
        controller
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn flow_url(&self) -> &str {
        &self.config.flow_url
    }

    pub fn flow(&self) -> Option<&Flow> {
        self.flow.as_ref()
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn is_active(&self) -> bool {
        self.active_index.is_some()
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.flow.as_ref()?.get(self.active_index?)
    }

    pub fn mounted(&self) -> Option<&MountedView> {
        self.mounted.as_ref()
    }

    /// Element the current float slide is attached to.
    pub fn attached_target(&self) -> Option<ElementId> {
        self.positioner.attached()
    }

    /// Registers the controller's resize listener on `page`.
    pub fn attach(&mut self, page: &mut impl Page) {
        if self.resize_listener.is_none() {
            self.resize_listener = Some(page.add_listener(ListenerKind::Resize));
        }
    }

    /// Stops any tour and removes every listener the controller registered.
    pub fn detach(&mut self, page: &mut impl Page) {
        self.stop(page);
        if let Some(listener) = self.resize_listener.take() {
            page.remove_listener(listener);
        }
    }

    /// Replaces the flow. A running tour is stopped first so the active index
    /// never points into a different flow.
    pub fn set_flow(&mut self, page: &mut impl Page, flow: Flow) {
        self.stop(page);
        self.flow = Some(flow);
    }

    /// Points the controller at another flow file, discarding the current
    /// flow and stopping any running tour.
    pub fn set_flow_url(&mut self, page: &mut impl Page, url: impl Into<String>) {
        self.stop(page);
        self.flow = None;
        self.config.flow_url = url.into();
        debug!(url = %self.config.flow_url, "tour: flow url changed");
    }

    /// Fetches the configured flow and applies the outcome.
    pub async fn load(
        &mut self,
        page: &mut impl Page,
        loader: &dyn FlowLoader,
    ) -> Result<usize, TourError> {
        let result = loader.fetch(&self.config.flow_url).await;
        self.apply_load_result(page, result)
    }

    /// Applies a fetch outcome: a parsed flow replaces the current one, a
    /// parse failure keeps it, a transport failure unsets it.
    pub fn apply_load_result(
        &mut self,
        page: &mut impl Page,
        result: Result<Flow, TourError>,
    ) -> Result<usize, TourError> {
        match result {
            Ok(flow) => {
                let slides = flow.len();
                info!(url = %self.config.flow_url, slides, "tour: flow loaded");
                self.set_flow(page, flow);
                Ok(slides)
            }
            Err(err @ TourError::Parse { .. }) => {
                report(&err, "flow parse failed, keeping previous flow");
                Err(err)
            }
            Err(err) => {
                report(&err, "flow fetch failed");
                self.stop(page);
                self.flow = None;
                Err(err)
            }
        }
    }

    pub fn start(&mut self, page: &mut impl Page) -> Result<(), TourError> {
        let has_slides = self.flow.as_ref().is_some_and(|flow| !flow.is_empty());
        if !has_slides {
            warn!(url = %self.config.flow_url, "tour: start requested without slides");
            return Err(TourError::NoFlow);
        }
        self.teardown_slide(page);
        self.show(page, 0);
        Ok(())
    }

    pub fn next(&mut self, page: &mut impl Page) {
        let Some(index) = self.active_index else {
            debug!("tour: next ignored while idle");
            return;
        };
        self.run_on_end(index);
        self.teardown_slide(page);

        let next = index + 1;
        let total = self.total();
        if next >= total {
            info!(total, "tour: finished");
            self.stop(page);
            return;
        }
        self.show(page, next);
    }

    pub fn previous(&mut self, page: &mut impl Page) {
        let Some(index) = self.active_index else {
            debug!("tour: previous ignored while idle");
            return;
        };
        self.run_on_end(index);
        if index == 0 {
            report(&TourError::AtFirstSlide, "previous ignored");
            return;
        }
        self.teardown_slide(page);
        self.show(page, index - 1);
    }

    /// Shows slide `slide_number` (1-based). `onEnd` of the slide being left
    /// is not run.
    pub fn jump(&mut self, page: &mut impl Page, slide_number: usize) -> Result<(), TourError> {
        let total = self.total();
        if slide_number == 0 || slide_number > total {
            let err = TourError::SlideOutOfRange {
                requested: slide_number,
                total,
            };
            report(&err, "jump rejected");
            return Err(err);
        }
        self.teardown_slide(page);
        self.show(page, slide_number - 1);
        Ok(())
    }

    pub fn stop(&mut self, page: &mut impl Page) {
        self.teardown_slide(page);
        if self.active_index.take().is_some() {
            debug!("tour: stopped");
        }
        if let Some(listener) = self.key_listener.take() {
            page.remove_listener(listener);
        }
    }

    /// Re-runs float positioning for the current slide; called on resize.
    pub fn reposition(&mut self, page: &mut impl Page) {
        let Some(index) = self.active_index else {
            return;
        };
        let Some(slide_element) = self.mounted.as_ref().and_then(|m| m.element(SLIDE_KEY)) else {
            return;
        };
        let Some(slide) = self.flow.as_ref().and_then(|flow| flow.get(index)) else {
            return;
        };
        if slide.style == SlideStyle::Float {
            self.positioner
                .position(page, &self.config, slide.float_target(), slide_element);
        }
    }

    pub fn handle_action(&mut self, page: &mut impl Page, action: TourAction) {
        match action {
            TourAction::Next => self.next(page),
            TourAction::Previous => self.previous(page),
            TourAction::Stop => self.stop(page),
        }
    }

    /// Key presses only navigate while the key listener is registered.
    pub fn handle_key(&mut self, page: &mut impl Page, key: &Key) {
        if self.key_listener.is_none() {
            return;
        }
        if let Some(action) = key.action() {
            self.handle_action(page, action);
        }
    }

    fn total(&self) -> usize {
        self.flow.as_ref().map(Flow::len).unwrap_or(0)
    }

    fn show(&mut self, page: &mut impl Page, index: usize) {
        let Some(flow) = self.flow.as_ref() else {
            return;
        };
        let Some(slide) = flow.get(index) else {
            return;
        };
        let total = flow.len();

        let view = render_slide(slide, index, total, &self.config);
        let mounted = page.mount(&view);
        let slide_element = mounted.element(SLIDE_KEY);
        self.active_index = Some(index);
        self.mounted = Some(mounted);
        debug!(slide = index + 1, total, style = slide.style.as_str(), "tour: slide shown");

        if self.config.key_events && self.key_listener.is_none() {
            self.key_listener = Some(page.add_listener(ListenerKind::KeyDown));
        }

        if slide.style == SlideStyle::Float {
            if let Some(slide_element) = slide_element {
                self.positioner
                    .position(page, &self.config, slide.float_target(), slide_element);
            }
        }

        if let Some(hook) = &slide.on_show {
            run_hook(&mut self.hooks, hook, slide, index, total);
        }
    }

    fn run_on_end(&mut self, index: usize) {
        let Some(flow) = self.flow.as_ref() else {
            return;
        };
        let Some(slide) = flow.get(index) else {
            return;
        };
        if let Some(hook) = &slide.on_end {
            run_hook(&mut self.hooks, hook, slide, index, flow.len());
        }
    }

    fn teardown_slide(&mut self, page: &mut impl Page) {
        self.positioner.release(page, &self.config);
        if let Some(mounted) = self.mounted.take() {
            page.unmount(mounted.root);
        }
    }
}

fn run_hook(hooks: &mut HookRegistry, name: &HookName, slide: &Slide, index: usize, total: usize) {
    hooks.run(name, &HookContext { slide, index, total });
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
