//! JS-facing RSVP form loader.
//!
//! SYSTEM CONTEXT
//! ==============
//! `new RsvpLoader("rsvpIframe", "formStatus")` attaches a supervisor to the
//! iframe and spawns two local tasks: the supervisor itself and a render loop
//! that feeds its snapshots through `RsvpPanel` into the page. Optional
//! `formLoading`/`formError` blocks are shown or hidden to match.

use std::cell::RefCell;
use std::rc::Rc;

use embed::{StatusSnapshot, SupervisorConfig, SupervisorHandle};
use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;
use health::ComponentStatus;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlIFrameElement};

use crate::dom::{GlooClock, IframeEmbed};
use crate::state::rsvp::{AutoClear, RsvpPanel};

const LOADING_ID: &str = "formLoading";
const ERROR_ID: &str = "formError";

/// Elements the panel paints into.
#[derive(Clone)]
struct PanelDom {
    iframe: HtmlIFrameElement,
    status: Option<Element>,
    loading: Option<Element>,
    error: Option<Element>,
}

impl PanelDom {
    fn paint(&self, panel: &RsvpPanel) {
        if let Some(status) = &self.status {
            match panel.status() {
                Some(s) => {
                    status.set_text_content(Some(&s.message));
                    status.set_class_name(&format!("form-status {}", s.kind.css_class()));
                }
                None => {
                    status.set_text_content(None);
                    status.set_class_name("form-status");
                }
            }
        }
        if let Some(loading) = &self.loading {
            let _ = loading.toggle_attribute_with_force("hidden", !panel.show_loading());
        }
        if let Some(error) = &self.error {
            let _ = error.toggle_attribute_with_force("hidden", !panel.show_error());
        }
        let _ = self.iframe.class_list().toggle_with_force("expanded", panel.is_expanded());
    }
}

#[wasm_bindgen]
pub struct RsvpLoader {
    handle: SupervisorHandle,
    panel: Rc<RefCell<RsvpPanel>>,
    dom: PanelDom,
}

#[wasm_bindgen]
impl RsvpLoader {
    /// Supervise `iframe_id` with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(iframe_id: &str, status_id: &str) -> Result<RsvpLoader, JsValue> {
        Self::build(iframe_id, status_id, SupervisorConfig::default())
    }

    /// Supervise `iframe_id` with a JSON `SupervisorConfig`; missing fields take defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(iframe_id: &str, status_id: &str, config_json: &str) -> Result<RsvpLoader, JsValue> {
        let config: SupervisorConfig =
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
        Self::build(iframe_id, status_id, config)
    }

    #[wasm_bindgen(js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.handle.is_loaded()
    }

    #[wasm_bindgen(js_name = getRetryCount)]
    pub fn retry_count(&self) -> u32 {
        self.handle.retry_count()
    }

    pub fn state(&self) -> String {
        self.handle.state().as_str().to_owned()
    }

    /// Coarse status for the site health overlay.
    #[wasm_bindgen(js_name = healthStatus)]
    pub fn health_status(&self) -> String {
        ComponentStatus::from(self.handle.state()).as_str().to_owned()
    }

    /// Full status snapshot as JSON.
    pub fn status(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.handle.status()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn reload(&self) -> bool {
        self.handle.reload()
    }

    pub fn reset(&self) -> bool {
        self.handle.reset()
    }

    /// Expand or collapse the form. Returns the resulting expanded flag.
    pub fn toggle(&self) -> bool {
        let mut panel = self.panel.borrow_mut();
        if let Some(expanded) = panel.toggle() {
            tracing::info!(expanded, "rsvp form toggled");
        }
        self.dom.paint(&panel);
        panel.is_expanded()
    }

    #[wasm_bindgen(js_name = isExpanded)]
    pub fn is_expanded(&self) -> bool {
        self.panel.borrow().is_expanded()
    }

    pub fn dispose(&self) -> bool {
        self.handle.dispose()
    }
}

impl RsvpLoader {
    fn build(iframe_id: &str, status_id: &str, config: SupervisorConfig) -> Result<RsvpLoader, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let iframe = document
            .get_element_by_id(iframe_id)
            .ok_or_else(|| JsValue::from_str(&format!("element #{iframe_id} not found")))?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| JsValue::from_str(&format!("#{iframe_id} is not an iframe")))?;
        let dom = PanelDom {
            iframe: iframe.clone(),
            status: document.get_element_by_id(status_id),
            loading: document.get_element_by_id(LOADING_ID),
            error: document.get_element_by_id(ERROR_ID),
        };

        let frame = IframeEmbed::attach(iframe)?;
        let (handle, task) =
            embed::create(frame, GlooClock, config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let panel = Rc::new(RefCell::new(RsvpPanel::new()));

        spawn_local(render_loop(handle.subscribe(), Rc::clone(&panel), dom.clone()));
        spawn_local(task.run());
        tracing::info!(iframe_id, "rsvp loader attached");

        Ok(RsvpLoader { handle, panel, dom })
    }
}

async fn render_loop(mut events: UnboundedReceiver<StatusSnapshot>, panel: Rc<RefCell<RsvpPanel>>, dom: PanelDom) {
    while let Some(snapshot) = events.next().await {
        let ticket = {
            let mut panel = panel.borrow_mut();
            let ticket = panel.apply(&snapshot);
            dom.paint(&panel);
            ticket
        };
        if let Some(ticket) = ticket {
            spawn_local(clear_later(ticket, Rc::clone(&panel), dom.clone()));
        }
    }
}

async fn clear_later(ticket: AutoClear, panel: Rc<RefCell<RsvpPanel>>, dom: PanelDom) {
    gloo_timers::future::sleep(std::time::Duration::from_millis(ticket.after_ms)).await;
    let mut panel = panel.borrow_mut();
    if panel.auto_clear(ticket) {
        dom.paint(&panel);
    }
}
