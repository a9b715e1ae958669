//! `Embed` over a live `<iframe>` element.
//!
//! Load and error events feed an unbounded channel that `next_signal`
//! drains. A `MutationObserver` on the iframe's container flags structural
//! changes for the liveness probe; the rendered extent is the iframe's
//! `offsetHeight`. Listeners and the observer are detached on drop.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use embed::{Embed, EmbedSignal, ProbeSample};
use futures::StreamExt;
use futures::channel::mpsc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlIFrameElement, MutationObserver, MutationObserverInit, Node};

type EventClosure = Closure<dyn FnMut(Event)>;
type MutationClosure = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

pub struct IframeEmbed {
    iframe: HtmlIFrameElement,
    signals: RefCell<mpsc::UnboundedReceiver<EmbedSignal>>,
    mutated: Rc<Cell<bool>>,
    observer: MutationObserver,
    on_load: EventClosure,
    on_error: EventClosure,
    _on_mutation: MutationClosure,
}

impl IframeEmbed {
    /// Start listening on `iframe`.
    ///
    /// # Errors
    ///
    /// Returns the DOM exception if a listener or the observer cannot be installed.
    pub fn attach(iframe: HtmlIFrameElement) -> Result<Self, JsValue> {
        let (tx, rx) = mpsc::unbounded();

        let load_tx = tx.clone();
        let on_load = EventClosure::new(move |_: Event| {
            let _ = load_tx.unbounded_send(EmbedSignal::Loaded);
        });
        let on_error = EventClosure::new(move |_: Event| {
            let _ = tx.unbounded_send(EmbedSignal::Errored("iframe error event".to_owned()));
        });
        iframe.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        iframe.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;

        let mutated = Rc::new(Cell::new(false));
        let flag = Rc::clone(&mutated);
        let on_mutation = MutationClosure::new(move |records: js_sys::Array, _: MutationObserver| {
            if records.length() > 0 {
                flag.set(true);
            }
        });
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        let target: Node = iframe.parent_node().unwrap_or_else(|| iframe.clone().into());
        observer.observe_with_options(&target, &init)?;

        Ok(Self {
            iframe,
            signals: RefCell::new(rx),
            mutated,
            observer,
            on_load,
            on_error,
            _on_mutation: on_mutation,
        })
    }

    #[must_use]
    pub fn element(&self) -> &HtmlIFrameElement {
        &self.iframe
    }
}

impl Embed for IframeEmbed {
    fn source(&self) -> String {
        self.iframe.src()
    }

    fn set_source(&self, url: &str) {
        {
            let mut signals = self.signals.borrow_mut();
            while let Ok(Some(_)) = signals.try_next() {}
        }
        self.mutated.set(false);
        self.iframe.set_src(url);
    }

    fn next_signal(&self) -> impl Future<Output = EmbedSignal> {
        async move {
            let next = std::future::poll_fn(|cx| self.signals.borrow_mut().poll_next_unpin(cx)).await;
            match next {
                Some(signal) => signal,
                // Senders live in our own closures, so this only happens mid-drop.
                None => std::future::pending().await,
            }
        }
    }

    fn sample(&self) -> ProbeSample {
        ProbeSample {
            extent: f64::from(self.iframe.offset_height()),
            structure_changed: self.mutated.replace(false),
        }
    }
}

impl Drop for IframeEmbed {
    fn drop(&mut self) {
        self.observer.disconnect();
        let _ = self
            .iframe
            .remove_event_listener_with_callback("load", self.on_load.as_ref().unchecked_ref());
        let _ = self
            .iframe
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
    }
}
