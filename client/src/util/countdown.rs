//! Countdown to the ceremony.
//!
//! `countdown` is pure arithmetic on millisecond timestamps. Under `hydrate`,
//! `mount_countdown` drives the `days`/`hours`/`minutes`/`seconds` elements
//! once per second until the target passes.

#[cfg(test)]
#[path = "countdown_test.rs"]
mod countdown_test;

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[cfg(feature = "hydrate")]
const ARRIVED_HTML: &str = r#"<h3 class="section-title">The day is here! 🎉</h3>"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Countdown {
    Remaining { days: i64, hours: i64, minutes: i64, seconds: i64 },
    Arrived,
}

impl Countdown {
    /// Two-digit padded `(element id, text)` pairs. `None` once arrived.
    #[must_use]
    pub fn display(&self) -> Option<[(&'static str, String); 4]> {
        match *self {
            Self::Remaining { days, hours, minutes, seconds } => Some([
                ("days", format!("{days:02}")),
                ("hours", format!("{hours:02}")),
                ("minutes", format!("{minutes:02}")),
                ("seconds", format!("{seconds:02}")),
            ]),
            Self::Arrived => None,
        }
    }
}

/// Time left until `target_ms`. Exactly at the target all fields are zero;
/// only a strictly negative remainder counts as arrived.
#[must_use]
pub fn countdown(target_ms: i64, now_ms: i64) -> Countdown {
    let left = target_ms.saturating_sub(now_ms);
    if left < 0 {
        return Countdown::Arrived;
    }
    Countdown::Remaining {
        days: left / DAY_MS,
        hours: (left % DAY_MS) / HOUR_MS,
        minutes: (left % HOUR_MS) / MINUTE_MS,
        seconds: (left % MINUTE_MS) / SECOND_MS,
    }
}

/// Start updating the countdown elements for `target` (any string
/// `Date.parse` accepts).
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = mountCountdown)]
pub fn mount_countdown(target: &str) -> Result<(), wasm_bindgen::JsValue> {
    let target_ms = js_sys::Date::parse(target);
    if target_ms.is_nan() {
        return Err(wasm_bindgen::JsValue::from_str(&format!("unparseable countdown target: {target}")));
    }
    #[allow(clippy::cast_possible_truncation)]
    let target_ms = target_ms as i64;

    wasm_bindgen_futures::spawn_local(async move {
        loop {
            #[allow(clippy::cast_possible_truncation)]
            let now_ms = js_sys::Date::now() as i64;
            if !render(countdown(target_ms, now_ms)) {
                tracing::info!("countdown reached target");
                break;
            }
            gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
        }
    });
    Ok(())
}

/// Write one tick to the page. Returns `false` once the target has passed.
#[cfg(feature = "hydrate")]
fn render(state: Countdown) -> bool {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return false;
    };
    match state.display() {
        Some(fields) => {
            for (id, text) in fields {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            }
            true
        }
        None => {
            if let Some(container) = document.get_element_by_id("countdown") {
                container.set_inner_html(ARRIVED_HTML);
            }
            false
        }
    }
}
