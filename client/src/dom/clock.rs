use std::future::Future;
use std::time::Duration;

use embed::Clock;

/// Browser clock: `performance.now()` for time, `setTimeout` for sleeps.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooClock;

impl Clock for GlooClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_ms(&self) -> u64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or_else(js_sys::Date::now, |p| p.now()) as u64
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }
}
