use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;

use crate::session::PickerKind;

/// Inactivity timers for the wake and sleep pickers.
///
/// Each picker has its own timer; rearming one cancels only its pending expiry.
/// Owners must call [`cancel_all`](PickerTimers::cancel_all) when they unmount.
#[derive(Default)]
pub struct PickerTimers {
    wake: Option<Task>,
    sleep: Option<Task>,
}

impl PickerTimers {
    fn slot(&mut self, kind: PickerKind) -> &mut Option<Task> {
        match kind {
            PickerKind::Wake => &mut self.wake,
            PickerKind::Sleep => &mut self.sleep,
        }
    }

    pub fn rearm(&mut self, kind: PickerKind, timeout: Duration, on_expire: impl FnOnce() + 'static) {
        self.cancel(kind);
        *self.slot(kind) = Some(spawn(async move {
            tokio::time::sleep(timeout).await;
            on_expire();
        }));
    }

    pub fn cancel(&mut self, kind: PickerKind) {
        if let Some(task) = self.slot(kind).take() {
            task.cancel();
        }
    }

    pub fn cancel_all(&mut self) {
        self.cancel(PickerKind::Wake);
        self.cancel(PickerKind::Sleep);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use dioxus::core::{ScopeId, VirtualDom};

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(7);

    #[component]
    fn Host() -> Element {
        rsx! {}
    }

    fn mounted() -> VirtualDom {
        let mut dom = VirtualDom::new(Host);
        dom.rebuild_in_place();
        dom
    }

    fn counter() -> Rc<Cell<u32>> {
        Rc::new(Cell::new(0))
    }

    fn rearm(
        dom: &mut VirtualDom,
        timers: &mut PickerTimers,
        kind: PickerKind,
        fired: &Rc<Cell<u32>>,
    ) {
        let fired = fired.clone();
        dom.in_scope(ScopeId::APP, || {
            timers.rearm(kind, TIMEOUT, move || fired.set(fired.get() + 1))
        });
        // Poll the new task so its sleep is registered at the current instant
        dom.process_events();
    }

    async fn elapse(dom: &mut VirtualDom, secs: u64) {
        tokio::time::advance(Duration::from_secs(secs)).await;
        dom.process_events();
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_only_after_timeout() {
        let mut dom = mounted();
        let mut timers = PickerTimers::default();
        let fired = counter();

        rearm(&mut dom, &mut timers, PickerKind::Wake, &fired);
        elapse(&mut dom, 6).await;
        assert_eq!(fired.get(), 0);

        elapse(&mut dom, 2).await;
        assert_eq!(fired.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_pending_expiry() {
        let mut dom = mounted();
        let mut timers = PickerTimers::default();
        let fired = counter();

        for _ in 0..3 {
            rearm(&mut dom, &mut timers, PickerKind::Wake, &fired);
            elapse(&mut dom, 3).await;
        }
        // 9s since the first arm, 3s since the last
        assert_eq!(fired.get(), 0);

        elapse(&mut dom, 5).await;
        assert_eq!(fired.get(), 1);

        elapse(&mut dom, 30).await;
        assert_eq!(fired.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timers_never_fire() {
        let mut dom = mounted();
        let mut timers = PickerTimers::default();
        let wake = counter();
        let sleep = counter();

        rearm(&mut dom, &mut timers, PickerKind::Wake, &wake);
        dom.in_scope(ScopeId::APP, || timers.cancel(PickerKind::Wake));
        elapse(&mut dom, 10).await;
        assert_eq!(wake.get(), 0);

        rearm(&mut dom, &mut timers, PickerKind::Wake, &wake);
        rearm(&mut dom, &mut timers, PickerKind::Sleep, &sleep);
        dom.in_scope(ScopeId::APP, || timers.cancel_all());
        elapse(&mut dom, 10).await;
        assert_eq!(wake.get(), 0);
        assert_eq!(sleep.get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wake_and_sleep_run_independently() {
        let mut dom = mounted();
        let mut timers = PickerTimers::default();
        let wake = counter();
        let sleep = counter();

        rearm(&mut dom, &mut timers, PickerKind::Wake, &wake);
        elapse(&mut dom, 4).await;
        rearm(&mut dom, &mut timers, PickerKind::Sleep, &sleep);

        // Rearming sleep must not push the wake expiry back
        elapse(&mut dom, 4).await;
        assert_eq!(wake.get(), 1);
        assert_eq!(sleep.get(), 0);

        elapse(&mut dom, 4).await;
        assert_eq!(sleep.get(), 1);
    }
}
