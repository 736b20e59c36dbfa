//! Session-scoped state for one dashboard viewer.
//!
//! Owns the active chat partner and the timers tied to it. There is at
//! most one chat poll and one countdown per session; starting another
//! replaces the running one.

use super::countdown::format_countdown;
use super::task::RepeatingTask;
use crate::utils::config::{COUNTDOWN_TICK, DEFAULT_CHAT_POLL_INTERVAL};
use log::info;
use std::ops::ControlFlow;
use std::time::Duration;

pub struct DashboardSession {
    handle: String,
    chat_partner: Option<String>,
    chat_poll: Option<RepeatingTask>,
    countdown: Option<RepeatingTask>,
    poll_interval: Duration,
}

impl DashboardSession {
    pub fn new(handle: impl Into<String>) -> Self {
        Self::with_poll_interval(handle, DEFAULT_CHAT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(handle: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            handle: handle.into(),
            chat_partner: None,
            chat_poll: None,
            countdown: None,
            poll_interval,
        }
    }

    /// Handle of the viewer who owns this session
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn chat_partner(&self) -> Option<&str> {
        self.chat_partner.as_deref()
    }

    pub fn has_active_chat(&self) -> bool {
        self.chat_poll.as_ref().is_some_and(RepeatingTask::is_running)
    }

    pub fn has_active_countdown(&self) -> bool {
        self.countdown.as_ref().is_some_and(RepeatingTask::is_running)
    }

    /// Start polling the conversation with `partner`
    ///
    /// `poll` receives `(viewer, partner)` on every tick. Any poll for a
    /// previous partner is stopped first.
    pub fn open_chat<F>(&mut self, partner: impl Into<String>, mut poll: F)
    where
        F: FnMut(&str, &str) + Send + 'static,
    {
        self.close_chat();

        let partner = partner.into();
        let viewer = self.handle.clone();
        let target = partner.clone();

        info!("Opening chat between {} and {}", viewer, partner);

        self.chat_poll = Some(RepeatingTask::start(
            format!("chat:{}", partner),
            self.poll_interval,
            move || {
                poll(&viewer, &target);
                ControlFlow::Continue(())
            },
        ));
        self.chat_partner = Some(partner);
    }

    /// Stop polling and forget the partner
    pub fn close_chat(&mut self) {
        if let Some(mut task) = self.chat_poll.take() {
            task.stop();
        }
        self.chat_partner = None;
    }

    /// Tick a countdown to `start_time` once per second
    pub fn start_countdown<C, R>(&mut self, start_time: i64, clock: C, render: R)
    where
        C: Fn() -> i64 + Send + 'static,
        R: FnMut(String) + Send + 'static,
    {
        self.start_countdown_every(start_time, COUNTDOWN_TICK, clock, render);
    }

    /// Tick a countdown to `start_time` every `tick`
    ///
    /// `clock` returns the current unix time; `render` receives each line.
    /// The countdown stops itself after rendering "Contest Started!".
    pub fn start_countdown_every<C, R>(
        &mut self,
        start_time: i64,
        tick: Duration,
        clock: C,
        mut render: R,
    ) where
        C: Fn() -> i64 + Send + 'static,
        R: FnMut(String) + Send + 'static,
    {
        if let Some(mut previous) = self.countdown.take() {
            previous.stop();
        }

        self.countdown = Some(RepeatingTask::start(
            format!("countdown:{}", start_time),
            tick,
            move || {
                let remaining = start_time - clock();
                render(format_countdown(remaining));
                if remaining <= 0 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        ));
    }

    /// Block until the running countdown finishes on its own
    pub fn wait_countdown(&mut self) {
        if let Some(task) = self.countdown.take() {
            task.wait();
        }
    }

    /// Stop every timer owned by the session
    pub fn stop_all(&mut self) {
        self.close_chat();
        if let Some(mut task) = self.countdown.take() {
            task.stop();
        }
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_open_chat_replaces_partner() {
        let polled: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let mut session = DashboardSession::with_poll_interval("alice", Duration::from_millis(5));

        let log = Arc::clone(&polled);
        session.open_chat("bob", move |_, partner| {
            log.lock().unwrap().push(partner.to_string())
        });
        std::thread::sleep(Duration::from_millis(20));

        let log = Arc::clone(&polled);
        session.open_chat("carol", move |_, partner| {
            log.lock().unwrap().push(partner.to_string())
        });
        let bob_polls = polled.lock().unwrap().iter().filter(|p| *p == "bob").count();
        std::thread::sleep(Duration::from_millis(20));
        session.close_chat();

        let seen = polled.lock().unwrap().clone();
        assert!(bob_polls >= 1);
        assert_eq!(seen.iter().filter(|p| *p == "bob").count(), bob_polls);
        assert!(seen.iter().any(|p| p == "carol"));
        assert_eq!(session.chat_partner(), None);
        assert!(!session.has_active_chat());
    }

    #[test]
    fn test_countdown_stops_when_started() {
        let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let fake_now = Arc::new(Mutex::new(97i64));
        let clock_now = Arc::clone(&fake_now);

        let mut session = DashboardSession::new("alice");
        session.start_countdown_every(
            100,
            Duration::from_millis(1),
            move || {
                let mut now = clock_now.lock().unwrap();
                let current = *now;
                *now += 1;
                current
            },
            move |line| sink.lock().unwrap().push(line),
        );
        session.wait_countdown();

        let lines = lines.lock().unwrap().clone();
        assert_eq!(
            lines,
            vec![
                "Next Contest In: 00:00:03".to_string(),
                "Next Contest In: 00:00:02".to_string(),
                "Next Contest In: 00:00:01".to_string(),
                "Contest Started!".to_string(),
            ]
        );
        assert!(!session.has_active_countdown());
    }
}
