use std::{
    fmt,
    time::{Duration, Instant},
};

use thiserror::Error;

/// where an alarm is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// sleeping until the alarm should ring
    Waiting,
    /// the alarm rang, no window yet
    Firing,
    /// the window is up and counting
    Displaying,
    Dismissed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Waiting => "waiting",
            Self::Firing => "firing",
            Self::Displaying => "displaying",
            Self::Dismissed => "dismissed",
        })
    }
}

/// everything that can happen to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    WaitElapsed(Instant),
    SurfaceShown,
    SurfaceCreationFailed(String),
    Tick(Instant),
    Dismiss,
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::WaitElapsed(_) => "wait elapsed",
            Self::SurfaceShown => "surface shown",
            Self::SurfaceCreationFailed(_) => "surface creation failed",
            Self::Tick(_) => "tick",
            Self::Dismiss => "dismiss",
        }
    }
}

/// what the caller has to do after handing an event to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// ring once, don't wait for it to finish
    PlayAlert,
    /// start the repeating tick
    ArmTick,
    SetLabel(String),
    /// stop ticking and close the window
    Close,
    /// the alarm can't be shown, give up on the whole program
    Abort(String),
    Nothing,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unexpected {event} event while {state}")]
    UnexpectedEvent {
        state: SessionState,
        event: &'static str,
    },
}

/// A single alarm, from the wait until the user dismisses it.
///
/// The session never touches the OS itself, it only tells the caller (through
/// [`Effect`]) what should happen next. Events are expected one at a time in
/// arrival order.
#[derive(Debug, Clone)]
pub struct AlarmSession {
    title: String,
    state: SessionState,
    fired_at: Option<Instant>,
    label: String,
}

impl AlarmSession {
    #[must_use]
    pub fn new(title: String) -> Self {
        Self {
            label: title.clone(),
            title,
            state: SessionState::Waiting,
            fired_at: None,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn fired_at(&self) -> Option<Instant> {
        self.fired_at
    }

    /// what the window should currently say
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn is_dismissed(&self) -> bool {
        matches!(self.state, SessionState::Dismissed)
    }

    pub fn handle(&mut self, event: Event) -> Result<Effect, SessionError> {
        let effect = match (self.state, event) {
            (SessionState::Waiting, Event::WaitElapsed(now)) => {
                self.fired_at = Some(now);
                self.state = SessionState::Firing;
                Effect::PlayAlert
            }
            (SessionState::Firing, Event::SurfaceShown) => {
                self.state = SessionState::Displaying;
                Effect::ArmTick
            }
            (SessionState::Firing, Event::SurfaceCreationFailed(reason)) => {
                self.state = SessionState::Dismissed;
                Effect::Abort(reason)
            }
            (SessionState::Displaying, Event::Tick(now)) => {
                let fired_at = self.fired_at.unwrap_or(now);
                self.label = ago_label(&self.title, now.saturating_duration_since(fired_at));
                Effect::SetLabel(self.label.clone())
            }
            (SessionState::Displaying, Event::Dismiss) => {
                self.state = SessionState::Dismissed;
                Effect::Close
            }
            // the event loop might still deliver something queued before the window closed
            (SessionState::Dismissed, Event::Tick(_) | Event::Dismiss) => Effect::Nothing,
            (state, event) => {
                return Err(SessionError::UnexpectedEvent {
                    state,
                    event: event.name(),
                })
            }
        };
        Ok(effect)
    }
}

/// `<title> - <elapsed> ago`, elapsed truncated to whole seconds
#[must_use]
pub fn ago_label(title: &str, elapsed: Duration) -> String {
    format!("{title} - {} ago", compact_seconds(elapsed.as_secs()))
}

/// `0s`, `45s`, `1m15s`, `1h0m1s`: once a larger unit shows up every smaller one does too
fn compact_seconds(secs: u64) -> String {
    let (hours, minutes, secs) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours > 0 {
        format!("{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{minutes}m{secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn displaying(title: &str) -> (AlarmSession, Instant) {
        let mut session = AlarmSession::new(title.to_string());
        let fired_at = Instant::now();
        assert_eq!(
            session.handle(Event::WaitElapsed(fired_at)),
            Ok(Effect::PlayAlert)
        );
        assert_eq!(session.handle(Event::SurfaceShown), Ok(Effect::ArmTick));
        (session, fired_at)
    }

    #[test]
    fn walks_through_every_state() {
        let mut session = AlarmSession::new("tea".to_string());
        assert_eq!(session.state(), SessionState::Waiting);
        assert_eq!(session.label(), "tea");

        let fired_at = Instant::now();
        session.handle(Event::WaitElapsed(fired_at)).unwrap();
        assert_eq!(session.state(), SessionState::Firing);
        assert_eq!(session.fired_at(), Some(fired_at));

        session.handle(Event::SurfaceShown).unwrap();
        assert_eq!(session.state(), SessionState::Displaying);

        assert_eq!(session.handle(Event::Dismiss), Ok(Effect::Close));
        assert!(session.is_dismissed());
    }

    #[test]
    fn ticks_truncate_to_whole_seconds() {
        let (mut session, fired_at) = displaying("test");
        assert_eq!(
            session.handle(Event::Tick(fired_at + Duration::from_millis(999))),
            Ok(Effect::SetLabel("test - 0s ago".to_string()))
        );
        assert_eq!(
            session.handle(Event::Tick(fired_at + Duration::from_secs(1))),
            Ok(Effect::SetLabel("test - 1s ago".to_string()))
        );
        assert_eq!(
            session.handle(Event::Tick(fired_at + Duration::from_millis(75_400))),
            Ok(Effect::SetLabel("test - 1m15s ago".to_string()))
        );
        assert_eq!(session.label(), "test - 1m15s ago");
    }

    #[test]
    fn surface_failure_aborts() {
        let mut session = AlarmSession::new("x".to_string());
        session.handle(Event::WaitElapsed(Instant::now())).unwrap();
        assert_eq!(
            session.handle(Event::SurfaceCreationFailed("no display".to_string())),
            Ok(Effect::Abort("no display".to_string()))
        );
        assert!(session.is_dismissed());
    }

    #[test]
    fn late_events_after_dismissal_are_ignored() {
        let (mut session, fired_at) = displaying("x");
        session.handle(Event::Dismiss).unwrap();
        assert_eq!(session.handle(Event::Tick(fired_at)), Ok(Effect::Nothing));
        assert_eq!(session.handle(Event::Dismiss), Ok(Effect::Nothing));
    }

    #[test]
    fn rejects_events_out_of_order() {
        let mut session = AlarmSession::new("x".to_string());
        assert_eq!(
            session.handle(Event::Tick(Instant::now())),
            Err(SessionError::UnexpectedEvent {
                state: SessionState::Waiting,
                event: "tick",
            })
        );
        assert_eq!(
            session.handle(Event::SurfaceShown),
            Err(SessionError::UnexpectedEvent {
                state: SessionState::Waiting,
                event: "surface shown",
            })
        );
        // a rejected event leaves the session where it was
        assert_eq!(session.state(), SessionState::Waiting);
    }

    #[test]
    fn ago_label_format() {
        assert_eq!(ago_label("Alarm", Duration::ZERO), "Alarm - 0s ago");
        assert_eq!(ago_label("Alarm", Duration::from_millis(59_900)), "Alarm - 59s ago");
        assert_eq!(
            ago_label("Alarm", Duration::from_secs(2 * 60)),
            "Alarm - 2m0s ago"
        );
        assert_eq!(
            ago_label("Alarm", Duration::from_secs(3 * 60 * 60 + 1)),
            "Alarm - 3h0m1s ago"
        );
    }
}
