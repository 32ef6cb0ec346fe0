use std::{
    fmt,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use chrono::NaiveDateTime;
use log::{error, info};
use thiserror::Error;

use crate::{
    errors::AppResult,
    session::{AlarmSession, Effect, Event},
    time_spec::TimeSpec,
};

/// represents an alarm
/// contains when the alarm should go off and what the window should say
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub spec: TimeSpec,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlarmSound {
    /// a generated sine beep
    Beep { frequency: f32, length: Duration },
    Custom(PathBuf),
}

impl fmt::Display for AlarmSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beep { frequency, length } => write!(
                f,
                "beep ({frequency}Hz for {})",
                humantime::format_duration(*length)
            ),
            Self::Custom(file) => write!(f, "{}", file.display()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SurfaceError(pub String);

/// The OS side of an alarm: console, sound and the notification window.
pub trait Notifier {
    type Surface: Surface;

    fn hide_console(&mut self);

    /// must not block until the sound is done
    fn play_alert_sound(&mut self);

    fn create_surface(&mut self, title: &str) -> Result<Self::Surface, SurfaceError>;
}

/// A notification window that is ready to be shown.
pub trait Surface {
    /// Shows the window and runs its event loop until the session is dismissed.
    ///
    /// Implementations hand [`Event::SurfaceShown`] to the session once the
    /// window is up, arm the tick when asked to, and then deliver ticks and
    /// the dismissal one at a time.
    fn run(self, session: AlarmSession) -> Result<(), SurfaceError>;
}

/// Waits for the alarm, rings it, and shows it until the user dismisses it.
pub fn run<N: Notifier>(alarm: &Alarm, now: NaiveDateTime, notifier: &mut N) -> AppResult<()> {
    let wait = alarm.spec.resolve(now);
    info!("alarm \"{}\" set {}, ringing in {wait}", alarm.title, alarm.spec);
    let session = AlarmSession::new(alarm.title.clone());

    notifier.hide_console();
    // nothing can cancel this, killing the process is the only way out
    thread::sleep(wait.as_duration());

    ring(session, notifier)
}

/// Fires a waiting session and shows it, doing whatever the session asks for.
pub fn ring<N: Notifier>(mut session: AlarmSession, notifier: &mut N) -> AppResult<()> {
    if session.handle(Event::WaitElapsed(Instant::now()))? == Effect::PlayAlert {
        info!("alarm \"{}\" is ringing", session.title());
        notifier.play_alert_sound();
    }

    let surface = match notifier.create_surface(session.title()) {
        Ok(surface) => surface,
        Err(err) => {
            error!("couldn't create the alarm window: {err}");
            return match session.handle(Event::SurfaceCreationFailed(err.to_string()))? {
                Effect::Abort(reason) => Err(SurfaceError(reason).into()),
                _ => Err(err.into()),
            };
        }
    };
    let title = session.title().to_string();
    surface.run(session)?;
    info!("alarm \"{title}\" dismissed");
    Ok(())
}
