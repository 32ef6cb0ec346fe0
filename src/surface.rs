use std::time::{Duration, Instant};

use eframe::egui::{self, CentralPanel, Key, ViewportBuilder, ViewportCommand, WindowLevel};
use log::{debug, error, info};

use crate::{
    alarm::{Notifier, Surface, SurfaceError},
    config::Config,
    console,
    session::{AlarmSession, Effect, Event, SessionError},
    sound,
};

/// the real thing: egui window, rodio sound
#[derive(Debug)]
pub struct DesktopNotifier {
    config: Config,
}

impl DesktopNotifier {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Notifier for DesktopNotifier {
    type Surface = EguiSurface;

    fn hide_console(&mut self) {
        if self.config.hide_console {
            console::hide();
        }
    }

    fn play_alert_sound(&mut self) {
        sound::play_in_background(self.config.sound.alarm_sound(), self.config.sound.volume);
    }

    fn create_surface(&mut self, title: &str) -> Result<EguiSurface, SurfaceError> {
        let crate::config::Window { width, height } = self.config.window;
        if !(width > 0.0 && height > 0.0) {
            return Err(SurfaceError(format!(
                "window size must be positive, got {width}x{height}"
            )));
        }
        let options = eframe::NativeOptions {
            viewport: ViewportBuilder::default()
                .with_title(title)
                .with_inner_size([width, height])
                .with_window_level(WindowLevel::AlwaysOnTop),
            ..Default::default()
        };
        debug!("created alarm window \"{title}\" ({width}x{height})");
        Ok(EguiSurface {
            options,
            tick: self.config.tick_interval(),
        })
    }
}

pub struct EguiSurface {
    options: eframe::NativeOptions,
    tick: Duration,
}

impl Surface for EguiSurface {
    fn run(self, session: AlarmSession) -> Result<(), SurfaceError> {
        let Self { options, tick } = self;
        eframe::run_native(
            "roosty_alarm",
            options,
            Box::new(move |_| {
                let mut app = NotificationApp::new(session, tick);
                app.shown()?;
                Ok(Box::new(app))
            }),
        )
        .map_err(|e| SurfaceError(e.to_string()))
    }
}

struct NotificationApp {
    session: AlarmSession,
    tick: Duration,
    /// `None` until the tick is armed and again after dismissal
    next_tick: Option<Instant>,
}

impl NotificationApp {
    const fn new(session: AlarmSession, tick: Duration) -> Self {
        Self {
            session,
            tick,
            next_tick: None,
        }
    }

    fn shown(&mut self) -> Result<(), SessionError> {
        if self.session.handle(Event::SurfaceShown)? == Effect::ArmTick {
            self.next_tick = Some(Instant::now() + self.tick);
        }
        Ok(())
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        match self.session.handle(event) {
            Ok(Effect::ArmTick) => self.next_tick = Some(Instant::now() + self.tick),
            Ok(Effect::SetLabel(label)) => ctx.send_viewport_cmd(ViewportCommand::Title(label)),
            Ok(Effect::Close) => {
                self.next_tick = None;
                info!("closing alarm window");
                ctx.send_viewport_cmd(ViewportCommand::Close);
            }
            Ok(Effect::Nothing) => {}
            // firing and aborting happen before the window exists
            Ok(effect) => debug!("ignoring {effect:?} from a shown alarm"),
            Err(e) => error!("{e}"),
        }
    }
}

impl eframe::App for NotificationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(next) = self.next_tick {
            let now = Instant::now();
            if now >= next {
                self.dispatch(ctx, Event::Tick(now));
                self.next_tick = Some(next_tick_after(next, self.tick, now));
            }
        }

        let mut dismissed = ctx.input(|i| {
            i.key_pressed(Key::Escape) || i.key_pressed(Key::Enter) || i.viewport().close_requested()
        });
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(self.session.label());
                if ui.button("dismiss").clicked() {
                    dismissed = true;
                }
            });
        });
        if dismissed && !self.session.is_dismissed() {
            self.dispatch(ctx, Event::Dismiss);
        }

        if let Some(next) = self.next_tick {
            ctx.request_repaint_after(next.saturating_duration_since(Instant::now()));
        }
    }
}

/// the tick after `next`, skipping any we slept through
fn next_tick_after(next: Instant, tick: Duration, now: Instant) -> Instant {
    let following = next + tick;
    if following > now {
        following
    } else {
        now + tick
    }
}
