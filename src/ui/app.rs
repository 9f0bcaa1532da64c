use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Widget},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::audio::Playback;
use crate::config::Config;
use crate::core::{Activation, AnswerRecord, RevealScheduler, RevealTick, Scene, SceneSequencer};
use crate::data::AnswerMirror;
use crate::ui::components::{palette, render_key_hints, Backdrop, ConfettiField, MusicToggle};
use crate::ui::effect::Effect;
use crate::ui::scenes::SceneView;
use crate::ui::terminal_guard::TerminalGuard;

/// Composition root: owns the sequencer, the active scene and the shared effects.
///
/// Scenes never touch the sequencer. They return [`Effect`]s which the app applies,
/// making this the only caller of [`SceneSequencer::advance`].
pub struct App {
    config: Config,
    sequencer: SceneSequencer,
    view: SceneView,
    /// Bumped on every scene entry; ticks from older activations are dropped
    activation: Activation,
    reveal_tx: mpsc::UnboundedSender<RevealTick>,
    reveal_rx: mpsc::UnboundedReceiver<RevealTick>,
    confetti: ConfettiField,
    backdrop: Backdrop,
    music: MusicToggle,
    started: Instant,
    last_frame: Instant,
    should_quit: bool,
}

impl App {
    /// Create the app positioned at the first scene.
    ///
    /// Must be called from within a tokio runtime, the intro starts its first timer here.
    pub fn new(config: Config, mirror: Box<dyn AnswerMirror>, playback: Box<dyn Playback>) -> Self {
        let (reveal_tx, reveal_rx) = mpsc::unbounded_channel();
        let mut sequencer = SceneSequencer::new(mirror);
        sequencer.initialize();

        let activation = 1;
        let view = SceneView::enter(
            sequencer.current_scene(),
            sequencer.answers(),
            &config,
            RevealScheduler::new(reveal_tx.clone(), activation),
        );
        let now = Instant::now();

        Self {
            config,
            sequencer,
            view,
            activation,
            reveal_tx,
            reveal_rx,
            confetti: ConfettiField::new(),
            backdrop: Backdrop::new(),
            music: MusicToggle::new(playback),
            started: now,
            last_frame: now,
            should_quit: false,
        }
    }

    /// Take over the terminal and run until the user quits
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        self.music.stop();
        guard.cleanup()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let frame = self.config.timing.frame;
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                _ = tokio::time::sleep(frame) => {
                    while event::poll(Duration::from_millis(0))? {
                        if let Event::Key(key) = event::read()? {
                            self.handle_key_event(key);
                        }
                    }
                    self.tick();
                }

                Some(tick) = self.reveal_rx.recv() => {
                    self.handle_reveal(tick);
                }
            }

            if self.should_quit {
                tracing::info!(scene = %self.scene(), "Quitting");
                break;
            }
        }

        Ok(())
    }

    /// Advance animations by the time since the last frame
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.confetti.tick(dt);
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('m') => self.music.toggle(),
            code => {
                let effects = self.view.handle_key(code);
                self.apply_effects(effects);
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        self.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Celebrate(burst) => self.confetti.burst(&burst),
                Effect::Advance { next, answers } => self.request_scene(next, answers),
            }
        }
    }

    fn request_scene(&mut self, next: Scene, answers: Option<AnswerRecord>) {
        match self.sequencer.advance(next, answers) {
            Ok(scene) => self.enter_scene(scene),
            Err(e) => {
                tracing::error!(error = %e, "Invalid scene transition requested");
                if cfg!(debug_assertions) {
                    panic!("invalid scene transition: {e}");
                }
            }
        }
    }

    /// Replace the active view. Dropping the old view cancels its pending timers.
    fn enter_scene(&mut self, scene: Scene) {
        self.activation += 1;
        let scheduler = RevealScheduler::new(self.reveal_tx.clone(), self.activation);
        self.view = SceneView::enter(scene, self.sequencer.answers(), &self.config, scheduler);
        tracing::debug!(%scene, activation = self.activation, "Scene entered");
    }

    pub fn handle_reveal(&mut self, tick: RevealTick) {
        if tick.activation != self.activation {
            tracing::debug!(
                stale = tick.activation,
                current = self.activation,
                "Dropping reveal tick from a previous scene"
            );
            return;
        }
        self.view.on_reveal(tick.tag);
    }

    /// Deliver every reveal tick that has already fired
    pub fn process_pending_reveals(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(tick) = self.reveal_rx.try_recv() {
            self.handle_reveal(tick);
            handled += 1;
        }
        handled
    }

    /// Wait for the next reveal tick and deliver it
    pub async fn next_reveal(&mut self) -> Option<RevealTick> {
        let tick = self.reveal_rx.recv().await?;
        self.handle_reveal(tick);
        Some(tick)
    }

    pub fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let buf = f.buffer_mut();

        Block::default()
            .style(Style::default().bg(palette::BACKDROP))
            .render(area, buf);
        self.backdrop
            .render(self.started.elapsed().as_secs_f64(), area, buf);

        let [top, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        (&self.music).render(inset(top, 2), buf);
        (&self.view).render(inset(body, 2), buf);

        let mut hints = self.view.key_hints();
        hints.extend([("m", "music"), ("q", "quit")]);
        render_key_hints(footer, buf, &hints);

        self.confetti.render(area, buf);
    }

    pub fn scene(&self) -> Scene {
        self.sequencer.current_scene()
    }

    pub fn answers(&self) -> &AnswerRecord {
        self.sequencer.answers()
    }

    pub fn view(&self) -> &SceneView {
        &self.view
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.is_playing()
    }

    pub fn confetti_particles(&self) -> usize {
        self.confetti.len()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn inset(area: Rect, horizontal: u16) -> Rect {
    let shrink = horizontal.min(area.width / 2);
    Rect {
        x: area.x + shrink,
        width: area.width - shrink * 2,
        ..area
    }
}
