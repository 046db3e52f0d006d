//! Screensaver controller
//!
//! Owns the playback state (current color, prefetched next color, play flag)
//! and the bounded history. All mutation goes through the controller task; the
//! presentation layer talks to it over a [ScreensaverHandle].

use std::sync::Arc;

use thiserror::Error;
use tokio::{
    select,
    sync::{broadcast, mpsc, oneshot},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::{
    history::ColorHistory,
    lookup::ColorLookup,
    models::{self, clean_hex, Color, ColorSample},
};

lazy_static::lazy_static! {
    static ref HEX_PATTERN: regex::Regex =
        regex::Regex::new("^#?[0-9A-Fa-f]{6}$").unwrap();
}

/// Draw a uniformly random RGB triple
pub fn random_color() -> Color {
    use rand::prelude::*;

    let mut rng = rand::rng();
    Color::new(
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>(),
    )
}

/// Parse a user-supplied `#RRGGBB` string into a color
///
/// The leading `#` is optional. Anything else is a validation error and leaves
/// the caller's state untouched.
pub fn parse_hex_color(input: &str) -> Result<Color, CustomColorError> {
    if !HEX_PATTERN.is_match(input) {
        return Err(CustomColorError::InvalidHex(input.to_owned()));
    }

    let decoded = hex::decode(input.trim_start_matches('#'))
        .map_err(|_| CustomColorError::InvalidHex(input.to_owned()))?;

    match decoded.as_slice() {
        [r, g, b] => Ok(Color::new(*r, *g, *b)),
        _ => Err(CustomColorError::InvalidHex(input.to_owned())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomColorError {
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// Snapshot of the controller's playback state
#[derive(Debug, Clone, PartialEq, Eq, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub current: Option<ColorSample>,
    pub next: Option<ColorSample>,
    pub is_playing: bool,
}

/// State change notifications published to subscribers
#[derive(Debug, Clone)]
pub enum StateUpdate {
    ColorChanged {
        sample: ColorSample,
        at: chrono::DateTime<chrono::Utc>,
    },
    PlaybackChanged {
        playing: bool,
    },
}

/// Fetch a random color, falling back to a locally synthesized sample
///
/// The fallback is built from the same triple that was sent to the service, so
/// the controller always makes forward progress.
async fn fetch_random(lookup: Arc<dyn ColorLookup>) -> ColorSample {
    let color = random_color();

    match lookup.by_rgb(color).await {
        Ok(sample) => sample.with_hsl(),
        Err(error) => {
            warn!(error = %error, "color lookup failed, synthesizing local sample");
            ColorSample::from_color(color).with_hsl()
        }
    }
}

pub struct Screensaver {
    config: models::Screensaver,
    lookup: Arc<dyn ColorLookup>,
    current: Option<ColorSample>,
    next: Option<ColorSample>,
    playing: bool,
    history: ColorHistory,
    prefetch: Option<JoinHandle<ColorSample>>,
    handle_rx: mpsc::Receiver<ScreensaverMessage>,
    update_tx: broadcast::Sender<StateUpdate>,
}

impl Screensaver {
    pub fn new(config: &models::Config, lookup: Arc<dyn ColorLookup>) -> (Self, ScreensaverHandle) {
        let (tx, handle_rx) = mpsc::channel(4);
        let (update_tx, _) = broadcast::channel(4);

        let handle = ScreensaverHandle {
            tx,
            update_tx: update_tx.clone(),
        };

        (
            Self {
                config: config.screensaver.clone(),
                lookup,
                current: None,
                next: None,
                playing: false,
                history: ColorHistory::new(config.screensaver.history_limit),
                prefetch: None,
                handle_rx,
                update_tx,
            },
            handle,
        )
    }

    fn broadcast_color(&self, sample: ColorSample) {
        // ok: subscribers are optional
        self.update_tx
            .send(StateUpdate::ColorChanged {
                sample,
                at: chrono::Utc::now(),
            })
            .ok();
    }

    fn broadcast_playback(&self) {
        self.update_tx
            .send(StateUpdate::PlaybackChanged {
                playing: self.playing,
            })
            .ok();
    }

    /// Fetch the initial current and prefetched next colors
    ///
    /// Both lookups run concurrently and fall back to local samples, so the
    /// controller always becomes ready.
    async fn initialize(&mut self) {
        debug!("fetching initial colors");

        let (current, next) = tokio::join!(
            fetch_random(self.lookup.clone()),
            fetch_random(self.lookup.clone())
        );

        info!(name = %current.name.value, hex = %current.hex.value, "ready");

        self.broadcast_color(current.clone());
        self.current = Some(current);
        self.next = Some(next);
        self.playing = true;
    }

    /// One automatic advance
    ///
    /// Promotes the prefetched color, pushes the displaced current color into
    /// history and starts the next prefetch. A tick without a prefetched color,
    /// with a prefetch still in flight, or while paused is a no-op.
    fn on_tick(&mut self) {
        if !self.playing {
            return;
        }

        if self.prefetch.is_some() {
            debug!("prefetch still in flight, skipping advance");
            return;
        }

        let next = match self.next.take() {
            Some(next) => next,
            None => {
                debug!("no prefetched color, skipping advance");
                return;
            }
        };

        self.broadcast_color(next.clone());

        if let Some(previous) = self.current.replace(next) {
            self.history.push(previous);
        }

        let lookup = self.lookup.clone();
        self.prefetch = Some(tokio::spawn(fetch_random(lookup)));
    }

    /// Wait for the in-flight prefetch, if any
    async fn prefetch_update(prefetch: &mut Option<JoinHandle<ColorSample>>) -> ColorSample {
        match prefetch {
            Some(handle) => {
                let result = handle.await;
                *prefetch = None;

                match result {
                    Ok(sample) => sample,
                    Err(error) => {
                        warn!(error = %error, "prefetch task failed, synthesizing local sample");
                        ColorSample::from_color(random_color()).with_hsl()
                    }
                }
            }
            None => futures::future::pending().await,
        }
    }

    fn state(&self) -> PlaybackState {
        PlaybackState {
            current: self.current.clone(),
            next: self.next.clone(),
            is_playing: self.playing,
        }
    }

    fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.broadcast_playback();
        self.playing
    }

    /// Display a previously seen color and pause automatic advancement
    ///
    /// The selected sample is not re-pushed into history.
    fn select_color(&mut self, sample: ColorSample) {
        let sample = sample.with_hsl();

        self.broadcast_color(sample.clone());
        self.current = Some(sample);

        if self.playing {
            self.playing = false;
            self.broadcast_playback();
        }
    }

    /// Apply a user-supplied hex color
    ///
    /// Invalid input is rejected with the state unchanged. Valid input is
    /// looked up for its canonical name; if that lookup fails, the locally
    /// parsed color is applied anyway, so local validity always wins.
    async fn apply_custom_color(&mut self, input: &str) -> Result<ColorSample, CustomColorError> {
        let color = parse_hex_color(input)?;

        let sample = match self.lookup.by_hex(&clean_hex(color)).await {
            Ok(sample) => sample,
            Err(error) => {
                warn!(error = %error, "hex lookup failed, applying local color");
                ColorSample::from_color(color)
            }
        }
        .with_hsl();

        self.broadcast_color(sample.clone());
        self.current = Some(sample.clone());
        self.history.push(sample.clone());

        if self.playing {
            self.playing = false;
            self.broadcast_playback();
        }

        Ok(sample)
    }

    async fn handle_message(&mut self, message: ScreensaverMessage) -> ScreensaverControl {
        // ok: the controller shouldn't care if the receiver dropped

        match message {
            ScreensaverMessage::State(tx) => {
                tx.send(self.state()).ok();
            }
            ScreensaverMessage::History(tx) => {
                tx.send(self.history.to_vec()).ok();
            }
            ScreensaverMessage::TogglePlay(tx) => {
                let playing = self.toggle_play();
                tx.send(playing).ok();
            }
            ScreensaverMessage::SelectColor(sample, tx) => {
                self.select_color(sample);
                tx.send(()).ok();
            }
            ScreensaverMessage::CustomColor(hex, tx) => {
                tx.send(self.apply_custom_color(&hex).await).ok();
            }
            ScreensaverMessage::ExportCsv(tx) => {
                tx.send(self.history.to_csv()).ok();
            }
            ScreensaverMessage::Stop(tx) => {
                if let Some(prefetch) = self.prefetch.take() {
                    prefetch.abort();
                }

                tx.send(()).ok();
                return ScreensaverControl::Break;
            }
        }

        ScreensaverControl::Continue
    }

    #[instrument]
    pub async fn run(mut self) {
        self.initialize().await;

        let period = self.config.interval();
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            select! {
                _ = ticker.tick() => {
                    trace!("tick");

                    self.on_tick();
                },
                sample = Self::prefetch_update(&mut self.prefetch) => {
                    trace!(name = %sample.name.value, "prefetch complete");

                    self.next = Some(sample);
                },
                message = self.handle_rx.recv() => {
                    trace!(message = ?message, "handle msg");

                    match message {
                        Some(message) => {
                            if ScreensaverControl::Break == self.handle_message(message).await {
                                break;
                            }
                        }
                        // All handles dropped, nothing left to serve
                        None => break,
                    }
                }
            }
        }

        if let Some(prefetch) = self.prefetch.take() {
            prefetch.abort();
        }
    }
}

impl std::fmt::Debug for Screensaver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screensaver")
            .field("playing", &self.playing)
            .field("history_len", &self.history.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScreensaverControl {
    Continue,
    Break,
}

#[derive(Debug)]
enum ScreensaverMessage {
    State(oneshot::Sender<PlaybackState>),
    History(oneshot::Sender<Vec<ColorSample>>),
    TogglePlay(oneshot::Sender<bool>),
    SelectColor(ColorSample, oneshot::Sender<()>),
    CustomColor(String, oneshot::Sender<Result<ColorSample, CustomColorError>>),
    ExportCsv(oneshot::Sender<String>),
    Stop(oneshot::Sender<()>),
}

#[derive(Debug, Error)]
pub enum ScreensaverHandleError {
    #[error("the controller is no longer running")]
    Dropped,
}

impl<T> From<mpsc::error::SendError<T>> for ScreensaverHandleError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::Dropped
    }
}

impl From<oneshot::error::RecvError> for ScreensaverHandleError {
    fn from(_: oneshot::error::RecvError) -> Self {
        Self::Dropped
    }
}

#[derive(Clone)]
pub struct ScreensaverHandle {
    tx: mpsc::Sender<ScreensaverMessage>,
    update_tx: broadcast::Sender<StateUpdate>,
}

impl ScreensaverHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<StateUpdate> {
        self.update_tx.subscribe()
    }

    pub async fn state(&self) -> Result<PlaybackState, ScreensaverHandleError> {
        let (tx, rx) = oneshot::channel();
        self.tx.send(ScreensaverMessage::State(tx)).await?;
        Ok(rx.await?)
    }

    pub async fn history(&self) -> Result<Vec<ColorSample>, ScreensaverHandleError> {
        let (tx, rx) = oneshot::channel();
        self.tx.send(ScreensaverMessage::History(tx)).await?;
        Ok(rx.await?)
    }

    pub async fn toggle_play(&self) -> Result<bool, ScreensaverHandleError> {
        let (tx, rx) = oneshot::channel();
        self.tx.send(ScreensaverMessage::TogglePlay(tx)).await?;
        Ok(rx.await?)
    }

    pub async fn select_color(&self, sample: ColorSample) -> Result<(), ScreensaverHandleError> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(ScreensaverMessage::SelectColor(sample, tx))
            .await?;
        Ok(rx.await?)
    }

    pub async fn apply_custom_color(
        &self,
        hex: String,
    ) -> Result<Result<ColorSample, CustomColorError>, ScreensaverHandleError> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(ScreensaverMessage::CustomColor(hex, tx))
            .await?;
        Ok(rx.await?)
    }

    pub async fn export_csv(&self) -> Result<String, ScreensaverHandleError> {
        let (tx, rx) = oneshot::channel();
        self.tx.send(ScreensaverMessage::ExportCsv(tx)).await?;
        Ok(rx.await?)
    }

    pub async fn stop(&self) -> Result<(), ScreensaverHandleError> {
        let (tx, rx) = oneshot::channel();
        self.tx.send(ScreensaverMessage::Stop(tx)).await?;
        Ok(rx.await?)
    }
}
