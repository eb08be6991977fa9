//! Audio
//!
//! The simulation never talks to audio directly: it records `GameEvent`s,
//! and the app turns the ones that make noise into `SoundEffect`s for an
//! `AudioSink`. Playback is fire-and-forget; nothing reports back.
//!
//! Every sound is synthesized from a short list of tones; there are no
//! asset files.

use std::f32::consts::TAU;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::settings::Settings;
use crate::sim::GameEvent;

pub const SAMPLE_RATE: u32 = 44_100;

/// Seconds to ramp a tone in, avoids clicks
const ATTACK_SECS: f32 = 0.005;
/// Exponential fade over the length of each tone
const DECAY: f32 = 3.0;
const MUSIC_VOLUME: f32 = 0.5;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball breaks a brick
    BrickBreak,
    /// Ball hits a paddle
    PaddleBounce,
    /// Ball left the playfield
    BallLost,
    /// Falling brick landed on the paddle
    BrickOnPaddle,
    /// New level
    LevelUp,
    GameOver,
    Victory,
    /// Looping background music
    BackgroundLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
}

/// One note, optionally sliding from `start_hz` to `end_hz`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration_ms: u32,
    pub wave: Wave,
    pub volume: f32,
}

impl Tone {
    const fn note(hz: f32, duration_ms: u32, wave: Wave, volume: f32) -> Self {
        Self::sweep(hz, hz, duration_ms, wave, volume)
    }

    const fn sweep(start_hz: f32, end_hz: f32, duration_ms: u32, wave: Wave, volume: f32) -> Self {
        Self {
            start_hz,
            end_hz,
            duration_ms,
            wave,
            volume,
        }
    }
}

const BRICK_BREAK: [Tone; 1] = [Tone::sweep(880.0, 660.0, 60, Wave::Square, 0.2)];
const PADDLE_BOUNCE: [Tone; 1] = [Tone::note(440.0, 40, Wave::Sine, 0.35)];
const BALL_LOST: [Tone; 1] = [Tone::sweep(320.0, 110.0, 350, Wave::Square, 0.2)];
const BRICK_ON_PADDLE: [Tone; 1] = [Tone::sweep(180.0, 90.0, 200, Wave::Square, 0.25)];
const LEVEL_UP: [Tone; 3] = [
    Tone::note(523.3, 90, Wave::Sine, 0.3),
    Tone::note(659.3, 90, Wave::Sine, 0.3),
    Tone::note(784.0, 140, Wave::Sine, 0.3),
];
const GAME_OVER: [Tone; 4] = [
    Tone::note(392.0, 180, Wave::Sine, 0.3),
    Tone::note(329.6, 180, Wave::Sine, 0.3),
    Tone::note(261.6, 180, Wave::Sine, 0.3),
    Tone::note(196.0, 400, Wave::Sine, 0.3),
];
const VICTORY: [Tone; 4] = [
    Tone::note(523.3, 120, Wave::Square, 0.15),
    Tone::note(659.3, 120, Wave::Square, 0.15),
    Tone::note(784.0, 120, Wave::Square, 0.15),
    Tone::note(1046.5, 400, Wave::Square, 0.15),
];
const BACKGROUND_LOOP: [Tone; 8] = [
    Tone::note(130.8, 250, Wave::Sine, 0.12),
    Tone::note(164.8, 250, Wave::Sine, 0.12),
    Tone::note(196.0, 250, Wave::Sine, 0.12),
    Tone::note(164.8, 250, Wave::Sine, 0.12),
    Tone::note(110.0, 250, Wave::Sine, 0.12),
    Tone::note(130.8, 250, Wave::Sine, 0.12),
    Tone::note(164.8, 250, Wave::Sine, 0.12),
    Tone::note(130.8, 250, Wave::Sine, 0.12),
];

impl SoundEffect {
    pub const ALL: [SoundEffect; 8] = [
        SoundEffect::BrickBreak,
        SoundEffect::PaddleBounce,
        SoundEffect::BallLost,
        SoundEffect::BrickOnPaddle,
        SoundEffect::LevelUp,
        SoundEffect::GameOver,
        SoundEffect::Victory,
        SoundEffect::BackgroundLoop,
    ];

    /// The sound a simulation event makes, if any
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::BrickBroken { .. } => Some(SoundEffect::BrickBreak),
            GameEvent::PaddleBounce => Some(SoundEffect::PaddleBounce),
            GameEvent::BallLost { .. } => Some(SoundEffect::BallLost),
            GameEvent::BrickHitPaddle { .. } => Some(SoundEffect::BrickOnPaddle),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::Victory => Some(SoundEffect::Victory),
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::BackgroundLoop)
    }

    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::BrickBreak => &BRICK_BREAK,
            SoundEffect::PaddleBounce => &PADDLE_BOUNCE,
            SoundEffect::BallLost => &BALL_LOST,
            SoundEffect::BrickOnPaddle => &BRICK_ON_PADDLE,
            SoundEffect::LevelUp => &LEVEL_UP,
            SoundEffect::GameOver => &GAME_OVER,
            SoundEffect::Victory => &VICTORY,
            SoundEffect::BackgroundLoop => &BACKGROUND_LOOP,
        }
    }

    /// Mono samples at `SAMPLE_RATE`, ready to hand to rodio
    pub fn sound(&self) -> SamplesBuffer<f32> {
        SamplesBuffer::new(1, SAMPLE_RATE, synthesize(self.tones()))
    }
}

/// Render tones back to back
pub fn synthesize(tones: &[Tone]) -> Vec<f32> {
    let rate = SAMPLE_RATE as f32;
    let mut samples = Vec::new();

    for tone in tones {
        let len = (u64::from(SAMPLE_RATE) * u64::from(tone.duration_ms) / 1000) as usize;
        let mut phase = 0.0f32;
        for i in 0..len {
            let progress = i as f32 / len as f32;
            let hz = tone.start_hz + (tone.end_hz - tone.start_hz) * progress;
            phase = (phase + hz / rate).fract();

            let wave = match tone.wave {
                Wave::Sine => (TAU * phase).sin(),
                Wave::Square => {
                    if phase < 0.5 {
                        1.0
                    } else {
                        -1.0
                    }
                }
            };
            let attack = (i as f32 / rate / ATTACK_SECS).min(1.0);
            let envelope = attack * (-progress * DECAY).exp();
            samples.push(wave * envelope * tone.volume);
        }
    }
    samples
}

/// Something that can play sounds
pub trait AudioSink {
    /// Start a sound and return immediately
    fn play(&mut self, effect: SoundEffect);

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    fn toggle_muted(&mut self) {
        let muted = !self.is_muted();
        self.set_muted(muted);
    }
}

/// Audio output device
pub trait Speaker {
    /// Play once, detached
    fn play(&mut self, sound: SamplesBuffer<f32>);

    /// Replace the background track with `sound`, repeated forever
    fn play_loop(&mut self, sound: SamplesBuffer<f32>);

    fn pause_loop(&mut self, paused: bool);
}

/// Default output device through rodio
pub struct RodioSpeaker {
    // Dropping the stream stops everything
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl RodioSpeaker {
    pub fn open() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }
}

impl Speaker for RodioSpeaker {
    fn play(&mut self, sound: SamplesBuffer<f32>) {
        if let Err(e) = self.handle.play_raw(sound) {
            log::warn!("Sound playback failed: {}", e);
        }
    }

    fn play_loop(&mut self, sound: SamplesBuffer<f32>) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(MUSIC_VOLUME);
                sink.append(sound.repeat_infinite());
                self.music = Some(sink);
            }
            Err(e) => log::warn!("Background loop unavailable: {}", e),
        }
    }

    fn pause_loop(&mut self, paused: bool) {
        if let Some(sink) = &self.music {
            if paused {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }
}

/// Audio manager for the game
///
/// Without an output device every trigger is accepted and dropped.
pub struct AudioManager<S: Speaker = RodioSpeaker> {
    speaker: Option<S>,
    sfx_enabled: bool,
    music_enabled: bool,
    muted: bool,
}

impl AudioManager<RodioSpeaker> {
    pub fn new(settings: &Settings) -> Self {
        let speaker = match RodioSpeaker::open() {
            Ok(speaker) => Some(speaker),
            Err(e) => {
                log::warn!("No audio output ({}) - playing silently", e);
                None
            }
        };
        Self::with_speaker(settings, speaker)
    }
}

impl<S: Speaker> AudioManager<S> {
    pub fn with_speaker(settings: &Settings, speaker: Option<S>) -> Self {
        Self {
            speaker,
            sfx_enabled: settings.sfx_enabled,
            music_enabled: settings.music_enabled,
            muted: false,
        }
    }
}

impl<S: Speaker> AudioSink for AudioManager<S> {
    fn play(&mut self, effect: SoundEffect) {
        let Some(speaker) = self.speaker.as_mut() else {
            return;
        };

        if effect.is_music() {
            if self.music_enabled {
                speaker.play_loop(effect.sound());
                // Starts paused if muted before the music began
                speaker.pause_loop(self.muted);
                log::info!("Background loop started");
            }
            return;
        }

        if self.muted || !self.sfx_enabled {
            return;
        }

        log::trace!("Sound: {:?}", effect);
        speaker.play(effect.sound());
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(speaker) = self.speaker.as_mut() {
            speaker.pause_loop(muted);
        }
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Records every trigger; for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingAudio {
    pub played: Vec<SoundEffect>,
    pub muted: bool,
}

#[cfg(test)]
impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            self.played.push(effect);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Edge;

    /// Counts the samples it is handed
    #[derive(Debug, Default)]
    struct CountingSpeaker {
        played: Vec<usize>,
        loops: Vec<usize>,
        loop_paused: bool,
    }

    impl Speaker for CountingSpeaker {
        fn play(&mut self, sound: SamplesBuffer<f32>) {
            self.played.push(sound.count());
        }

        fn play_loop(&mut self, sound: SamplesBuffer<f32>) {
            self.loops.push(sound.count());
        }

        fn pause_loop(&mut self, paused: bool) {
            self.loop_paused = paused;
        }
    }

    fn manager(settings: &Settings) -> AudioManager<CountingSpeaker> {
        AudioManager::with_speaker(settings, Some(CountingSpeaker::default()))
    }

    fn speaker(audio: &AudioManager<CountingSpeaker>) -> &CountingSpeaker {
        audio.speaker.as_ref().unwrap()
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BrickBroken {
                index: 0,
                falling: true
            }),
            Some(SoundEffect::BrickBreak)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BallLost { edge: Edge::Top }),
            Some(SoundEffect::BallLost)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PaddleBounce),
            Some(SoundEffect::PaddleBounce)
        );
    }

    #[test]
    fn test_every_effect_is_audible_and_distinct() {
        for (i, a) in SoundEffect::ALL.iter().enumerate() {
            let samples = synthesize(a.tones());
            assert!(!samples.is_empty(), "{:?}", a);
            assert!(samples.iter().any(|s| s.abs() > 0.01), "{:?}", a);
            assert!(samples.iter().all(|s| s.abs() <= 1.0), "{:?}", a);
            for b in &SoundEffect::ALL[i + 1..] {
                assert_ne!(a.tones(), b.tones(), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_tone_length_matches_duration() {
        let samples = synthesize(&[Tone::note(440.0, 100, Wave::Sine, 0.5)]);
        assert_eq!(samples.len(), SAMPLE_RATE as usize / 10);
    }

    #[test]
    fn test_sound_effects_reach_the_speaker() {
        let mut audio = manager(&Settings::default());
        for effect in SoundEffect::ALL.iter().filter(|e| !e.is_music()) {
            audio.play(*effect);
        }
        let played = &speaker(&audio).played;
        assert_eq!(played.len(), SoundEffect::ALL.len() - 1);
        assert!(played.iter().all(|&n| n > 0));
        assert!(speaker(&audio).loops.is_empty());
    }

    #[test]
    fn test_background_loop_starts_looping_track() {
        let mut audio = manager(&Settings::default());
        audio.play(SoundEffect::BackgroundLoop);
        let speaker = speaker(&audio);
        assert_eq!(speaker.loops.len(), 1);
        assert!(speaker.loops[0] > 0);
        assert!(speaker.played.is_empty());
        assert!(!speaker.loop_paused);
    }

    #[test]
    fn test_music_disabled_skips_loop() {
        let settings = Settings {
            music_enabled: false,
            ..Settings::default()
        };
        let mut audio = manager(&settings);
        audio.play(SoundEffect::BackgroundLoop);
        assert!(speaker(&audio).loops.is_empty());
    }

    #[test]
    fn test_mute_pauses_music_and_drops_effects() {
        let mut audio = manager(&Settings::default());
        audio.play(SoundEffect::BackgroundLoop);
        audio.toggle_muted();
        assert!(audio.is_muted());
        assert!(speaker(&audio).loop_paused);

        audio.play(SoundEffect::BrickBreak);
        assert!(speaker(&audio).played.is_empty());

        audio.toggle_muted();
        assert!(!speaker(&audio).loop_paused);
        audio.play(SoundEffect::BrickBreak);
        assert_eq!(speaker(&audio).played.len(), 1);
    }

    #[test]
    fn test_sfx_disabled_is_silent() {
        let settings = Settings {
            sfx_enabled: false,
            ..Settings::default()
        };
        let mut audio = manager(&settings);
        audio.play(SoundEffect::GameOver);
        assert!(speaker(&audio).played.is_empty());
    }

    #[test]
    fn test_missing_output_is_silent() {
        let mut audio: AudioManager<CountingSpeaker> =
            AudioManager::with_speaker(&Settings::default(), None);
        for effect in SoundEffect::ALL {
            audio.play(effect);
        }
        audio.toggle_muted();
        assert!(audio.is_muted());
    }
}
