//! Alert output: sounds and chat lines.
//!
//! The alert engine never calls these itself; the coordinator does, using the
//! outcome of each evaluation.

use chrono::Local;

use super::alerts::model::AlertSound;

pub trait NotificationSink {
    fn play_sound(&mut self, sound: AlertSound);
    fn print_chat(&mut self, message: &str);
}

/// Writes alerts to the log. Used when no audio device is wanted.
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn play_sound(&mut self, sound: AlertSound) {
        log::info!("Alert sound: {}", sound.filename());
    }

    fn print_chat(&mut self, message: &str) {
        log::info!("[{}] {}", Local::now().format("%H:%M:%S"), message);
    }
}

#[cfg(feature = "audio")]
pub use audio::AudioSink;

#[cfg(feature = "audio")]
mod audio {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};
    use std::thread;

    use super::{AlertSound, LogSink, NotificationSink};
    use crate::core::error::{RadarError, Result};

    /// Plays alert sounds from a directory of wav files
    pub struct AudioSink {
        sound_dir: PathBuf,
        chat: LogSink,
    }

    impl AudioSink {
        pub fn new(sound_dir: impl Into<PathBuf>) -> Self {
            Self {
                sound_dir: sound_dir.into(),
                chat: LogSink,
            }
        }

        pub fn sound_path(&self, sound: AlertSound) -> PathBuf {
            self.sound_dir.join(sound.filename())
        }
    }

    fn play_blocking(path: &Path) -> Result<()> {
        let stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|e| RadarError::Audio(e.to_string()))?;
        let file = BufReader::new(File::open(path)?);
        let sink =
            rodio::play(stream.mixer(), file).map_err(|e| RadarError::Audio(e.to_string()))?;
        sink.sleep_until_end();
        Ok(())
    }

    impl NotificationSink for AudioSink {
        fn play_sound(&mut self, sound: AlertSound) {
            let path = self.sound_path(sound);
            if !path.exists() {
                log::error!(
                    "Could not find sound file: {}. Searched in {:?}",
                    sound.filename(),
                    path
                );
                return;
            }

            // Playback blocks until the clip ends, keep it off the frame thread
            thread::spawn(move || {
                if let Err(e) = play_blocking(&path) {
                    log::error!("Error playing alert sound: {}", e);
                }
            });
        }

        fn print_chat(&mut self, message: &str) {
            self.chat.print_chat(message);
        }
    }
}
