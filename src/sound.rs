use std::{fs::File, io::BufReader, thread};

use log::{debug, warn};
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};
use thiserror::Error;

use crate::alarm::AlarmSound;

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("couldn't open the audio output: {0}")]
    Output(String),

    #[error("couldn't open sound file: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't decode sound file: {0}")]
    Decode(String),
}

/// Plays the sound once on its own thread and returns right away.
///
/// Failures are only logged, a missing sound should never stop the alarm window.
pub fn play_in_background(sound: AlarmSound, volume: f32) {
    let spawned = thread::Builder::new()
        .name("alarm-sound".to_string())
        .spawn(move || {
            if let Err(e) = play(&sound, volume) {
                warn!("couldn't play {sound}: {e}");
            }
        });
    if let Err(e) = spawned {
        warn!("couldn't start the sound thread: {e}");
    }
}

/// blocks until the sound is done
pub fn play(sound: &AlarmSound, volume: f32) -> Result<(), SoundError> {
    // the stream has to outlive the sink or nothing is heard
    let stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| SoundError::Output(e.to_string()))?;
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume / 100.0);
    match sound {
        AlarmSound::Beep { frequency, length } => {
            sink.append(
                rodio::source::SineWave::new(*frequency)
                    .take_duration(*length)
                    .amplify(0.5),
            );
        }
        AlarmSound::Custom(path) => {
            let file = BufReader::new(File::open(path)?);
            let input = Decoder::new(file).map_err(|e| SoundError::Decode(e.to_string()))?;
            sink.append(input);
        }
    }
    debug!("playing {sound} at volume {volume}");
    sink.play();
    sink.sleep_until_end();
    Ok(())
}
