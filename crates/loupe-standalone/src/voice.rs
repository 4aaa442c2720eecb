use std::io::BufRead;
use std::thread;

use crossbeam::channel::Sender;
use loupe_core::{map_phrase, InputEvent};

/// Stand-in for the key-phrase recognizer: each stdin line is treated as a
/// recognized phrase and mapped through the voice adapter. Runs on its own
/// thread and funnels into the shared input channel like any other source.
pub fn spawn_stdin_phrases(tx: Sender<InputEvent>) {
    let spawned = thread::Builder::new()
        .name("voice-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match map_phrase(&line) {
                    Some(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    None => {
                        if !line.trim().is_empty() {
                            log::debug!("unrecognized phrase: {line:?}");
                        }
                    }
                }
            }
        });
    if let Err(e) = spawned {
        log::warn!("failed to spawn voice-stdin thread: {e}");
    }
}
