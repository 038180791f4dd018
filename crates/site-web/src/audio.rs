use crate::dom::{self, Listener};
use site_core::audio::{Track, INTERACTION_EVENTS};
use std::collections::HashMap;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Lazily created `<audio>` elements, one per track.
#[derive(Default)]
pub struct AudioBank {
    elements: HashMap<Track, web::HtmlAudioElement>,
}

fn create_audio(track: Track) -> anyhow::Result<web::HtmlAudioElement> {
    let spec = track.spec();
    let el = web::HtmlAudioElement::new_with_src(spec.path)
        .map_err(|e| anyhow::anyhow!("audio element for {}: {:?}", spec.path, e))?;
    el.set_volume(spec.volume);
    el.set_loop(spec.looping);
    el.set_preload("auto");
    Ok(el)
}

impl AudioBank {
    fn element(&mut self, track: Track) -> Option<web::HtmlAudioElement> {
        if let Some(el) = self.elements.get(&track) {
            return Some(el.clone());
        }
        match create_audio(track) {
            Ok(el) => {
                self.elements.insert(track, el.clone());
                Some(el)
            }
            Err(e) => {
                log::error!("{:?}", e);
                None
            }
        }
    }

    /// Creates the element ahead of the first play.
    pub fn preload(&mut self, track: Track) {
        _ = self.element(track);
    }

    /// Plays from the start; `on_result` gets whether the browser allowed it.
    pub fn play(&mut self, track: Track, on_result: impl FnOnce(bool) + 'static) {
        // results always arrive on a later task so callers may hold their own
        // borrows while calling `play`
        let Some(el) = self.element(track) else {
            spawn_local(async move { on_result(false) });
            return;
        };
        if !track.spec().looping {
            el.set_current_time(0.0);
        }
        let promise = match el.play() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[audio] play {:?} failed: {:?}", track, e);
                spawn_local(async move { on_result(false) });
                return;
            }
        };
        if let Some(ms) = track.spec().auto_stop_ms {
            let el = el.clone();
            dom::set_timeout(ms as i32, move || {
                _ = el.pause();
            });
        }
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => on_result(true),
                Err(e) => {
                    log::warn!("[audio] {:?} blocked: {:?}", track, e);
                    on_result(false);
                }
            }
        });
    }

    pub fn pause(&self, track: Track) {
        if let Some(el) = self.elements.get(&track) {
            _ = el.pause();
        }
    }

    /// Forgets the element; tracks that do not pause on unmount keep playing
    /// until their own auto-stop.
    pub fn release(&mut self, track: Track) {
        if let Some(el) = self.elements.remove(&track) {
            if track.spec().pause_on_unmount {
                _ = el.pause();
                el.remove_attribute("src").ok();
                el.load();
            }
        }
    }

    pub fn release_all(&mut self) {
        let tracks: Vec<Track> = self.elements.keys().copied().collect();
        for t in tracks {
            self.release(t);
        }
    }
}

/// `mousedown`/`keydown`/`touchstart` on the document, detached as a group.
pub fn interaction_listeners(
    document: &web::Document,
    on_gesture: impl Fn() + Clone + 'static,
) -> Vec<Listener> {
    INTERACTION_EVENTS
        .iter()
        .map(|&ev| {
            let f = on_gesture.clone();
            Listener::new(document, ev, move |_| f())
        })
        .collect()
}
