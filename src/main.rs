//! Neon Drive entry point
//!
//! Handles platform-specific initialization and runs the drive loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use neon_drive::Settings;
    use neon_drive::city::FacadePattern;
    use neon_drive::hud::SpeedReadout;
    use neon_drive::renderer::{FrameUniform, as_floats, glow_levels, pack_buildings, pack_props};
    use neon_drive::sim::{DriveSession, KeyTracker, tick};

    // Hand-off to the page's WebGPU scene
    #[wasm_bindgen(inline_js = "
        export function configure_scene(stars, shadowMapSize) {
            if (window.neonDrive && window.neonDrive.configureScene) {
                window.neonDrive.configureScene(stars, shadowMapSize);
            }
        }

        export function present_city(buildings, count) {
            if (window.neonDrive && window.neonDrive.presentCity) {
                window.neonDrive.presentCity(buildings, count);
            }
        }

        export function present_facade(index, pixels) {
            if (window.neonDrive && window.neonDrive.presentFacade) {
                window.neonDrive.presentFacade(index, pixels);
            }
        }

        export function present_props(props, count) {
            if (window.neonDrive && window.neonDrive.presentProps) {
                window.neonDrive.presentProps(props, count);
            }
        }

        export function present_frame(frame, glow) {
            if (window.neonDrive && window.neonDrive.presentFrame) {
                window.neonDrive.presentFrame(frame, glow);
            }
        }
    ")]
    extern "C" {
        fn configure_scene(stars: u32, shadow_map_size: u32);
        fn present_city(buildings: &[f32], count: u32);
        fn present_facade(index: u32, pixels: &[u8]);
        fn present_props(props: &[f32], count: u32);
        fn present_frame(frame: &[f32], glow: &[f32]);
    }

    /// Drive instance holding all state
    struct Game {
        session: DriveSession,
        keys: KeyTracker,
        settings: Settings,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Last value written to the speedometer
        last_readout: Option<SpeedReadout>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                session: DriveSession::new(seed, &settings),
                keys: KeyTracker::new(),
                settings,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_readout: None,
            }
        }

        /// Leave the start screen and hand control to the player
        fn start(&mut self) {
            self.session.start();
            self.keys.set_accepting(true);
        }

        /// Send the buildings, facades and street props to the renderer once
        fn present_city(&self) {
            let quality = self.settings.quality;
            configure_scene(quality.star_count(), quality.shadow_map_size());

            let buildings = &self.session.buildings;
            let packed = pack_buildings(buildings);
            present_city(as_floats(&packed), buildings.len() as u32);

            let lit = quality.facade_windows();
            let mut rng = Pcg32::seed_from_u64(self.session.seed ^ 0xfa_cade);
            for (i, building) in buildings.iter().enumerate() {
                let pattern = if lit {
                    FacadePattern::generate(building.accent_color, &mut rng)
                } else {
                    FacadePattern::dark(building.accent_color)
                };
                present_facade(i as u32, &pattern.rasterize());
            }

            let props = pack_props();
            present_props(as_floats(&props), props.len() as u32);
            log::info!("Presented {} buildings, {} props", buildings.len(), props.len());
        }

        /// Advance one frame and hand it to the renderer
        fn update(&mut self, dt: f32, time: f64) {
            let input = self.keys.snapshot();
            let frame = tick(&mut self.session, &input, dt)
                .unwrap_or_else(|| self.session.current_frame());

            let flicker = self.settings.effective_flicker();
            let uniform = FrameUniform::new(&frame, flicker);
            let glow = glow_levels(frame.elapsed, &self.session.buildings, flicker);
            present_frame(as_floats(&[uniform]), &glow);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            self.update_hud(SpeedReadout::from_velocity(frame.speed()));
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, readout: SpeedReadout) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.last_readout != Some(readout) {
                if let Some(el) = document.query_selector("#hud-speed .hud-value").ok().flatten() {
                    el.set_text_content(Some(&readout.text()));
                    let _ = el.set_attribute("aria-label", &readout.label());
                    let class = if readout.redline { "hud-value redline" } else { "hud-value" };
                    let _ = el.set_attribute("class", class);
                    let _ = el.set_attribute("style", &format!("color: {}", readout.color()));
                }
                self.last_readout = Some(readout);
            }

            if self.settings.show_fps {
                if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Drive starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let mut settings = Settings::load();
        // Query overrides stick for later visits
        if let Ok(query) = window.location().search() {
            if settings.apply_query(&query) {
                settings.save();
            }
        }
        let seed = settings.seed_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("City seeded with: {}", seed);

        game.borrow().present_city();

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());
        setup_focus_release(game.clone());

        request_animation_frame(game);

        log::info!("Neon Drive running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game.borrow_mut().keys.key_down(&event.key()) {
                    // Keep space/arrows from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up (touch buttons dispatch synthetic key events too)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start();

                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                if let Some(el) = document.get_element_by_id("start-screen") {
                    let _ = el.set_attribute("class", "hidden");
                }
                if let Some(el) = document.get_element_by_id("hud") {
                    let _ = el.set_attribute("class", "");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No start button found, starting immediately");
            game.borrow_mut().start();
        }
    }

    /// Keys held when focus leaves the page never get a keyup
    fn setup_focus_release(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().keys.release_all();
                    log::info!("Controls released (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
                log::info!("Controls released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, stopping drive loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // First frame has no previous timestamp to measure against
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt, time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Drive (native) starting...");
    log::info!("Native mode runs a scripted headless drive - serve the wasm build for the real thing");

    scripted_drive();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Accelerate, carve a left turn, then brake, logging the trace
#[cfg(not(target_arch = "wasm32"))]
fn scripted_drive() {
    use neon_drive::Settings;
    use neon_drive::hud::SpeedReadout;
    use neon_drive::sim::{DriveSession, InputState, tick};

    const DT: f32 = 1.0 / 60.0;

    let settings = Settings::load();
    let mut session = DriveSession::new(settings.seed_or(42), &settings);
    session.start();

    let legs = [
        (
            "accelerate",
            InputState {
                forward: true,
                ..Default::default()
            },
            120,
        ),
        (
            "turn left",
            InputState {
                forward: true,
                left: true,
                ..Default::default()
            },
            120,
        ),
        (
            "brake",
            InputState {
                brake: true,
                ..Default::default()
            },
            60,
        ),
    ];

    for (name, input, frames) in legs {
        for n in 1..=frames {
            let Some(frame) = tick(&mut session, &input, DT) else {
                continue;
            };
            if n % 30 == 0 {
                let p = frame.vehicle.position;
                log::info!(
                    "[{}] t={:.2}s pos=({:.1}, {:.1}) heading={:.2} speed={}",
                    name,
                    frame.elapsed,
                    p.x,
                    p.z,
                    frame.vehicle.heading,
                    SpeedReadout::from_velocity(frame.speed()).label()
                );
            }
        }
    }

    let state = session.vehicle.state();
    println!(
        "Drove {:.1} units through {} buildings, final speed {}",
        state.position.length(),
        session.buildings.len(),
        SpeedReadout::from_velocity(state.velocity).label()
    );
}
