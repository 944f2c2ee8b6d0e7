use serde_json::json;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::config::FxConfig;
use crate::error::DomError;
use crate::logging::{log_event, LogLevel};

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const CONTACT_CARD_SELECTOR: &str = "#contact .glass-card";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const OVERLAY_CLASS: &str = "reactions-container";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const PARTICLE_CLASS: &str = "reaction reaction-like";

pub const REACTION_PALETTE: [&str; 15] = [
    "✅", "🎯", "🚀", "💯", "⭐", "🏆", "🎖️", "📊", "🔍", "🛡️", "💪", "🌟", "✨", "🎉", "👍",
];

const PARTICLE_LEFT_MIN_PERCENT: f64 = 10.0;
const PARTICLE_LEFT_SPAN_PERCENT: f64 = 80.0;
const PARTICLE_MIN_SECONDS: f64 = 2.5;
const PARTICLE_SPAN_SECONDS: f64 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpec {
    pub emoji: &'static str,
    pub left_percent: f64,
    pub duration_secs: f64,
}

impl ParticleSpec {
    /// Draws a particle from a source of uniform numbers in `[0, 1)`.
    pub fn roll(random: &mut impl FnMut() -> f64) -> Self {
        let pick = (random() * REACTION_PALETTE.len() as f64) as usize;
        let emoji = REACTION_PALETTE[pick.min(REACTION_PALETTE.len() - 1)];
        let left_percent = PARTICLE_LEFT_MIN_PERCENT + random() * PARTICLE_LEFT_SPAN_PERCENT;
        let duration_secs = PARTICLE_MIN_SECONDS + random() * PARTICLE_SPAN_SECONDS;

        Self {
            emoji,
            left_percent,
            duration_secs,
        }
    }

    pub fn animation(&self) -> String {
        format!("floatUp {}s ease-out forwards", self.duration_secs)
    }

    pub fn lifetime_ms(&self) -> u32 {
        (self.duration_secs * 1_000.0).round() as u32
    }
}

/// Timing of one burst: a spawn every `tick_ms`, then the overlay lingers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurstTimeline {
    pub tick_ms: u32,
    pub particles: u32,
    pub linger_ms: u32,
}

impl BurstTimeline {
    pub fn from_config(config: &FxConfig) -> Self {
        let particles = config.burst_particles.max(1);
        let tick_ms = (f64::from(config.burst_duration_ms) / f64::from(particles)).round() as u32;

        Self {
            tick_ms,
            particles,
            linger_ms: config.burst_linger_ms,
        }
    }
}

/// Two-state guard, one per contact card.
#[derive(Default)]
pub struct BurstGuard {
    bursting: Cell<bool>,
}

impl BurstGuard {
    pub fn try_begin(guard: &Rc<Self>) -> Option<BurstPermit> {
        if guard.bursting.replace(true) {
            return None;
        }
        Some(BurstPermit {
            guard: guard.clone(),
        })
    }

    #[cfg(test)]
    pub fn is_bursting(&self) -> bool {
        self.bursting.get()
    }
}

/// Held for the lifetime of a burst; dropping it returns the card to idle.
pub struct BurstPermit {
    guard: Rc<BurstGuard>,
}

impl Drop for BurstPermit {
    fn drop(&mut self) {
        self.guard.bursting.set(false);
    }
}

/// Where a burst happens: an overlay that particles are added to and that
/// is torn down, with every particle still on it, when the burst ends.
pub trait BurstStage {
    fn spawn_particle(&mut self) -> Result<(), DomError>;
    fn close(self);
}

/// Spawns one particle per tick, lingers, closes the stage and only then
/// releases the card. Aborting the future drops the stage and the permit.
pub async fn play_burst<S, Z, F>(
    config: FxConfig,
    timeline: BurstTimeline,
    permit: BurstPermit,
    mut stage: S,
    mut sleep: Z,
) where
    S: BurstStage,
    Z: FnMut(u32) -> F,
    F: Future<Output = ()>,
{
    for _ in 0..timeline.particles {
        sleep(timeline.tick_ms).await;

        if let Err(err) = stage.spawn_particle() {
            log_event(
                &config,
                LogLevel::Debug,
                "effect_failed",
                json!({ "effect": "reaction_particle", "error": err.to_string() }),
            );
        }
    }

    sleep(timeline.linger_ms).await;

    stage.close();
    drop(permit);
}

#[cfg(target_arch = "wasm32")]
pub use browser::ContactReactions;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::dom::{self, DetachOnDrop};
    use crate::schedule::{sleep, ScheduledTask};
    use gloo_events::EventListener;
    use std::cell::RefCell;
    use web_sys::HtmlElement;

    pub struct ContactReactions {
        _hover: EventListener,
        burst: Rc<RefCell<Option<ScheduledTask>>>,
    }

    impl ContactReactions {
        pub fn install(config: &FxConfig) -> Option<Self> {
            let card = dom::query(CONTACT_CARD_SELECTOR)?;
            let guard = Rc::new(BurstGuard::default());
            let burst: Rc<RefCell<Option<ScheduledTask>>> = Rc::new(RefCell::new(None));
            let timeline = BurstTimeline::from_config(config);
            let config = *config;

            let hover = {
                let burst = burst.clone();
                let target = card.clone();
                EventListener::new(&target, "mouseenter", move |_| {
                    if config.respect_reduced_motion && dom::prefers_reduced_motion() {
                        return;
                    }
                    let Some(permit) = BurstGuard::try_begin(&guard) else {
                        return;
                    };

                    match open_overlay(&card) {
                        Ok(overlay) => {
                            let stage = OverlayStage {
                                overlay,
                                particles: Vec::with_capacity(timeline.particles as usize),
                            };
                            let task =
                                ScheduledTask::spawn(play_burst(config, timeline, permit, stage, sleep));
                            let finished = burst.borrow_mut().replace(task);
                            drop(finished);
                        }
                        Err(err) => log_event(
                            &config,
                            LogLevel::Debug,
                            "effect_failed",
                            json!({ "effect": "contact_reactions", "error": err.to_string() }),
                        ),
                    }
                })
            };

            Some(Self {
                _hover: hover,
                burst,
            })
        }
    }

    impl Drop for ContactReactions {
        fn drop(&mut self) {
            let in_flight = self.burst.borrow_mut().take();
            drop(in_flight);
        }
    }

    fn open_overlay(card: &HtmlElement) -> Result<DetachOnDrop, DomError> {
        let document = dom::document()?;
        let overlay = dom::create_div(&document, OVERLAY_CLASS)?;
        dom::set_styles(
            &overlay,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("width", "100%"),
                ("height", "100%"),
                ("pointer-events", "none"),
                ("z-index", "10"),
                ("overflow", "visible"),
            ],
        )?;
        dom::set_style(card, "position", "relative");
        dom::append(card, &overlay)?;
        Ok(DetachOnDrop(overlay))
    }

    fn append_particle(overlay: &HtmlElement, spec: &ParticleSpec) -> Result<DetachOnDrop, DomError> {
        let document = dom::document()?;
        let particle = dom::create_div(&document, PARTICLE_CLASS)?;
        particle.set_text_content(Some(spec.emoji));

        let left = format!("{}%", spec.left_percent);
        let animation = spec.animation();
        dom::set_styles(
            &particle,
            &[
                ("pointer-events", "none"),
                ("left", left.as_str()),
                ("bottom", "10px"),
                ("position", "absolute"),
                ("animation", animation.as_str()),
            ],
        )?;
        dom::append(overlay, &particle)?;
        Ok(DetachOnDrop(particle))
    }

    struct OverlayStage {
        overlay: DetachOnDrop,
        particles: Vec<ScheduledTask>,
    }

    impl BurstStage for OverlayStage {
        fn spawn_particle(&mut self) -> Result<(), DomError> {
            let spec = ParticleSpec::roll(&mut js_sys::Math::random);
            let particle = append_particle(self.overlay.element(), &spec)?;
            let lifetime_ms = spec.lifetime_ms();
            self.particles.push(ScheduledTask::spawn(async move {
                sleep(lifetime_ms).await;
                drop(particle);
            }));
            Ok(())
        }

        fn close(self) {
            let Self { overlay, particles } = self;
            drop(overlay);
            drop(particles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::cell::RefCell;

    fn sequence(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut index = 0;
        move || {
            let value = values[index % values.len()];
            index += 1;
            value
        }
    }

    struct RecordingStage {
        clock: Rc<Cell<u64>>,
        guard: Rc<BurstGuard>,
        spawned_at: Rc<RefCell<Vec<u64>>>,
        closed: Rc<Cell<Option<(u64, bool)>>>,
        fail_spawns: bool,
    }

    impl BurstStage for RecordingStage {
        fn spawn_particle(&mut self) -> Result<(), DomError> {
            self.spawned_at.borrow_mut().push(self.clock.get());
            if self.fail_spawns {
                return Err(DomError::MissingNode("overlay"));
            }
            Ok(())
        }

        fn close(self) {
            self.closed.set(Some((self.clock.get(), self.guard.is_bursting())));
        }
    }

    struct BurstRun {
        spawned_at: Vec<u64>,
        closed: Option<(u64, bool)>,
        idle_after: bool,
    }

    fn run_burst(config: FxConfig, fail_spawns: bool) -> BurstRun {
        let clock = Rc::new(Cell::new(0_u64));
        let guard = Rc::new(BurstGuard::default());
        let spawned_at = Rc::new(RefCell::new(Vec::new()));
        let closed = Rc::new(Cell::new(None));

        let permit = BurstGuard::try_begin(&guard).expect("idle card starts a burst");
        let stage = RecordingStage {
            clock: clock.clone(),
            guard: guard.clone(),
            spawned_at: spawned_at.clone(),
            closed: closed.clone(),
            fail_spawns,
        };
        let sleeper = {
            let clock = clock.clone();
            move |millis: u32| {
                clock.set(clock.get() + u64::from(millis));
                std::future::ready(())
            }
        };

        play_burst(config, BurstTimeline::from_config(&config), permit, stage, sleeper)
            .now_or_never()
            .expect("burst completes without waiting on real timers");

        let spawned_at = spawned_at.borrow().clone();
        BurstRun {
            spawned_at,
            closed: closed.get(),
            idle_after: !guard.is_bursting(),
        }
    }

    #[test]
    fn default_burst_spawns_thirty_then_closes_after_linger() {
        let run = run_burst(FxConfig::default(), false);

        assert_eq!(run.spawned_at.len(), 30);
        assert_eq!(run.spawned_at.first(), Some(&267));
        assert_eq!(run.spawned_at.last(), Some(&8_010));

        let (closed_at, bursting_at_close) = run.closed.expect("overlay closed");
        assert_eq!(closed_at - 8_010, 3_000);
        assert!(bursting_at_close);
        assert!(run.idle_after);
    }

    #[test]
    fn failed_spawns_still_close_and_release_the_card() {
        let config = FxConfig {
            burst_particles: 4,
            burst_duration_ms: 400,
            burst_linger_ms: 50,
            ..FxConfig::default()
        };

        let run = run_burst(config, true);

        assert_eq!(run.spawned_at, vec![100, 200, 300, 400]);
        assert_eq!(run.closed.map(|(at, _)| at), Some(450));
        assert!(run.idle_after);
    }

    #[test]
    fn aborted_burst_releases_the_card() {
        let guard = Rc::new(BurstGuard::default());
        let permit = BurstGuard::try_begin(&guard).expect("idle card starts a burst");
        let stage = RecordingStage {
            clock: Rc::new(Cell::new(0)),
            guard: guard.clone(),
            spawned_at: Rc::new(RefCell::new(Vec::new())),
            closed: Rc::new(Cell::new(None)),
            fail_spawns: false,
        };

        let burst = play_burst(
            FxConfig::default(),
            BurstTimeline::from_config(&FxConfig::default()),
            permit,
            stage,
            |_| std::future::pending::<()>(),
        );
        let mut burst = Box::pin(burst);
        assert!(burst.as_mut().now_or_never().is_none());
        assert!(guard.is_bursting());

        drop(burst);
        assert!(!guard.is_bursting());
    }

    #[test]
    fn hover_during_burst_is_rejected() {
        let guard = Rc::new(BurstGuard::default());

        let permit = BurstGuard::try_begin(&guard).expect("idle card starts a burst");
        assert!(guard.is_bursting());
        assert!(BurstGuard::try_begin(&guard).is_none());
        assert!(BurstGuard::try_begin(&guard).is_none());

        drop(permit);
        assert!(!guard.is_bursting());
        assert!(BurstGuard::try_begin(&guard).is_some());
    }

    #[test]
    fn separate_cards_burst_independently() {
        let first = Rc::new(BurstGuard::default());
        let second = Rc::new(BurstGuard::default());

        let _a = BurstGuard::try_begin(&first).expect("first card idle");
        assert!(BurstGuard::try_begin(&second).is_some());
    }

    #[test]
    fn particle_rolls_stay_in_range() {
        let low = ParticleSpec::roll(&mut sequence(&[0.0]));
        assert_eq!(low.emoji, REACTION_PALETTE[0]);
        assert_eq!(low.left_percent, 10.0);
        assert_eq!(low.duration_secs, 2.5);
        assert_eq!(low.lifetime_ms(), 2_500);

        let high = ParticleSpec::roll(&mut sequence(&[0.999_999]));
        assert_eq!(high.emoji, REACTION_PALETTE[14]);
        assert!(high.left_percent < 90.0);
        assert!(high.duration_secs < 3.5);
    }

    #[test]
    fn particle_animation_uses_its_own_duration() {
        let spec = ParticleSpec::roll(&mut sequence(&[0.2, 0.5, 0.25]));

        assert_eq!(spec.emoji, REACTION_PALETTE[3]);
        assert_eq!(spec.left_percent, 50.0);
        assert_eq!(spec.animation(), "floatUp 2.75s ease-out forwards");
        assert_eq!(spec.lifetime_ms(), 2_750);
    }
}
