//! The rotating fact box: genre trivia with a fade-out/swap/fade-in cycle.
//!
//! On genre change a random fact for the new genre swaps in immediately;
//! afterwards facts rotate on a fixed interval. Reduced motion disables the
//! rotation timer and collapses the fades.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;
use serde::Deserialize;

const EMBEDDED_FACTS: &str = include_str!("../assets/facts.toml");
const FALLBACK_FACT: &str = "Facts will appear here for the selected genre.";
const NO_FACTS: &str = "No facts available for this genre.";
const FADE: Duration = Duration::from_millis(260);

#[derive(Debug, Deserialize)]
struct FactsFile {
    #[serde(default)]
    facts: HashMap<String, Vec<String>>,
}

/// Genre-keyed trivia texts.
pub struct FactDb {
    facts: HashMap<String, Vec<String>>,
}

impl FactDb {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let file: FactsFile = toml::from_str(text)?;
        Ok(Self { facts: file.facts })
    }

    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_FACTS).expect("embedded facts file must parse")
    }

    fn first(&self, genre: &str) -> Option<&str> {
        self.facts
            .get(genre)
            .and_then(|list| list.first())
            .map(String::as_str)
    }

    fn pick(&self, genre: &str) -> String {
        let Some(list) = self.facts.get(genre).filter(|l| !l.is_empty()) else {
            return NO_FACTS.to_string();
        };
        let mut rng = rand::rng();
        list.choose(&mut rng)
            .cloned()
            .unwrap_or_else(|| NO_FACTS.to_string())
    }
}

enum Phase {
    Steady,
    FadingOut { until: Instant, next: String },
}

/// The fact box state machine, advanced by the event loop's `tick(now)`.
pub struct FactBox {
    db: FactDb,
    genre: String,
    fact: String,
    visible: bool,
    phase: Phase,
    fade: Duration,
    rotate_every: Option<Duration>,
    next_rotate: Option<Instant>,
}

impl FactBox {
    pub fn new(
        db: FactDb,
        genre: &str,
        rotate_every_ms: u64,
        reduced_motion: bool,
        now: Instant,
    ) -> Self {
        let fact = db
            .first(genre)
            .unwrap_or(FALLBACK_FACT)
            .to_string();
        let rotate_every = if reduced_motion || rotate_every_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(rotate_every_ms))
        };

        Self {
            db,
            genre: genre.to_string(),
            fact,
            visible: true,
            phase: Phase::Steady,
            fade: if reduced_motion { Duration::ZERO } else { FADE },
            rotate_every,
            next_rotate: rotate_every.map(|every| now + every),
        }
    }

    pub fn fact(&self) -> &str {
        &self.fact
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Immediately swap to a fact of the new genre and restart the timer.
    pub fn on_genre_change(&mut self, genre: &str, now: Instant) {
        self.genre = genre.to_string();
        let next = self.db.pick(genre);
        self.begin_swap(next, now);
        self.next_rotate = self.rotate_every.map(|every| now + every);
    }

    fn begin_swap(&mut self, next: String, now: Instant) {
        self.visible = false;
        self.phase = Phase::FadingOut {
            until: now + self.fade,
            next,
        };
    }

    pub fn tick(&mut self, now: Instant) {
        let fade_done = matches!(&self.phase, Phase::FadingOut { until, .. } if now >= *until);
        if fade_done {
            if let Phase::FadingOut { next, .. } =
                std::mem::replace(&mut self.phase, Phase::Steady)
            {
                self.fact = next;
                self.visible = true;
            }
            return;
        }

        if matches!(self.phase, Phase::Steady) {
            if let Some(at) = self.next_rotate {
                if now >= at {
                    let next = self.db.pick(&self.genre);
                    self.begin_swap(next, now);
                    self.next_rotate = self.rotate_every.map(|every| now + every);
                }
            }
        }
    }
}
