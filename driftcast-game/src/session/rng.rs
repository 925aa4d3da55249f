//! Deterministic RNG streams for the session.
//!
//! Each mechanic draws from its own named stream so replays stay stable when
//! one mechanic changes how many draws it makes. Stream seeds are derived
//! from the single user-visible session seed via HMAC domain separation.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Per-stream RNG bundle for one session.
#[derive(Debug, Clone)]
pub struct RngBundle {
    cast: RefCell<CountingRng<SmallRng>>,
    fish: RefCell<CountingRng<SmallRng>>,
    events: RefCell<CountingRng<SmallRng>>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            cast: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"cast"))),
            fish: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"fish"))),
            events: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"events"))),
        }
    }

    /// Accuracy-roll stream used by cast resolution.
    #[must_use]
    pub fn cast(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.cast.borrow_mut()
    }

    /// Selection stream used by the catch resolver.
    #[must_use]
    pub fn fish(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.fish.borrow_mut()
    }

    /// Scheduling stream used for special-window delays.
    #[must_use]
    pub fn events(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.events.borrow_mut()
    }
}

/// RNG wrapper counting draw calls for telemetry and replay debugging.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes())
        .expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
