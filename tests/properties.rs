// Property tests for the invariants every game relies on.

use proptest::prelude::*;

use cosmic_arcade::SPACE_SYMBOLS;
use cosmic_arcade::config::ParticleConfig;
use cosmic_arcade::games::memory::{FlipOutcome, MemoryGame};
use cosmic_arcade::games::paint::Brush;
use cosmic_arcade::particles::{ParticleSystem, Point};
use cosmic_arcade::rng::GameRng;

proptest! {
    #[test]
    fn batch_removed_after_exactly_ceil_inverse_decay_steps(
        seed in any::<u64>(),
        count in 1usize..60,
        decay in 0.01f64..0.5,
    ) {
        let mut ps = ParticleSystem::new(ParticleConfig { decay, ..ParticleConfig::default() });
        ps.emit(Point::new(10.0, 10.0), count, &mut GameRng::seeded(seed));
        let steps = ps.steps_to_expire();
        for _ in 1..steps {
            prop_assert!(ps.step());
            prop_assert_eq!(ps.len(), count);
        }
        prop_assert!(!ps.step());
        prop_assert!(ps.is_empty());
    }

    #[test]
    fn every_deal_pairs_each_symbol(seed in any::<u64>(), flips in prop::collection::vec(0usize..16, 0..12)) {
        let mut g = MemoryGame::default();
        let mut rng = GameRng::seeded(seed);
        g.deal(SPACE_SYMBOLS, &mut rng);
        for i in flips {
            g.flip(i);
        }
        g.deal(SPACE_SYMBOLS, &mut rng);
        for s in SPACE_SYMBOLS {
            prop_assert_eq!(g.cards().iter().filter(|c| c.symbol == *s).count(), 2);
        }
        prop_assert!(g.cards().iter().all(|c| !c.flipped && !c.matched));
        prop_assert!(!g.is_locked());
    }

    #[test]
    fn locked_grid_rejects_every_flip(seed in any::<u64>(), third in 0usize..16) {
        let mut g = MemoryGame::default();
        g.deal(SPACE_SYMBOLS, &mut GameRng::seeded(seed));
        let a = 0;
        let b = g.cards().iter().position(|c| c.symbol != g.cards()[0].symbol).unwrap();
        g.flip(a);
        let locked = matches!(g.flip(b), FlipOutcome::Mismatched { .. });
        prop_assert!(locked);
        let before = g.cards().to_vec();
        prop_assert_eq!(g.flip(third), FlipOutcome::Rejected);
        prop_assert_eq!(g.cards(), &before[..]);
    }

    #[test]
    fn consecutive_segments_differ_by_one_degree(moves in 2usize..800) {
        let mut b = Brush::default();
        b.pointer_down(Point::new(0.0, 0.0));
        let mut prev = b.pointer_move(Point::new(1.0, 0.0)).unwrap();
        for i in 1..moves {
            let seg = b.pointer_move(Point::new(i as f64, 1.0)).unwrap();
            prop_assert_eq!(seg.hue, (prev.hue + 1) % 360);
            prop_assert_eq!(seg.from, prev.to);
            prev = seg;
        }
    }
}
