//! The mini-games. Each module pairs a pure state type (unit tested natively)
//! with an `install` function that binds it to the page.
//!
//! Games never talk to each other; the arcade shell only calls the setup hooks
//! exposed by `paint`, `memory` and `shatter` when their view is activated.

pub mod bubbles;
pub mod magic;
pub mod memory;
pub mod music;
pub mod paint;
pub mod shatter;

/// Format a hue as a CSS `hsl()` color.
pub(crate) fn hsl(hue: f64, saturation: u8, lightness: u8) -> String {
    format!("hsl({hue:.0}, {saturation}%, {lightness}%)")
}

/// Parse a `data-*` attribute value written by this crate.
pub fn parse_data<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw?.trim().parse().ok()
}

/// Pick from `pool` until the result differs from `current`.
/// Pools with fewer than two distinct entries return the first entry.
pub fn pick_different<'a>(
    pool: &[&'a str],
    current: &str,
    rng: &mut crate::rng::GameRng,
) -> &'a str {
    if !pool.iter().any(|p| *p != current) {
        return pool.first().copied().unwrap_or("");
    }
    loop {
        let cand = pool[rng.index(pool.len())];
        if cand != current {
            return cand;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    #[test]
    fn pick_different_never_repeats() {
        let mut rng = GameRng::seeded(5);
        let pool = ["a", "b", "c"];
        let mut cur = "a";
        for _ in 0..200 {
            let next = pick_different(&pool, cur, &mut rng);
            assert_ne!(next, cur);
            cur = next;
        }
    }

    #[test]
    fn pick_different_degenerate_pool() {
        let mut rng = GameRng::seeded(5);
        assert_eq!(pick_different(&["a"], "a", &mut rng), "a");
        assert_eq!(pick_different(&[], "a", &mut rng), "");
    }

    #[test]
    fn parse_data_accepts_numbers_only() {
        assert_eq!(parse_data::<u32>(Some("17".into())), Some(17));
        assert_eq!(parse_data::<usize>(Some(" 3 ".into())), Some(3));
        assert_eq!(parse_data::<u32>(Some("x".into())), None);
        assert_eq!(parse_data::<u32>(Some("-1".into())), None);
        assert_eq!(parse_data::<u32>(None), None);
    }

    #[test]
    fn hsl_format() {
        assert_eq!(hsl(120.4, 80, 60), "hsl(120, 80%, 60%)");
    }
}
