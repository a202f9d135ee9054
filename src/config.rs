//! Tunable constants for every game, grouped per module.
//!
//! With the `serde` feature the whole tree can be overridden from (partial)
//! JSON passed in from the host page.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gravity-particle physics used by the shatter effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ParticleConfig {
    pub gravity: f64,   // added to vy every frame
    pub decay: f64,     // subtracted from life every frame
    pub min_speed: f64, // px per frame
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            decay: 0.02,
            min_speed: 1.0,
            max_speed: 7.5,
            min_radius: 5.0,
            max_radius: 15.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MagicConfig {
    pub dots_per_click: usize,
    pub min_size: f64,
    pub max_size: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub kick_delay_ms: i32,
    pub ttl_ms: i32,
}

impl Default for MagicConfig {
    fn default() -> Self {
        Self {
            dots_per_click: 8,
            min_size: 10.0,
            max_size: 30.0,
            min_distance: 50.0,
            max_distance: 150.0,
            kick_delay_ms: 10,
            ttl_ms: 700,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ShatterConfig {
    pub canvas_size: u32,
    pub particles_per_click: usize,
    pub swap_delay_ms: i32,
}

impl Default for ShatterConfig {
    fn default() -> Self {
        Self { canvas_size: 400, particles_per_click: 40, swap_delay_ms: 400 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PaintConfig {
    pub line_width: f64,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self { line_width: 20.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BubbleConfig {
    pub spawn_interval_ms: i32,
    pub ttl_ms: i32,
    pub min_size: f64,
    pub max_size: f64,
    pub min_left_pct: f64,
    pub max_left_pct: f64,
    pub min_rise_s: f64,
    pub max_rise_s: f64,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 1000,
            ttl_ms: 5000,
            min_size: 40.0,
            max_size: 80.0,
            min_left_pct: 10.0,
            max_left_pct: 90.0,
            min_rise_s: 3.0,
            max_rise_s: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MemoryConfig {
    pub mismatch_delay_ms: i32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { mismatch_delay_ms: 1000 }
    }
}

/// Note envelope: linear attack to `peak`, exponential release to `floor`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MusicConfig {
    pub attack_s: f64,
    pub release_s: f64,
    pub peak_gain: f32,
    pub floor_gain: f32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self { attack_s: 0.05, release_s: 0.8, peak_gain: 0.4, floor_gain: 0.01 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct StarConfig {
    pub count: usize,
    pub max_size: f64,
    pub min_twinkle_s: f64,
    pub max_twinkle_s: f64,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self { count: 100, max_size: 3.0, min_twinkle_s: 2.0, max_twinkle_s: 5.0 }
    }
}

/// Root configuration handed to every installer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ArcadeConfig {
    pub particles: ParticleConfig,
    pub magic: MagicConfig,
    pub shatter: ShatterConfig,
    pub paint: PaintConfig,
    pub bubbles: BubbleConfig,
    pub memory: MemoryConfig,
    pub music: MusicConfig,
    pub stars: StarConfig,
}

#[cfg(feature = "serde_json")]
impl ArcadeConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_feel() {
        let cfg = ArcadeConfig::default();
        assert_eq!(cfg.particles.gravity, 0.2);
        assert_eq!(cfg.particles.decay, 0.02);
        assert_eq!(cfg.shatter.particles_per_click, 40);
        assert_eq!(cfg.magic.dots_per_click, 8);
        assert_eq!(cfg.bubbles.spawn_interval_ms, 1000);
        assert_eq!(cfg.bubbles.ttl_ms, 5000);
        assert_eq!(cfg.memory.mismatch_delay_ms, 1000);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ArcadeConfig::from_json(r#"{"particles":{"decay":0.05},"stars":{"count":10}}"#)
            .unwrap();
        assert_eq!(cfg.particles.decay, 0.05);
        assert_eq!(cfg.particles.gravity, 0.2);
        assert_eq!(cfg.stars.count, 10);
        assert_eq!(cfg.bubbles, BubbleConfig::default());
    }
}
