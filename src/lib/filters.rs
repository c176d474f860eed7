//! Audio filter presets and volume bounds.

use lavalink_rs::model::player::Filters;
use lavalink_rs::model::player::Timescale;

/// Highest volume the node accepts.
pub const MAX_VOLUME: u16 = 1000;

/// Sped up and pitched up.
pub fn nightcore() -> Filters {
    Filters {
        timescale: Some(Timescale {
            speed: Some(1.2),
            pitch: Some(1.2),
            rate: Some(1.0),
        }),
        ..Default::default()
    }
}

/// No filters at all, sending this clears whatever was applied.
pub fn reset() -> Filters {
    Filters::default()
}

/// Clamp a requested volume into what the node accepts.
pub fn clamp_volume(value: i64) -> u16 {
    value.clamp(0, MAX_VOLUME as i64) as u16
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nightcore_only_sets_timescale() {
        let filters = nightcore();
        let timescale = filters.timescale.as_ref().expect("timescale");
        assert_eq!(timescale.pitch, Some(1.2));
        assert_eq!(timescale.speed, Some(1.2));
        assert_eq!(timescale.rate, Some(1.0));
        assert!(filters.volume.is_none());
    }

    #[test]
    fn reset_is_empty() {
        let filters = reset();
        assert!(filters.timescale.is_none());
        assert!(filters.equalizer.is_none());
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(clamp_volume(-5), 0);
        assert_eq!(clamp_volume(50), 50);
        assert_eq!(clamp_volume(5000), MAX_VOLUME);
    }
}
